use anyhow::{Context, Result, bail};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use gemtext_spans_config::Config;
use gemtext_spans_engine::parsing::rope::{LineRef, lines_in};
use gemtext_spans_engine::parsing::snapshot::normalize;
use gemtext_spans_engine::{
    Document, Face, FaceStyle, FoldTree, HandlerRegistry, Renderer, io, outline,
};
use log::{debug, info};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::collections::BTreeSet;
use std::io::{Stdout, stdout};
use std::str::FromStr;
use std::path::{Path, PathBuf};
use std::{env, process};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    View,
    Spans,
    Outline,
    InitConfig,
}

struct App {
    path: PathBuf,
    document: Document,
    renderer: Renderer,
    fence_styles: HandlerRegistry<FaceStyle>,
    tab_width: usize,
    lines: Vec<LineRef>,
    /// Heading starts whose bodies are hidden.
    folded: BTreeSet<usize>,
    /// Index into the visible lines.
    cursor: usize,
    scroll: usize,
    status: String,
}

impl App {
    fn new(path: PathBuf, document: Document, config: &Config) -> Self {
        let lines = lines_in(document.rope(), 0..document.len()).collect();
        Self {
            path,
            document,
            renderer: Renderer::new(config.theme.clone()),
            fence_styles: config.fence_styles(),
            tab_width: config.viewer.tab_width,
            lines,
            folded: BTreeSet::new(),
            cursor: 0,
            scroll: 0,
            status: String::new(),
        }
    }

    /// Lines not hidden inside a folded body.
    fn visible_lines(&self) -> Vec<&LineRef> {
        let tree = FoldTree::build(self.document.store(), 0..self.document.len());
        let hidden: Vec<_> = tree
            .iter()
            .filter(|node| self.folded.contains(&node.heading.start))
            .map(|node| node.body.clone())
            .collect();
        self.lines
            .iter()
            .filter(|line| !hidden.iter().any(|body| body.contains(&line.range.start)))
            .collect()
    }

    fn cursor_pos(&self) -> Option<usize> {
        self.visible_lines()
            .get(self.cursor)
            .map(|line| line.range.start)
    }

    fn move_cursor(&mut self, down: bool) {
        let count = self.visible_lines().len();
        if down {
            self.cursor = (self.cursor + 1).min(count.saturating_sub(1));
        } else {
            self.cursor = self.cursor.saturating_sub(1);
        }
        self.update_status();
    }

    fn toggle_fold(&mut self) {
        let Some(pos) = self.cursor_pos() else {
            return;
        };
        let tree = FoldTree::build(self.document.store(), 0..self.document.len());
        let Some(node) = tree.fold_at(pos) else {
            self.status = "Not under a heading".to_string();
            return;
        };
        let heading = node.heading.start;
        if !self.folded.remove(&heading) {
            self.folded.insert(heading);
        }
        debug!("toggled fold at {heading}, {} folded", self.folded.len());
        // Keep the cursor on the heading that was folded.
        if let Some(index) = self
            .visible_lines()
            .iter()
            .position(|line| line.range.start == heading)
        {
            self.cursor = index;
        }
        self.update_status();
    }

    fn update_status(&mut self) {
        let Some(pos) = self.cursor_pos() else {
            self.status.clear();
            return;
        };
        self.status = if let Some(link) = self.document.link_at(pos) {
            let kind = if link.is_absolute() {
                "absolute"
            } else {
                "relative"
            };
            format!("{kind} link: {} ({})", link.url, link.display_text())
        } else if let Some(block) = self.document.fenced_block_at(pos) {
            let state = if block.is_open() { ", unterminated" } else { "" };
            format!(
                "preformatted block: {}{state}",
                block.info.language.as_deref().unwrap_or("plain")
            )
        } else {
            String::new()
        };
    }

    /// Styled spans for one line.
    fn render_line(&self, line: &LineRef) -> Line<'static> {
        let content = line.content_range();
        let text = line.content();
        let highlights: Vec<_> = self
            .renderer
            .render(self.document.store(), content.clone())
            .collect();

        let mut cuts: BTreeSet<usize> = BTreeSet::from([content.start, content.end]);
        for highlight in &highlights {
            cuts.insert(highlight.range.start);
            cuts.insert(highlight.range.end);
        }
        let cuts: Vec<usize> = cuts.into_iter().collect();

        let block_style = highlights
            .iter()
            .any(|h| h.face == Face::Preformatted)
            .then(|| {
                let language = self
                    .document
                    .fenced_block_at(content.start)
                    .and_then(|block| block.info.language);
                to_style(self.fence_styles.resolve(language.as_deref()))
            });

        let spans = cuts
            .windows(2)
            .filter(|w| w[0] < w[1])
            .map(|w| {
                let style = highlights
                    .iter()
                    .filter(|h| h.range.start <= w[0] && w[1] <= h.range.end)
                    .fold(Style::default(), |style, h| match (h.face, block_style) {
                        (Face::Preformatted, Some(block)) => style.patch(block),
                        _ => style.patch(to_style(h.style)),
                    });
                let piece = &text[w[0] - content.start..w[1] - content.start];
                Span::styled(expand_tabs(piece, self.tab_width), style)
            })
            .collect::<Vec<_>>();
        Line::from(spans)
    }
}

/// Converts a theme style. Unknown colour names are ignored.
fn to_style(face: &FaceStyle) -> Style {
    let mut style = Style::default();
    if let Some(fg) = face.fg.as_deref().and_then(|c| Color::from_str(c).ok()) {
        style = style.fg(fg);
    }
    if let Some(bg) = face.bg.as_deref().and_then(|c| Color::from_str(c).ok()) {
        style = style.bg(bg);
    }
    for (set, modifier) in [
        (face.bold, Modifier::BOLD),
        (face.italic, Modifier::ITALIC),
        (face.underline, Modifier::UNDERLINED),
    ] {
        if set {
            style = style.add_modifier(modifier);
        }
    }
    style
}

fn expand_tabs(text: &str, tab_width: usize) -> String {
    text.replace('\t', &" ".repeat(tab_width))
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {program} [--spans|--outline] [file.gmi]");
    eprintln!("       {program} --init-config");
    eprintln!(
        "Without a file, viewer.default_file from {} is opened",
        Config::config_path().display()
    );
    process::exit(1);
}

fn parse_args(args: &[String]) -> Result<(Mode, Option<PathBuf>)> {
    let mut mode = Mode::View;
    let mut file = None;
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--spans" => mode = Mode::Spans,
            "--outline" => mode = Mode::Outline,
            "--init-config" => mode = Mode::InitConfig,
            flag if flag.starts_with("--") => bail!("unknown option {flag}"),
            path if file.is_none() => file = Some(PathBuf::from(path)),
            _ => bail!("more than one file given"),
        }
    }
    Ok((mode, file))
}

/// Writes the default config to `path` unless a file is already there.
/// Returns whether a file was written.
fn init_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    Config::default().save_to_path(path)?;
    Ok(true)
}

fn print_outline(document: &Document) {
    let text = document.text();
    for entry in outline::headings(document.store(), 0..document.len()) {
        let indent = "  ".repeat(usize::from(entry.level) - 1);
        println!("{indent}{}", &text[entry.range]);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("gemtext-spans-cli", String::as_str);
    let (mode, file) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {e}");
            usage(program);
        }
    };

    if mode == Mode::InitConfig {
        let config_path = Config::config_path();
        if init_config(&config_path)? {
            info!("created default config at {}", config_path.display());
            println!("Wrote default config to {}", config_path.display());
        } else {
            println!("Config already exists at {}", config_path.display());
        }
        return Ok(());
    }

    let config = match Config::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let Some(path) = file.or_else(|| config.viewer.default_file.clone()) else {
        eprintln!("Error: No file given and no default file configured");
        usage(program);
    };

    let document = io::read_document(&path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    info!(
        "loaded {} ({} bytes, {} spans)",
        path.display(),
        document.len(),
        document.store().len()
    );

    match mode {
        Mode::Spans => {
            print!("{}", normalize(document.rope(), document.store()));
            return Ok(());
        }
        Mode::Outline => {
            print_outline(&document);
            return Ok(());
        }
        Mode::View | Mode::InitConfig => {}
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(path, document, &config);
    app.update_status();

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.move_cursor(true),
                KeyCode::Up | KeyCode::Char('k') => app.move_cursor(false),
                KeyCode::Tab => app.toggle_fold(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1), Constraint::Length(1)].as_ref())
        .split(f.area());

    let height = chunks[0].height.saturating_sub(2) as usize;
    if app.cursor < app.scroll {
        app.scroll = app.cursor;
    } else if height > 0 && app.cursor >= app.scroll + height {
        app.scroll = app.cursor + 1 - height;
    }

    let visible = app.visible_lines();
    let content_text: Vec<Line> = visible
        .iter()
        .enumerate()
        .skip(app.scroll)
        .take(height)
        .map(|(index, line)| {
            let folded = app.folded.contains(&line.range.start);
            let mut rendered = app.render_line(line);
            if folded {
                rendered.push_span(Span::styled(" …", Style::default().fg(Color::DarkGray)));
            }
            if index == app.cursor {
                rendered = rendered.patch_style(Style::default().bg(Color::Indexed(236)));
            }
            rendered
        })
        .collect();

    let title = format!("{} ({} spans)", app.path.display(), app.document.store().len());
    let content = Paragraph::new(content_text).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(content, chunks[0]);

    f.render_widget(Paragraph::new(app.status.clone()), chunks[1]);

    let help_text = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k: Previous | "),
        Span::raw("↓/j: Next | "),
        Span::raw("Tab: Fold heading"),
    ]);
    f.render_widget(Paragraph::new(help_text), chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn app(text: &str) -> App {
        App::new(
            PathBuf::from("test.gmi"),
            Document::from_text(text),
            &Config::default(),
        )
    }

    #[test]
    fn test_to_style_maps_colours_and_modifiers() {
        let style = to_style(&FaceStyle::fg("#ff8800").bold().underline());
        assert_eq!(style.fg, Some(Color::Rgb(0xff, 0x88, 0x00)));
        assert!(style.add_modifier.contains(Modifier::BOLD));
        assert!(style.add_modifier.contains(Modifier::UNDERLINED));
        assert!(!style.add_modifier.contains(Modifier::ITALIC));

        let unknown = to_style(&FaceStyle::fg("not-a-colour"));
        assert_eq!(unknown.fg, None);
    }

    #[test]
    fn test_parse_args() {
        let args = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let (mode, file) = parse_args(&args(&["cli", "--spans", "a.gmi"])).unwrap();
        assert_eq!(mode, Mode::Spans);
        assert_eq!(file, Some(PathBuf::from("a.gmi")));

        let (mode, file) = parse_args(&args(&["cli"])).unwrap();
        assert_eq!(mode, Mode::View);
        assert_eq!(file, None);

        let (mode, file) = parse_args(&args(&["cli", "--init-config"])).unwrap();
        assert_eq!(mode, Mode::InitConfig);
        assert_eq!(file, None);

        assert!(parse_args(&args(&["cli", "--nope"])).is_err());
        assert!(parse_args(&args(&["cli", "a", "b"])).is_err());
    }

    #[test]
    fn test_init_config_writes_defaults_once() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("gemtext-spans/config.toml");

        assert!(init_config(&config_path).unwrap());
        let written = Config::load_from_path(&config_path).unwrap().unwrap();
        assert_eq!(written, Config::default());

        std::fs::write(&config_path, "[viewer]\ntab_width = 2\n").unwrap();
        assert!(!init_config(&config_path).unwrap());
        let kept = Config::load_from_path(&config_path).unwrap().unwrap();
        assert_eq!(kept.viewer.tab_width, 2);
    }

    #[test]
    fn test_fold_hides_body_lines() {
        let mut app = app("# A\na\n## B\nb\n# C\n");
        assert_eq!(app.visible_lines().len(), 5);

        app.toggle_fold();
        let starts: Vec<_> = app.visible_lines().iter().map(|l| l.range.start).collect();
        assert_eq!(starts, vec![0, 13]);
        assert_eq!(app.cursor, 0);

        app.toggle_fold();
        assert_eq!(app.visible_lines().len(), 5);
    }

    #[test]
    fn test_render_line_splits_on_highlights() {
        let app = app("=> /about About\n");
        let line = app.render_line(&app.lines[0]);
        let text: Vec<_> = line.spans.iter().map(|s| s.content.to_string()).collect();
        assert_eq!(text, vec!["=>", " ", "/about", " About"]);
    }

    #[test]
    fn test_status_describes_link_and_block() {
        let mut app = app("=> gemini://x.org X\n```rust\nfn f() {}\n```\n");
        app.update_status();
        assert!(app.status.starts_with("absolute link: gemini://x.org"));
        app.move_cursor(true);
        app.move_cursor(true);
        assert_eq!(app.status, "preformatted block: rust");
    }

    #[test]
    fn test_expand_tabs() {
        assert_eq!(expand_tabs("a\tb", 2), "a  b");
    }
}
