use serde::{Deserialize, Serialize};

/// A display role assigned to a range of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    Markup,
    Heading1,
    Heading2,
    Heading3,
    ListItem,
    Quote,
    LinkUrl,
    LinkLabel,
    /// Whole link line, layered over the url and label faces.
    LinkAffordance,
    FenceInfo,
    Preformatted,
}

impl Face {
    pub fn heading(level: u8) -> Face {
        match level {
            1 => Face::Heading1,
            2 => Face::Heading2,
            _ => Face::Heading3,
        }
    }
}

/// How one face looks. Colours are names or hex strings interpreted by
/// the host (`"blue"`, `"#ff8800"`); unset fields leave the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceStyle {
    pub fg: Option<String>,
    pub bg: Option<String>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl FaceStyle {
    pub fn fg(color: &str) -> Self {
        Self {
            fg: Some(color.to_string()),
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }
}

/// Immutable face table handed to the renderer at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub markup: FaceStyle,
    pub heading1: FaceStyle,
    pub heading2: FaceStyle,
    pub heading3: FaceStyle,
    pub list_item: FaceStyle,
    pub quote: FaceStyle,
    pub link_url: FaceStyle,
    pub link_label: FaceStyle,
    pub link_affordance: FaceStyle,
    pub fence_info: FaceStyle,
    pub preformatted: FaceStyle,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            markup: FaceStyle::fg("darkgray"),
            heading1: FaceStyle::fg("magenta").bold().underline(),
            heading2: FaceStyle::fg("magenta").bold(),
            heading3: FaceStyle::fg("blue").bold(),
            list_item: FaceStyle::default(),
            quote: FaceStyle::fg("green").italic(),
            link_url: FaceStyle::fg("cyan"),
            link_label: FaceStyle::fg("lightcyan"),
            link_affordance: FaceStyle::default().underline(),
            fence_info: FaceStyle::fg("yellow").italic(),
            preformatted: FaceStyle::fg("gray"),
        }
    }
}

impl Theme {
    pub fn style(&self, face: Face) -> &FaceStyle {
        match face {
            Face::Markup => &self.markup,
            Face::Heading1 => &self.heading1,
            Face::Heading2 => &self.heading2,
            Face::Heading3 => &self.heading3,
            Face::ListItem => &self.list_item,
            Face::Quote => &self.quote,
            Face::LinkUrl => &self.link_url,
            Face::LinkLabel => &self.link_label,
            Face::LinkAffordance => &self.link_affordance,
            Face::FenceInfo => &self.fence_info,
            Face::Preformatted => &self.preformatted,
        }
    }
}
