// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_gemtext_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with some content.\n\n* Bullet point\n* Another item\n> A quotation\n=> gemini://example.org/page Example page\n\n```rust | example\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_sectioned_gemtext(sections: usize, depth: usize) -> String {
    let mut content = String::new();

    for section in 0..sections {
        content.push_str(&format!("# Section {}\n\n", section));
        for level in 2..(2 + depth).min(4) {
            content.push_str(&format!("{} Subsection level {}\n\n", "#".repeat(level), level));
            content.push_str("Some paragraph content with multiple sentences.\n\n");
            for i in 0..3 {
                content.push_str(&format!("* Item {} at level {}\n", i, level));
            }
            content.push_str(&format!("=> /section/{}/{} Next\n\n", section, level));
        }
        if section % 3 == 0 {
            content.push_str("```\nlet value = 42;\n# not a heading\n```\n\n");
        }
    }

    content
}

#[allow(dead_code)]
pub fn generate_large_document() -> String {
    generate_sectioned_gemtext(200, 3)
}
