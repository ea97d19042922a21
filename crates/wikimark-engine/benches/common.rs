// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with some content.\n\n- Bullet point\n  - Nested item\n- Another item\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_wiki_content(size: usize) -> String {
    let base = "# Page\n\nSee [[Free Link]] and WikiWord, or [[label|Other Page]].\n\nVisit http://example.com/path?q=1 and ask @cdent about ~NotALink.\n\n- item with `CodeWord`\n- WikiLink@cdent\n\n";
    base.repeat(size)
}
