// Shared by the bench targets in this directory; each uses a different subset.
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n## Section\nParagraph with **bold**, *italic* and `code`.\n- Bullet point\n  - Nested item\n- Another [link](https://example.com)\n> Quoted <u>text</u>\n```\nfn example() {\n    println!(\"Hello\");\n}\n```\n";
    base.repeat(size)
}

/// Long lines of unmatched openers; exercises the inline parser's memo.
#[allow(dead_code)]
pub fn generate_pathological_inline(len: usize) -> String {
    "*[<u>~~`".repeat(len)
}
