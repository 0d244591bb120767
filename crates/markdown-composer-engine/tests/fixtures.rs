use markdown_composer_engine::model::invariants;
use markdown_composer_engine::{parse_markdown, render_html, serialize_to_markdown};
use pretty_assertions::assert_eq;

#[test]
fn fixture_release_notes() {
    assert_canonical_fixture("release_notes");
}

#[test]
fn fixture_nested_lists() {
    assert_canonical_fixture("nested_lists");
}

/// Fixtures are written in canonical form, so they must survive a
/// parse/serialize cycle byte for byte.
fn assert_canonical_fixture(name: &str) {
    let md = std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.md",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap();

    let doc = parse_markdown(&md);
    invariants::check(&doc);
    assert_eq!(serialize_to_markdown(&doc), md.trim_end_matches('\n'));
}

#[test]
fn release_notes_html() {
    let md = std::fs::read_to_string(format!(
        "{}/tests/fixtures/release_notes.md",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap();
    let html = render_html(&parse_markdown(&md));
    let lines: Vec<&str> = html.lines().collect();

    assert_eq!(lines[0], "<h1>Release notes</h1>");
    assert_eq!(
        lines[2],
        "<p>The composer now supports <strong>bold</strong>, <em>italic</em>, \
         <u>underline</u>, <s>strikethrough</s> and <code>inline code</code>.</p>"
    );
    assert!(html.contains("<a href=\"https://example.com/docs\">links</a>"));
    assert!(html.contains("<pre><code>fn main() {\n    println!(\"hi\");\n}</code></pre>"));
}
