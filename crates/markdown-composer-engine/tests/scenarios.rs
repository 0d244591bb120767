use markdown_composer_engine::editing::{
    EditorSession, Point, Selection, SessionOptions, lift, sink, toggle_block, toggle_mark,
};
use markdown_composer_engine::model::invariants;
use markdown_composer_engine::{
    Block, BlockKind, Document, Mark, MessageLog, create_document, parse_markdown,
    serialize_to_markdown,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn caret(path: &[usize]) -> Selection {
    Selection::collapsed(Point::new(path.to_vec(), 0))
}

#[test]
fn bold_hello() {
    let doc = Document::from_blocks([Block::paragraph("hello")]);
    let bold = toggle_mark(&doc, &Selection::all(&doc), Mark::Bold).unwrap();
    assert_eq!(serialize_to_markdown(&bold), "**hello**");
}

#[test]
fn two_paragraphs_become_one_bulleted_list() {
    let doc = Document::from_blocks([Block::paragraph("a"), Block::paragraph("b")]);
    let list = toggle_block(&doc, &Selection::all(&doc), BlockKind::BulletedList).unwrap();
    invariants::check(&list);
    assert_eq!(serialize_to_markdown(&list), "- a\n- b");
}

#[test]
fn numbered_list_switches_to_bullets_without_nesting() {
    let doc = parse_markdown("1. x\n2. y");
    let bullets = toggle_block(&doc, &Selection::all(&doc), BlockKind::BulletedList).unwrap();
    invariants::check(&bullets);
    assert_eq!(serialize_to_markdown(&bullets), "- x\n- y");
}

#[test]
fn heading_and_paragraph_parse() {
    assert_eq!(
        parse_markdown("# Title\n\nplain text"),
        Document::from_blocks([
            Block::with_text(BlockKind::Heading1, "Title"),
            Block::paragraph("plain text"),
        ])
    );
}

#[test]
fn sink_then_lift_round_trips() {
    let doc = parse_markdown("- one\n- two\n- three");
    let sunk = sink(&doc, &caret(&[0, 1, 0])).unwrap();
    invariants::check(&sunk);

    let item = sunk.block(&[0, 1]).unwrap();
    assert_eq!(item.children.len(), 1);
    let nested = item.children[0].as_block().unwrap();
    assert_eq!(nested.kind, BlockKind::BulletedList);
    assert_eq!(nested.children.len(), 1);

    let lifted = lift(&sunk, &caret(&[0, 1, 0, 0, 0])).unwrap();
    assert_eq!(lifted, doc);
}

#[test]
fn empty_document_has_one_paragraph() {
    let doc = create_document();
    assert_eq!(doc, Document::from_blocks([Block::paragraph("")]));
    assert_eq!(serialize_to_markdown(&doc), "");
}

#[rstest]
#[case("hello")]
#[case("**hello**")]
#[case("`code` only")]
#[case("# Title\n- a\n- b")]
#[case("first\nsecond")]
#[case("- a\n  - b\n- c")]
fn bold_twice_is_identity_on_uniform_text(#[case] markdown: &str) {
    let doc = parse_markdown(markdown);
    let all = Selection::all(&doc);
    let once = toggle_mark(&doc, &all, Mark::Bold).unwrap();
    invariants::check(&once);
    assert_eq!(toggle_mark(&once, &all, Mark::Bold).unwrap(), doc);
}

#[rstest]
#[case::heading(BlockKind::Heading1)]
#[case::subheading(BlockKind::Heading2)]
#[case::quote(BlockKind::BlockQuote)]
#[case::code(BlockKind::CodeBlock)]
#[case::bullets(BlockKind::BulletedList)]
#[case::numbers(BlockKind::NumberedList)]
fn block_toggle_twice_returns_to_paragraphs(#[case] kind: BlockKind) {
    let doc = Document::from_blocks([Block::paragraph("a"), Block::paragraph("b")]);
    let on = toggle_block(&doc, &Selection::all(&doc), kind).unwrap();
    invariants::check(&on);
    let off = toggle_block(&on, &Selection::all(&on), kind).unwrap();
    invariants::check(&off);
    assert_eq!(off, doc);
}

#[test]
fn session_composes_and_submits() {
    let mut session = EditorSession::new(&SessionOptions::default());
    session.insert_text(&caret(&[0, 0]), "ship it").unwrap();
    let all = Selection::all(session.document());
    session.toggle_block(&all, BlockKind::Heading2).unwrap();
    session.toggle_mark(&all, Mark::Italic).unwrap();
    assert_eq!(session.to_markdown(), "## *ship it*");
    assert_eq!(session.to_html(), "<h2><em>ship it</em></h2>");

    let mut log = MessageLog::new();
    let id = session.submit(&mut log).unwrap();
    assert_eq!(log.get(id).unwrap().markdown, "## *ship it*");
    assert_eq!(session.document(), &create_document());
}
