use crate::{compile_to_html, serialize, CompileOptions};
use mailblock_model::{template_for, Block, BlockType, IDGenerator, StyleKey};

fn block(id: &str, block_type: BlockType) -> Block {
    Block::new(id, block_type)
}

#[test]
fn test_empty_document_renders_nothing() {
    assert_eq!(serialize(&[]), "");
}

#[test]
fn test_image_without_url_keeps_its_wrapper() {
    let html = serialize(&[block("i", BlockType::Image)]);

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<div data-block=\"image\" style=\"padding: 0;"));
    assert!(html.contains("margin: 0;\"></div>"));
    assert!(!html.contains("<img"));
}

#[test]
fn test_document_shell() {
    let html = serialize(&[block("h", BlockType::Header).with_content("Weekly")]);

    println!("Generated HTML:\n{}", html);

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<meta charset=\"UTF-8\">"));
    assert!(html.contains("<title>Newsletter</title>"));
    assert!(html.contains("background-color: #f4f4f4"));
    assert!(html.contains("<table width=\"600\""));
    assert!(html.trim_end().ends_with("</html>"));
}

#[test]
fn test_header_uses_defaults() {
    let html = serialize(&[block("h", BlockType::Header).with_content("Weekly")]);

    assert!(html.contains(
        "<h1 data-block=\"header\" style=\"font-size: 32px; font-family: Arial, sans-serif; color: #333333; text-align: center; padding: 32px 24px 24px 24px; background-color: #ffffff; margin: 0;\">Weekly</h1>"
    ));
}

#[test]
fn test_blank_content_gets_placeholders() {
    let html = serialize(&[
        block("h", BlockType::Header).with_content("   "),
        block("t", BlockType::Text),
    ]);

    assert!(html.contains(">Header</h1>"));
    assert!(html.contains("<p>Text content</p></div>"));
}

#[test]
fn test_text_content_is_inserted_verbatim() {
    let html = serialize(&[block("t", BlockType::Text)
        .with_content("<p>Hi <em>there</em> &amp; bye</p>")
        .with_style(StyleKey::LineHeight, "2")]);

    assert!(html.contains("line-height: 2;"));
    assert!(html.contains("<p>Hi <em>there</em> &amp; bye</p>"));
}

#[test]
fn test_image_alignment_margins() {
    let centered = serialize(&[block("i", BlockType::Image)
        .with_style(StyleKey::ImageUrl, "https://img.test/a.png")]);
    assert!(centered.contains("src=\"https://img.test/a.png\""));
    assert!(centered.contains("width=\"600\""));
    assert!(centered.contains("margin: 0 auto;"));
    assert!(centered.contains("text-align: center;"));

    let right = serialize(&[block("i", BlockType::Image)
        .with_style(StyleKey::ImageUrl, "https://img.test/a.png")
        .with_style(StyleKey::ImageAlign, "right")]);
    assert!(right.contains("margin: 0 0 0 auto;"));

    let left = serialize(&[block("i", BlockType::Image)
        .with_style(StyleKey::ImageUrl, "https://img.test/a.png")
        .with_style(StyleKey::ImageAlign, "left")]);
    assert!(left.contains("display: block; margin: 0;"));
}

#[test]
fn test_button_escapes_label_and_url() {
    let html = serialize(&[block("b", BlockType::Button)
        .with_style(StyleKey::ButtonText, "Tom & <Jerry>")
        .with_style(StyleKey::ButtonUrl, "https://x.test/?a=1&b=\"2\"")]);

    println!("Generated HTML:\n{}", html);

    assert!(html.contains(">Tom &amp; &lt;Jerry&gt;</a>"));
    assert!(html.contains("href=\"https://x.test/?a=1&amp;b=&quot;2&quot;\""));
    assert!(html.contains("background-color: #2563eb;"));
    assert!(html.contains("border-radius: 4px;"));
    assert!(html.contains("font-weight: 600;"));
}

#[test]
fn test_divider_and_spacer() {
    let html = serialize(&[
        block("d", BlockType::Divider)
            .with_style(StyleKey::DividerColor, "#ff0000")
            .with_style(StyleKey::DividerHeight, "2px"),
        block("s", BlockType::Spacer).with_style(StyleKey::SpacerHeight, "16px"),
    ]);

    assert!(html.contains(
        "<hr style=\"border: none; border-top: 2px solid #ff0000; width: 100%; margin: 0;\" />"
    ));
    assert!(html.contains(
        "<div data-block=\"spacer\" style=\"height: 16px; background-color: #ffffff;\"></div>"
    ));
}

#[test]
fn test_columns_layout_and_slots() {
    let columns = Block::columns(
        "c",
        block("l", BlockType::Image).with_style(StyleKey::ImageUrl, "https://img.test/l.png"),
        block("r", BlockType::Text),
    )
    .with_style(StyleKey::ColumnLayout, "33-67");

    let html = serialize(&[columns]);

    println!("Generated HTML:\n{}", html);

    assert!(html.contains("data-block=\"columns\""));
    assert!(html.contains("<td width=\"33.33%\" style=\"padding: 10px; vertical-align: top;\">"));
    assert!(html.contains("<td width=\"66.67%\" style=\"padding: 10px; vertical-align: top;\">"));
    assert!(html.contains("src=\"https://img.test/l.png\""));
    assert!(html.contains("<p>&nbsp;</p>"));
}

#[test]
fn test_columns_image_slot_without_url_is_marked() {
    let columns = Block::columns(
        "c",
        block("l", BlockType::Image),
        block("r", BlockType::Text).with_content("<p>Right</p>"),
    );

    let html = serialize(&[columns]);

    assert!(html.contains("<td width=\"50%\""));
    assert!(html.contains("<div data-block=\"image\"></div>"));
    assert!(!html.contains("<img"));
    assert!(html.contains("<p>Right</p>"));
}

#[test]
fn test_blocks_render_in_sequence_order() {
    let html = serialize(&[
        block("a", BlockType::Text).with_content("<p>first</p>"),
        block("b", BlockType::Text).with_content("<p>second</p>"),
    ]);

    let first = html.find("first").unwrap();
    let second = html.find("second").unwrap();
    assert!(first < second);
}

#[test]
fn test_output_is_deterministic() {
    let mut ids = IDGenerator::new("determinism");
    let blocks: Vec<Block> = BlockType::ALL
        .into_iter()
        .map(|t| template_for(t).instantiate(&mut ids))
        .collect();

    assert_eq!(serialize(&blocks), serialize(&blocks));
}

#[test]
fn test_compact_output() {
    let options = CompileOptions {
        pretty: false,
        title: "Issue #4".to_string(),
        ..Default::default()
    };
    let html = compile_to_html(&[block("t", BlockType::Text)], options);

    assert!(!html.contains('\n'));
    assert!(html.contains("<title>Issue #4</title>"));
}
