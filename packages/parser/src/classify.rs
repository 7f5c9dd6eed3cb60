//! Turning candidate nodes into blocks.

use crate::candidates::{is_recognized, two_cells, BLOCK_MARKER};
use crate::dom::{escape_text, Element, HtmlNode};
use crate::inline_style::{BorderTop, InlineStyle};
use mailblock_model::{Block, BlockType, ColumnLayout, IDGenerator, StyleKey, Styles};

/// Inline CSS properties read back into typography styles
const TYPOGRAPHY: [(&str, StyleKey); 6] = [
    ("font-size", StyleKey::FontSize),
    ("font-family", StyleKey::FontFamily),
    ("color", StyleKey::Color),
    ("text-align", StyleKey::TextAlign),
    ("line-height", StyleKey::LineHeight),
    ("font-weight", StyleKey::FontWeight),
];

/// Markup that never carries newsletter content
const IGNORED_TAGS: [&str; 6] = ["script", "style", "meta", "link", "title", "template"];

pub struct Classifier<'a> {
    ids: &'a mut IDGenerator,
    blocks: Vec<Block>,
}

impl<'a> Classifier<'a> {
    pub fn new(ids: &'a mut IDGenerator) -> Self {
        Self {
            ids,
            blocks: Vec::new(),
        }
    }

    pub fn finish(self) -> Vec<Block> {
        self.blocks
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn push_text(&mut self, content: String) {
        let block = Block::new(self.ids.new_id(), BlockType::Text).with_content(content);
        self.blocks.push(block);
    }

    pub fn classify_nodes(&mut self, nodes: &[HtmlNode]) {
        for node in nodes {
            match node {
                HtmlNode::Element(el) => self.classify_element(el),
                HtmlNode::Text(text) if !text.trim().is_empty() => {
                    self.push_text(format!("<p>{}</p>", escape_text(text.trim())));
                }
                HtmlNode::Text(_) | HtmlNode::Comment(_) => {}
            }
        }
    }

    pub fn classify_element(&mut self, el: &Element) {
        if let Some(block) = self.marked(el) {
            self.blocks.push(block);
            return;
        }

        match el.tag.as_str() {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => self.heading(el),
            "img" => self.image(el),
            "a" => self.anchor(el),
            "hr" => self.divider(el),
            "p" => self.paragraph(el),
            "div" | "span" | "section" | "article" | "main" | "center" => self.container(el),
            "table" => self.table(el),
            tag if IGNORED_TAGS.contains(&tag) => {}
            _ => {
                let inner = el.inner_html();
                if !inner.trim().is_empty() {
                    self.push_text(inner.trim().to_string());
                }
            }
        }
    }

    fn new_block(&mut self, block_type: BlockType) -> Block {
        Block::new(self.ids.new_id(), block_type)
    }

    fn heading(&mut self, el: &Element) {
        let style = el.style();
        let mut styles = Styles::new();

        copy_typography(&style, &mut styles);
        copy_box(&style, &mut styles);

        if styles.get(StyleKey::FontSize).is_none() {
            if let Some(size) = heading_font_size(&el.tag) {
                styles.set(StyleKey::FontSize, size);
            }
        }
        let align = match style.get("text-align") {
            Some(align @ ("left" | "center" | "right" | "justify")) => align,
            _ => "center",
        };
        styles.set(StyleKey::TextAlign, align);

        let block = self
            .new_block(BlockType::Header)
            .with_content(el.inner_html().trim())
            .with_styles(styles);
        self.blocks.push(block);
    }

    fn image(&mut self, el: &Element) {
        let mut styles = Styles::new();
        styles.set(StyleKey::ImageUrl, el.attr("src").unwrap_or("").trim());
        if let Some(width) = el.style().get("width") {
            styles.set(StyleKey::ImageWidth, width);
        }

        let block = self.new_block(BlockType::Image).with_styles(styles);
        self.blocks.push(block);
    }

    fn anchor(&mut self, el: &Element) {
        let style = el.style();
        let Some(color) = style.background_color() else {
            self.push_text(format!("<p>{}</p>", el.outer_html()));
            return;
        };

        let label = el.text_content();
        let label = match label.trim() {
            "" => "Click Here",
            label => label,
        };
        let url = match el.attr("href").map(str::trim) {
            Some(href) if !href.is_empty() => href,
            _ => "#",
        };

        let block = self
            .new_block(BlockType::Button)
            .with_style(StyleKey::ButtonText, label)
            .with_style(StyleKey::ButtonUrl, url)
            .with_style(StyleKey::ButtonColor, color);
        self.blocks.push(block);
    }

    fn divider(&mut self, el: &Element) {
        let mut styles = Styles::new();
        read_rule(el, &mut styles);

        let block = self.new_block(BlockType::Divider).with_styles(styles);
        self.blocks.push(block);
    }

    fn paragraph(&mut self, el: &Element) {
        let inner = el.inner_html();
        if inner.trim().is_empty() {
            return;
        }

        let style = el.style();
        let mut styles = Styles::new();
        copy_typography(&style, &mut styles);
        copy_box(&style, &mut styles);

        let block = self
            .new_block(BlockType::Text)
            .with_content(format!("<p>{}</p>", inner.trim()))
            .with_styles(styles);
        self.blocks.push(block);
    }

    fn container(&mut self, el: &Element) {
        if el.element_children().filter(|child| is_recognized(child)).count() > 1 {
            self.flatten(el);
            return;
        }

        let style = el.style();
        let mut styles = Styles::new();
        copy_typography(&style, &mut styles);
        copy_box(&style, &mut styles);

        if el.is_empty() {
            if let Some(height) = style.get("height") {
                let mut spacer = Styles::new();
                spacer.set(StyleKey::SpacerHeight, height);
                copy_box(&style, &mut spacer);
                let block = self.new_block(BlockType::Spacer).with_styles(spacer);
                self.blocks.push(block);
                return;
            }
        }

        let inner = el.inner_html();
        let content = if !inner.trim().is_empty() && !el.is_empty() {
            inner.trim().to_string()
        } else if ["font-size", "padding", "line-height"]
            .iter()
            .any(|property| style.get(property).is_some())
        {
            "<p>&nbsp;</p>".to_string()
        } else {
            tracing::debug!(tag = %el.tag, "skipping empty container");
            return;
        };

        let block = self
            .new_block(BlockType::Text)
            .with_content(content)
            .with_styles(styles);
        self.blocks.push(block);
    }

    /// Each recognized child becomes its own block; runs of inline
    /// content between them are kept as text blocks
    fn flatten(&mut self, el: &Element) {
        let mut run = String::new();

        for node in &el.children {
            match node {
                HtmlNode::Element(child) if is_recognized(child) || child.attr(BLOCK_MARKER).is_some() => {
                    self.flush_run(&mut run);
                    self.classify_element(child);
                }
                other => run.push_str(&other.to_html()),
            }
        }

        self.flush_run(&mut run);
    }

    fn flush_run(&mut self, run: &mut String) {
        let html = std::mem::take(run);
        let trimmed = html.trim();
        if trimmed.is_empty() {
            return;
        }
        let only_blank_text = !trimmed.contains('<')
            && trimmed.replace("&nbsp;", " ").trim().is_empty();
        if !only_blank_text {
            self.push_text(format!("<p>{}</p>", trimmed));
        }
    }

    fn table(&mut self, el: &Element) {
        match self.columns(el, &el.style()) {
            Some(block) => self.blocks.push(block),
            None => self.push_text(el.outer_html()),
        }
    }

    /// A one-row, two-cell table as a `columns` block
    fn columns(&mut self, table: &Element, wrapper: &InlineStyle) -> Option<Block> {
        let (left, right) = two_cells(table)?;

        let layout = left
            .attr("width")
            .and_then(ColumnLayout::from_first_width)
            .unwrap_or(ColumnLayout::Even);

        let mut styles = Styles::new();
        copy_box(wrapper, &mut styles);
        styles.set(StyleKey::ColumnLayout, layout.as_str());

        let id = self.ids.new_id();
        let left = self.slot(left);
        let right = self.slot(right);

        Some(Block::columns(id, left, right).with_styles(styles))
    }

    fn slot(&mut self, cell: &Element) -> Block {
        if let Some(img) = cell.find_first(|el| el.tag == "img") {
            return self
                .new_block(BlockType::Image)
                .with_style(StyleKey::ImageUrl, img.attr("src").unwrap_or("").trim());
        }
        if cell
            .find_first(|el| el.attr(BLOCK_MARKER) == Some("image"))
            .is_some()
        {
            return self.new_block(BlockType::Image);
        }

        let blank = cell.text_content().trim().is_empty()
            && cell.find_first(|el| el.tag != "p" && el.tag != "br").is_none();
        let content = if blank {
            String::new()
        } else {
            cell.inner_html().trim().to_string()
        };

        self.new_block(BlockType::Text).with_content(content)
    }

    /// Blocks written by the serializer name their type in `data-block`
    fn marked(&mut self, el: &Element) -> Option<Block> {
        let block_type: BlockType = el.attr(BLOCK_MARKER)?.parse().ok()?;
        let style = el.style();
        let mut styles = Styles::new();

        let block = match block_type {
            BlockType::Header | BlockType::Text => {
                copy_typography(&style, &mut styles);
                copy_box(&style, &mut styles);
                self.new_block(block_type)
                    .with_content(el.inner_html().trim())
                    .with_styles(styles)
            }

            BlockType::Image => {
                copy_box(&style, &mut styles);
                copy(&style, "text-align", StyleKey::ImageAlign, &mut styles);
                if let Some(img) = el.find_first(|e| e.tag == "img") {
                    let img_style = img.style();
                    styles.set(StyleKey::ImageUrl, img.attr("src").unwrap_or("").trim());
                    copy(&img_style, "width", StyleKey::ImageWidth, &mut styles);
                    copy(&img_style, "height", StyleKey::ImageHeight, &mut styles);
                }
                self.new_block(block_type).with_styles(styles)
            }

            BlockType::Button => {
                copy_box(&style, &mut styles);
                copy(&style, "text-align", StyleKey::TextAlign, &mut styles);
                if let Some(link) = el.find_first(|e| e.tag == "a") {
                    let link_style = link.style();
                    let label = link.text_content();
                    if !label.trim().is_empty() {
                        styles.set(StyleKey::ButtonText, label.trim());
                    }
                    if let Some(href) = link.attr("href") {
                        styles.set(StyleKey::ButtonUrl, href.trim());
                    }
                    if let Some(color) = link_style.background_color() {
                        styles.set(StyleKey::ButtonColor, color);
                    }
                    copy(&link_style, "color", StyleKey::ButtonTextColor, &mut styles);
                    copy(&link_style, "padding", StyleKey::ButtonPadding, &mut styles);
                    copy(&link_style, "border-radius", StyleKey::ButtonBorderRadius, &mut styles);
                    copy(&link_style, "font-size", StyleKey::FontSize, &mut styles);
                    copy(&link_style, "font-family", StyleKey::FontFamily, &mut styles);
                    copy(&link_style, "font-weight", StyleKey::FontWeight, &mut styles);
                }
                self.new_block(block_type).with_styles(styles)
            }

            BlockType::Divider => {
                copy_box(&style, &mut styles);
                if let Some(rule) = el.find_first(|e| e.tag == "hr") {
                    read_rule(rule, &mut styles);
                }
                self.new_block(block_type).with_styles(styles)
            }

            BlockType::Spacer => {
                copy(&style, "height", StyleKey::SpacerHeight, &mut styles);
                copy_box(&style, &mut styles);
                self.new_block(block_type).with_styles(styles)
            }

            BlockType::Columns => {
                let table = el.find_first(|e| e.tag == "table")?;
                self.columns(table, &style)?
            }
        };

        Some(block)
    }
}

fn copy(style: &InlineStyle, property: &str, key: StyleKey, styles: &mut Styles) {
    if let Some(value) = style.get(property) {
        styles.set(key, value);
    }
}

fn copy_typography(style: &InlineStyle, styles: &mut Styles) {
    for (property, key) in TYPOGRAPHY {
        copy(style, property, key, styles);
    }
}

fn copy_box(style: &InlineStyle, styles: &mut Styles) {
    copy(style, "padding", StyleKey::Padding, styles);
    if let Some(color) = style.background_color() {
        styles.set(StyleKey::BackgroundColor, color);
    }
}

/// Divider styles from an `hr`
fn read_rule(rule: &Element, styles: &mut Styles) {
    let style = rule.style();
    if let Some(border) = style.get("border-top") {
        let border = BorderTop::parse(border);
        if let Some(width) = border.width {
            styles.set(StyleKey::DividerHeight, width);
        }
        if let Some(color) = border.color {
            styles.set(StyleKey::DividerColor, color);
        }
    }
    copy(&style, "width", StyleKey::DividerWidth, styles);
}

/// Default user-agent size for headings below `h1`
fn heading_font_size(tag: &str) -> Option<&'static str> {
    match tag {
        "h2" => Some("24px"),
        "h3" => Some("18.72px"),
        "h4" => Some("16px"),
        "h5" => Some("13.28px"),
        "h6" => Some("10.72px"),
        _ => None,
    }
}
