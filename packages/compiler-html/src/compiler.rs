use mailblock_model::{Block, BlockType, ColumnLayout, StyleKey};

/// Options for HTML compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Pretty print the document shell
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// `<title>` of the generated document
    pub title: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            title: "Newsletter".to_string(),
        }
    }
}

/// Marker attribute carried by every block's outermost element
pub const BLOCK_MARKER: &str = "data-block";

struct Context {
    options: CompileOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        let indent = self.options.indent.clone();
        for _ in 0..self.depth {
            self.add(&indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Serialize blocks with default options
pub fn serialize(blocks: &[Block]) -> String {
    compile_to_html(blocks, CompileOptions::default())
}

/// Compile a block document to a complete, table-based email document.
///
/// Every style is inlined. Returns an empty string for an empty document;
/// callers substitute their own placeholder.
pub fn compile_to_html(blocks: &[Block], options: CompileOptions) -> String {
    if blocks.is_empty() {
        tracing::debug!(blocks = blocks.len(), "nothing to render");
        return String::new();
    }

    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html>");
    compile_head(&mut ctx);
    ctx.add_line(
        "<body style=\"margin: 0; padding: 0; background-color: #f4f4f4; font-family: Arial, sans-serif;\">",
    );
    ctx.indent();

    ctx.add_line("<table width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\" style=\"background-color: #f4f4f4; width: 100%;\">");
    ctx.indent();
    ctx.add_line("<tr>");
    ctx.indent();
    ctx.add_line("<td align=\"center\" style=\"padding: 0;\">");
    ctx.indent();
    ctx.add_line("<table width=\"600\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\" style=\"background-color: #ffffff; max-width: 600px; width: 100%;\">");
    ctx.indent();
    ctx.add_line("<tr>");
    ctx.indent();
    ctx.add_line("<td style=\"padding: 0;\">");
    ctx.indent();

    for block in blocks {
        compile_block(block, &mut ctx);
    }

    ctx.dedent();
    ctx.add_line("</td>");
    ctx.dedent();
    ctx.add_line("</tr>");
    ctx.dedent();
    ctx.add_line("</table>");
    ctx.dedent();
    ctx.add_line("</td>");
    ctx.dedent();
    ctx.add_line("</tr>");
    ctx.dedent();
    ctx.add_line("</table>");

    ctx.dedent();
    ctx.add_line("</body>");
    ctx.add_line("</html>");

    tracing::debug!(blocks = blocks.len(), "compiled email html");
    ctx.get_output()
}

fn compile_head(ctx: &mut Context) {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line("<meta http-equiv=\"X-UA-Compatible\" content=\"IE=edge\">");
    let title = format!("<title>{}</title>", escape_text(&ctx.options.title));
    ctx.add_line(&title);

    ctx.dedent();
    ctx.add_line("</head>");
}

fn compile_block(block: &Block, ctx: &mut Context) {
    let s = |key| block.resolved_style(key);

    match block.block_type {
        BlockType::Header => {
            let content = non_blank_or(&block.content, "Header");
            let style = inline_style(&[
                ("font-size", s(StyleKey::FontSize)),
                ("font-family", s(StyleKey::FontFamily)),
                ("color", s(StyleKey::Color)),
                ("text-align", s(StyleKey::TextAlign)),
                ("padding", s(StyleKey::Padding)),
                ("background-color", s(StyleKey::BackgroundColor)),
                ("margin", "0"),
            ]);
            ctx.add_line(&format!(
                "<h1 {}=\"header\" style=\"{}\">{}</h1>",
                BLOCK_MARKER, style, content
            ));
        }

        BlockType::Text => {
            let content = non_blank_or(&block.content, "<p>Text content</p>");
            let style = inline_style(&[
                ("font-size", s(StyleKey::FontSize)),
                ("font-family", s(StyleKey::FontFamily)),
                ("color", s(StyleKey::Color)),
                ("text-align", s(StyleKey::TextAlign)),
                ("padding", s(StyleKey::Padding)),
                ("background-color", s(StyleKey::BackgroundColor)),
                ("line-height", s(StyleKey::LineHeight)),
                ("margin", "0"),
            ]);
            ctx.add_line(&format!(
                "<div {}=\"text\" style=\"{}\">{}</div>",
                BLOCK_MARKER, style, content
            ));
        }

        BlockType::Image => {
            let url = s(StyleKey::ImageUrl).trim();
            let align = s(StyleKey::ImageAlign);
            let wrapper = inline_style(&[
                ("padding", s(StyleKey::Padding)),
                ("background-color", s(StyleKey::BackgroundColor)),
                ("text-align", align),
                ("margin", "0"),
            ]);
            let image = inline_style(&[
                ("width", s(StyleKey::ImageWidth)),
                ("max-width", "100%"),
                ("height", s(StyleKey::ImageHeight)),
                ("display", "block"),
                ("margin", image_margin(align)),
                ("border", "0"),
                ("outline", "none"),
                ("text-decoration", "none"),
            ]);
            // Without a source only the marked wrapper is written
            let img = if url.is_empty() {
                String::new()
            } else {
                format!(
                    "<img src=\"{}\" alt=\"\" width=\"600\" style=\"{}\" />",
                    escape_html(url),
                    image
                )
            };
            ctx.add_line(&format!(
                "<div {}=\"image\" style=\"{}\">{}</div>",
                BLOCK_MARKER, wrapper, img
            ));
        }

        BlockType::Button => {
            let wrapper = inline_style(&[
                ("padding", s(StyleKey::Padding)),
                ("background-color", s(StyleKey::BackgroundColor)),
                ("text-align", s(StyleKey::TextAlign)),
                ("margin", "0"),
            ]);
            let link = inline_style(&[
                ("display", "inline-block"),
                ("background-color", s(StyleKey::ButtonColor)),
                ("color", s(StyleKey::ButtonTextColor)),
                ("padding", s(StyleKey::ButtonPadding)),
                ("border-radius", s(StyleKey::ButtonBorderRadius)),
                ("text-decoration", "none"),
                ("font-size", s(StyleKey::FontSize)),
                ("font-family", s(StyleKey::FontFamily)),
                ("font-weight", s(StyleKey::FontWeight)),
            ]);
            ctx.add_line(&format!(
                "<div {}=\"button\" style=\"{}\"><a href=\"{}\" style=\"{}\">{}</a></div>",
                BLOCK_MARKER,
                wrapper,
                escape_html(s(StyleKey::ButtonUrl)),
                link,
                escape_text(s(StyleKey::ButtonText))
            ));
        }

        BlockType::Divider => {
            let wrapper = inline_style(&[
                ("padding", s(StyleKey::Padding)),
                ("background-color", s(StyleKey::BackgroundColor)),
                ("margin", "0"),
            ]);
            let border = format!(
                "{} solid {}",
                s(StyleKey::DividerHeight),
                s(StyleKey::DividerColor)
            );
            let rule = inline_style(&[
                ("border", "none"),
                ("border-top", border.as_str()),
                ("width", s(StyleKey::DividerWidth)),
                ("margin", "0"),
            ]);
            ctx.add_line(&format!(
                "<div {}=\"divider\" style=\"{}\"><hr style=\"{}\" /></div>",
                BLOCK_MARKER, wrapper, rule
            ));
        }

        BlockType::Spacer => {
            let style = inline_style(&[
                ("height", s(StyleKey::SpacerHeight)),
                ("background-color", s(StyleKey::BackgroundColor)),
            ]);
            ctx.add_line(&format!(
                "<div {}=\"spacer\" style=\"{}\"></div>",
                BLOCK_MARKER, style
            ));
        }

        BlockType::Columns => compile_columns(block, ctx),
    }
}

fn compile_columns(block: &Block, ctx: &mut Context) {
    let layout = ColumnLayout::from_style(block.resolved_style(StyleKey::ColumnLayout));
    let (left_width, right_width) = layout.widths();
    let wrapper = inline_style(&[
        ("background-color", block.resolved_style(StyleKey::BackgroundColor)),
        ("padding", block.resolved_style(StyleKey::Padding)),
        ("margin", "0"),
    ]);

    ctx.add_line(&format!(
        "<div {}=\"columns\" style=\"{}\">",
        BLOCK_MARKER, wrapper
    ));
    ctx.indent();
    ctx.add_line("<table width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\" style=\"border-collapse: collapse; width: 100%;\">");
    ctx.indent();
    ctx.add_line("<tr>");
    ctx.indent();

    for (slot, width) in [left_width, right_width].into_iter().enumerate() {
        ctx.add_line(&format!(
            "<td width=\"{}\" style=\"padding: 10px; vertical-align: top;\">",
            width
        ));
        ctx.indent();
        let cell = compile_slot(block.children.get(slot));
        ctx.add_line(&cell);
        ctx.dedent();
        ctx.add_line("</td>");
    }

    ctx.dedent();
    ctx.add_line("</tr>");
    ctx.dedent();
    ctx.add_line("</table>");
    ctx.dedent();
    ctx.add_line("</div>");
}

fn compile_slot(child: Option<&Block>) -> String {
    let Some(child) = child else {
        return "&nbsp;".to_string();
    };

    match child.block_type {
        BlockType::Image => {
            let url = child.resolved_style(StyleKey::ImageUrl).trim();
            if url.is_empty() {
                format!("<div {}=\"image\"></div>", BLOCK_MARKER)
            } else {
                format!(
                    "<img src=\"{}\" alt=\"\" style=\"width: 100%; max-width: 100%; height: auto; display: block;\" />",
                    escape_html(url)
                )
            }
        }
        BlockType::Text => non_blank_or(&child.content, "<p>&nbsp;</p>").to_string(),
        // Slots never hold these; render an empty cell rather than nested layout
        BlockType::Header
        | BlockType::Button
        | BlockType::Divider
        | BlockType::Spacer
        | BlockType::Columns => "&nbsp;".to_string(),
    }
}

fn image_margin(align: &str) -> &'static str {
    match align.trim() {
        "left" => "0",
        "right" => "0 0 0 auto",
        _ => "0 auto",
    }
}

fn non_blank_or<'a>(content: &'a str, placeholder: &'a str) -> &'a str {
    if content.trim().is_empty() {
        placeholder
    } else {
        content
    }
}

/// `prop: value; ...` with every value attribute-escaped
fn inline_style(declarations: &[(&str, &str)]) -> String {
    declarations
        .iter()
        .map(|(property, value)| format!("{}: {};", property, escape_html(value.trim())))
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
