/// Declarations of an inline `style` attribute, in source order.
///
/// Property names are lowercased; values are trimmed. Later declarations of
/// the same property win.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    pub fn parse(source: &str) -> Self {
        let declarations = split_declarations(source)
            .into_iter()
            .filter_map(|declaration| {
                let (property, value) = declaration.split_once(':')?;
                let property = property.trim().to_ascii_lowercase();
                let value = value.trim().trim_end_matches("!important").trim();
                if property.is_empty() || value.is_empty() {
                    return None;
                }
                Some((property, value.to_string()))
            })
            .collect();

        Self { declarations }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .rev()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    /// `background-color`, or a plain color given through `background`
    pub fn background_color(&self) -> Option<&str> {
        self.get("background-color").or_else(|| {
            self.get("background")
                .filter(|value| !value.contains("url(") && !value.contains(' '))
        })
    }
}

/// Split on `;` outside quotes and parentheses (`url(data:...;base64,...)`)
fn split_declarations(source: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quote: Option<char> = None;
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in source.char_indices() {
        match (c, quote) {
            ('"' | '\'', None) => quote = Some(c),
            (q, Some(open)) if q == open => quote = None,
            (_, Some(_)) => {}
            ('(', None) => depth += 1,
            (')', None) => depth = depth.saturating_sub(1),
            (';', None) if depth == 0 => {
                parts.push(&source[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&source[start..]);

    parts
}

/// Parts of a `border-top` shorthand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorderTop {
    pub width: Option<String>,
    pub color: Option<String>,
}

const BORDER_STYLES: [&str; 10] = [
    "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset", "outset",
];

impl BorderTop {
    /// Reads `<width> <style> <color>` in any order
    pub fn parse(value: &str) -> Self {
        let mut border = BorderTop {
            width: None,
            color: None,
        };

        for token in value.split_whitespace() {
            let lower = token.to_ascii_lowercase();
            if BORDER_STYLES.contains(&lower.as_str()) {
                continue;
            }
            let is_width = token.starts_with(|c: char| c.is_ascii_digit() || c == '.')
                || matches!(lower.as_str(), "thin" | "medium" | "thick");
            if is_width && border.width.is_none() {
                border.width = Some(token.to_string());
            } else if border.color.is_none() {
                border.color = Some(token.to_string());
            }
        }

        border
    }
}
