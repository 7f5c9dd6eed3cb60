use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Text part used when the HTML carries no readable text
pub const EMPTY_TEXT_FALLBACK: &str = "Newsletter – please view in HTML.";

struct Patterns {
    script: Regex,
    style: Regex,
    block_break: Regex,
    layout_break: Regex,
    anchor: Regex,
    tag: Regex,
    blank_run: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        script: build(r"(?is)<script\b[^>]*>.*?</script>"),
        style: build(r"(?is)<style\b[^>]*>.*?</style>"),
        block_break: build(r"(?i)</?(?:br|p|div|tr|li|h[1-6])\b[^>]*>"),
        layout_break: build(r"(?i)</?(?:table|thead|tbody|ul|ol|hr)\b[^>]*>"),
        anchor: build(r#"(?is)<a\b[^>]*?\bhref=["']([^"']+)["'][^>]*>(.*?)</a>"#),
        tag: build(r"<[^>]+>"),
        blank_run: build(r"\n{3,}"),
    })
}

fn build(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid pattern {pattern}: {e}"))
}

/// Plain-text rendering of an email body for the `text/plain` part.
///
/// Scripts and styles are dropped, block boundaries become newlines and
/// links become `text (url)`. Blank input yields an empty string; input
/// with no readable text yields [`EMPTY_TEXT_FALLBACK`].
pub fn html_to_plain_text(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let p = patterns();

    let text = p.script.replace_all(html, "");
    let text = p.style.replace_all(&text, "");
    let text = p.block_break.replace_all(&text, "\n");
    let text = p.layout_break.replace_all(&text, "\n");
    let text = p.anchor.replace_all(&text, |caps: &Captures| {
        let url = &caps[1];
        let inner = p.tag.replace_all(&caps[2], "");
        let inner = inner.trim();
        if inner.is_empty() {
            url.to_string()
        } else {
            format!("{} ({})", inner, url)
        }
    });
    let text = p.tag.replace_all(&text, "");
    let text = decode_entities(&text);

    let text = text.lines().map(str::trim).collect::<Vec<_>>().join("\n");
    let text = p.blank_run.replace_all(&text, "\n\n");
    let text = text.trim();

    if text.is_empty() {
        tracing::debug!("no readable text in html body, using fallback");
        EMPTY_TEXT_FALLBACK.to_string()
    } else {
        text.to_string()
    }
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&mdash;", "—")
        .replace("&ndash;", "–")
        // last, so "&amp;lt;" stays "&lt;"
        .replace("&amp;", "&")
}
