//! Minimal owned HTML tree.
//!
//! The document is built once with `kuchiki` (html5ever) and copied into
//! plain owned nodes, so classification works on ordinary borrowed data and
//! never touches `RefCell`s.

use crate::inline_style::InlineStyle;
use kuchiki::traits::*;
use kuchiki::{NodeData, NodeRef};

#[derive(Debug, Clone, PartialEq)]
pub enum HtmlNode {
    Element(Element),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Lowercase tag name
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<HtmlNode>,
}

/// A parsed HTML document, reduced to what block extraction needs
#[derive(Debug, Clone)]
pub struct Document {
    pub body: Element,
    /// Readable text of the whole document, head included, without the
    /// contents of `script`, `style` and `template`
    pub text: String,
}

/// Elements whose text is never shown to a reader
const HIDDEN_TEXT_TAGS: [&str; 3] = ["script", "style", "template"];

pub fn parse_document(html: &str) -> Document {
    let root = kuchiki::parse_html().one(html.to_string());

    let body = root
        .descendants()
        .find(|node| {
            node.as_element()
                .map_or(false, |el| &*el.name.local == "body")
        })
        .and_then(|node| match convert(&node) {
            Some(HtmlNode::Element(el)) => Some(el),
            _ => None,
        })
        .unwrap_or_else(|| Element::new("body"));

    let mut text = String::new();
    collect_text(&root, &mut text);

    Document { body, text }
}

fn collect_text(node: &NodeRef, out: &mut String) {
    match node.data() {
        NodeData::Element(data) if HIDDEN_TEXT_TAGS.contains(&&*data.name.local) => {}
        NodeData::Text(text) => out.push_str(&text.borrow()),
        _ => {
            for child in node.children() {
                collect_text(&child, out);
            }
        }
    }
}

fn convert(node: &NodeRef) -> Option<HtmlNode> {
    match node.data() {
        NodeData::Element(data) => {
            let attrs = data
                .attributes
                .borrow()
                .map
                .iter()
                .map(|(name, attr)| (name.local.to_string(), attr.value.clone()))
                .collect();
            let children = node.children().filter_map(|child| convert(&child)).collect();

            Some(HtmlNode::Element(Element {
                tag: data.name.local.to_lowercase(),
                attrs,
                children,
            }))
        }
        NodeData::Text(text) => Some(HtmlNode::Text(text.borrow().clone())),
        NodeData::Comment(text) => Some(HtmlNode::Comment(text.borrow().clone())),
        _ => None,
    }
}

impl HtmlNode {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            HtmlNode::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.append_text(&mut out);
        out
    }

    fn append_text(&self, out: &mut String) {
        match self {
            HtmlNode::Element(el) => {
                for child in &el.children {
                    child.append_text(out);
                }
            }
            HtmlNode::Text(text) => out.push_str(text),
            HtmlNode::Comment(_) => {}
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out, false);
        out
    }

    fn write_html(&self, out: &mut String, raw_text: bool) {
        match self {
            HtmlNode::Element(el) => el.write_outer(out),
            HtmlNode::Text(text) if raw_text => out.push_str(text),
            HtmlNode::Text(text) => out.push_str(&escape_text(text)),
            HtmlNode::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
        }
    }
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map_or(false, |list| list.split_whitespace().any(|c| c == class))
    }

    pub fn style(&self) -> InlineStyle {
        InlineStyle::parse(self.attr("style").unwrap_or(""))
    }

    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(HtmlNode::as_element)
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.append_text(&mut out);
        }
        out
    }

    /// True when the element holds no visible text and no child elements
    pub fn is_empty(&self) -> bool {
        self.element_children().next().is_none() && self.text_content().trim().is_empty()
    }

    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        let raw = is_raw_text(&self.tag);
        for child in &self.children {
            child.write_html(&mut out, raw);
        }
        out
    }

    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        self.write_outer(&mut out);
        out
    }

    fn write_outer(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
        out.push('>');

        if is_void(&self.tag) {
            return;
        }

        out.push_str(&self.inner_html());
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }

    /// Depth-first, pre-order descendants (not including `self`)
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect_descendants(&mut out);
        out
    }

    fn collect_descendants<'a>(&'a self, out: &mut Vec<&'a Element>) {
        for child in self.element_children() {
            out.push(child);
            child.collect_descendants(out);
        }
    }

    pub fn find_first(&self, predicate: impl Fn(&Element) -> bool) -> Option<&Element> {
        self.descendants().into_iter().find(|&el| predicate(el))
    }

    /// Rows of a table, looking through `thead`/`tbody`/`tfoot`
    pub fn table_rows(&self) -> Vec<&Element> {
        let mut rows = Vec::new();
        for child in self.element_children() {
            match child.tag.as_str() {
                "tr" => rows.push(child),
                "thead" | "tbody" | "tfoot" => {
                    rows.extend(child.element_children().filter(|el| el.tag == "tr"))
                }
                _ => {}
            }
        }
        rows
    }

    /// Data and header cells of a row
    pub fn row_cells(&self) -> Vec<&Element> {
        self.element_children()
            .filter(|el| el.tag == "td" || el.tag == "th")
            .collect()
    }
}

fn is_void(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn is_raw_text(tag: &str) -> bool {
    matches!(
        tag,
        "script" | "style" | "xmp" | "iframe" | "noembed" | "noframes" | "plaintext"
    )
}

pub(crate) fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('\u{a0}', "&nbsp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('\u{a0}', "&nbsp;")
        .replace('"', "&quot;")
}
