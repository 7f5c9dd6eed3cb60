//! Locating the element whose children are the newsletter's blocks.
//!
//! Input comes from the editor itself, from model-generated drafts and from
//! hand-edited documents, so several layouts are tried in a fixed order and
//! the first one that matches wins.

use crate::dom::{Element, HtmlNode};
use std::fmt;

/// Block-level tags that count as content when choosing a container
pub const RECOGNIZED_TAGS: [&str; 12] = [
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "div", "img", "a", "hr", "table",
];

/// Containers that a lone body child may wrap the whole newsletter in
pub const WRAPPER_TAGS: [&str; 5] = ["div", "section", "article", "main", "center"];

pub const BLOCK_MARKER: &str = "data-block";

pub fn is_recognized(el: &Element) -> bool {
    RECOGNIZED_TAGS.contains(&el.tag.as_str())
}

pub fn recognized_children(el: &Element) -> impl Iterator<Item = &Element> {
    el.element_children().filter(|child| is_recognized(child))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// `body > wrapper > blocks`
    SingleWrapper,
    /// `body > table (> tr > td > table)* > td > blocks`
    LayoutTable,
    /// `body > blocks`
    BodyChildren,
    /// The table cell with the most recognized children
    RichestCell,
    /// Generic selectors, narrowest first
    Selector,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::SingleWrapper => "single-wrapper",
            Strategy::LayoutTable => "layout-table",
            Strategy::BodyChildren => "body-children",
            Strategy::RichestCell => "richest-cell",
            Strategy::Selector => "selector",
        };
        f.write_str(name)
    }
}

/// The chosen container and the strategy that found it
#[derive(Debug, Clone, Copy)]
pub struct Candidates<'a> {
    pub strategy: Strategy,
    pub container: &'a Element,
}

impl<'a> Candidates<'a> {
    pub fn nodes(&self) -> &'a [HtmlNode] {
        &self.container.children
    }
}

/// Runs every strategy in priority order; `None` when nothing matched
pub fn locate(body: &Element) -> Option<Candidates<'_>> {
    let strategies: [(Strategy, fn(&Element) -> Option<&Element>); 5] = [
        (Strategy::SingleWrapper, single_wrapper),
        (Strategy::LayoutTable, layout_table),
        (Strategy::BodyChildren, body_children),
        (Strategy::RichestCell, richest_cell),
        (Strategy::Selector, selector),
    ];

    strategies.into_iter().find_map(|(strategy, find)| {
        find(body).map(|container| Candidates {
            strategy,
            container,
        })
    })
}

fn sole_child(body: &Element) -> Option<&Element> {
    let mut children = body.element_children();
    let first = children.next()?;
    if children.next().is_some() {
        return None;
    }
    Some(first)
}

fn single_wrapper(body: &Element) -> Option<&Element> {
    let wrapper = sole_child(body)?;
    let is_wrapper = WRAPPER_TAGS.contains(&wrapper.tag.as_str())
        && wrapper.attr(BLOCK_MARKER).is_none()
        && recognized_children(wrapper).next().is_some();
    is_wrapper.then_some(wrapper)
}

fn layout_table(body: &Element) -> Option<&Element> {
    let table = sole_child(body).filter(|el| el.tag == "table")?;
    if is_two_column(table) {
        return None;
    }

    let mut cell = first_cell(table)?;
    // Editor output nests the content cell inside single-cell layout tables
    while let Some(inner) = sole_child(cell)
        .filter(|el| el.tag == "table" && single_cell(el).is_some())
    {
        cell = single_cell(inner)?;
    }

    recognized_children(cell).next().is_some().then_some(cell)
}

fn body_children(body: &Element) -> Option<&Element> {
    recognized_children(body).next().is_some().then_some(body)
}

fn richest_cell(body: &Element) -> Option<&Element> {
    let mut best: Option<(&Element, usize)> = None;

    for cell in body.descendants().into_iter().filter(|el| el.tag == "td") {
        let count = recognized_children(cell).count();
        let has_content = recognized_children(cell)
            .any(|child| !child.text_content().trim().is_empty() || !child.inner_html().trim().is_empty());

        if has_content && count > best.map_or(0, |(_, n)| n) {
            best = Some((cell, count));
        }
    }

    best.map(|(cell, _)| cell)
}

fn selector(body: &Element) -> Option<&Element> {
    nested_cell(body)
        .or_else(|| container_cell(body))
        .or_else(|| body.find_first(|el| el.has_class("email-container")))
        .or_else(|| body.find_first(|el| el.tag == "td"))
}

/// `td td`
fn nested_cell(body: &Element) -> Option<&Element> {
    body.descendants()
        .into_iter()
        .filter(|el| el.tag == "td")
        .find_map(|cell| cell.find_first(|el| el.tag == "td"))
}

/// `.email-container td`
fn container_cell(body: &Element) -> Option<&Element> {
    body.descendants()
        .into_iter()
        .filter(|el| el.has_class("email-container"))
        .find_map(|container| container.find_first(|el| el.tag == "td"))
}

fn first_cell(table: &Element) -> Option<&Element> {
    table
        .table_rows()
        .into_iter()
        .find_map(|row| row.row_cells().into_iter().next())
}

/// The only cell of a one-row, one-cell table
pub fn single_cell(table: &Element) -> Option<&Element> {
    let rows = table.table_rows();
    match rows.as_slice() {
        [row] => match row.row_cells().as_slice() {
            [cell] => Some(*cell),
            _ => None,
        },
        _ => None,
    }
}

/// One row of exactly two cells
pub fn is_two_column(table: &Element) -> bool {
    two_cells(table).is_some()
}

pub fn two_cells(table: &Element) -> Option<(&Element, &Element)> {
    let rows = table.table_rows();
    match rows.as_slice() {
        [row] => match row.row_cells().as_slice() {
            [left, right] => Some((*left, *right)),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_document;

    fn strategy_for(html: &str) -> Option<Strategy> {
        let doc = parse_document(html);
        locate(&doc.body).map(|c| c.strategy)
    }

    #[test]
    fn test_single_wrapper() {
        assert_eq!(
            strategy_for("<div><h1>T</h1><p>a</p></div>"),
            Some(Strategy::SingleWrapper)
        );
        assert_eq!(
            strategy_for("<section><p>a</p></section>"),
            Some(Strategy::SingleWrapper)
        );
    }

    #[test]
    fn test_marked_wrapper_is_a_block_not_a_wrapper() {
        assert_eq!(
            strategy_for(r#"<div data-block="text"><p>a</p></div>"#),
            Some(Strategy::BodyChildren)
        );
    }

    #[test]
    fn test_layout_table_descends_to_innermost_cell() {
        let html = "<table><tr><td><table><tr><td><h1>T</h1><p>a</p></td></tr></table></td></tr></table>";
        let doc = parse_document(html);
        let found = locate(&doc.body).unwrap();

        assert_eq!(found.strategy, Strategy::LayoutTable);
        assert_eq!(found.container.tag, "td");
        assert_eq!(recognized_children(found.container).count(), 2);
    }

    #[test]
    fn test_two_column_body_table_is_not_a_layout_table() {
        let html = "<table><tr><td><p>a</p></td><td><p>b</p></td></tr></table>";
        assert_eq!(strategy_for(html), Some(Strategy::BodyChildren));
    }

    #[test]
    fn test_body_children() {
        assert_eq!(
            strategy_for("<h1>T</h1><p>a</p><span>x</span>"),
            Some(Strategy::BodyChildren)
        );
    }

    #[test]
    fn test_richest_cell() {
        let html = "<span><table><tr><td><p>a</p></td><td><h1>T</h1><p>b</p><hr></td></tr><tr><td>c</td></tr></table></span>";
        let doc = parse_document(html);
        let found = locate(&doc.body).unwrap();

        assert_eq!(found.strategy, Strategy::RichestCell);
        assert_eq!(recognized_children(found.container).count(), 3);
    }

    #[test]
    fn test_selector_fallback() {
        let html = r#"<span><table><tr><td><span>loose</span></td></tr></table></span>"#;
        let doc = parse_document(html);
        let found = locate(&doc.body).unwrap();

        assert_eq!(found.strategy, Strategy::Selector);
        assert_eq!(found.container.tag, "td");
    }

    #[test]
    fn test_nothing_matches_plain_text() {
        assert_eq!(strategy_for("just some words"), None);
        assert_eq!(strategy_for("<span>a</span><em>b</em>"), None);
    }
}
