//! # HTML to Block Parser
//!
//! Reconstructs a block document from arbitrary newsletter HTML: the
//! editor's own serialized output, model-generated drafts, or hand-edited
//! markup.
//!
//! Parsing is total. Unrecognized structure degrades to a single opaque
//! `text` block holding the original markup; non-blank input never yields an
//! empty document.

pub mod candidates;
pub mod classify;
pub mod dom;
pub mod inline_style;


pub use candidates::{locate, Candidates, Strategy};
pub use dom::{parse_document, Document, Element, HtmlNode};

use classify::Classifier;
use dom::escape_text;
use mailblock_model::{Block, IDGenerator};

/// Parse HTML into blocks, with ids seeded from the input itself
pub fn parse(html: &str) -> Vec<Block> {
    let mut ids = IDGenerator::new(html);
    parse_with(html, &mut ids)
}

/// Parse HTML into blocks, drawing ids from `ids`
pub fn parse_with(html: &str, ids: &mut IDGenerator) -> Vec<Block> {
    if html.trim().is_empty() {
        return Vec::new();
    }

    let document = parse_document(html);
    let body = &document.body;
    let mut classifier = Classifier::new(ids);

    match locate(body) {
        Some(candidates) => {
            tracing::debug!(strategy = %candidates.strategy, "content container located");
            classifier.classify_nodes(candidates.nodes());
        }
        None => tracing::debug!("no container strategy matched"),
    }

    if classifier.block_count() == 0 {
        let inner = body.inner_html();
        if !inner.trim().is_empty() {
            tracing::info!("falling back to a single text block for the body");
            classifier.push_text(inner.trim().to_string());
        } else if !document.text.trim().is_empty() {
            tracing::info!("body is empty, keeping document text");
            classifier.push_text(format!("<p>{}</p>", escape_text(document.text.trim())));
        } else {
            tracing::warn!("no readable body, keeping the raw input");
            classifier.push_text(html.trim().to_string());
        }
    }

    let mut blocks = classifier.finish();
    for (order, block) in blocks.iter_mut().enumerate() {
        block.order = order;
    }

    tracing::debug!(blocks = blocks.len(), "parsed html");
    blocks
}
