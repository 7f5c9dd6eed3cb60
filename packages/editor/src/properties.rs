//! # Properties Panel
//!
//! Per-type style fields for the selected block. Every edit merges one key
//! into the block's existing styles; nothing else is touched.

use crate::document::{Document, MutationResult};
use crate::errors::EditorError;
use crate::mutations::{BlockPatch, Command};
use mailblock_model::{Block, BlockType, StyleKey};

/// Input control for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Color,
    Text,

    /// Fixed `(value, label)` options
    Select(&'static [(&'static str, &'static str)]),
}

/// One editable style attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyField {
    pub key: StyleKey,
    pub label: &'static str,
    pub kind: FieldKind,
}

const FONT_FAMILIES: &[(&str, &str)] = &[
    ("Arial, sans-serif", "Arial"),
    ("Georgia, serif", "Georgia"),
    ("'Times New Roman', serif", "Times New Roman"),
    ("Verdana, sans-serif", "Verdana"),
    ("'Courier New', monospace", "Courier New"),
];

const TEXT_ALIGNS: &[(&str, &str)] = &[
    ("left", "Left"),
    ("center", "Center"),
    ("right", "Right"),
    ("justify", "Justify"),
];

const IMAGE_ALIGNS: &[(&str, &str)] = &[("left", "Left"), ("center", "Center"), ("right", "Right")];

const COLUMN_LAYOUTS: &[(&str, &str)] = &[
    ("50-50", "50% - 50%"),
    ("33-67", "33% - 67%"),
    ("67-33", "67% - 33%"),
];

const fn field(key: StyleKey, label: &'static str, kind: FieldKind) -> PropertyField {
    PropertyField { key, label, kind }
}

const COMMON: &[PropertyField] = &[
    field(StyleKey::BackgroundColor, "Background Color", FieldKind::Color),
    field(StyleKey::Padding, "Padding", FieldKind::Text),
];

const TYPOGRAPHY: &[PropertyField] = &[
    field(StyleKey::FontSize, "Font Size", FieldKind::Text),
    field(StyleKey::FontFamily, "Font Family", FieldKind::Select(FONT_FAMILIES)),
    field(StyleKey::Color, "Text Color", FieldKind::Color),
    field(StyleKey::TextAlign, "Text Align", FieldKind::Select(TEXT_ALIGNS)),
];

const IMAGE: &[PropertyField] = &[
    field(StyleKey::ImageWidth, "Image Width", FieldKind::Text),
    field(StyleKey::ImageAlign, "Image Align", FieldKind::Select(IMAGE_ALIGNS)),
];

const BUTTON: &[PropertyField] = &[
    field(StyleKey::ButtonText, "Button Text", FieldKind::Text),
    field(StyleKey::ButtonUrl, "Button URL", FieldKind::Text),
    field(StyleKey::ButtonColor, "Button Color", FieldKind::Color),
    field(StyleKey::ButtonTextColor, "Button Text Color", FieldKind::Color),
    field(StyleKey::ButtonPadding, "Button Padding", FieldKind::Text),
];

const DIVIDER: &[PropertyField] = &[
    field(StyleKey::DividerColor, "Divider Color", FieldKind::Color),
    field(StyleKey::DividerHeight, "Divider Height", FieldKind::Text),
];

const SPACER: &[PropertyField] = &[field(StyleKey::SpacerHeight, "Spacer Height", FieldKind::Text)];

const COLUMNS: &[PropertyField] = &[field(
    StyleKey::ColumnLayout,
    "Column Layout",
    FieldKind::Select(COLUMN_LAYOUTS),
)];

/// Fields shown for a block of `block_type`, in panel order
pub fn fields_for(block_type: BlockType) -> Vec<PropertyField> {
    let specific: &[&[PropertyField]] = match block_type {
        BlockType::Header | BlockType::Text => &[TYPOGRAPHY],
        BlockType::Button => &[TYPOGRAPHY, BUTTON],
        BlockType::Image => &[IMAGE],
        BlockType::Divider => &[DIVIDER],
        BlockType::Spacer => &[SPACER],
        BlockType::Columns => &[COLUMNS],
    };

    COMMON
        .iter()
        .chain(specific.iter().flat_map(|group| group.iter()))
        .copied()
        .collect()
}

/// Value shown in a field: the block's own value or its default
pub fn field_value(block: &Block, key: StyleKey) -> &str {
    block.resolved_style(key)
}

/// Merge one style value into a block; a stale id changes nothing
pub fn set_style(
    doc: &mut Document,
    block_id: &str,
    key: StyleKey,
    value: impl Into<String>,
) -> Result<MutationResult, EditorError> {
    let Some(block) = doc.block(block_id) else {
        tracing::debug!(block_id, "style edit for a missing block ignored");
        return Ok(MutationResult {
            version: doc.version,
            changed: false,
        });
    };
    let styles = block.styles.merged(key, value);

    let result = doc.apply(Command::UpdateBlock {
        block_id: block_id.to_string(),
        patch: BlockPatch::styles(styles),
    })?;
    Ok(result)
}

/// Set an image block's source after checking the scheme
pub fn set_image_url(doc: &mut Document, block_id: &str, url: &str) -> Result<MutationResult, EditorError> {
    let url = url.trim();
    let allowed = ["http://", "https://", "data:"]
        .iter()
        .any(|scheme| url.starts_with(scheme));
    if !allowed {
        return Err(EditorError::InvalidImageUrl(url.to_string()));
    }

    set_style(doc, block_id, StyleKey::ImageUrl, url)
}
