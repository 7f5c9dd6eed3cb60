//! Block template catalog used when inserting new blocks.

use crate::block::{Block, BlockType};
use crate::id_generator::IDGenerator;
use crate::styles::{StyleKey, Styles};

/// Immutable catalog entry a new block is stamped from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockTemplate {
    pub block_type: BlockType,
    pub name: &'static str,
    pub default_content: &'static str,
    pub default_styles: &'static [(StyleKey, &'static str)],
}

impl BlockTemplate {
    pub fn styles(&self) -> Styles {
        self.default_styles
            .iter()
            .map(|(key, value)| (*key, value.to_string()))
            .collect()
    }

    /// New block with fresh ids from `next_id`.
    ///
    /// Columns get two empty text children.
    pub fn instantiate_with(&self, mut next_id: impl FnMut() -> String) -> Block {
        let mut block = Block::new(next_id(), self.block_type)
            .with_content(self.default_content)
            .with_styles(self.styles());

        if self.block_type == BlockType::Columns {
            let left = Block::new(next_id(), BlockType::Text);
            let right = Block::new(next_id(), BlockType::Text);
            block = Block::columns(block.id.clone(), left, right)
                .with_content(self.default_content)
                .with_styles(self.styles());
        }

        block
    }

    pub fn instantiate(&self, ids: &mut IDGenerator) -> Block {
        self.instantiate_with(|| ids.new_id())
    }
}

use StyleKey::*;

const HEADER: BlockTemplate = BlockTemplate {
    block_type: BlockType::Header,
    name: "Header",
    default_content: "Newsletter Header",
    default_styles: &[
        (BackgroundColor, "#ffffff"),
        (FontSize, "32px"),
        (FontFamily, "Arial, sans-serif"),
        (Color, "#333333"),
        (TextAlign, "center"),
        (Padding, "32px 24px 24px 24px"),
    ],
};

const TEXT: BlockTemplate = BlockTemplate {
    block_type: BlockType::Text,
    name: "Text",
    default_content: "<p>Start typing your text here...</p>",
    default_styles: &[
        (BackgroundColor, "#ffffff"),
        (FontSize, "16px"),
        (FontFamily, "Arial, sans-serif"),
        (Color, "#333333"),
        (TextAlign, "left"),
        (Padding, "0 24px 24px 24px"),
        (LineHeight, "1.6"),
    ],
};

const IMAGE: BlockTemplate = BlockTemplate {
    block_type: BlockType::Image,
    name: "Image",
    default_content: "",
    default_styles: &[
        (BackgroundColor, "#ffffff"),
        (Padding, "0"),
        (ImageAlign, "center"),
        (ImageWidth, "100%"),
    ],
};

const BUTTON: BlockTemplate = BlockTemplate {
    block_type: BlockType::Button,
    name: "Button",
    default_content: "",
    default_styles: &[
        (BackgroundColor, "#ffffff"),
        (Padding, "20px"),
        (TextAlign, "center"),
        (ButtonText, "Click Here"),
        (ButtonUrl, "#"),
        (ButtonColor, "#2563eb"),
        (ButtonTextColor, "#ffffff"),
        (ButtonPadding, "12px 24px"),
        (ButtonBorderRadius, "4px"),
    ],
};

const DIVIDER: BlockTemplate = BlockTemplate {
    block_type: BlockType::Divider,
    name: "Divider",
    default_content: "",
    default_styles: &[
        (BackgroundColor, "#ffffff"),
        (Padding, "20px"),
        (DividerColor, "#e5e7eb"),
        (DividerHeight, "1px"),
        (DividerWidth, "100%"),
    ],
};

const SPACER: BlockTemplate = BlockTemplate {
    block_type: BlockType::Spacer,
    name: "Spacer",
    default_content: "",
    default_styles: &[(BackgroundColor, "#ffffff"), (SpacerHeight, "40px")],
};

const COLUMNS: BlockTemplate = BlockTemplate {
    block_type: BlockType::Columns,
    name: "Two Columns",
    default_content: "",
    default_styles: &[
        (BackgroundColor, "#ffffff"),
        (Padding, "20px"),
        (ColumnLayout, "50-50"),
    ],
};

/// The catalog, in sidebar order
pub const TEMPLATES: [BlockTemplate; 7] = [HEADER, TEXT, IMAGE, BUTTON, DIVIDER, SPACER, COLUMNS];

pub fn template_for(block_type: BlockType) -> &'static BlockTemplate {
    match block_type {
        BlockType::Header => &TEMPLATES[0],
        BlockType::Text => &TEMPLATES[1],
        BlockType::Image => &TEMPLATES[2],
        BlockType::Button => &TEMPLATES[3],
        BlockType::Divider => &TEMPLATES[4],
        BlockType::Spacer => &TEMPLATES[5],
        BlockType::Columns => &TEMPLATES[6],
    }
}
