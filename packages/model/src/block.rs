use crate::error::ModelError;
use crate::styles::{StyleKey, Styles};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of block kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Header,
    Text,
    Image,
    Button,
    Divider,
    Spacer,
    Columns,
}

impl BlockType {
    pub const ALL: [BlockType; 7] = [
        BlockType::Header,
        BlockType::Text,
        BlockType::Image,
        BlockType::Button,
        BlockType::Divider,
        BlockType::Spacer,
        BlockType::Columns,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Header => "header",
            BlockType::Text => "text",
            BlockType::Image => "image",
            BlockType::Button => "button",
            BlockType::Divider => "divider",
            BlockType::Spacer => "spacer",
            BlockType::Columns => "columns",
        }
    }

    /// Whether a block of this type may sit in a column slot
    pub fn fits_column_slot(&self) -> bool {
        matches!(self, BlockType::Text | BlockType::Image)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ModelError::UnknownBlockType(s.to_string()))
    }
}

/// One typed unit of newsletter content.
///
/// `children` is only populated for [`BlockType::Columns`], where it holds
/// exactly two `text`/`image` blocks (slot 0 and slot 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,

    #[serde(rename = "type")]
    pub block_type: BlockType,

    /// Opaque HTML fragment (rich text for header/text)
    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub styles: Styles,

    /// Position within the containing sequence
    #[serde(default)]
    pub order: usize,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

impl Block {
    pub fn new(id: impl Into<String>, block_type: BlockType) -> Self {
        Self {
            id: id.into(),
            block_type,
            content: String::new(),
            styles: Styles::new(),
            order: 0,
            children: Vec::new(),
        }
    }

    /// A `columns` block holding the two given slot blocks.
    pub fn columns(id: impl Into<String>, left: Block, right: Block) -> Self {
        let mut block = Self::new(id, BlockType::Columns);
        block.children = vec![left, right];
        for (slot, child) in block.children.iter_mut().enumerate() {
            child.order = slot;
        }
        block
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_style(mut self, key: StyleKey, value: impl Into<String>) -> Self {
        self.styles.set(key, value);
        self
    }

    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    pub fn style(&self, key: StyleKey) -> Option<&str> {
        self.styles.get(key)
    }

    /// Style value with the documented default for this block's type
    pub fn resolved_style(&self, key: StyleKey) -> &str {
        self.styles.resolve(self.block_type, key)
    }

    pub fn is_columns(&self) -> bool {
        self.block_type == BlockType::Columns
    }

    /// Column slot child, if this is a columns block
    pub fn slot(&self, slot: usize) -> Option<&Block> {
        if self.is_columns() {
            self.children.get(slot)
        } else {
            None
        }
    }

    /// This block's id followed by its children's ids
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.id.as_str()).chain(self.children.iter().map(|c| c.id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_type_round_trips_through_str() {
        for block_type in BlockType::ALL {
            assert_eq!(block_type.as_str().parse::<BlockType>().unwrap(), block_type);
        }
        assert!("social".parse::<BlockType>().is_err());
    }

    #[test]
    fn test_only_text_and_image_fit_column_slots() {
        let fitting: Vec<_> = BlockType::ALL
            .into_iter()
            .filter(|t| t.fits_column_slot())
            .collect();
        assert_eq!(fitting, vec![BlockType::Text, BlockType::Image]);
    }

    #[test]
    fn test_columns_constructor_orders_slots() {
        let block = Block::columns(
            "c",
            Block::new("l", BlockType::Text),
            Block::new("r", BlockType::Image),
        );
        assert_eq!(block.children.len(), 2);
        assert_eq!(block.slot(0).unwrap().order, 0);
        assert_eq!(block.slot(1).unwrap().order, 1);
        assert_eq!(block.ids().collect::<Vec<_>>(), vec!["c", "l", "r"]);
    }

    #[test]
    fn test_json_shape() {
        let block = Block::new("b-1", BlockType::Header)
            .with_content("Hi")
            .with_style(StyleKey::TextAlign, "left");
        let json = serde_json::to_value(&block).unwrap();

        assert_eq!(json["type"], "header");
        assert_eq!(json["styles"]["textAlign"], "left");
        assert!(json.get("children").is_none());

        let back: Block = serde_json::from_value(json).unwrap();
        assert_eq!(back, block);
    }
}
