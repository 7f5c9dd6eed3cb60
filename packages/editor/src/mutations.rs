//! # Block Commands
//!
//! The only way a document's block sequence changes.
//!
//! ## Command Semantics
//!
//! ### Targets
//! - A command naming a block id that no longer exists is a no-op, not an
//!   error. UI events can race against a delete.
//! - `UpdateBlock` may target a top-level block or a column child; every
//!   other command targets top-level blocks only.
//!
//! ### Structure
//! - `columns` blocks hold exactly two `text`/`image` children; no other
//!   block has children. Violations are rejected before anything changes.
//! - Ids are unique across the whole document, column children included.
//!
//! ### Order
//! - After every change `order` is rewritten to `0..N-1`, and column
//!   children to `0` and `1`.

use mailblock_model::{Block, IDGenerator, Styles};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Editing commands over the top-level block sequence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Command {
    /// Insert a block at `index` (clamped to the end)
    InsertBlockAt { index: usize, block: Block },

    /// Remove a top-level block and its column children
    DeleteBlock { block_id: String },

    /// Replace the given attributes of one block
    UpdateBlock { block_id: String, patch: BlockPatch },

    /// Remove the block, then insert it at `new_index` (clamped to the end)
    ReorderBlock { block_id: String, new_index: usize },

    /// Deep copy with fresh ids, placed right after the original
    DuplicateBlock { block_id: String },
}

/// Attributes replaced by [`Command::UpdateBlock`]; `None` keeps the current value
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlockPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Styles>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Block>>,
}

impl BlockPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn styles(styles: Styles) -> Self {
        Self {
            styles: Some(styles),
            ..Default::default()
        }
    }

    pub fn children(children: Vec<Block>) -> Self {
        Self {
            children: Some(children),
            ..Default::default()
        }
    }

    fn apply_to(&self, block: &mut Block) {
        if let Some(content) = &self.content {
            block.content = content.clone();
        }
        if let Some(styles) = &self.styles {
            block.styles = styles.clone();
        }
        if let Some(children) = &self.children {
            block.children = children.clone();
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Block id already in use: {0}")]
    DuplicateId(String),

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),
}

impl Command {
    pub fn target(&self) -> Option<&str> {
        match self {
            Command::InsertBlockAt { .. } => None,
            Command::DeleteBlock { block_id }
            | Command::UpdateBlock { block_id, .. }
            | Command::ReorderBlock { block_id, .. }
            | Command::DuplicateBlock { block_id } => Some(block_id.as_str()),
        }
    }

    /// Label recorded with the history entry this command creates
    pub fn description(&self) -> String {
        match self {
            Command::InsertBlockAt { block, .. } => format!("Insert {}", block.block_type),
            Command::DeleteBlock { .. } => "Delete block".to_string(),
            Command::UpdateBlock { .. } => "Update block".to_string(),
            Command::ReorderBlock { .. } => "Move block".to_string(),
            Command::DuplicateBlock { .. } => "Duplicate block".to_string(),
        }
    }

    /// Apply to `blocks` with validation.
    ///
    /// Returns whether anything changed. On error `blocks` is untouched.
    pub fn apply(&self, blocks: &mut Vec<Block>, ids: &mut IDGenerator) -> Result<bool, MutationError> {
        self.validate(blocks)?;

        let changed = match self {
            Command::InsertBlockAt { index, block } => Self::apply_insert(blocks, *index, block),
            Command::DeleteBlock { block_id } => Self::apply_delete(blocks, block_id),
            Command::UpdateBlock { block_id, patch } => Self::apply_update(blocks, block_id, patch),
            Command::ReorderBlock {
                block_id,
                new_index,
            } => Self::apply_reorder(blocks, block_id, *new_index),
            Command::DuplicateBlock { block_id } => Self::apply_duplicate(blocks, block_id, ids),
        };

        if changed {
            normalize_orders(blocks);
        }

        Ok(changed)
    }

    fn validate(&self, blocks: &[Block]) -> Result<(), MutationError> {
        match self {
            Command::InsertBlockAt { block, .. } => {
                validate_structure(block)?;
                let taken = all_ids(blocks);
                let mut seen = HashSet::new();
                for id in block.ids() {
                    if taken.contains(id) || !seen.insert(id) {
                        return Err(MutationError::DuplicateId(id.to_string()));
                    }
                }
                Ok(())
            }

            Command::UpdateBlock { block_id, patch } => {
                let Some(children) = &patch.children else {
                    return Ok(());
                };

                if let Some(target) = blocks.iter().find(|b| &b.id == block_id) {
                    let mut updated = target.clone();
                    updated.children = children.clone();
                    validate_structure(&updated)?;

                    // Children may keep their own ids but not borrow anyone else's
                    let taken: HashSet<&str> = blocks
                        .iter()
                        .filter(|b| &b.id != block_id)
                        .flat_map(Block::ids)
                        .chain(std::iter::once(block_id.as_str()))
                        .collect();
                    let mut seen = HashSet::new();
                    for child in children {
                        if taken.contains(child.id.as_str()) || !seen.insert(child.id.as_str()) {
                            return Err(MutationError::DuplicateId(child.id.clone()));
                        }
                    }
                } else if find_child(blocks, block_id).is_some() {
                    return Err(MutationError::InvalidStructure(format!(
                        "column child {} cannot have children",
                        block_id
                    )));
                }
                Ok(())
            }

            Command::DeleteBlock { .. }
            | Command::ReorderBlock { .. }
            | Command::DuplicateBlock { .. } => Ok(()),
        }
    }

    fn apply_insert(blocks: &mut Vec<Block>, index: usize, block: &Block) -> bool {
        let index = index.min(blocks.len());
        blocks.insert(index, block.clone());
        true
    }

    fn apply_delete(blocks: &mut Vec<Block>, block_id: &str) -> bool {
        match position(blocks, block_id) {
            Some(pos) => {
                blocks.remove(pos);
                true
            }
            None => false,
        }
    }

    fn apply_update(blocks: &mut [Block], block_id: &str, patch: &BlockPatch) -> bool {
        if let Some(pos) = position(blocks, block_id) {
            let mut updated = blocks[pos].clone();
            patch.apply_to(&mut updated);
            normalize_children(&mut updated);
            if updated == blocks[pos] {
                return false;
            }
            blocks[pos] = updated;
            return true;
        }

        if let Some((pos, slot)) = find_child(blocks, block_id) {
            let child = &mut blocks[pos].children[slot];
            let mut updated = child.clone();
            patch.apply_to(&mut updated);
            if updated == *child {
                return false;
            }
            *child = updated;
            return true;
        }

        false
    }

    fn apply_reorder(blocks: &mut Vec<Block>, block_id: &str, new_index: usize) -> bool {
        let Some(pos) = position(blocks, block_id) else {
            return false;
        };

        let block = blocks.remove(pos);
        let target = new_index.min(blocks.len());
        blocks.insert(target, block);
        target != pos
    }

    fn apply_duplicate(blocks: &mut Vec<Block>, block_id: &str, ids: &mut IDGenerator) -> bool {
        let Some(pos) = position(blocks, block_id) else {
            return false;
        };

        let taken: HashSet<String> = blocks
            .iter()
            .flat_map(Block::ids)
            .map(str::to_string)
            .collect();

        let mut copy = blocks[pos].clone();
        copy.id = ids.new_id_avoiding(|id| taken.contains(id));
        for child in &mut copy.children {
            child.id = ids.new_id_avoiding(|id| taken.contains(id));
        }

        blocks.insert(pos + 1, copy);
        true
    }
}

fn validate_structure(block: &Block) -> Result<(), MutationError> {
    if !block.is_columns() {
        if block.children.is_empty() {
            return Ok(());
        }
        return Err(MutationError::InvalidStructure(format!(
            "{} block {} cannot have children",
            block.block_type, block.id
        )));
    }

    if block.children.len() != 2 {
        return Err(MutationError::InvalidStructure(format!(
            "columns block {} needs exactly 2 children, got {}",
            block.id,
            block.children.len()
        )));
    }

    for child in &block.children {
        if !child.block_type.fits_column_slot() {
            return Err(MutationError::InvalidStructure(format!(
                "{} block {} cannot sit in a column",
                child.block_type, child.id
            )));
        }
        if !child.children.is_empty() {
            return Err(MutationError::InvalidStructure(format!(
                "column child {} cannot have children",
                child.id
            )));
        }
    }

    Ok(())
}

fn position(blocks: &[Block], block_id: &str) -> Option<usize> {
    blocks.iter().position(|b| b.id == block_id)
}

/// `(top-level index, slot)` of a column child
pub(crate) fn find_child(blocks: &[Block], block_id: &str) -> Option<(usize, usize)> {
    blocks.iter().enumerate().find_map(|(pos, block)| {
        block
            .children
            .iter()
            .position(|c| c.id == block_id)
            .map(|slot| (pos, slot))
    })
}

pub(crate) fn all_ids(blocks: &[Block]) -> HashSet<&str> {
    blocks.iter().flat_map(Block::ids).collect()
}

fn normalize_children(block: &mut Block) {
    for (slot, child) in block.children.iter_mut().enumerate() {
        child.order = slot;
    }
}

/// Rewrite `order` to match sequence position
pub fn normalize_orders(blocks: &mut [Block]) {
    for (order, block) in blocks.iter_mut().enumerate() {
        block.order = order;
        normalize_children(block);
    }
}
