//! # Canvas
//!
//! Turns pointer gestures into document commands. The canvas never edits
//! blocks itself; every change goes through [`Document::apply`].
//!
//! ## Drops
//!
//! | payload            | zone               | command          |
//! |--------------------|--------------------|------------------|
//! | template           | index / end        | `InsertBlockAt`  |
//! | existing block id  | index / end        | `ReorderBlock`   |
//! | `text`/`image` tpl | column slot        | `UpdateBlock`    |
//! | anything else      | column slot        | ignored          |

use crate::document::{Document, MutationResult};
use crate::mutations::{BlockPatch, Command, MutationError};
use mailblock_model::{Block, BlockType};

/// What is being dragged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragPayload {
    /// A new block from the template palette
    Template(BlockType),

    /// An existing top-level block
    Block(String),
}

/// Where a drag ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropZone {
    /// Before the block currently at this index
    Index(usize),
    End,
    ColumnSlot { block_id: String, slot: usize },
}

pub type CanvasResult = Result<Option<MutationResult>, MutationError>;

#[derive(Debug, Clone, Default)]
pub struct Canvas {
    selected: Option<String>,
    drag: Option<DragPayload>,
    hover: Option<usize>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, block_id: impl Into<String>) {
        self.selected = Some(block_id.into());
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn begin_drag(&mut self, payload: DragPayload) {
        self.drag = Some(payload);
        self.hover = None;
    }

    /// Track the insertion point under the pointer
    pub fn drag_over(&mut self, index: usize) {
        if self.drag.is_some() {
            self.hover = Some(index);
        }
    }

    pub fn hover_index(&self) -> Option<usize> {
        self.hover
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Cancel the drag without dropping
    pub fn end_drag(&mut self) {
        self.drag = None;
        self.hover = None;
    }

    /// Drop the active payload on `zone`; no-op without an active drag
    pub fn drop(&mut self, doc: &mut Document, zone: DropZone) -> CanvasResult {
        let Some(payload) = self.drag.take() else {
            return Ok(None);
        };
        self.hover = None;

        let index = match &zone {
            DropZone::Index(index) => *index,
            DropZone::End => doc.blocks().len(),
            DropZone::ColumnSlot { block_id, slot } => {
                return match payload {
                    DragPayload::Template(block_type) => {
                        self.drop_into_column(doc, block_id, *slot, block_type)
                    }
                    DragPayload::Block(_) => {
                        tracing::debug!("existing blocks cannot be dropped into a column");
                        Ok(None)
                    }
                };
            }
        };

        match payload {
            DragPayload::Template(block_type) => {
                let block = doc.instantiate(block_type);
                self.selected = Some(block.id.clone());
                doc.apply(Command::InsertBlockAt { index, block }).map(Some)
            }
            DragPayload::Block(block_id) => {
                let Some(from) = doc.index_of(&block_id) else {
                    return Ok(None);
                };
                // Dropping before a later block lands one slot earlier once
                // the dragged block is removed
                let new_index = if index > from { index - 1 } else { index };
                doc.apply(Command::ReorderBlock { block_id, new_index }).map(Some)
            }
        }
    }

    /// Move a block one position up; nothing at the top
    pub fn move_up(&self, doc: &mut Document, block_id: &str) -> CanvasResult {
        match doc.index_of(block_id) {
            Some(index) if index > 0 => doc
                .apply(Command::ReorderBlock {
                    block_id: block_id.to_string(),
                    new_index: index - 1,
                })
                .map(Some),
            _ => Ok(None),
        }
    }

    /// Move a block one position down; nothing at the bottom
    pub fn move_down(&self, doc: &mut Document, block_id: &str) -> CanvasResult {
        match doc.index_of(block_id) {
            Some(index) if index + 1 < doc.blocks().len() => doc
                .apply(Command::ReorderBlock {
                    block_id: block_id.to_string(),
                    new_index: index + 1,
                })
                .map(Some),
            _ => Ok(None),
        }
    }

    pub fn duplicate(&self, doc: &mut Document, block_id: &str) -> CanvasResult {
        doc.apply(Command::DuplicateBlock {
            block_id: block_id.to_string(),
        })
        .map(Some)
    }

    pub fn delete(&mut self, doc: &mut Document, block_id: &str) -> CanvasResult {
        let result = doc.apply(Command::DeleteBlock {
            block_id: block_id.to_string(),
        })?;

        let selected_gone = self
            .selected
            .as_deref()
            .is_some_and(|selected| doc.block(selected).is_none());
        if selected_gone {
            self.selected = None;
        }
        Ok(Some(result))
    }

    /// Replace a column slot with a fresh `text` or `image` block.
    ///
    /// Other types are ignored without error.
    pub fn drop_into_column(
        &mut self,
        doc: &mut Document,
        block_id: &str,
        slot: usize,
        block_type: BlockType,
    ) -> CanvasResult {
        if !block_type.fits_column_slot() {
            tracing::debug!(%block_type, "rejected column drop");
            return Ok(None);
        }
        let Some(children) = column_children(doc, block_id, slot) else {
            return Ok(None);
        };

        let child = doc.instantiate(block_type);
        self.replace_slot(doc, block_id, slot, children, child)
    }

    /// Reset a column slot to an empty `text` block
    pub fn clear_column_slot(&mut self, doc: &mut Document, block_id: &str, slot: usize) -> CanvasResult {
        let Some(children) = column_children(doc, block_id, slot) else {
            return Ok(None);
        };

        let child = Block::new(doc.new_block_id(), BlockType::Text);
        self.replace_slot(doc, block_id, slot, children, child)
    }

    /// Set the content of the block in a column slot
    pub fn edit_slot_content(
        &self,
        doc: &mut Document,
        block_id: &str,
        slot: usize,
        content: impl Into<String>,
    ) -> CanvasResult {
        let Some(children) = column_children(doc, block_id, slot) else {
            return Ok(None);
        };

        doc.apply(Command::UpdateBlock {
            block_id: children[slot].id.clone(),
            patch: BlockPatch::content(content),
        })
        .map(Some)
    }

    fn replace_slot(
        &mut self,
        doc: &mut Document,
        block_id: &str,
        slot: usize,
        mut children: Vec<Block>,
        child: Block,
    ) -> CanvasResult {
        if self.selected.as_deref() == Some(children[slot].id.as_str()) {
            self.selected = None;
        }
        children[slot] = child;

        doc.apply(Command::UpdateBlock {
            block_id: block_id.to_string(),
            patch: BlockPatch::children(children),
        })
        .map(Some)
    }
}

/// Current children of a columns block, if `slot` exists in it
fn column_children(doc: &Document, block_id: &str, slot: usize) -> Option<Vec<Block>> {
    let block = doc.blocks().iter().find(|b| b.id == block_id)?;
    if !block.is_columns() || slot >= block.children.len() {
        return None;
    }
    Some(block.children.clone())
}
