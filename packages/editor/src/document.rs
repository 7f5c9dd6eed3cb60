//! # Document Handle
//!
//! One newsletter being edited: the live block sequence, its undo history and
//! the id generator that every new block draws from.
//!
//! ## Lifecycle
//!
//! ```text
//! HTML → Parse → Edit → Serialize
//!          ↓       ↓        ↓
//!       [Block] Commands   HTML
//! ```
//!
//! Every successful, state-changing command bumps `version` and records a
//! snapshot. Commands that change nothing leave both untouched.

use crate::config::EditorConfig;
use crate::mutations::{all_ids, find_child, normalize_orders, Command, MutationError};
use crate::undo_stack::{HistoryEntry, UndoStack};
use mailblock_compiler_html::{compile_to_html, serialize, CompileOptions};
use mailblock_model::{template_for, Block, BlockType, IDGenerator};
use std::collections::HashSet;

/// Result of applying a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationResult {
    /// Document version after the command
    pub version: u64,

    /// False when the command was a no-op
    pub changed: bool,
}

/// Editable newsletter document
#[derive(Debug, Clone)]
pub struct Document {
    /// Current version number (increments on each change)
    pub version: u64,

    blocks: Vec<Block>,
    history: UndoStack,
    ids: IDGenerator,
}

impl Document {
    /// Empty document with default settings
    pub fn new() -> Self {
        Self::with_config(&EditorConfig::default())
    }

    pub fn with_config(config: &EditorConfig) -> Self {
        Self {
            version: 0,
            blocks: Vec::new(),
            history: UndoStack::with_max_levels(Vec::new(), config.history_capacity),
            ids: IDGenerator::new("document"),
        }
    }

    /// Import HTML. History starts at the imported state.
    pub fn from_html(html: &str, config: &EditorConfig) -> Self {
        let mut doc = Self::with_config(config);
        doc.ids = IDGenerator::new(html);
        let blocks = mailblock_parser::parse_with(html, &mut doc.ids);
        doc.replace(blocks);
        doc
    }

    /// Swap in a whole new block sequence and drop history
    pub fn replace(&mut self, mut blocks: Vec<Block>) {
        normalize_orders(&mut blocks);
        self.history.reset(blocks.clone());
        self.blocks = blocks;
        self.version += 1;
        tracing::debug!(blocks = self.blocks.len(), version = self.version, "document replaced");
    }

    /// Apply a command and record the result in history
    pub fn apply(&mut self, command: Command) -> Result<MutationResult, MutationError> {
        let changed = match command.apply(&mut self.blocks, &mut self.ids) {
            Ok(changed) => changed,
            Err(err) => {
                tracing::warn!(error = %err, command = %command.description(), "command rejected");
                return Err(err);
            }
        };

        if changed {
            debug_assert!(self.blocks.iter().enumerate().all(|(i, b)| b.order == i));
            self.version += 1;
            self.history
                .push(HistoryEntry::new(self.blocks.clone()).with_description(command.description()));
        } else {
            tracing::debug!(target_id = ?command.target(), "command ignored");
        }

        Ok(MutationResult {
            version: self.version,
            changed,
        })
    }

    /// Restore the previous snapshot; false at the oldest entry
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(entry) => {
                self.blocks = entry.blocks.clone();
                self.version += 1;
                true
            }
            None => false,
        }
    }

    /// Re-apply the most recently undone snapshot; false when there is none
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(entry) => {
                self.blocks = entry.blocks.clone();
                self.version += 1;
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.history.undo_description()
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.history.redo_description()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Deep copy of the current block sequence
    pub fn snapshot(&self) -> Vec<Block> {
        self.blocks.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Find a block by id, column children included
    pub fn block(&self, block_id: &str) -> Option<&Block> {
        if let Some(block) = self.blocks.iter().find(|b| b.id == block_id) {
            return Some(block);
        }
        find_child(&self.blocks, block_id).map(|(pos, slot)| &self.blocks[pos].children[slot])
    }

    /// Top-level position of a block
    pub fn index_of(&self, block_id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == block_id)
    }

    /// Stamp a new block of `block_type` from its template, with ids unused
    /// anywhere in this document
    pub fn instantiate(&mut self, block_type: BlockType) -> Block {
        let taken: HashSet<String> = all_ids(&self.blocks).into_iter().map(str::to_string).collect();
        let ids = &mut self.ids;
        template_for(block_type).instantiate_with(|| ids.new_id_avoiding(|id| taken.contains(id)))
    }

    /// Fresh id unused anywhere in this document
    pub fn new_block_id(&mut self) -> String {
        let taken: HashSet<String> = all_ids(&self.blocks).into_iter().map(str::to_string).collect();
        self.ids.new_id_avoiding(|id| taken.contains(id))
    }

    pub fn serialize(&self) -> String {
        serialize(&self.blocks)
    }

    pub fn to_html(&self, options: CompileOptions) -> String {
        compile_to_html(&self.blocks, options)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
