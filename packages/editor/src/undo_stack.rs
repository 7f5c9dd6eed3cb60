//! # Undo/Redo Stack
//!
//! Linear snapshot history of a block document.
//!
//! ## Design
//!
//! - Every committed change records a full deep copy of the block sequence
//! - Undo moves the present entry onto the redo stack and restores the
//!   previous one; redo does the reverse
//! - A new entry clears the redo stack
//! - Capacity counts every entry including the present one; the oldest
//!   entries are evicted first
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new(blocks.clone());
//! stack.push(HistoryEntry::new(edited.clone()).with_description("Delete block"));
//!
//! if let Some(entry) = stack.undo() {
//!     blocks = entry.blocks.clone();
//! }
//! ```

use mailblock_model::Block;
use std::collections::VecDeque;

/// One point in the document's history
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub blocks: Vec<Block>,

    /// What produced this state
    pub description: Option<String>,
}

impl HistoryEntry {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Undo/redo stack for document editing
#[derive(Debug, Clone)]
pub struct UndoStack {
    /// Earlier states, oldest first
    past: VecDeque<HistoryEntry>,

    present: HistoryEntry,

    /// Undone states, most recently undone last
    future: Vec<HistoryEntry>,

    /// Maximum number of entries, present included (0 = unlimited)
    max_levels: usize,
}

impl UndoStack {
    /// Stack holding only `blocks`, with the default capacity (50)
    pub fn new(blocks: Vec<Block>) -> Self {
        Self::with_max_levels(blocks, 50)
    }

    pub fn with_max_levels(blocks: Vec<Block>, max_levels: usize) -> Self {
        Self {
            past: VecDeque::new(),
            present: HistoryEntry::new(blocks),
            future: Vec::new(),
            max_levels,
        }
    }

    /// Drop all history and start over from `blocks`
    pub fn reset(&mut self, blocks: Vec<Block>) {
        self.past.clear();
        self.future.clear();
        self.present = HistoryEntry::new(blocks);
    }

    /// Record a new present state
    pub fn push(&mut self, entry: HistoryEntry) {
        let previous = std::mem::replace(&mut self.present, entry);
        self.past.push_back(previous);

        // Trim if exceeded max levels
        if self.max_levels > 0 {
            while self.past.len() + 1 > self.max_levels {
                self.past.pop_front();
            }
        }

        // Clear redo stack (new action invalidates future)
        self.future.clear();
    }

    /// Step back one entry; `None` at the oldest entry
    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        let previous = self.past.pop_back()?;
        let undone = std::mem::replace(&mut self.present, previous);
        self.future.push(undone);
        Some(&self.present)
    }

    /// Step forward one entry; `None` when nothing was undone
    pub fn redo(&mut self) -> Option<&HistoryEntry> {
        let next = self.future.pop()?;
        let current = std::mem::replace(&mut self.present, next);
        self.past.push_back(current);
        Some(&self.present)
    }

    pub fn present(&self) -> &HistoryEntry {
        &self.present
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.past.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.future.len()
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    /// Get description of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        if self.past.is_empty() {
            return None;
        }
        self.present.description.as_deref()
    }

    /// Get description of the next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.future
            .last()
            .and_then(|entry| entry.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailblock_model::BlockType;

    fn state(ids: &[&str]) -> Vec<Block> {
        ids.iter().map(|id| Block::new(*id, BlockType::Text)).collect()
    }

    #[test]
    fn test_undo_stack_creation() {
        let stack = UndoStack::default();
        assert_eq!(stack.undo_levels(), 0);
        assert_eq!(stack.redo_levels(), 0);
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
        assert_eq!(stack.max_levels(), 50);
    }

    #[test]
    fn test_push_undo_redo() {
        let mut stack = UndoStack::new(state(&[]));
        stack.push(HistoryEntry::new(state(&["a"])).with_description("Insert text"));

        assert_eq!(stack.undo_description(), Some("Insert text"));

        let undone = stack.undo().unwrap();
        assert!(undone.blocks.is_empty());
        assert_eq!(stack.redo_levels(), 1);
        assert_eq!(stack.redo_description(), Some("Insert text"));

        let redone = stack.redo().unwrap();
        assert_eq!(redone.blocks.len(), 1);
        assert_eq!(stack.undo_levels(), 1);
        assert!(stack.redo().is_none());
    }

    #[test]
    fn test_boundaries_are_noops() {
        let mut stack = UndoStack::new(state(&["a"]));
        assert!(stack.undo().is_none());
        assert!(stack.redo().is_none());
        assert_eq!(stack.present().blocks.len(), 1);
    }

    #[test]
    fn test_new_entry_clears_redo() {
        let mut stack = UndoStack::new(state(&[]));
        stack.push(HistoryEntry::new(state(&["a"])));
        stack.undo();
        assert!(stack.can_redo());

        stack.push(HistoryEntry::new(state(&["b"])));
        assert!(!stack.can_redo());
        assert_eq!(stack.present().blocks[0].id, "b");
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut stack = UndoStack::with_max_levels(state(&[]), 3);
        for id in ["a", "b", "c", "d"] {
            stack.push(HistoryEntry::new(state(&[id])));
        }

        // Present "d" plus two earlier entries
        assert_eq!(stack.undo_levels(), 2);
        assert_eq!(stack.undo().unwrap().blocks[0].id, "c");
        assert_eq!(stack.undo().unwrap().blocks[0].id, "b");
        assert!(stack.undo().is_none());
    }

    #[test]
    fn test_unlimited_levels() {
        let mut stack = UndoStack::with_max_levels(state(&[]), 0);
        for i in 0..200 {
            stack.push(HistoryEntry::new(state(&[&i.to_string()])));
        }
        assert_eq!(stack.undo_levels(), 200);
    }
}
