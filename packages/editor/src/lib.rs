//! # Mailblock Editor
//!
//! Editing core for block newsletters.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ parser: HTML → [Block]                      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document + history + commands       │
//! │  - Canvas gestures → commands               │
//! │  - Properties panel → style merges          │
//! │  - Debounced text input                     │
//! │  - Save/send through collaborator traits    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html: [Block] → email HTML         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Commands are the only writers**: canvas, properties and session all
//!    go through [`Document::apply`]
//! 2. **Snapshots, not diffs**: history holds deep copies, never shared state
//! 3. **Tolerant targets**: a command naming a missing block does nothing
//! 4. **Strict structure**: nesting violations are rejected before any change
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mailblock_editor::{Canvas, Document, DragPayload, DropZone, EditorConfig};
//! use mailblock_model::BlockType;
//!
//! let mut doc = Document::from_html(&html, &EditorConfig::default());
//! let mut canvas = Canvas::new();
//!
//! canvas.begin_drag(DragPayload::Template(BlockType::Button));
//! canvas.drop(&mut doc, DropZone::End)?;
//!
//! doc.undo();
//! let html = doc.serialize();
//! ```

mod canvas;
mod config;
mod delivery;
mod document;
mod errors;
mod mutations;
mod session;
mod undo_stack;

pub mod properties;

pub use canvas::{Canvas, CanvasResult, DragPayload, DropZone};
pub use config::EditorConfig;
pub use delivery::{DeliveryError, DraftStore, Mailer, OutgoingMessage, EMPTY_NEWSLETTER_HTML};
pub use document::{Document, MutationResult};
pub use errors::EditorError;
pub use mutations::{normalize_orders, BlockPatch, Command, MutationError};
pub use session::{EditSession, PendingInput};
pub use undo_stack::{HistoryEntry, UndoStack};
