//! # Mailblock Model
//!
//! Data contract for newsletter block documents.
//!
//! ```text
//! Document = [Block]            ordered, `order` == index
//! Block    = id + type + content + styles (+ children for columns)
//! ```
//!
//! Nothing in this crate edits a document. The parser, the serializer and the
//! editor all build on these types, and every `match` over [`BlockType`] is
//! written without a wildcard arm so adding a block kind breaks the build until
//! each of them handles it.

pub mod block;
pub mod error;
pub mod id_generator;
pub mod styles;
pub mod template;

pub use block::{Block, BlockType};
pub use error::ModelError;
pub use id_generator::{get_document_id, IDGenerator};
pub use styles::{default_style, ColumnLayout, StyleKey, Styles};
pub use template::{template_for, BlockTemplate, TEMPLATES};
