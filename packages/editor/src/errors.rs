//! Error types for the editor

use crate::delivery::DeliveryError;
use crate::mutations::MutationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("Invalid image URL {0:?}: must start with http://, https:// or data:")]
    InvalidImageUrl(String),
}
