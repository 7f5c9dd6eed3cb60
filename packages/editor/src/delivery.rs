//! # Delivery
//!
//! Hand-off points for finished newsletters. Storage and mail transport live
//! outside this crate; the editor only prepares the message and calls these
//! traits.

use mailblock_compiler_html::html_to_plain_text;
use thiserror::Error;

/// Sent instead of an empty document
pub const EMPTY_NEWSLETTER_HTML: &str = "<div style=\"max-width: 600px; margin: 0 auto; padding: 20px; font-family: Arial, sans-serif;\">\
<p>This newsletter is empty. Please add content using the editor.</p>\
</div>";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeliveryError {
    #[error("No recipients")]
    NoRecipients,

    #[error("Failed to save draft: {0}")]
    Store(String),

    #[error("Failed to send: {0}")]
    Send(String),
}

/// Persists newsletter drafts
pub trait DraftStore {
    fn save_draft(&mut self, html: &str, subject: &str) -> Result<(), DeliveryError>;
}

/// Sends a prepared message
pub trait Mailer {
    fn send(&mut self, message: &OutgoingMessage) -> Result<(), DeliveryError>;
}

/// A newsletter ready for a [`Mailer`]
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMessage {
    pub subject: String,
    pub html: String,

    /// Plain-text alternative derived from `html`
    pub text: String,

    pub recipients: Vec<String>,
}

impl OutgoingMessage {
    /// Build a message, substituting the placeholder document for blank HTML
    pub fn prepare(html: &str, subject: &str, recipients: Vec<String>) -> Result<Self, DeliveryError> {
        if recipients.is_empty() {
            return Err(DeliveryError::NoRecipients);
        }

        let html = if html.trim().is_empty() {
            tracing::info!("newsletter is empty, sending placeholder");
            EMPTY_NEWSLETTER_HTML.to_string()
        } else {
            html.to_string()
        };
        let text = html_to_plain_text(&html);

        Ok(Self {
            subject: subject.to_string(),
            html,
            text,
            recipients,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_html_uses_placeholder() {
        let message = OutgoingMessage::prepare("  ", "Hello", vec!["a@x.test".to_string()]).unwrap();

        assert_eq!(message.html, EMPTY_NEWSLETTER_HTML);
        assert_eq!(
            message.text,
            "This newsletter is empty. Please add content using the editor."
        );
    }

    #[test]
    fn test_text_alternative() {
        let message = OutgoingMessage::prepare(
            "<h1>News</h1><p>Read <a href=\"https://x.test\">more</a></p>",
            "Hello",
            vec!["a@x.test".to_string()],
        )
        .unwrap();

        assert_eq!(message.text, "News\n\nRead more (https://x.test)");
    }

    #[test]
    fn test_requires_recipients() {
        assert_eq!(
            OutgoingMessage::prepare("<p>x</p>", "s", vec![]),
            Err(DeliveryError::NoRecipients)
        );
    }
}
