//! # Edit Session Management
//!
//! One user's editing state: the document, the canvas and any typed text not
//! yet committed.
//!
//! Text input is debounced. Keystrokes only replace the pending input; it is
//! committed as a single `UpdateBlock` once the input has been quiet for
//! `input_debounce_ms`, or immediately on blur, undo/redo, save and send.

use crate::canvas::Canvas;
use crate::config::EditorConfig;
use crate::delivery::{DraftStore, Mailer, OutgoingMessage};
use crate::document::{Document, MutationResult};
use crate::errors::EditorError;
use crate::mutations::{BlockPatch, Command};
use std::time::Instant;

/// Typed content waiting for the debounce to elapse
#[derive(Debug, Clone, PartialEq)]
pub struct PendingInput {
    pub block_id: String,
    pub html: String,

    /// Time of the last keystroke
    pub at: Instant,
}

/// Single edit session
pub struct EditSession {
    /// Unique session identifier
    pub id: String,

    pub document: Document,
    pub canvas: Canvas,
    config: EditorConfig,
    pending: Option<PendingInput>,
}

impl EditSession {
    pub fn new(id: impl Into<String>, document: Document, config: EditorConfig) -> Self {
        Self {
            id: id.into(),
            document,
            canvas: Canvas::new(),
            config,
            pending: None,
        }
    }

    /// Start a session on imported HTML
    pub fn from_html(id: impl Into<String>, html: &str, config: EditorConfig) -> Self {
        let document = Document::from_html(html, &config);
        Self::new(id, document, config)
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn pending(&self) -> Option<&PendingInput> {
        self.pending.as_ref()
    }

    /// Record typed content for a block.
    ///
    /// Input for a different block commits the previous input first.
    pub fn record_input(
        &mut self,
        block_id: impl Into<String>,
        html: impl Into<String>,
        now: Instant,
    ) -> Result<(), EditorError> {
        let block_id = block_id.into();
        if self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.block_id != block_id)
        {
            self.flush()?;
        }

        self.pending = Some(PendingInput {
            block_id,
            html: html.into(),
            at: now,
        });
        Ok(())
    }

    /// Commit pending input whose debounce has elapsed
    pub fn poll(&mut self, now: Instant) -> Result<Option<MutationResult>, EditorError> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|pending| now.saturating_duration_since(pending.at) >= self.config.input_debounce());
        if !due {
            return Ok(None);
        }
        self.flush()
    }

    /// Commit pending input now
    pub fn flush(&mut self) -> Result<Option<MutationResult>, EditorError> {
        let Some(pending) = self.pending.take() else {
            return Ok(None);
        };

        let unchanged = self
            .document
            .block(&pending.block_id)
            .map_or(true, |block| block.content == pending.html);
        if unchanged {
            return Ok(None);
        }

        tracing::debug!(session = %self.id, block_id = %pending.block_id, "committing text input");
        let result = self.document.apply(Command::UpdateBlock {
            block_id: pending.block_id,
            patch: BlockPatch::content(pending.html),
        })?;
        Ok(Some(result))
    }

    pub fn undo(&mut self) -> Result<bool, EditorError> {
        self.flush()?;
        Ok(self.document.undo())
    }

    pub fn redo(&mut self) -> Result<bool, EditorError> {
        self.flush()?;
        Ok(self.document.redo())
    }

    /// Serialized HTML of the current state, pending input included
    pub fn html(&mut self) -> Result<String, EditorError> {
        self.flush()?;
        Ok(self.document.serialize())
    }

    pub fn save(&mut self, store: &mut dyn DraftStore, subject: &str) -> Result<(), EditorError> {
        let html = self.html()?;
        store.save_draft(&html, subject)?;
        tracing::info!(session = %self.id, bytes = html.len(), "draft saved");
        Ok(())
    }

    pub fn send(
        &mut self,
        mailer: &mut dyn Mailer,
        subject: &str,
        recipients: Vec<String>,
    ) -> Result<OutgoingMessage, EditorError> {
        let html = self.html()?;
        let message = OutgoingMessage::prepare(&html, subject, recipients)?;
        mailer.send(&message)?;
        tracing::info!(
            session = %self.id,
            recipients = message.recipients.len(),
            "newsletter sent"
        );
        Ok(message)
    }
}
