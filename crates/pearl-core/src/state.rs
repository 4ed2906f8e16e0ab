//! UI-agnostic conversation state types
//!
//! These are shared between front-ends and don't depend on any UI framework.

use serde::{Deserialize, Serialize};

use crate::markup::DisplayMarkup;

/// The role of a chat message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// What a display surface should draw for a turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayContent {
    /// Drawn literally, never interpreted as markup
    Plain(String),
    /// Pre-rendered markup, drawn with its structure applied
    Markup(DisplayMarkup),
}

/// One message in the conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub raw_text: String,
    pub content: DisplayContent,
}

impl Turn {
    pub fn user(text: &str) -> Self {
        Self {
            role: Role::User,
            raw_text: text.to_string(),
            content: DisplayContent::Plain(text.to_string()),
        }
    }

    pub fn assistant(raw_text: String, markup: DisplayMarkup) -> Self {
        Self {
            role: Role::Assistant,
            raw_text,
            content: DisplayContent::Markup(markup),
        }
    }

    /// Assistant turn that bypasses the markup renderer
    pub fn assistant_plain(text: &str) -> Self {
        Self {
            role: Role::Assistant,
            raw_text: text.to_string(),
            content: DisplayContent::Plain(text.to_string()),
        }
    }
}

/// Identifies one submission for the lifetime of a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubmissionId(pub u64);

/// Whether a backend call is outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingState {
    #[default]
    Idle,
    AwaitingResponse { submission: SubmissionId },
}

impl PendingState {
    pub fn is_pending(&self) -> bool {
        matches!(self, PendingState::AwaitingResponse { .. })
    }
}
