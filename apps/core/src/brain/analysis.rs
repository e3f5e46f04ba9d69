//! Input and output structures of message analysis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::image_request::ImageRequest;
use super::intent::IntentResult;
use crate::mode::Mode;

/// Author of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A prior message of the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Everything the analyzer gets for one message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationInput {
    /// Raw user message
    pub message: String,
    /// Mode the chat is in when the message arrives
    pub mode: Mode,
    /// Recent turns; carried along for context, not used by the matchers
    #[serde(default)]
    pub history: Vec<Turn>,
}

impl ClassificationInput {
    pub fn new(message: impl Into<String>, mode: Mode) -> Self {
        Self {
            message: message.into(),
            mode,
            history: vec![],
        }
    }

    pub fn with_history(mut self, history: Vec<Turn>) -> Self {
        self.history = history;
        self
    }
}

/// Complete analysis of one message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageAnalysis {
    /// Original message
    pub message: String,
    /// Four-way intent with confidence and entities
    pub intent: IntentResult,
    /// Visual generation signal
    pub image: ImageRequest,
    /// Processing time in microseconds
    pub processing_time_us: u64,
}

impl MessageAnalysis {
    /// Get a summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Intent: {} ({:.0}%), Image: {:.0}%, Topic: {}, Target: {}",
            self.intent.intent,
            self.intent.confidence * 100.0,
            self.image.confidence * 100.0,
            self.intent.prompt_topic().unwrap_or("-"),
            self.intent.target_page().map(|p| p.id()).unwrap_or("-"),
        )
    }
}
