use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::brain::analysis::{Role, Turn};
use crate::error::AppError;
use crate::mode::{Mode, Transition};

/// A past turn as the backend expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

impl From<&Turn> for HistoryEntry {
    fn from(turn: &Turn) -> Self {
        Self {
            role: turn.role,
            content: turn.content.clone(),
        }
    }
}

/// Body of a generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The user's message, forwarded untouched.
    pub message: String,
    /// Mode the message must be answered in.
    pub mode: Mode,
    /// Whether the session keeps its history across mode changes.
    pub persistent_context: bool,
    /// Turns before `message`, oldest first.
    pub conversation_history: Vec<HistoryEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

/// What the agent did with one user message.
#[derive(Debug, Clone, Serialize)]
pub struct AgentReply {
    pub session_id: String,
    /// Mode after the message.
    pub mode: Mode,
    /// How the mode table handled the message.
    pub transition: Transition,
    /// Backend reply; `None` when the agent is waiting for the next message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl AgentReply {
    /// Fixed acknowledgement to show before (or instead of) the response.
    pub fn acknowledgement(&self) -> Option<&'static str> {
        self.transition.acknowledgement
    }

    /// True if the backend was not called and the agent waits for input.
    pub fn is_waiting(&self) -> bool {
        !self.transition.continue_processing
    }
}

/// Messages that can be sent to the agent actor.
#[derive(Debug)]
pub enum AgentMessage {
    /// A request to process a user's message from a specific session.
    ProcessUserMessage {
        session_id: String,
        content: String,
        /// A channel to send the reply back.
        responder: oneshot::Sender<Result<AgentReply, AppError>>,
    },
    /// Manual mode selection, bypassing the transition table.
    SetMode {
        session_id: String,
        mode: Mode,
        responder: oneshot::Sender<Mode>,
    },
    /// Toggle history persistence across mode changes.
    SetPersistentContext {
        session_id: String,
        enabled: bool,
        responder: oneshot::Sender<()>,
    },
    /// Query the current mode of a session.
    CurrentMode {
        session_id: String,
        responder: oneshot::Sender<Mode>,
    },
    /// Drop the stored history of a session.
    ClearHistory {
        session_id: String,
        responder: oneshot::Sender<()>,
    },
    /// A command to stop the actor.
    Shutdown,
}
