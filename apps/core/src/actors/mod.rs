//! # Actors Module
//!
//! The chat agent and its collaborators.
//!
//! ## Components
//! - `agent`: actor owning per-session mode and history
//! - `session`: state of one conversation
//! - `backend`: HTTP client for the generation endpoint
//! - `traits`: backend abstraction
//! - `messages`: actor messages and wire types

pub mod agent;
pub mod backend;
pub mod messages;
pub mod session;
pub mod traits;

pub use agent::AgentHandle;
pub use backend::HttpChatBackend;
pub use messages::{AgentReply, ChatRequest, HistoryEntry};
pub use session::ChatSession;
pub use traits::ChatBackend;
