//! Lia chat agent core.
//!
//! Decides, for every chat message, what the user wants (create a prompt,
//! navigate, ask a question, chat) and whether the conversation should move
//! into or out of prompt authoring or image-schema authoring.

pub mod actors;
pub mod brain;
pub mod config;
pub mod error;
pub mod logging;
pub mod mode;

pub use error::AppError;

#[cfg(test)]
mod tests;
