//! # Mode Module
//!
//! Conversational modes of the chat widget and the decision table that moves
//! between them.
//!
//! The mode itself is owned by the caller. Nothing in here stores it: the
//! caller passes the current mode in with every message and gets the next
//! mode back.

pub mod exit;
pub mod transition;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

pub use transition::{next_transition, Signals, Transition, TransitionReason};

/// Conversational mode of a chat session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Regular chat with the assistant
    #[default]
    Normal,
    /// Guided construction of an AI prompt
    PromptAuthoring,
    /// Guided construction of a JSON schema for image generation
    ImageSchemaAuthoring,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Normal, Mode::PromptAuthoring, Mode::ImageSchemaAuthoring];

    /// Returns the wire label for the mode
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::PromptAuthoring => "prompt_authoring",
            Mode::ImageSchemaAuthoring => "image_schema_authoring",
        }
    }

    /// Fixed message shown when the chat switches into this mode
    pub fn acknowledgement(&self) -> &'static str {
        match self {
            Mode::Normal => {
                "De acuerdo, salimos del modo especializado. Sigamos con tu consulta."
            }
            Mode::PromptAuthoring => {
                "Modo de creación de prompts activado. Cuéntame para qué necesitas el prompt y lo construimos paso a paso."
            }
            Mode::ImageSchemaAuthoring => {
                "Modo de generación de imágenes activado. Describe la imagen, interfaz o diagrama que quieres crear."
            }
        }
    }

    /// True for the modes that stick until an explicit exit
    pub fn is_specialized(&self) -> bool {
        !matches!(self, Mode::Normal)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Mode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" | "chat" | "context" => Ok(Mode::Normal),
            "prompt" | "prompts" | "prompt_authoring" => Ok(Mode::PromptAuthoring),
            "image" | "imagen" | "image_schema" | "image_schema_authoring" => {
                Ok(Mode::ImageSchemaAuthoring)
            }
            other => Err(AppError::Validation(format!("Unknown mode: {}", other))),
        }
    }
}
