//! # Brain Module
//!
//! Fast, non-LLM analysis of chat messages.
//! Runs on every user message BEFORE anything is sent to the backend.
//!
//! ## Components
//! - `intent`: four-way intent detection using regex patterns
//! - `image_request`: visual generation detection
//! - `keywords`: keyword tables and whole-term matching
//! - `analysis`: input and output data structures
//! - `analyzer`: main orchestrator

pub mod analysis;
pub mod analyzer;
pub mod image_request;
pub mod intent;
pub mod keywords;

pub use analysis::{ClassificationInput, MessageAnalysis, Role, Turn};
pub use analyzer::MessageAnalyzer;
pub use image_request::{ImageDomain, ImageRequest, ImageRequestDetector, OutputFormat};
pub use intent::{detect, Entities, Intent, IntentClassifier, IntentResult, TargetPage};
