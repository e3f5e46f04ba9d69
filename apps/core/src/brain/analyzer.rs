//! Message Analyzer - runs every detector on an incoming chat message.
//!
//! Produces a [`MessageAnalysis`] that the mode machine turns into a
//! transition. Everything here is synchronous and side-effect free apart
//! from a debug log line.

use std::time::Instant;
use tracing::debug;

use super::analysis::{ClassificationInput, MessageAnalysis};
use super::image_request::ImageRequestDetector;
use super::intent::IntentClassifier;

/// Orchestrates intent classification and visual request detection
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageAnalyzer {
    intent_classifier: IntentClassifier,
    image_detector: ImageRequestDetector,
}

impl MessageAnalyzer {
    /// Create a new analyzer with default detectors
    pub fn new() -> Self {
        Self {
            intent_classifier: IntentClassifier::new(),
            image_detector: ImageRequestDetector::new(),
        }
    }

    /// Analyze a message in the context of the current mode
    pub fn analyze(&self, input: &ClassificationInput) -> MessageAnalysis {
        let start = Instant::now();

        let intent = self.intent_classifier.detect(&input.message);
        let image = self.image_detector.detect(&input.message);

        let analysis = MessageAnalysis {
            message: input.message.clone(),
            intent,
            image,
            processing_time_us: start.elapsed().as_micros() as u64,
        };

        debug!(
            mode = %input.mode,
            history_len = input.history.len(),
            "Message analyzed: {}",
            analysis.summary()
        );

        analysis
    }
}
