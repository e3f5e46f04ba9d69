//! Brain Module Tests
//!
//! Properties of the intent and image-request detectors that must hold for
//! any input, plus the analyzer orchestration.

use crate::brain::{
    detect, ClassificationInput, ImageRequestDetector, Intent, IntentClassifier, MessageAnalyzer,
    TargetPage, Turn,
};
use crate::mode::Mode;

fn sample_inputs() -> Vec<String> {
    let mut inputs: Vec<String> = [
        "",
        "   ",
        "hola",
        "cuéntame un chiste",
        "¿Qué cursos hay?",
        "Ayúdame a crear un prompt para ventas",
        "crear generar hacer prompt prompts plantilla ia chatgpt claude instrucciones",
        "system prompt engineering: prompt para crear prompts efectivos que generen ventas",
        "llévame al dashboard",
        "muéstrame dónde está el enlace de la comunidad, quiero ir al taller",
        "Diseña un wireframe para una app móvil",
        "nano banana: crea una imagen de producto para marketing con diagrama de flujo",
        "Create a prompt for customer support",
        "🚀🚀🚀 ???",
        "ñandú ÁÉÍÓÚ",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    inputs.push("crear un prompt ".repeat(200));
    inputs.push("llévame a los cursos ".repeat(200));
    inputs
}

#[cfg(test)]
mod intent_property_tests {
    use super::*;

    #[test]
    fn test_prompt_with_creation_verb_is_create_prompt() {
        let classifier = IntentClassifier::new();

        let messages = vec![
            "Ayúdame a crear un prompt para ventas",
            "Necesito generar un prompt de marketing",
            "Hazme un prompt",
            "prompt para crear ideas de negocio",
            "Create a prompt for customer support",
            "write me a system prompt",
        ];

        for message in messages {
            let result = classifier.detect(message);
            assert_eq!(
                result.intent,
                Intent::CreatePrompt,
                "Expected CreatePrompt for '{}'",
                message
            );
            assert!(
                result.confidence >= 0.6,
                "Expected confidence >= 0.6 for '{}', got {}",
                message,
                result.confidence
            );
        }
    }

    #[test]
    fn test_confidence_never_exceeds_cap() {
        let classifier = IntentClassifier::new();
        let detector = ImageRequestDetector::new();

        for input in sample_inputs() {
            let intent = classifier.detect(&input);
            assert!(
                (0.0..=0.95).contains(&intent.confidence),
                "Intent confidence {} out of range for '{}'",
                intent.confidence,
                input
            );

            let image = detector.detect(&input);
            assert!(
                (0.0..=0.95).contains(&image.confidence),
                "Image confidence {} out of range for '{}'",
                image.confidence,
                input
            );
        }
    }

    #[test]
    fn test_detection_is_idempotent() {
        for input in sample_inputs() {
            assert_eq!(detect(&input), detect(&input), "Not idempotent for '{}'", input);
        }
    }

    #[test]
    fn test_whitespace_only_is_general() {
        for input in ["", " ", "\t\n  "] {
            let result = detect(input);
            assert_eq!(result.intent, Intent::General);
            assert_eq!(result.confidence, 0.5);
            assert!(result.entities.is_none());
            assert!(result.matched_patterns.is_empty());
        }
    }

    #[test]
    fn test_prompt_topic_keeps_original_case() {
        let result = detect("Ayúdame a crear un prompt para ventas");
        assert_eq!(result.prompt_topic(), Some("ventas"));

        let result = detect("Quiero un prompt sobre Marketing Digital. Gracias");
        assert_eq!(result.intent, Intent::CreatePrompt);
        assert_eq!(result.prompt_topic(), Some("Marketing Digital"));
    }

    #[test]
    fn test_navigation_targets() {
        let cases = [
            ("llévame a noticias", TargetPage::News),
            ("llévame al dashboard", TargetPage::Dashboard),
            ("quiero ver los talleres", TargetPage::Workshops),
        ];

        for (message, page) in cases {
            let result = detect(message);
            assert_eq!(result.intent, Intent::Navigate, "'{}'", message);
            assert_eq!(result.target_page(), Some(page), "'{}'", message);
            assert!(result.confidence <= 0.9);
        }
    }

    #[test]
    fn test_page_word_alone_is_not_navigation() {
        let result = detect("¿Qué cursos hay?");
        assert_eq!(result.intent, Intent::Question);
        assert!(result.entities.is_none());
    }
}

#[cfg(test)]
mod analyzer_tests {
    use super::*;

    #[test]
    fn test_analysis_combines_both_detectors() {
        let analyzer = MessageAnalyzer::new();
        let input = ClassificationInput::new("Diseña un wireframe para una app móvil", Mode::Normal);

        let analysis = analyzer.analyze(&input);

        assert_eq!(analysis.message, input.message);
        assert_ne!(analysis.intent.intent, Intent::CreatePrompt);
        assert!(analysis.image.is_image_request());
    }

    #[test]
    fn test_history_does_not_change_classification() {
        let analyzer = MessageAnalyzer::new();
        let bare = ClassificationInput::new("cuéntame un chiste", Mode::PromptAuthoring);
        let with_history = bare.clone().with_history(vec![
            Turn::user("crear un prompt para ventas"),
            Turn::assistant("¿Para qué público?"),
        ]);

        let a = analyzer.analyze(&bare);
        let b = analyzer.analyze(&with_history);

        assert_eq!(a.intent, b.intent);
        assert_eq!(a.image, b.image);
    }

    #[test]
    fn test_summary_mentions_intent_and_topic() {
        let analyzer = MessageAnalyzer::new();
        let analysis = analyzer.analyze(&ClassificationInput::new(
            "crear un prompt para ventas",
            Mode::Normal,
        ));

        let summary = analysis.summary();
        assert!(summary.contains("create_prompt"), "{}", summary);
        assert!(summary.contains("ventas"), "{}", summary);
    }
}
