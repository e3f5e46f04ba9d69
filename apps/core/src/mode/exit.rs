//! Explicit exit phrases for the specialised modes.
//!
//! Prompt authoring is left on navigation requests, cancellations and
//! "I don't want prompt mode anymore". Image-schema authoring accepts the
//! navigation requests too, but a cancellation only counts when it names the
//! image work ("stop the schema", "no more images").

use regex::Regex;
use std::sync::LazyLock;

use crate::brain::keywords::find_target_page;

// NOTE: expect() is acceptable here: a built-in pattern that fails to compile is a bug
static NAVIGATION_EXIT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(llévame|llevame|muéstrame|muestrame)\b").expect("Invalid regex: take me"),
        Regex::new(r"(?i)\b(take me|get me) to\b").expect("Invalid regex: English take me to"),
    ]
});

// Bare movement verbs also occur in prompt content ("para ir a la playa"),
// so they only count when a site page is named
static DESTINATION_EXIT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(ir|navegar|volver|regresar)\s+(a|al|hacia)\b").expect("Invalid regex: go to"),
        Regex::new(r"(?i)\b(go|navigate) to\b").expect("Invalid regex: English go to"),
    ]
});

static MODE_EXIT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(salir|sal|salgamos|salirme)\b.*\bmodo\b").expect("Invalid regex: leave mode"),
        Regex::new(r"(?i)\b(modo normal|chat normal|normal mode)\b").expect("Invalid regex: normal mode"),
        Regex::new(r"(?i)\b(exit|quit|leave)\b.*\bmode\b").expect("Invalid regex: English leave mode"),
    ]
});

static PROMPT_EXIT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(cancelar|cancela|cancelo|cancel)\b").expect("Invalid regex: cancel"),
        Regex::new(r"(?i)\bya no (quiero|necesito)\b.*\b(modo|prompts?)\b").expect("Invalid regex: no longer want prompts"),
        Regex::new(r"(?i)\bno quiero\b.*\b(modo prompts?|más prompts?)\b").expect("Invalid regex: don't want prompt mode"),
        Regex::new(r"(?i)\bi (don'?t|do not) want\b.*\bprompts?\b").expect("Invalid regex: English don't want prompt"),
        Regex::new(r"(?i)\bno more prompts?\b").expect("Invalid regex: no more prompts"),
    ]
});

static IMAGE_EXIT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(parar|detén|detener|basta|deja de|dejemos|cancelar|cancela|stop|cancel)\b.*\b(esquemas?|imagen|imágenes|diseños?|json|schemas?|images?)\b").expect("Invalid regex: stop images"),
        Regex::new(r"(?i)\b(no más|no quiero más|ya no quiero( más)?)\s+(esquemas?|imágenes|diseños?)\b").expect("Invalid regex: no more images"),
        Regex::new(r"(?i)\bno more (images?|schemas?|designs?)\b").expect("Invalid regex: English no more images"),
    ]
});

fn any_match(patterns: &[Regex], text: &str) -> bool {
    patterns.iter().any(|p| p.is_match(text))
}

fn is_navigation_exit(lower: &str) -> bool {
    any_match(&NAVIGATION_EXIT_PATTERNS, lower)
        || (any_match(&DESTINATION_EXIT_PATTERNS, lower) && find_target_page(lower).is_some())
}

/// True if the message asks to leave prompt authoring
pub fn is_prompt_exit(message: &str) -> bool {
    let lower = message.trim().to_lowercase();
    is_navigation_exit(&lower)
        || any_match(&MODE_EXIT_PATTERNS, &lower)
        || any_match(&PROMPT_EXIT_PATTERNS, &lower)
}

/// True if the message asks to leave image-schema authoring
pub fn is_image_exit(message: &str) -> bool {
    let lower = message.trim().to_lowercase();
    is_navigation_exit(&lower)
        || any_match(&MODE_EXIT_PATTERNS, &lower)
        || any_match(&IMAGE_EXIT_PATTERNS, &lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_exit_phrases() {
        for message in [
            "llévame al dashboard",
            "cancelar",
            "ya no quiero el modo prompt",
            "quiero salir de este modo",
            "take me to the courses",
            "I don't want prompt mode anymore",
            "volver al modo normal",
            "quiero ir a los cursos",
            "go to the community page",
        ] {
            assert!(is_prompt_exit(message), "expected exit: {message}");
        }
    }

    #[test]
    fn test_prompt_mode_content_is_not_an_exit() {
        for message in [
            "cuéntame un chiste",
            "para vender zapatos a jóvenes",
            "quiero que el tono sea formal",
            "quiero que el prompt sirva para ir a la playa",
            "para ir al gimnasio",
            "a prompt that helps people go to sleep",
            "",
        ] {
            assert!(!is_prompt_exit(message), "unexpected exit: {message}");
        }
    }

    #[test]
    fn test_image_exit_needs_image_words_for_cancellation() {
        assert!(is_image_exit("basta de imágenes"));
        assert!(!is_image_exit("quiero un esquema para una imagen de producto"));
        assert!(is_image_exit("ya no quiero más esquemas"));
        assert!(is_image_exit("stop the images"));
        assert!(is_image_exit("llévame a noticias"));
        assert!(!is_image_exit("cancelar"));
        assert!(!is_image_exit("un fondo azul con botones redondeados"));
    }
}
