//! Visual generation detection.
//!
//! Recognises requests for images, interface designs, wireframes and
//! diagrams. Separate from the four-way intent classifier: its only consumer
//! is the mode machine, which uses it to enter image-schema authoring.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::keywords::{
    contains_any, count_terms, IMAGE_DIAGRAM_KEYWORDS, IMAGE_PHOTO_KEYWORDS, IMAGE_UI_KEYWORDS,
};

/// Minimum confidence for a message to count as an image request.
pub const IMAGE_REQUEST_THRESHOLD: f32 = 0.65;

const DIRECT_MENTION_CONFIDENCE: f32 = 0.95;
const MULTI_MATCH_CONFIDENCE: f32 = 0.8;
const SINGLE_MATCH_CONFIDENCE: f32 = 0.65;
const DOMAIN_BONUS: f32 = 0.1;
const MAX_CONFIDENCE: f32 = 0.95;

/// Kind of visual the user is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageDomain {
    /// Apps, screens, landing pages
    Ui,
    /// Product shots, banners, renders
    Photo,
    /// Flowcharts, architecture, UML
    Diagram,
}

/// Preferred output fidelity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Wireframe,
    Mockup,
    Render,
    Diagram,
}

/// Result of visual generation detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRequest {
    /// Confidence score (0.0 - 0.95)
    pub confidence: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<ImageDomain>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,
    /// Text fragments of the patterns that matched
    pub matched_patterns: Vec<String>,
}

impl ImageRequest {
    /// True if the message should switch the chat into image-schema authoring
    pub fn is_image_request(&self) -> bool {
        self.confidence >= IMAGE_REQUEST_THRESHOLD
    }
}

// Also reported as the first matched pattern
static DIRECT_MENTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bnano\s*banana\b|\bnanobana(na)?\b").expect("Invalid regex: direct mention")
});

// NOTE: expect() is acceptable here: a built-in pattern that fails to compile is a bug
static IMAGE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // JSON schemas for images
        Regex::new(r"(?i)\b(json|esquema)\b.*\b(imagen|diseño|ui|interfaz)\b").expect("Invalid regex: schema then image"),
        Regex::new(r"(?i)\b(imagen|diseño|ui|interfaz)\b.*\b(json|esquema)\b").expect("Invalid regex: image then schema"),
        // Wireframes and mockups
        Regex::new(r"(?i)\b(wireframe|mockup|prototipo|boceto)\b.*\b(generar|crear|diseñar|haz)\b").expect("Invalid regex: wireframe then verb"),
        Regex::new(r"(?i)\b(generar|crear|diseñar|haz)\b.*\b(wireframe|mockup|prototipo|boceto)\b").expect("Invalid regex: verb then wireframe"),
        // App and interface design
        Regex::new(r"(?i)\b(diseñar?|crear|generar|haz(me)?)\b.*\b(app|aplicación|interfaz|ui|ux|pantalla)\b").expect("Invalid regex: design app"),
        Regex::new(r"(?i)\b(app|aplicación|interfaz|ui|ux|pantalla)\b.*\b(diseñar?|crear|generar|haz)\b").expect("Invalid regex: app then verb"),
        // Technical diagrams
        Regex::new(r"(?i)\b(diagrama|flowchart|arquitectura|flujo|esquema)\b.*\b(generar|crear|diseñar|haz)\b").expect("Invalid regex: diagram then verb"),
        Regex::new(r"(?i)\b(generar|crear|diseñar|haz)\b.*\b(diagrama|flowchart|arquitectura|flujo)\b").expect("Invalid regex: verb then diagram"),
        // Product photography
        Regex::new(r"(?i)\b(foto|fotografía|imagen)\b.*\b(producto|marketing|comercial|publicit\w*)\b").expect("Invalid regex: product photo"),
        Regex::new(r"(?i)\b(producto|marketing|comercial|publicit\w*)\b.*\b(foto|fotografía|imagen)\b").expect("Invalid regex: photo of product"),
        // Precise renders
        Regex::new(r"(?i)\b(render|renderizar)\b.*\b(preciso|exacto|profesional)\b").expect("Invalid regex: precise render"),
        // Common phrasings
        Regex::new(r"(?i)\b(crear?|generar?|diseñar?|haz(me)?|necesito|quiero|dame)\b.*\b(imagen|visual|visualización)\b").expect("Invalid regex: create image"),
        Regex::new(r"(?i)\b(crear?|generar?|diseñar?|haz(me)?)\b.*\b(landing|página web|dashboard|panel)\b").expect("Invalid regex: create landing"),
        Regex::new(r"(?i)\b(crear?|generar?|diseñar?|haz(me)?)\b.*\b(logo|banner|poster|cartel|anuncio)\b").expect("Invalid regex: create logo"),
        Regex::new(r"(?i)\b(diseña(r|me)?|dibuja(r|me)?|crea(r|me)?)\b.*\b(app|aplicación|móvil|mobile)\b").expect("Invalid regex: draw app"),
        Regex::new(r"(?i)\b(necesito|quiero|dame)\b.*\b(diseño|imagen|visual|interfaz|wireframe|mockup|prototipo)\b").expect("Invalid regex: want design"),
        // Imperatives at the start of the message
        Regex::new(r"(?i)^diseña(me)?\s+").expect("Invalid regex: leading design"),
        Regex::new(r"(?i)^crea(me)?\s+(una?\s*)?(imagen|diseño|app|interfaz|wireframe|mockup|diagrama)").expect("Invalid regex: leading create"),
        Regex::new(r"(?i)^genera(me)?\s+(una?\s*)?(imagen|diseño|visual)").expect("Invalid regex: leading generate"),
        Regex::new(r"(?i)^haz(me)?\s+(una?\s*)?(imagen|diseño|app|interfaz|wireframe|mockup)").expect("Invalid regex: leading make"),
        // English
        Regex::new(r"(?i)\b(create|generate|design|draw|make|build)\b.*\b(wireframe|mockup|diagram|flowchart|ui|interface|image|logo|banner|landing page)\b").expect("Invalid regex: English verb then visual"),
        Regex::new(r"(?i)\b(wireframe|mockup|diagram|flowchart)\b.*\b(create|generate|design|draw|make)\b").expect("Invalid regex: English visual then verb"),
    ]
});

/// Detector for image, interface and diagram generation requests
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageRequestDetector;

impl ImageRequestDetector {
    pub fn new() -> Self {
        Self
    }

    /// Detect whether a message asks for a visual. Pure.
    pub fn detect(&self, message: &str) -> ImageRequest {
        let lower = message.trim().to_lowercase();

        let matched_patterns: Vec<String> = std::iter::once(&*DIRECT_MENTION)
            .chain(IMAGE_PATTERNS.iter())
            .filter_map(|p| p.find(&lower))
            .map(|m| m.as_str().to_string())
            .collect();

        let mut confidence = if DIRECT_MENTION.is_match(&lower) {
            DIRECT_MENTION_CONFIDENCE
        } else {
            match matched_patterns.len() {
                0 => 0.0,
                1 => SINGLE_MATCH_CONFIDENCE,
                _ => MULTI_MATCH_CONFIDENCE,
            }
        };

        let domain = Self::detect_domain(&lower);
        if domain.is_some() {
            confidence += DOMAIN_BONUS;
        }

        ImageRequest {
            confidence: confidence.min(MAX_CONFIDENCE),
            domain,
            output_format: Self::detect_output_format(&lower),
            matched_patterns,
        }
    }

    /// Domain with the most keyword hits; ties go ui, then photo, then diagram.
    fn detect_domain(lower: &str) -> Option<ImageDomain> {
        let scores = [
            (ImageDomain::Ui, count_terms(lower, IMAGE_UI_KEYWORDS)),
            (ImageDomain::Photo, count_terms(lower, IMAGE_PHOTO_KEYWORDS)),
            (ImageDomain::Diagram, count_terms(lower, IMAGE_DIAGRAM_KEYWORDS)),
        ];

        let best = scores.iter().map(|(_, s)| *s).max().unwrap_or(0);
        if best == 0 {
            return None;
        }
        scores
            .iter()
            .find(|(_, s)| *s == best)
            .map(|(domain, _)| *domain)
    }

    fn detect_output_format(lower: &str) -> Option<OutputFormat> {
        if contains_any(lower, &["wireframe", "esquema", "boceto"]) {
            Some(OutputFormat::Wireframe)
        } else if contains_any(lower, &["mockup", "prototipo", "alta fidelidad"]) {
            Some(OutputFormat::Mockup)
        } else if contains_any(lower, &["render", "final"]) {
            Some(OutputFormat::Render)
        } else if contains_any(lower, &["diagrama", "flowchart", "diagram"]) {
            Some(OutputFormat::Diagram)
        } else {
            None
        }
    }
}
