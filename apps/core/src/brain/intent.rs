//! Intent detection using regex patterns.
//!
//! Fast pattern-based detection of what a chat message asks for. Tuned for
//! Spanish input with English equivalents. No ML model required.
//!
//! Checks run as a priority chain and the first one that clears its
//! threshold wins: create a prompt, navigate somewhere, ask a question,
//! general conversation.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use super::keywords::{count_terms, find_target_page, PROMPT_KEYWORDS};

/// Upper bound for every pattern-based confidence.
pub const MAX_PATTERN_CONFIDENCE: f32 = 0.95;
/// Minimum confidence for a create-prompt detection to win.
pub const CREATE_PROMPT_THRESHOLD: f32 = 0.6;
/// Minimum confidence for a navigation detection to win.
pub const NAVIGATE_THRESHOLD: f32 = 0.6;
/// Fixed confidence of the question fallback.
pub const QUESTION_CONFIDENCE: f32 = 0.7;
/// Fixed confidence of the general fallback.
pub const GENERAL_CONFIDENCE: f32 = 0.5;

const NAVIGATE_BASE_CAP: f32 = 0.85;
const NAVIGATE_CAP: f32 = 0.9;
const PROMPT_KEYWORD_BONUS: f32 = 0.05;
const PROMPT_TOPIC_BONUS: f32 = 0.1;
const TARGET_PAGE_BONUS: f32 = 0.15;

/// Detected intent type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Request to build or improve an AI prompt
    CreatePrompt,
    /// Request to go to a section of the site
    Navigate,
    /// Anything phrased as a question
    Question,
    /// Generic conversation
    General,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Intent {
    /// Returns the wire label for the intent
    pub fn label(&self) -> &'static str {
        match self {
            Intent::CreatePrompt => "create_prompt",
            Intent::Navigate => "navigate",
            Intent::Question => "question",
            Intent::General => "general",
        }
    }
}

/// Site section a navigation request points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetPage {
    Communities,
    Courses,
    Workshops,
    News,
    Dashboard,
    PromptDirectory,
    BusinessPanel,
    Profile,
}

impl TargetPage {
    /// Returns the page identifier used by the front-end router
    pub fn id(&self) -> &'static str {
        match self {
            TargetPage::Communities => "communities",
            TargetPage::Courses => "courses",
            TargetPage::Workshops => "workshops",
            TargetPage::News => "news",
            TargetPage::Dashboard => "dashboard",
            TargetPage::PromptDirectory => "prompt_directory",
            TargetPage::BusinessPanel => "business_panel",
            TargetPage::Profile => "profile",
        }
    }
}

/// Entities extracted alongside the intent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entities {
    /// Topic of the requested prompt ("ventas" in "un prompt para ventas")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_topic: Option<String>,
    /// Destination of a navigation request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_page: Option<TargetPage>,
}

impl Entities {
    fn into_option(self) -> Option<Self> {
        if self.prompt_topic.is_none() && self.target_page.is_none() {
            None
        } else {
            Some(self)
        }
    }
}

/// Result of intent detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentResult {
    /// Detected intent
    pub intent: Intent,
    /// Confidence score (0.0 - 0.95)
    pub confidence: f32,
    /// Extracted entities, absent when nothing was extracted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<Entities>,
    /// Text fragments of the patterns that matched
    pub matched_patterns: Vec<String>,
}

impl IntentResult {
    fn fallback(intent: Intent, confidence: f32) -> Self {
        Self {
            intent,
            confidence,
            entities: None,
            matched_patterns: vec![],
        }
    }

    /// True if the result is `intent` with at least `min_confidence`
    pub fn is(&self, intent: Intent, min_confidence: f32) -> bool {
        self.intent == intent && self.confidence >= min_confidence
    }

    /// Topic of the requested prompt, if one was extracted
    pub fn prompt_topic(&self) -> Option<&str> {
        self.entities.as_ref()?.prompt_topic.as_deref()
    }

    /// Navigation target, if one was extracted
    pub fn target_page(&self) -> Option<TargetPage> {
        self.entities.as_ref()?.target_page
    }
}

// Compile patterns once at startup
// NOTE: expect() is acceptable here: a built-in pattern that fails to compile is a bug
static CREATE_PROMPT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // Spanish
        Regex::new(r"(?i)\b(crear|generar|hacer|ayuda.*crear|ayúdame.*crear)\b.*\bprompts?\b").expect("Invalid regex: Spanish create verbs"),
        Regex::new(r"(?i)\bprompts?\b.*\b(para|sobre|de)\b").expect("Invalid regex: prompt about"),
        Regex::new(r"(?i)\bcómo\b.*\b(crear|hacer|generar)\b.*\bprompts?\b").expect("Invalid regex: how to create prompt"),
        Regex::new(r"(?i)\bnecesito\b.*\bprompts?\b").expect("Invalid regex: need prompt"),
        Regex::new(r"(?i)\bquiero\b.*\bprompts?\b").expect("Invalid regex: want prompt"),
        Regex::new(r"(?i)\bprompts?\b.*\b(que|para|de)\b").expect("Invalid regex: prompt that"),
        Regex::new(r"(?i)\b(chatgpt|claude|gpt|ia)\b.*\b(instrucciones|instrucción|prompt)\b").expect("Invalid regex: model instructions"),
        Regex::new(r"(?i)\b(system prompt|user prompt|assistant prompt)\b").expect("Invalid regex: prompt roles"),
        Regex::new(r"(?i)\bprompt engineering\b").expect("Invalid regex: prompt engineering"),
        Regex::new(r"(?i)\bplantilla.*\bia\b").expect("Invalid regex: AI template"),
        Regex::new(r"(?i)\bprompts?\b.*\b(efectivos?|buenos?|mejores?)\b").expect("Invalid regex: good prompts"),
        Regex::new(r"(?i)\b(crea(me)?|genera(me)?|haz(me)?|escribe(me)?|diseña(me)?|redacta(me)?)\b.*\bprompts?\b").expect("Invalid regex: Spanish imperatives"),
        // English
        Regex::new(r"(?i)\b(create|generate|make|write|build|design|craft)\b.*\bprompts?\b").expect("Invalid regex: English create verbs"),
        Regex::new(r"(?i)\bhelp me\b.*\b(create|make|write|build)\b.*\bprompts?\b").expect("Invalid regex: help me create"),
        Regex::new(r"(?i)\bprompts?\b.*\b(for|about|that)\b").expect("Invalid regex: prompt for"),
        // Verb after the noun
        Regex::new(r"(?i)\bprompts?\b.*\b(crear|generar|create|generate|make)\b").expect("Invalid regex: prompt then verb"),
    ]
});

static PROMPT_TOPIC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bprompts?\s+(?:para|sobre|de|que|for|about|that)\s+([^.!?]+)")
        .expect("Invalid regex: prompt topic")
});

static NAVIGATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // Spanish
        Regex::new(r"(?i)\b(ir|llevar|mostrar|ver|navegar)\b.*\b(a|hacia|al)\b").expect("Invalid regex: go to"),
        Regex::new(r"(?i)\bdónde\b.*\b(está|encuentro|veo)\b").expect("Invalid regex: where is"),
        Regex::new(r"(?i)\bcómo\b.*\b(accedo|llego)\b").expect("Invalid regex: how do I access"),
        Regex::new(r"(?i)\b(página|sección)\b.*\b(de|para)\b").expect("Invalid regex: page of"),
        Regex::new(r"(?i)\b(quiero|necesito)\b.*\b(ir|ver|acceder)\b").expect("Invalid regex: want to go"),
        Regex::new(r"(?i)\b(llévame|llevame)\b").expect("Invalid regex: take me"),
        Regex::new(r"(?i)\b(muéstrame|muestrame)\b").expect("Invalid regex: show me"),
        Regex::new(r"(?i)\b(dame|dime)\b.*\b(link|enlace|url)\b").expect("Invalid regex: give me the link"),
        Regex::new(r"(?i)\b(abre|abrir)\b").expect("Invalid regex: open"),
        Regex::new(r"(?i)\b(acceder|acceso)\b.*\b(a|al)\b").expect("Invalid regex: access to"),
        Regex::new(r"(?i)\b(link|enlace)\b.*\b(de|del|a|al|para)\b").expect("Invalid regex: link to"),
        // English
        Regex::new(r"(?i)\btake me to\b").expect("Invalid regex: take me to"),
        Regex::new(r"(?i)\bwhere (is|are|can i find)\b").expect("Invalid regex: English where is"),
        Regex::new(r"(?i)\bhow (do|can) i (access|get to|find)\b").expect("Invalid regex: English how do I access"),
        Regex::new(r"(?i)\bi (want|need) to (go|get) to\b").expect("Invalid regex: English want to go"),
        Regex::new(r"(?i)\b(go to|navigate to|show me|open)\b").expect("Invalid regex: English go to"),
    ]
});

static QUESTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // Universal
        Regex::new(r"[?¿]").expect("Invalid regex: question marks"),
        // Spanish
        Regex::new(r"(?i)\b(qué|cuál|cuáles|cómo|dónde|cuándo|quién|quiénes)\b").expect("Invalid regex: Spanish question words"),
        Regex::new(r"(?i)\b(puedes|podrías)\b").expect("Invalid regex: Spanish can-you"),
        // English
        Regex::new(r"(?i)\b(what|which|how|where|when|who|why)\b").expect("Invalid regex: English question words"),
        Regex::new(r"(?i)\b(can|could|would) you\b").expect("Invalid regex: English can-you"),
    ]
});

/// Returns the matched fragment of every pattern that fires on `text`.
fn matching_fragments(patterns: &[Regex], text: &str) -> Vec<String> {
    patterns
        .iter()
        .filter_map(|p| p.find(text))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Intent classifier using regex patterns
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    /// Create a new intent classifier
    pub fn new() -> Self {
        Self
    }

    /// Detect the intent of a message.
    ///
    /// Pure: the same input always yields the same result. Empty or
    /// whitespace-only input falls through to `general` with 0.5.
    pub fn detect(&self, message: &str) -> IntentResult {
        let original = message.trim();
        let lower = original.to_lowercase();

        let prompt = self.detect_create_prompt(&lower, original);
        if prompt.confidence >= CREATE_PROMPT_THRESHOLD {
            return prompt;
        }

        let navigate = self.detect_navigate(&lower);
        if navigate.confidence >= NAVIGATE_THRESHOLD {
            return navigate;
        }

        if self.is_question(&lower) {
            return IntentResult::fallback(Intent::Question, QUESTION_CONFIDENCE);
        }

        IntentResult::fallback(Intent::General, GENERAL_CONFIDENCE)
    }

    fn detect_create_prompt(&self, lower: &str, original: &str) -> IntentResult {
        let matched_patterns = matching_fragments(&CREATE_PROMPT_PATTERNS, lower);
        let mut entities = Entities::default();

        let mut confidence = if matched_patterns.is_empty() {
            0.0
        } else {
            (0.6 + 0.15 * matched_patterns.len() as f32).min(MAX_PATTERN_CONFIDENCE)
        };

        confidence += count_terms(lower, PROMPT_KEYWORDS) as f32 * PROMPT_KEYWORD_BONUS;

        // Topic keeps the user's casing
        if let Some(topic) = PROMPT_TOPIC_PATTERN
            .captures(original)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim())
            .filter(|t| !t.is_empty())
        {
            entities.prompt_topic = Some(topic.to_string());
            confidence += PROMPT_TOPIC_BONUS;
        }

        IntentResult {
            intent: Intent::CreatePrompt,
            confidence: confidence.min(MAX_PATTERN_CONFIDENCE),
            entities: entities.into_option(),
            matched_patterns,
        }
    }

    fn detect_navigate(&self, lower: &str) -> IntentResult {
        let matched_patterns = matching_fragments(&NAVIGATE_PATTERNS, lower);
        let mut entities = Entities::default();

        let mut confidence = if matched_patterns.is_empty() {
            0.0
        } else {
            (0.6 + 0.1 * matched_patterns.len() as f32).min(NAVIGATE_BASE_CAP)
        };

        if let Some(page) = find_target_page(lower) {
            entities.target_page = Some(page);
            confidence += TARGET_PAGE_BONUS;
        }

        IntentResult {
            intent: Intent::Navigate,
            confidence: confidence.min(NAVIGATE_CAP),
            entities: entities.into_option(),
            matched_patterns,
        }
    }

    fn is_question(&self, lower: &str) -> bool {
        QUESTION_PATTERNS.iter().any(|p| p.is_match(lower))
    }
}

/// Detect the intent of a message with the default classifier
pub fn detect(message: &str) -> IntentResult {
    IntentClassifier::new().detect(message)
}
