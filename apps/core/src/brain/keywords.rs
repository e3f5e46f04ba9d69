//! Keyword tables and term matching.
//!
//! All tables are lower-case and tuned for Spanish input with a few English
//! synonyms. Matching is done on whole terms: a keyword only counts when the
//! characters around it are not alphanumeric, so "curso" never fires inside
//! "recursos".

use super::intent::TargetPage;

/// Keywords that hint at prompt authoring.
pub const PROMPT_KEYWORDS: &[&str] = &[
    "prompt",
    "prompts",
    "plantilla",
    "instrucciones",
    "chatgpt",
    "claude",
    "ia",
    "inteligencia artificial",
    "system prompt",
    "user prompt",
    "prompt engineering",
];

/// Site sections and the synonyms that point at them.
///
/// Order matters: the first page with a matching synonym wins, which is why
/// the business panel is checked before the generic dashboard ("panel").
pub const SITE_PAGES: &[(TargetPage, &[&str])] = &[
    (
        TargetPage::Courses,
        &["cursos", "curso", "formación", "aprendizaje", "courses", "course"],
    ),
    (
        TargetPage::Workshops,
        &["talleres", "taller", "workshops", "workshop", "eventos"],
    ),
    (
        TargetPage::Communities,
        &[
            "comunidades",
            "comunidad",
            "grupos",
            "networking",
            "communities",
            "community",
        ],
    ),
    (
        TargetPage::News,
        &["noticias", "noticia", "artículos", "actualizaciones", "news"],
    ),
    (
        TargetPage::PromptDirectory,
        &[
            "directorio de prompts",
            "biblioteca de prompts",
            "directorio",
            "biblioteca",
            "prompt directory",
        ],
    ),
    (
        TargetPage::BusinessPanel,
        &[
            "panel de empresa",
            "panel empresarial",
            "panel de negocios",
            "business panel",
            "empresa",
        ],
    ),
    (
        TargetPage::Dashboard,
        &["dashboard", "panel", "inicio", "escritorio"],
    ),
    (
        TargetPage::Profile,
        &[
            "perfil",
            "cuenta",
            "configuración",
            "ajustes",
            "profile",
            "settings",
        ],
    ),
];

/// Words showing that a message is about the platform itself rather than
/// about the image being designed. Must not share terms with the image
/// vocabulary below.
pub const PLATFORM_KEYWORDS: &[&str] = &[
    "curso",
    "cursos",
    "taller",
    "talleres",
    "comunidad",
    "comunidades",
    "noticia",
    "noticias",
    "plataforma",
    "certificado",
    "certificados",
    "suscripción",
    "suscripciones",
    "planificador",
    "lección",
    "lecciones",
    "lia",
    "course",
    "courses",
    "community",
    "platform",
    "news",
];

/// Image domain keywords: user interfaces.
pub const IMAGE_UI_KEYWORDS: &[&str] = &[
    "app",
    "aplicación",
    "interfaz",
    "ui",
    "ux",
    "wireframe",
    "mockup",
    "pantalla",
    "screen",
    "dashboard",
    "landing",
    "mobile",
    "web",
    "componente",
    "botón",
    "formulario",
    "navbar",
    "sidebar",
];

/// Image domain keywords: photography and renders.
pub const IMAGE_PHOTO_KEYWORDS: &[&str] = &[
    "foto",
    "fotografía",
    "imagen",
    "producto",
    "marketing",
    "banner",
    "publicidad",
    "anuncio",
    "estudio",
    "iluminación",
    "composición",
    "render",
    "escena",
];

/// Image domain keywords: technical diagrams.
pub const IMAGE_DIAGRAM_KEYWORDS: &[&str] = &[
    "diagrama",
    "flujo",
    "flowchart",
    "arquitectura",
    "esquema",
    "proceso",
    "secuencia",
    "uml",
    "erd",
    "organigrama",
    "mapa",
    "diagram",
];

/// True if `text` uses any image domain keyword.
pub fn mentions_image_vocabulary(text: &str) -> bool {
    contains_any(text, IMAGE_UI_KEYWORDS)
        || contains_any(text, IMAGE_PHOTO_KEYWORDS)
        || contains_any(text, IMAGE_DIAGRAM_KEYWORDS)
}

/// Returns true if `term` occurs in `text` as a whole term.
///
/// Both arguments are expected to be lower-case already.
pub fn contains_term(text: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }

    text.match_indices(term).any(|(start, _)| {
        let end = start + term.len();
        let before_ok = text[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = text[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}

/// Counts how many terms of `terms` occur in `text`.
pub fn count_terms(text: &str, terms: &[&str]) -> usize {
    terms.iter().filter(|t| contains_term(text, t)).count()
}

/// Returns true if any of `terms` occurs in `text`.
pub fn contains_any(text: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| contains_term(text, t))
}

/// Finds the first site page whose synonyms appear in `text`.
pub fn find_target_page(text: &str) -> Option<TargetPage> {
    SITE_PAGES
        .iter()
        .find(|(_, synonyms)| contains_any(text, synonyms))
        .map(|(page, _)| *page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_term_respects_word_boundaries() {
        assert!(contains_term("quiero ver los cursos", "cursos"));
        assert!(!contains_term("tengo recursos", "curso"));
        assert!(!contains_term("noticias", "ia"));
        assert!(contains_term("la ia me ayuda", "ia"));
        assert!(contains_term("ia", "ia"));
        assert!(!contains_term("algo", ""));
    }

    #[test]
    fn test_contains_term_with_accents_and_punctuation() {
        assert!(contains_term("¿dónde está mi configuración?", "configuración"));
        assert!(contains_term("(prompt)", "prompt"));
        assert!(!contains_term("prompts", "prompt"));
    }

    #[test]
    fn test_multi_word_terms() {
        assert!(contains_term("dame un system prompt", "system prompt"));
        assert!(contains_term("usa inteligencia artificial.", "inteligencia artificial"));
    }

    #[test]
    fn test_count_terms() {
        let text = "un prompt para chatgpt y claude";
        assert_eq!(count_terms(text, PROMPT_KEYWORDS), 3);
        assert_eq!(count_terms("", PROMPT_KEYWORDS), 0);
    }

    #[test]
    fn test_find_target_page_order() {
        assert_eq!(find_target_page("llévame a los cursos"), Some(TargetPage::Courses));
        assert_eq!(
            find_target_page("abre el panel de empresa"),
            Some(TargetPage::BusinessPanel)
        );
        assert_eq!(find_target_page("abre el panel"), Some(TargetPage::Dashboard));
        assert_eq!(find_target_page("mi perfil"), Some(TargetPage::Profile));
        assert_eq!(find_target_page("hola"), None);
    }

    #[test]
    fn test_platform_and_image_vocabularies_are_disjoint() {
        for term in PLATFORM_KEYWORDS {
            assert!(!mentions_image_vocabulary(term), "shared term: {term}");
        }
        assert!(mentions_image_vocabulary("un dashboard oscuro"));
        assert!(!mentions_image_vocabulary("¿qué cursos hay?"));
    }
}
