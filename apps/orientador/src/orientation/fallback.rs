//! Fallback Matcher — deterministic career suggestions when the LLM is unavailable.
//!
//! Algorithm:
//! 1. Join every answer into one lowercase blob.
//! 2. Walk `FALLBACK_RULES` in order; a rule fires when any of its keywords is
//!    a substring of the blob.
//! 3. No rule fired → `GENERIC_SUGGESTIONS`.
//! 4. Keep at most `MAX_SUGGESTIONS`.
//!
//! Pure and total: always 1..=3 suggestions, no I/O.

pub const MAX_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CareerSuggestion {
    pub career: String,
    pub justification: String,
}

/// One ordered (keywords → career) rule.
#[derive(Debug, Clone, Copy)]
pub struct FallbackRule {
    pub keywords: &'static [&'static str],
    pub career: &'static str,
    pub justification: &'static str,
}

impl FallbackRule {
    fn matches(&self, blob: &str) -> bool {
        self.keywords.iter().any(|k| blob.contains(k))
    }

    fn suggestion(&self) -> CareerSuggestion {
        CareerSuggestion {
            career: self.career.to_string(),
            justification: self.justification.to_string(),
        }
    }
}

/// Evaluated top to bottom; earlier rules win when more than three fire.
pub const FALLBACK_RULES: &[FallbackRule] = &[
    FallbackRule {
        keywords: &["tecnolog", "computa", "informática", "informatica", "program", "software"],
        career: "Ingeniería en Sistemas",
        justification: "Tu interés por la tecnología encaja con el diseño y desarrollo de sistemas.",
    },
    FallbackRule {
        keywords: &["datos", "análisis", "analisis", "analizar", "estadística", "matemática"],
        career: "Ciencia de Datos",
        justification: "Mencionaste el análisis y los números, base del trabajo con datos.",
    },
    FallbackRule {
        keywords: &["salud", "hospital", "medicina", "biolog", "cuidar"],
        career: "Medicina",
        justification: "Te atrae el cuidado de la salud y el trabajo con pacientes.",
    },
    FallbackRule {
        keywords: &["personas", "escuchar", "acompañar", "emociones", "ayudar"],
        career: "Psicología",
        justification: "Valorás escuchar y acompañar a otras personas.",
    },
    FallbackRule {
        keywords: &["diseñ", "dibuj", "creativ", "artístic", "ideas originales"],
        career: "Diseño Gráfico",
        justification: "Tu lado creativo puede transformarse en comunicación visual.",
    },
    FallbackRule {
        keywords: &["emprend", "liderar", "organizar", "negocio", "empresa"],
        career: "Administración de Empresas",
        justification: "Te interesa organizar, decidir y llevar adelante proyectos.",
    },
    FallbackRule {
        keywords: &["debat", "leyes", "justicia", "derecho"],
        career: "Derecho",
        justification: "Disfrutás argumentar y te importan la justicia y las normas.",
    },
    FallbackRule {
        keywords: &["escribir", "literatura", "lengua", "comunicar", "medios"],
        career: "Comunicación Social",
        justification: "Te expresás bien y te interesa contar historias.",
    },
    FallbackRule {
        keywords: &["deporte", "aire libre", "naturaleza"],
        career: "Profesorado de Educación Física",
        justification: "Preferís la actividad física y los espacios abiertos.",
    },
];

/// Used only when no rule fires.
pub const GENERIC_SUGGESTIONS: &[(&str, &str)] = &[
    (
        "Administración de Empresas",
        "Es una carrera versátil con salida laboral en casi cualquier industria.",
    ),
    (
        "Comunicación Social",
        "Desarrolla habilidades transferibles útiles en muchos ámbitos.",
    ),
    (
        "Ingeniería Industrial",
        "Combina gestión y técnica, y abre puertas en áreas muy distintas.",
    ),
];

/// Suggests 1..=3 careers from the collected answers.
pub fn suggest_careers<'a>(answers: impl IntoIterator<Item = &'a str>) -> Vec<CareerSuggestion> {
    let blob = answers
        .into_iter()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    match_blob(&blob)
}

fn match_blob(blob: &str) -> Vec<CareerSuggestion> {
    let mut suggestions: Vec<CareerSuggestion> = FALLBACK_RULES
        .iter()
        .filter(|rule| rule.matches(blob))
        .map(FallbackRule::suggestion)
        .collect();

    if suggestions.is_empty() {
        suggestions = GENERIC_SUGGESTIONS
            .iter()
            .map(|(career, justification)| CareerSuggestion {
                career: career.to_string(),
                justification: justification.to_string(),
            })
            .collect();
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

/// Numbered list in the same shape the LLM is asked to produce.
pub fn render_suggestions(suggestions: &[CareerSuggestion]) -> String {
    suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {}: {}", i + 1, s.career, s.justification))
        .collect::<Vec<_>>()
        .join("\n")
}
