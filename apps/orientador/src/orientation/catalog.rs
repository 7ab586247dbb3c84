//! Career catalog — static domain → careers table used as prompt reference
//! and as the universe of careers the fallback matcher may suggest.

/// A domain category and the careers it groups.
#[derive(Debug, Clone, Copy)]
pub struct CareerDomain {
    pub category: &'static str,
    pub careers: &'static [&'static str],
}

pub const CAREER_CATALOG: &[CareerDomain] = &[
    CareerDomain {
        category: "Tecnología",
        careers: &[
            "Ingeniería en Sistemas",
            "Ciencia de Datos",
            "Desarrollo de Software",
            "Ingeniería en Telecomunicaciones",
        ],
    },
    CareerDomain {
        category: "Salud",
        careers: &["Medicina", "Enfermería", "Kinesiología", "Nutrición"],
    },
    CareerDomain {
        category: "Ciencias Sociales",
        careers: &["Psicología", "Trabajo Social", "Sociología", "Historia"],
    },
    CareerDomain {
        category: "Arte y Diseño",
        careers: &["Diseño Gráfico", "Arquitectura", "Música", "Diseño Multimedia"],
    },
    CareerDomain {
        category: "Negocios",
        careers: &[
            "Administración de Empresas",
            "Contador Público",
            "Marketing",
            "Ingeniería Industrial",
        ],
    },
    CareerDomain {
        category: "Humanidades y Comunicación",
        careers: &["Derecho", "Comunicación Social", "Letras", "Traductorado"],
    },
    CareerDomain {
        category: "Educación y Deporte",
        careers: &[
            "Profesorado de Educación Física",
            "Ciencias de la Educación",
            "Guardaparque",
        ],
    },
];

/// Returns the category a career belongs to, if it is in the catalog.
#[cfg(test)]
pub fn category_of(career: &str) -> Option<&'static str> {
    CAREER_CATALOG
        .iter()
        .find(|d| d.careers.iter().any(|c| *c == career))
        .map(|d| d.category)
}

/// Renders the catalog as one line per category, for embedding in prompts.
pub fn catalog_as_text() -> String {
    CAREER_CATALOG
        .iter()
        .map(|d| format!("- {}: {}", d.category, d.careers.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_careers_are_unique_across_categories() {
        let mut seen = HashSet::new();
        for domain in CAREER_CATALOG {
            for career in domain.careers {
                assert!(seen.insert(*career), "duplicate career {career}");
            }
        }
    }

    #[test]
    fn test_category_lookup() {
        assert_eq!(category_of("Ciencia de Datos"), Some("Tecnología"));
        assert_eq!(category_of("Astronauta"), None);
    }

    #[test]
    fn test_catalog_text_has_one_line_per_category() {
        assert_eq!(catalog_as_text().lines().count(), CAREER_CATALOG.len());
    }
}
