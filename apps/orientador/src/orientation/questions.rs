//! Question script for the guided conversation.

/// A scripted question with its numbered suggestions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub category: String,
    pub options: Vec<String>,
}

impl Question {
    pub fn new(id: &str, prompt: &str, category: &str, options: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            prompt: prompt.to_string(),
            category: category.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }

    /// Resolves a raw line to the answer text.
    ///
    /// An integer in `1..=options.len()` selects that option (1-indexed);
    /// anything else, including out-of-range numbers, is kept verbatim.
    pub fn resolve_answer(&self, input: &str) -> String {
        let trimmed = input.trim();
        match trimmed.parse::<usize>() {
            Ok(n) if (1..=self.options.len()).contains(&n) => self.options[n - 1].clone(),
            _ => trimmed.to_string(),
        }
    }
}

/// The four vocational questions, in the order they are asked.
pub fn default_script() -> Vec<Question> {
    vec![
        Question::new(
            "intereses",
            "¿Qué actividades disfrutás más en tu tiempo libre?",
            "Intereses",
            &[
                "Usar la computadora y la tecnología",
                "Dibujar, diseñar o crear cosas",
                "Ayudar y escuchar a otras personas",
                "Leer, escribir y debatir",
                "Hacer deporte o estar al aire libre",
                "Organizar proyectos o emprender",
            ],
        ),
        Question::new(
            "materias",
            "¿Qué materias te resultaban más fáciles o interesantes en la escuela?",
            "Materias",
            &[
                "Matemática",
                "Biología y ciencias de la salud",
                "Historia y ciencias sociales",
                "Música y expresión artística",
                "Lengua y literatura",
                "Informática",
            ],
        ),
        Question::new(
            "entorno",
            "¿En qué tipo de ambiente te imaginás trabajando?",
            "Entorno laboral",
            &[
                "Una oficina con un equipo",
                "Al aire libre o en la naturaleza",
                "Un laboratorio o centro de investigación",
                "Un hospital o centro de salud",
                "Desde casa, en forma remota",
                "Un estudio creativo",
            ],
        ),
        Question::new(
            "habilidades",
            "¿Cuál considerás que es tu mayor fortaleza?",
            "Habilidades",
            &[
                "Resolver problemas lógicos",
                "Comunicarme con los demás",
                "Crear ideas originales",
                "Liderar y tomar decisiones",
                "Analizar datos y detalles",
                "Cuidar y acompañar a otros",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn six_options() -> Question {
        default_script().remove(0)
    }

    #[test]
    fn test_numeric_selection_is_one_indexed() {
        let q = six_options();
        assert_eq!(q.options.len(), 6);
        assert_eq!(q.resolve_answer("2"), "Dibujar, diseñar o crear cosas");
        assert_eq!(q.resolve_answer(" 1 "), "Usar la computadora y la tecnología");
        assert_eq!(q.resolve_answer("6"), "Organizar proyectos o emprender");
    }

    #[test]
    fn test_out_of_range_number_is_free_text() {
        let q = six_options();
        assert_eq!(q.resolve_answer("7"), "7");
        assert_eq!(q.resolve_answer("0"), "0");
    }

    #[test]
    fn test_free_text_kept_verbatim() {
        let q = six_options();
        assert_eq!(q.resolve_answer("me gusta cocinar"), "me gusta cocinar");
    }

    #[test]
    fn test_question_without_options_never_selects() {
        let q = Question::new("libre_1", "¿?", "Libre", &[]);
        assert_eq!(q.resolve_answer("1"), "1");
    }

    #[test]
    fn test_script_ids_are_unique_and_ordered() {
        let ids: Vec<_> = default_script().into_iter().map(|q| q.id).collect();
        assert_eq!(ids, vec!["intereses", "materias", "entorno", "habilidades"]);
    }
}
