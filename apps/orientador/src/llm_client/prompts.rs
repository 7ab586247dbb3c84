// Shared prompt fragments and the template filler.
// Conversation-specific templates live in orientation/prompts.rs.

/// Persona used as the system message for every guided-mode call.
pub const ADVISOR_SYSTEM: &str = "Eres un asistente vocacional que ayuda a los usuarios a elegir una carrera. \
    Mantén un tono amable, claro, empático y accesible. \
    Refiere explícitamente a lo dicho anteriormente por el usuario en tus respuestas. \
    Responde siempre en español.";

/// Appended to prompts whose output is printed straight to the terminal.
pub const PLAIN_TEXT_INSTRUCTION: &str = "Responde solo con texto plano, sin encabezados markdown \
    ni bloques de código.";

/// Replaces every `{key}` in `template` with its value.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |acc, (key, value)| {
            acc.replace(&format!("{{{key}}}"), value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_template_replaces_all_occurrences() {
        let out = fill_template("{a} y {b}, otra vez {a}", &[("a", "uno"), ("b", "dos")]);
        assert_eq!(out, "uno y dos, otra vez uno");
    }

    #[test]
    fn test_fill_template_leaves_unknown_keys() {
        let out = fill_template("{a} {zzz}", &[("a", "x")]);
        assert_eq!(out, "x {zzz}");
    }
}
