//! Terminal styling helpers. Colors are dropped automatically when stdout is not a TTY.

use console::style;
use std::fmt::Display;

/// White bold — banners, section titles
pub fn header<D: Display>(text: D) -> String {
    style(text).white().bold().to_string()
}

/// Cyan bold — question numbers, option numbers
pub fn accent<D: Display>(text: D) -> String {
    style(text).cyan().bold().to_string()
}

/// Dim — hints and instructions
pub fn dim<D: Display>(text: D) -> String {
    style(text).dim().to_string()
}

/// Green — assistant replies
pub fn assistant<D: Display>(text: D) -> String {
    style(text).green().to_string()
}

/// Yellow — locally generated fallback output
pub fn warning<D: Display>(text: D) -> String {
    style(text).yellow().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpers_keep_text() {
        for styled in [
            header("Orientador"),
            accent("1."),
            dim("escribí salir"),
            assistant("¡Hola!"),
            warning("sin conexión"),
        ] {
            assert!(!styled.is_empty());
        }
        assert!(header("Orientador").contains("Orientador"));
        assert!(warning("sin conexión").contains("sin conexión"));
    }
}
