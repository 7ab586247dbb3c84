// All LLM prompt templates for the orientation conversation.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{ADVISOR_SYSTEM, PLAIN_TEXT_INSTRUCTION};

/// Acknowledgment prompt (guided mode).
/// Replace: {answer}, {category}, {recent}, {profile}, {plain_text}
pub const ACKNOWLEDGMENT_TEMPLATE: &str = r#"El usuario acaba de responder una pregunta de la categoría "{category}".
Su respuesta fue: "{answer}"

Conversación reciente:
{recent}

Perfil recopilado hasta ahora:
{profile}

Escribe un comentario breve (una o dos oraciones) que reconozca su respuesta y la relacione con lo que dijo antes.
No hagas preguntas ni sugieras carreras todavía. {plain_text}"#;

/// Suggestion prompt (guided mode).
/// Replace: {profile}, {catalog}, {plain_text}
pub const SUGGESTION_TEMPLATE: &str = r#"Estas son todas las respuestas del usuario al cuestionario vocacional:
{profile}

Carreras de referencia (podés sugerir otras si encajan mejor):
{catalog}

Analiza sus respuestas y sugiere entre 3 y 4 carreras posibles.
Formato: una lista numerada, cada ítem con el nombre de la carrera seguido de una justificación de una sola línea basada en sus respuestas.
{plain_text}"#;

/// Follow-up prompt (guided mode).
/// Replace: {question}, {profile}, {recent}, {plain_text}
pub const FOLLOW_UP_TEMPLATE: &str = r#"Perfil del usuario:
{profile}

Conversación reciente:
{recent}

El usuario pregunta: "{question}"
Responde de forma clara y concreta, conectando la respuesta con su perfil. {plain_text}"#;

/// Seed message for the free-form mode greeting.
pub const FREE_FORM_INTRO: &str = "Preséntate brevemente como asistente vocacional y realiza tu \
    primera pregunta para conocer intereses.";

/// Free-form system prompt.
pub const FREE_FORM_SYSTEM: &str = "Eres un asistente vocacional que ayuda a los usuarios a elegir una carrera. \
    Vas a hacer al menos 3 preguntas relevantes sobre sus gustos, intereses y preferencias personales durante la conversación. \
    El usuario solo responderá tus preguntas; guía tú la conversación de forma clara. \
    No pidas permiso para preguntar. Evita frases como \"¿Querés que te pregunte algo?\" o \"¿Seguimos?\". Formula directamente la próxima pregunta. \
    Tras 3 o 4 preguntas, entrega recomendaciones directamente sin pedir confirmación. \
    Sugiere 2 o más carreras posibles según lo que el usuario cuente. \
    Mantén un tono amable, claro, empático y accesible. \
    Refiere explícitamente a lo dicho anteriormente por el usuario en tus respuestas y preguntas.";

/// Free-form steering appended before every intermediate turn.
pub const FREE_FORM_NEXT_QUESTION: &str = "Formula UNA sola pregunta directa sin pedir permiso, \
    refiriéndote a lo dicho anteriormente por el usuario. No ofrezcas aún recomendaciones.";

/// Free-form steering appended once, when the target answer count is reached.
pub const FREE_FORM_SUGGEST: &str = "Ahora, sin hacer más preguntas ni pedir permiso, sugiere 2 o más \
    carreras alineadas a los intereses del usuario, con breve justificación y posibles próximos pasos.";

pub const GENERIC_ACKNOWLEDGMENT: &str = "¡Gracias por tu respuesta! Sigamos.";
pub const FOLLOW_UP_FALLBACK: &str =
    "No pude responder en este momento. Probá reformular la pregunta o intentá de nuevo.";
pub const FREE_FORM_TURN_FALLBACK: &str =
    "No pude generar la próxima pregunta. Contame un poco más sobre lo que te gusta hacer.";
pub const FALLBACK_SUGGESTIONS_HEADER: &str =
    "No pude consultar al modelo, pero según tus respuestas podrías explorar:";
pub const CLOSING_MESSAGE: &str = "¡Gracias por usar el orientador vocacional! Mucha suerte en tu camino.";

/// Every piece of text the driver sends or prints, grouped so presets can swap them.
#[derive(Debug, Clone)]
pub struct PromptSet {
    pub system: &'static str,
    pub intro: Option<&'static str>,
    pub acknowledgment: &'static str,
    pub suggestion: &'static str,
    pub follow_up: &'static str,
    pub generic_acknowledgment: &'static str,
    pub follow_up_fallback: &'static str,
    pub closing: &'static str,
}

impl PromptSet {
    pub fn guided() -> Self {
        Self {
            system: ADVISOR_SYSTEM,
            intro: None,
            acknowledgment: ACKNOWLEDGMENT_TEMPLATE,
            suggestion: SUGGESTION_TEMPLATE,
            follow_up: FOLLOW_UP_TEMPLATE,
            generic_acknowledgment: GENERIC_ACKNOWLEDGMENT,
            follow_up_fallback: FOLLOW_UP_FALLBACK,
            closing: CLOSING_MESSAGE,
        }
    }

    /// Free-form turns replay the memory, so the templates become steering messages.
    pub fn free_form() -> Self {
        Self {
            system: FREE_FORM_SYSTEM,
            intro: Some(FREE_FORM_INTRO),
            acknowledgment: FREE_FORM_NEXT_QUESTION,
            suggestion: FREE_FORM_SUGGEST,
            follow_up: FOLLOW_UP_TEMPLATE,
            generic_acknowledgment: FREE_FORM_TURN_FALLBACK,
            follow_up_fallback: FOLLOW_UP_FALLBACK,
            closing: CLOSING_MESSAGE,
        }
    }

    pub fn plain_text(&self) -> &'static str {
        PLAIN_TEXT_INSTRUCTION
    }
}
