//! Conversation memory — append-only message log plus the answer records and
//! the user profile derived from them.
//!
//! Nothing here ever removes or rewrites an entry. The profile closes once the
//! question script completes; later input is only logged as messages.

use chrono::{DateTime, Utc};

use crate::errors::AppError;
use crate::llm_client::{ChatMessage, Role};

#[derive(Debug, Clone)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct AnswerRecord {
    pub question_id: String,
    pub answer: String,
    pub timestamp: DateTime<Utc>,
}

/// Question id → resolved answer, kept in the order answers were given.
#[derive(Debug, Clone, Default)]
pub struct UserProfile {
    entries: Vec<(String, String)>,
}

impl UserProfile {
    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(id, _)| id == question_id)
            .map(|(_, answer)| answer.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn question_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    pub fn answers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, answer)| answer.as_str())
    }

    /// One `- id: answer` line per entry, or a placeholder when empty.
    pub fn as_text(&self) -> String {
        if self.is_empty() {
            return "(sin respuestas todavía)".to_string();
        }
        self.entries
            .iter()
            .map(|(id, answer)| format!("- {id}: {answer}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Default)]
pub struct ConversationMemory {
    messages: Vec<Message>,
    answers: Vec<AnswerRecord>,
    profile: UserProfile,
    profile_closed: bool,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(Message {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        });
    }

    /// Stores the answer record and the profile entry for a question.
    /// Each question id may be answered once, and only while the profile is open.
    pub fn record_answer(
        &mut self,
        question_id: &str,
        answer: &str,
    ) -> Result<&AnswerRecord, AppError> {
        if self.profile_closed {
            return Err(AppError::ProfileClosed(question_id.to_string()));
        }
        if self.profile.get(question_id).is_some() {
            return Err(AppError::DuplicateAnswer(question_id.to_string()));
        }
        self.answers.push(AnswerRecord {
            question_id: question_id.to_string(),
            answer: answer.to_string(),
            timestamp: Utc::now(),
        });
        self.profile
            .entries
            .push((question_id.to_string(), answer.to_string()));
        Ok(&self.answers[self.answers.len() - 1])
    }

    pub fn close_profile(&mut self) {
        self.profile_closed = true;
    }

    #[cfg(test)]
    pub fn is_profile_closed(&self) -> bool {
        self.profile_closed
    }

    #[cfg(test)]
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Timestamp of the newest message, if any.
    pub fn last_activity(&self) -> Option<DateTime<Utc>> {
        self.messages.last().map(|m| m.timestamp)
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    #[cfg(test)]
    pub fn last_assistant_message(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.role == Role::Assistant)
    }

    /// Summary of the last `n` messages as `role: content` lines.
    ///
    /// System messages count toward the window but are not rendered; they are
    /// instructions to the model, not part of the conversation.
    pub fn recent_summary(&self, n: usize) -> String {
        let start = self.messages.len().saturating_sub(n);
        let lines: Vec<String> = self.messages[start..]
            .iter()
            .filter(|m| m.role != Role::System)
            .map(|m| format!("{}: {}", speaker(m.role), m.content.trim()))
            .collect();
        if lines.is_empty() {
            "(conversación recién iniciada)".to_string()
        } else {
            lines.join("\n")
        }
    }

    /// The whole log in insertion order, ready to replay to the model.
    pub fn as_chat_messages(&self) -> Vec<ChatMessage> {
        self.messages
            .iter()
            .map(|m| ChatMessage {
                role: m.role,
                content: m.content.clone(),
            })
            .collect()
    }
}

fn speaker(role: Role) -> &'static str {
    match role {
        Role::System => "Sistema",
        Role::User => "Usuario",
        Role::Assistant => "Asistente",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_answer_updates_profile_in_order() {
        let mut memory = ConversationMemory::new();
        let record = memory.record_answer("intereses", "tecnología").unwrap();
        assert_eq!(record.question_id, "intereses");
        assert_eq!(record.answer, "tecnología");
        memory.record_answer("materias", "Matemática").unwrap();

        assert_eq!(memory.answers().len(), 2);
        let ids: Vec<_> = memory.profile().question_ids().collect();
        assert_eq!(ids, vec!["intereses", "materias"]);
        assert_eq!(memory.profile().get("materias"), Some("Matemática"));
        assert_eq!(memory.profile().get("entorno"), None);
    }

    #[test]
    fn test_duplicate_answer_rejected() {
        let mut memory = ConversationMemory::new();
        memory.record_answer("intereses", "a").unwrap();
        let err = memory.record_answer("intereses", "b").unwrap_err();
        assert!(matches!(err, AppError::DuplicateAnswer(id) if id == "intereses"));
        assert_eq!(memory.profile().get("intereses"), Some("a"));
        assert_eq!(memory.answers().len(), 1);
    }

    #[test]
    fn test_closed_profile_is_read_only() {
        let mut memory = ConversationMemory::new();
        memory.record_answer("intereses", "a").unwrap();
        memory.close_profile();
        assert!(matches!(
            memory.record_answer("materias", "b"),
            Err(AppError::ProfileClosed(_))
        ));
        assert_eq!(memory.profile().len(), 1);
    }

    #[test]
    fn test_recent_summary_keeps_last_n_and_skips_system() {
        let mut memory = ConversationMemory::new();
        memory.push(Role::System, "instrucción oculta");
        for i in 0..12 {
            memory.push(Role::User, format!("mensaje {i}"));
        }
        let summary = memory.recent_summary(10);
        assert_eq!(summary.lines().count(), 10);
        assert!(summary.starts_with("Usuario: mensaje 2"));
        assert!(!summary.contains("instrucción oculta"));
    }

    #[test]
    fn test_recent_summary_window_counts_system_messages() {
        let mut memory = ConversationMemory::new();
        for i in 0..10 {
            memory.push(Role::User, format!("a{i}"));
        }
        memory.push(Role::System, "pauta");
        memory.push(Role::Assistant, "b");

        // Window: a2..a9, pauta, b → nine rendered lines.
        let summary = memory.recent_summary(10);
        assert_eq!(summary.lines().count(), 9);
        assert!(summary.starts_with("Usuario: a2"));
        assert!(summary.ends_with("Asistente: b"));
        assert!(!summary.contains("pauta"));
    }

    #[test]
    fn test_recent_summary_placeholder_when_empty() {
        let memory = ConversationMemory::new();
        assert_eq!(memory.recent_summary(10), "(conversación recién iniciada)");
        assert!(memory.last_activity().is_none());
        assert_eq!(memory.profile().as_text(), "(sin respuestas todavía)");
    }

    #[test]
    fn test_replay_preserves_insertion_order() {
        let mut memory = ConversationMemory::new();
        memory.push(Role::System, "s");
        memory.push(Role::User, "u");
        memory.push(Role::Assistant, "a");
        let roles: Vec<_> = memory.as_chat_messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);
        assert_eq!(memory.last_assistant_message().unwrap().content, "a");
    }
}
