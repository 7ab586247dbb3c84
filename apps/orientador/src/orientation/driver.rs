//! Conversation Driver — walks the question script, collects answers, asks the
//! model for acknowledgments and suggestions, then runs the follow-up loop.
//!
//! Flow: AskingQuestion(0) → Acknowledging(0) → … → Suggesting → FollowUp → Terminated.
//!
//! One line of input is handled at a time and at most one LLM call is in flight.
//! A failed call is replaced by canned text; it never ends the conversation.

use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::ConversationMode;
use crate::errors::AppError;
use crate::llm_client::prompts::fill_template;
use crate::llm_client::{ChatMessage, ChatModel, Role};
use crate::orientation::catalog::catalog_as_text;
use crate::orientation::fallback::{render_suggestions, suggest_careers};
use crate::orientation::memory::ConversationMemory;
use crate::orientation::prompts::{PromptSet, FALLBACK_SUGGESTIONS_HEADER};
use crate::orientation::questions::{default_script, Question};
use crate::ui;

/// Typed at any prompt to end the conversation.
pub const EXIT_KEYWORD: &str = "salir";
/// Messages included in the rolling summary sent with each prompt.
const RECENT_CONTEXT_MESSAGES: usize = 10;
/// User turns before suggesting in free-form mode; the intro seed counts as one.
const FREE_FORM_TARGET_QUESTIONS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    AskingQuestion(usize),
    Acknowledging(usize),
    Suggesting,
    FollowUp,
    Terminated,
}

/// What the driver asks and how. An empty question list selects free-form mode,
/// where the model writes its own questions.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub questions: Vec<Question>,
    pub target_question_count: usize,
    pub prompts: PromptSet,
}

impl DriverConfig {
    pub fn guided() -> Self {
        let questions = default_script();
        Self {
            target_question_count: questions.len(),
            questions,
            prompts: PromptSet::guided(),
        }
    }

    pub fn free_form() -> Self {
        Self {
            questions: Vec::new(),
            target_question_count: FREE_FORM_TARGET_QUESTIONS,
            prompts: PromptSet::free_form(),
        }
    }

    pub fn for_mode(mode: ConversationMode) -> Self {
        match mode {
            ConversationMode::Guided => Self::guided(),
            ConversationMode::FreeForm => Self::free_form(),
        }
    }

    pub fn is_free_form(&self) -> bool {
        self.questions.is_empty()
    }

    /// User turns the driver sends on its own before the first answer.
    fn seed_turns(&self) -> usize {
        usize::from(self.prompts.intro.is_some())
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.target_question_count == 0 {
            return Err(AppError::Config(
                "target_question_count must be at least 1".to_string(),
            ));
        }
        if !self.is_free_form() && self.target_question_count > self.questions.len() {
            return Err(AppError::Config(format!(
                "target_question_count {} exceeds the {} scripted questions",
                self.target_question_count,
                self.questions.len()
            )));
        }
        for (i, q) in self.questions.iter().enumerate() {
            if self.questions[..i].iter().any(|prev| prev.id == q.id) {
                return Err(AppError::Config(format!("duplicate question id '{}'", q.id)));
            }
        }
        Ok(())
    }
}

pub struct ConversationDriver {
    config: DriverConfig,
    llm: Arc<dyn ChatModel>,
    memory: ConversationMemory,
    state: DriverState,
    suggestions_delivered: bool,
    session_id: Uuid,
}

impl ConversationDriver {
    pub fn new(config: DriverConfig, llm: Arc<dyn ChatModel>) -> Result<Self, AppError> {
        config.validate()?;
        Ok(Self {
            config,
            llm,
            memory: ConversationMemory::new(),
            state: DriverState::AskingQuestion(0),
            suggestions_delivered: false,
            session_id: Uuid::new_v4(),
        })
    }

    #[cfg(test)]
    pub fn state(&self) -> DriverState {
        self.state
    }

    #[cfg(test)]
    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    /// Drives the whole conversation until the exit keyword or end of input.
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> Result<(), AppError>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();
        self.start(out).await?;
        while self.state != DriverState::Terminated {
            let line = lines.next_line().await?;
            self.advance(line, out).await?;
        }
        info!(
            session = %self.session_id,
            answers = self.memory.answers().len(),
            last_activity = ?self.memory.last_activity(),
            "Conversation ended"
        );
        Ok(())
    }

    /// Prints the greeting and the first question.
    pub async fn start<W: Write>(&mut self, out: &mut W) -> Result<(), AppError> {
        info!(
            session = %self.session_id,
            free_form = self.config.is_free_form(),
            "Starting orientation session"
        );
        writeln!(out, "{}", ui::header("=== Orientador vocacional ==="))?;
        writeln!(
            out,
            "{}",
            ui::dim(format!("Escribí '{EXIT_KEYWORD}' en cualquier momento para terminar."))
        )?;
        self.memory.push(Role::System, self.config.prompts.system);

        if let Some(intro) = self.config.prompts.intro {
            self.memory.push(Role::User, intro);
            let messages = self.memory.as_chat_messages();
            match self.llm.chat(&messages).await {
                Ok(text) => self.reply(text, out)?,
                Err(e) => {
                    warn!(session = %self.session_id, "Intro call failed: {e}");
                    writeln!(out, "{}", ui::warning(self.config.prompts.generic_acknowledgment))?;
                }
            }
        } else {
            writeln!(
                out,
                "{}",
                ui::dim("Respondé con el número de una opción o con tus propias palabras.")
            )?;
        }

        self.settle(out).await
    }

    /// Feeds one input line (`None` = end of input) and runs every non-reading
    /// state that follows, stopping at the next prompt.
    pub async fn advance<W: Write>(
        &mut self,
        line: Option<String>,
        out: &mut W,
    ) -> Result<DriverState, AppError> {
        let next = match self.state {
            DriverState::AskingQuestion(i) => self.on_answer(i, line, out)?,
            DriverState::FollowUp => self.on_follow_up(line, out).await?,
            other => return Ok(other),
        };
        self.transition(next);
        self.settle(out).await?;
        Ok(self.state)
    }

    async fn settle<W: Write>(&mut self, out: &mut W) -> Result<(), AppError> {
        loop {
            let next = match self.state {
                DriverState::Acknowledging(i) => self.acknowledge(i, out).await?,
                DriverState::Suggesting => self.suggest(out).await?,
                DriverState::AskingQuestion(i) => {
                    self.print_question(i, out)?;
                    return Ok(());
                }
                DriverState::FollowUp => {
                    write!(out, "{} ", ui::accent("?"))?;
                    out.flush()?;
                    return Ok(());
                }
                DriverState::Terminated => return Ok(()),
            };
            self.transition(next);
        }
    }

    fn transition(&mut self, next: DriverState) {
        debug!(session = %self.session_id, from = ?self.state, to = ?next, "State transition");
        self.state = next;
    }

    fn is_exit(line: &Option<String>) -> bool {
        match line {
            None => true,
            Some(l) => l.trim().eq_ignore_ascii_case(EXIT_KEYWORD),
        }
    }

    fn close<W: Write>(&self, out: &mut W) -> Result<DriverState, AppError> {
        writeln!(out, "{}", ui::header(self.config.prompts.closing))?;
        Ok(DriverState::Terminated)
    }

    fn print_question<W: Write>(&mut self, i: usize, out: &mut W) -> Result<(), AppError> {
        if let Some(q) = self.config.questions.get(i) {
            writeln!(out)?;
            writeln!(
                out,
                "{} {}",
                ui::accent(format!(
                    "Pregunta {}/{} · {}",
                    i + 1,
                    self.config.target_question_count,
                    q.category
                )),
                ui::header(&q.prompt)
            )?;
            for (n, option) in q.options.iter().enumerate() {
                writeln!(out, "  {} {}", ui::accent(format!("{}.", n + 1)), option)?;
            }
            self.memory.push(Role::Assistant, q.prompt.clone());
        }
        write!(out, "{} ", ui::accent(">"))?;
        out.flush()?;
        Ok(())
    }

    fn on_answer<W: Write>(
        &mut self,
        i: usize,
        line: Option<String>,
        out: &mut W,
    ) -> Result<DriverState, AppError> {
        if Self::is_exit(&line) {
            info!(session = %self.session_id, question = i, "Exit requested during questions");
            return self.close(out);
        }
        let raw = line.unwrap_or_default();

        let (question_id, answer) = match self.config.questions.get(i) {
            Some(q) => (q.id.clone(), q.resolve_answer(&raw)),
            None => (format!("libre_{}", i + 1), raw.trim().to_string()),
        };

        let record = self.memory.record_answer(&question_id, &answer)?;
        debug!(
            session = %self.session_id,
            question_id = %record.question_id,
            answer = %record.answer,
            at = %record.timestamp,
            "Answer recorded"
        );
        self.memory.push(Role::User, answer);

        Ok(DriverState::Acknowledging(i))
    }

    async fn acknowledge<W: Write>(&mut self, i: usize, out: &mut W) -> Result<DriverState, AppError> {
        let user_turns = i + 1 + self.config.seed_turns();
        let more_questions = user_turns < self.config.target_question_count;

        if self.config.is_free_form() {
            // The steered reply doubles as the next question; the last answer goes
            // straight to suggestions.
            if !more_questions {
                return Ok(DriverState::Suggesting);
            }
            self.memory.push(Role::System, self.config.prompts.acknowledgment);
            let messages = self.memory.as_chat_messages();
            self.reply_or_fallback(&messages, self.config.prompts.generic_acknowledgment, out)
                .await?;
            return Ok(DriverState::AskingQuestion(i + 1));
        }

        let question = &self.config.questions[i];
        let answer = self.memory.profile().get(&question.id).unwrap_or_default();
        let prompt = fill_template(
            self.config.prompts.acknowledgment,
            &[
                ("answer", answer),
                ("category", question.category.as_str()),
                ("recent", self.memory.recent_summary(RECENT_CONTEXT_MESSAGES).as_str()),
                ("profile", self.memory.profile().as_text().as_str()),
                ("plain_text", self.config.prompts.plain_text()),
            ],
        );
        let messages = [
            ChatMessage::system(self.config.prompts.system),
            ChatMessage::user(prompt),
        ];
        self.reply_or_fallback(&messages, self.config.prompts.generic_acknowledgment, out)
            .await?;

        Ok(if more_questions {
            DriverState::AskingQuestion(i + 1)
        } else {
            DriverState::Suggesting
        })
    }

    async fn suggest<W: Write>(&mut self, out: &mut W) -> Result<DriverState, AppError> {
        self.memory.close_profile();
        info!(
            session = %self.session_id,
            answers = self.memory.answers().len(),
            "Requesting career suggestions"
        );

        let messages = if self.config.is_free_form() {
            if !self.suggestions_delivered {
                self.memory.push(Role::System, self.config.prompts.suggestion);
            }
            self.memory.as_chat_messages()
        } else {
            let prompt = fill_template(
                self.config.prompts.suggestion,
                &[
                    ("profile", self.memory.profile().as_text().as_str()),
                    ("catalog", catalog_as_text().as_str()),
                    ("plain_text", self.config.prompts.plain_text()),
                ],
            );
            vec![
                ChatMessage::system(self.config.prompts.system),
                ChatMessage::user(prompt),
            ]
        };
        self.suggestions_delivered = true;

        writeln!(out)?;
        writeln!(out, "{}", ui::header("Sugerencias de carreras"))?;
        match self.llm.chat(&messages).await {
            Ok(text) => self.reply(text, out)?,
            Err(e) => {
                warn!(session = %self.session_id, "Suggestion call failed, using keyword fallback: {e}");
                let suggestions = suggest_careers(self.memory.profile().answers());
                writeln!(out, "{}", ui::warning(FALLBACK_SUGGESTIONS_HEADER))?;
                writeln!(out, "{}", ui::warning(render_suggestions(&suggestions)))?;
            }
        }
        writeln!(out)?;
        writeln!(
            out,
            "{}",
            ui::dim(format!(
                "Podés hacerme más preguntas sobre estas carreras, o escribir '{EXIT_KEYWORD}'."
            ))
        )?;
        Ok(DriverState::FollowUp)
    }

    async fn on_follow_up<W: Write>(
        &mut self,
        line: Option<String>,
        out: &mut W,
    ) -> Result<DriverState, AppError> {
        if Self::is_exit(&line) {
            return self.close(out);
        }
        let question = line.unwrap_or_default().trim().to_string();
        self.memory.push(Role::User, question.clone());

        let messages = if self.config.is_free_form() {
            self.memory.as_chat_messages()
        } else {
            let prompt = fill_template(
                self.config.prompts.follow_up,
                &[
                    ("question", question.as_str()),
                    ("profile", self.memory.profile().as_text().as_str()),
                    ("recent", self.memory.recent_summary(RECENT_CONTEXT_MESSAGES).as_str()),
                    ("plain_text", self.config.prompts.plain_text()),
                ],
            );
            vec![
                ChatMessage::system(self.config.prompts.system),
                ChatMessage::user(prompt),
            ]
        };
        self.reply_or_fallback(&messages, self.config.prompts.follow_up_fallback, out)
            .await?;
        Ok(DriverState::FollowUp)
    }

    /// Stores and prints a model reply.
    fn reply<W: Write>(&mut self, text: String, out: &mut W) -> Result<(), AppError> {
        writeln!(out, "{}", ui::assistant(text.trim()))?;
        self.memory.push(Role::Assistant, text);
        Ok(())
    }

    /// Calls the model; on failure prints `fallback` without storing it.
    async fn reply_or_fallback<W: Write>(
        &mut self,
        messages: &[ChatMessage],
        fallback: &str,
        out: &mut W,
    ) -> Result<(), AppError> {
        match self.llm.chat(messages).await {
            Ok(text) => self.reply(text, out),
            Err(e) => {
                warn!(session = %self.session_id, state = ?self.state, "LLM call failed: {e}");
                writeln!(out, "{}", ui::warning(fallback))?;
                Ok(())
            }
        }
    }
}
