// Vocational orientation conversation.
// Implements: question script, career catalog, conversation memory, fallback matcher, driver.
// All LLM calls go through llm_client — no direct HTTP calls here.

pub mod catalog;
pub mod driver;
pub mod fallback;
pub mod memory;
pub mod prompts;
pub mod questions;
