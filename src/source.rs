//! Content source interface
//!
//! The core never knows how section content is produced; it only consumes
//! the shapes in [`crate::content`] through this trait. The bundled
//! implementation talks to an Ollama-compatible chat endpoint, one request
//! per section, with a JSON schema constraining the reply.

use serde::Deserialize;
use tracing::debug;

use crate::content::{DiscussionContent, ExtractContent, PreparationContent};
use crate::error::{Error, Result};

/// Supplier of section content, one operation per section kind
pub trait ContentSource {
    fn preparation(&self, topic: &str) -> Result<PreparationContent>;
    fn middle(&self, topic: &str) -> Result<ExtractContent>;
    fn discussion(&self, topic: &str) -> Result<DiscussionContent>;
}

pub const DEFAULT_MODEL: &str = "deepseek-r1:latest";
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Content generation through an Ollama-compatible `/api/chat` endpoint
pub struct OllamaSource {
    client: reqwest::blocking::Client,
    base_url: String,
    model: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

impl OllamaSource {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    /// One chat round-trip: send the prompt with a response-format schema,
    /// then decode the reply content as the section shape
    fn chat<T: serde::de::DeserializeOwned>(
        &self,
        section: &'static str,
        prompt: &str,
        schema: serde_json::Value,
    ) -> Result<T> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "stream": false,
            "format": schema,
        });

        debug!(section, model = %self.model, "requesting section content");

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&body)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::ContentSource(format!("{section}: {e}")))?;

        let chat: ChatResponse = response
            .json()
            .map_err(|e| Error::ContentSource(format!("{section}: bad response: {e}")))?;

        serde_json::from_str(&chat.message.content)
            .map_err(|e| Error::ContentSource(format!("{section}: malformed content: {e}")))
    }
}

impl Default for OllamaSource {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_MODEL)
    }
}

impl ContentSource for OllamaSource {
    fn preparation(&self, topic: &str) -> Result<PreparationContent> {
        let schema = serde_json::json!({
            "type": "object",
            "properties": {
                "labels": {
                    "type": "array",
                    "items": {"type": "string"},
                    "minItems": 2,
                    "maxItems": 2
                },
                "correct_pairs": {
                    "type": "object",
                    "additionalProperties": {"type": "string"}
                }
            },
            "required": ["labels", "correct_pairs"]
        });
        self.chat("preparation", &preparation_prompt(topic), schema)
    }

    fn middle(&self, topic: &str) -> Result<ExtractContent> {
        let schema = serde_json::json!({
            "type": "object",
            "properties": {
                "topic": {"type": "string"},
                "extract": {"type": "string"},
                "questions": {"type": "array", "items": {"type": "string"}},
                "answers": {"type": "array", "items": {"type": "boolean"}}
            },
            "required": ["topic", "extract", "questions", "answers"]
        });
        let content: ExtractContent = self.chat("middle", &middle_prompt(topic), schema)?;
        content.validate()?;
        Ok(content)
    }

    fn discussion(&self, topic: &str) -> Result<DiscussionContent> {
        let schema = serde_json::json!({
            "type": "object",
            "properties": {
                "question": {"type": "string"}
            },
            "required": ["question"]
        });
        self.chat("discussion", &discussion_prompt(topic), schema)
    }
}

fn preparation_prompt(topic: &str) -> String {
    format!(
        r#"You are a helpful assistant that can help with creating preparation tasks for language learning materials.
The preparation task should be a one-to-one matching task, matching words from two separate categories. Every answer value must be distinct. The topic to create this preparation task on is: {topic}
Provide as output a dictionary containing keys "labels", "correct_pairs". Return as JSON.

EXAMPLE OUTPUT:
{{
  "labels": ["Cities", "Countries"],
  "correct_pairs": {{"Beijing": "China", "Buenos Aires": "Argentina", "Amsterdam": "The Netherlands", "Seoul": "The Republic of Korea", "Moscow": "Russia"}}
}}
"#
    )
}

fn middle_prompt(topic: &str) -> String {
    format!(
        r#"You are a helpful assistant that can help with creating extracts for English comprehension tasks, including relevant True/False questions.
The extract should be approximately 100-150 words in length.
The extract should be themed corresponding to the topic described. Questions should be based on the extract, and the answers list must score the questions in order. The topic to create this extract on is: {topic}. Return as JSON.

EXAMPLE OUTPUT:
{{
  "topic": "An email from a friend",
  "extract": "Hi Samia,\nQuick email to say that sounds like a great idea. Saturday is better for me because I'm meeting my parents on Sunday. It's going to be so good to catch up finally. I want to hear all about your new job!\nSee you soon!\nGregor",
  "questions": [
    "Samia and Gregor are going to meet on Saturday",
    "They haven't seen each other for a long time",
    "Samia's life hasn't changed since they last met"
  ],
  "answers": [true, true, false]
}}
"#
    )
}

fn discussion_prompt(topic: &str) -> String {
    format!(
        r#"You are a helpful assistant that can help with creating discussion prompts for English comprehension tasks.
The discussion prompt should consist of a single question.
The discussion prompt should be related to the topic specified.
The topic to create this discussion prompt on is {topic}. Return as JSON.

EXAMPLE OUTPUT:
{{
  "question": "How often do you travel by plane? Which countries would you like to visit?"
}}
"#
    )
}
