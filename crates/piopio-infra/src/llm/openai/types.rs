//! OpenAI Responses API types.
//!
//! Wire structures for `POST /v1/responses`. These are NOT the generic
//! types from piopio-types -- those are provider-agnostic.

use serde::{Deserialize, Serialize};

/// Request body for the Responses API.
#[derive(Debug, Clone, Serialize)]
pub struct ResponsesRequest {
    pub model: String,
    pub input: Vec<InputMessage>,
    pub max_output_tokens: u32,
}

/// A role-tagged input message.
#[derive(Debug, Clone, Serialize)]
pub struct InputMessage {
    pub role: String,
    pub content: String,
}

/// Non-streaming Responses API body.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponsesResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub output: Vec<OutputItem>,
    /// Convenience aggregate some gateways include alongside `output`.
    #[serde(default)]
    pub output_text: Option<String>,
}

/// One item of the `output` array. Only messages carry text.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum OutputItem {
    #[serde(rename = "message")]
    Message {
        #[serde(default)]
        content: Vec<OutputContent>,
    },
    #[serde(other)]
    Other,
}

/// A content part of an output message.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum OutputContent {
    #[serde(rename = "output_text")]
    OutputText { text: String },
    #[serde(other)]
    Other,
}

impl ResponsesResponse {
    /// Concatenated output text, or `None` if the response carried none.
    pub fn text(&self) -> Option<String> {
        if let Some(text) = &self.output_text {
            return Some(text.clone());
        }

        let parts: Vec<&str> = self
            .output
            .iter()
            .filter_map(|item| match item {
                OutputItem::Message { content } => Some(content),
                OutputItem::Other => None,
            })
            .flatten()
            .filter_map(|part| match part {
                OutputContent::OutputText { text } => Some(text.as_str()),
                OutputContent::Other => None,
            })
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(""))
        }
    }
}
