//! Request payloads for the generateContent endpoints.
//!
//! A payload is an ordered list of [`Part`]s: the instruction comes first,
//! followed by document content. Text documents are inlined as labeled text
//! parts, images and PDFs travel as base64 inline data.

use crate::attachment::Attachment;
use crate::types::ChatMessage;
use serde::{Deserialize, Serialize};

/// One fragment of a request. Variant order matters for untagged decoding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    pub fn inline(attachment: &Attachment) -> Self {
        Part::InlineData {
            inline_data: InlineData {
                mime_type: attachment.media_type().to_string(),
                data: attachment.base64(),
            },
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text),
            Part::InlineData { .. } => None,
        }
    }
}

/// A single conversation turn on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

impl Content {
    /// A role-less turn, used for single-shot document requests.
    pub fn parts(parts: Vec<Part>) -> Self {
        Self { role: None, parts }
    }

    pub fn from_message(message: &ChatMessage) -> Self {
        Self {
            role: Some(message.role.wire_name().to_string()),
            parts: vec![Part::text(&message.content)],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub max_output_tokens: u32,
}

impl GenerationConfig {
    pub const DOCUMENTS: GenerationConfig = GenerationConfig {
        temperature: 0.7,
        max_output_tokens: 4096,
    };

    pub const CHAT: GenerationConfig = GenerationConfig {
        temperature: 0.7,
        max_output_tokens: 2048,
    };
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::DOCUMENTS
    }
}

/// Full request body posted to an endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

impl GenerateRequest {
    pub fn single(parts: Vec<Part>, generation_config: GenerationConfig) -> Self {
        Self {
            contents: vec![Content::parts(parts)],
            generation_config,
        }
    }

    pub fn conversation(contents: Vec<Content>, generation_config: GenerationConfig) -> Self {
        Self {
            contents,
            generation_config,
        }
    }
}

/// Instruction followed by every uploaded file.
pub fn document_parts(instruction: &str, files: &[Attachment]) -> Vec<Part> {
    let mut parts = Vec::with_capacity(files.len() + 1);
    parts.push(Part::text(instruction));
    for file in files {
        if file.kind().is_binary() {
            parts.push(Part::inline(file));
        } else {
            parts.push(Part::text(format!(
                "\n\n--- FILE: {} ---\n{}",
                file.name(),
                file.text()
            )));
        }
    }
    parts
}

/// Instruction followed by two labeled documents.
///
/// Binary documents get a marker part in front so the model can tell
/// which inline payload is which.
pub fn comparison_parts(instruction: &str, first: &Attachment, second: &Attachment) -> Vec<Part> {
    let mut parts = vec![Part::text(instruction)];
    for (label, doc) in [("A", first), ("B", second)] {
        if doc.kind().is_binary() {
            parts.push(Part::text(format!("\n--- DOCUMENT {label} ---\n")));
            parts.push(Part::inline(doc));
        } else {
            parts.push(Part::text(format!(
                "\n--- DOCUMENT {label}: {} ---\n{}",
                doc.name(),
                doc.text()
            )));
        }
    }
    parts
}

/// Priming turns followed by the full chat history.
pub fn conversation_contents(
    system_prompt: &str,
    acknowledgement: &str,
    history: &[ChatMessage],
) -> Vec<Content> {
    let mut contents = Vec::with_capacity(history.len() + 2);
    contents.push(Content::from_message(&ChatMessage::user(system_prompt)));
    contents.push(Content::from_message(&ChatMessage::assistant(
        acknowledgement,
    )));
    contents.extend(history.iter().map(Content::from_message));
    contents
}
