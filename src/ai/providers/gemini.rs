use super::{EndpointStrategy, ProviderError};
use crate::ai::payload::GenerateRequest;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// A `generateContent` endpoint. The credential, when present, is sent as
/// the `key` query parameter.
pub struct GeminiEndpoint {
    client: Client,
    url: String,
    name: String,
    api_key: Option<String>,
}

impl GeminiEndpoint {
    pub fn new(url: impl Into<String>, api_key: Option<String>) -> Self {
        Self::with_client(Client::new(), url, api_key)
    }

    pub fn with_client(client: Client, url: impl Into<String>, api_key: Option<String>) -> Self {
        let url = url.into();
        let name = model_name(&url);
        Self {
            client,
            url,
            name,
            api_key,
        }
    }
}

/// `.../models/gemini-2.0-flash:generateContent` -> `gemini-2.0-flash`
fn model_name(url: &str) -> String {
    let path = url.split('?').next().unwrap_or(url);
    let last = path.rsplit('/').next().unwrap_or(path);
    let name = last.split(':').next().unwrap_or(last);
    if name.is_empty() {
        url.to_string()
    } else {
        name.to_string()
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Text of the first part of the first candidate, or empty.
pub fn parse_generate_response(body: &str) -> Result<String, ProviderError> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)?;
    Ok(parsed
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts)
        .and_then(|parts| parts.into_iter().next())
        .and_then(|part| part.text)
        .unwrap_or_default())
}

/// Prefers the API's own `error.message` over the bare status code.
pub fn status_error(status: u16, body: &str) -> ProviderError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .and_then(|error| error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("API error {status}"));
    ProviderError::Status { status, message }
}

#[async_trait]
impl EndpointStrategy for GeminiEndpoint {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<String, ProviderError> {
        let mut builder = self.client.post(&self.url).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.query(&[("key", key)]);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(endpoint = %self.name, %status, bytes = body.len(), "generateContent response");

        if status.is_success() {
            parse_generate_response(&body)
        } else {
            Err(status_error(status.as_u16(), &body))
        }
    }
}
