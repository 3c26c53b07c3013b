pub mod gemini;

use super::payload::GenerateRequest;
use crate::config::Settings;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

pub use gemini::GeminiEndpoint;

/// Why a single endpoint attempt failed. The display text is the message
/// shown to the user when this is the last attempt.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    #[error("{0}")]
    Transport(String),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("{0}")]
    Decode(String),
}

impl From<reqwest::Error> for ProviderError {
    /// The request URL carries the `key` query parameter, so it is stripped
    /// before the error reaches a toast or a log line.
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Transport(err.without_url().to_string())
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Decode(err.to_string())
    }
}

/// One remote endpoint that can turn a request into generated text.
#[async_trait]
pub trait EndpointStrategy: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &str;

    async fn generate(&self, request: &GenerateRequest) -> Result<String, ProviderError>;
}

/// Builds the ordered endpoint list from settings.
///
/// Every configured URL shares one HTTP client and the same credential.
pub fn endpoints_from_settings(settings: &Settings) -> Result<Vec<Arc<dyn EndpointStrategy>>> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = settings.request_timeout_secs.filter(|secs| *secs > 0) {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let client = builder.build()?;

    Ok(settings
        .endpoints
        .iter()
        .map(|url| {
            Arc::new(GeminiEndpoint::with_client(
                client.clone(),
                url.clone(),
                settings.api_key.clone(),
            )) as Arc<dyn EndpointStrategy>
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_display_their_message() {
        let err = ProviderError::Status {
            status: 503,
            message: "model overloaded".to_string(),
        };
        assert_eq!(err.to_string(), "model overloaded");
    }

    #[test]
    fn builds_one_strategy_per_endpoint_in_order() {
        let settings = Settings {
            endpoints: vec![
                "http://localhost/models/first:generateContent".to_string(),
                "http://localhost/models/second:generateContent".to_string(),
            ],
            ..Settings::default()
        };
        let endpoints = endpoints_from_settings(&settings).expect("endpoints");
        let names: Vec<_> = endpoints.iter().map(|e| e.name().to_string()).collect();
        assert_eq!(names, ["first", "second"]);
    }
}
