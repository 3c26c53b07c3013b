use super::payload::{Content, GenerateRequest, GenerationConfig, Part};
use super::providers::{EndpointStrategy, ProviderError, endpoints_from_settings};
use crate::config::Settings;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, warn};

// ============================================
// Error Types
// ============================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum GatewayError {
    /// The last endpoint in the list failed; earlier failures were logged.
    #[error("{source}")]
    Endpoint {
        endpoint: String,
        #[source]
        source: ProviderError,
    },

    #[error("All models failed")]
    NoEndpoints,
}

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

// ============================================
// Gateway
// ============================================

/// Sends requests to an ordered list of endpoints, falling through to the
/// next one on any failure. Each endpoint is tried at most once per call.
#[derive(Clone)]
pub struct Gateway {
    endpoints: Vec<Arc<dyn EndpointStrategy>>,
}

impl Gateway {
    pub fn new(endpoints: Vec<Arc<dyn EndpointStrategy>>) -> Self {
        Self { endpoints }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(endpoints_from_settings(settings)?))
    }

    /// Create the gateway from environment configuration
    pub fn from_env() -> Result<Self> {
        Self::from_settings(&Settings::from_env()?)
    }

    pub fn endpoint_names(&self) -> Vec<&str> {
        self.endpoints.iter().map(|endpoint| endpoint.name()).collect()
    }

    /// Single-turn request built from payload parts.
    pub async fn generate(&self, parts: Vec<Part>, config: GenerationConfig) -> GatewayResult<String> {
        self.send(&GenerateRequest::single(parts, config)).await
    }

    /// Multi-turn request replaying a whole conversation.
    pub async fn chat(&self, contents: Vec<Content>, config: GenerationConfig) -> GatewayResult<String> {
        self.send(&GenerateRequest::conversation(contents, config))
            .await
    }

    pub async fn send(&self, request: &GenerateRequest) -> GatewayResult<String> {
        let mut last_error = None;

        for endpoint in &self.endpoints {
            debug!(endpoint = endpoint.name(), "sending generateContent request");
            match endpoint.generate(request).await {
                Ok(text) => return Ok(text),
                Err(err) => {
                    warn!(endpoint = endpoint.name(), error = %err, "model failed, trying next");
                    last_error = Some(GatewayError::Endpoint {
                        endpoint: endpoint.name().to_string(),
                        source: err,
                    });
                }
            }
        }

        Err(last_error.unwrap_or(GatewayError::NoEndpoints))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Scripted {
        name: &'static str,
        reply: std::result::Result<&'static str, ProviderError>,
        calls: Mutex<usize>,
    }

    impl Scripted {
        fn ok(name: &'static str, text: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                reply: Ok(text),
                calls: Mutex::new(0),
            })
        }

        fn failing(name: &'static str, err: ProviderError) -> Arc<Self> {
            Arc::new(Self {
                name,
                reply: Err(err),
                calls: Mutex::new(0),
            })
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl EndpointStrategy for Scripted {
        fn name(&self) -> &str {
            self.name
        }

        async fn generate(&self, _request: &GenerateRequest) -> std::result::Result<String, ProviderError> {
            *self.calls.lock().unwrap() += 1;
            self.reply.clone().map(str::to_string)
        }
    }

    fn gateway_of(endpoints: &[&Arc<Scripted>]) -> Gateway {
        Gateway::new(
            endpoints
                .iter()
                .map(|endpoint| Arc::clone(*endpoint) as Arc<dyn EndpointStrategy>)
                .collect(),
        )
    }

    fn status(status: u16, message: &str) -> ProviderError {
        ProviderError::Status {
            status,
            message: message.to_string(),
        }
    }

    #[tokio::test]
    async fn primary_success_skips_secondary() {
        let primary = Scripted::ok("primary", "from primary");
        let secondary = Scripted::ok("secondary", "from secondary");
        let gateway = gateway_of(&[&primary, &secondary]);

        let text = gateway
            .generate(vec![Part::text("hi")], GenerationConfig::DOCUMENTS)
            .await
            .unwrap();
        assert_eq!(text, "from primary");
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 0);
    }

    #[tokio::test]
    async fn falls_back_when_primary_fails() {
        let primary = Scripted::failing("primary", status(500, "boom"));
        let secondary = Scripted::ok("secondary", "from secondary");
        let gateway = gateway_of(&[&primary, &secondary]);

        let text = gateway
            .generate(vec![Part::text("hi")], GenerationConfig::DOCUMENTS)
            .await
            .unwrap();
        assert_eq!(text, "from secondary");
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 1);
    }

    #[tokio::test]
    async fn reports_the_last_failure_when_all_fail() {
        let primary = Scripted::failing("primary", status(500, "primary down"));
        let secondary = Scripted::failing(
            "secondary",
            ProviderError::Transport("connection refused".to_string()),
        );
        let gateway = gateway_of(&[&primary, &secondary]);

        let err = gateway
            .chat(Vec::new(), GenerationConfig::CHAT)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "connection refused");
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 1);
    }

    #[tokio::test]
    async fn empty_endpoint_list_fails_without_calls() {
        let gateway = Gateway::new(Vec::new());
        let err = gateway
            .generate(Vec::new(), GenerationConfig::DOCUMENTS)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::NoEndpoints));
        assert_eq!(err.to_string(), "All models failed");
    }
}
