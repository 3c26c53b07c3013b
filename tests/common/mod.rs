//! Shared test doubles for integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use clarity::ai::{EndpointStrategy, GenerateRequest, Gateway, ProviderError};
use clarity::features::Assistant;
use std::sync::{Arc, Mutex};

/// An endpoint that replays a fixed reply and records every request.
pub struct ScriptedEndpoint {
    name: &'static str,
    reply: Result<String, ProviderError>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedEndpoint {
    pub fn replying(name: &'static str, text: &str) -> Arc<Self> {
        Arc::new(Self {
            name,
            reply: Ok(text.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(name: &'static str, message: &str) -> Arc<Self> {
        Arc::new(Self {
            name,
            reply: Err(ProviderError::Status {
                status: 500,
                message: message.to_string(),
            }),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> GenerateRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request recorded")
    }
}

#[async_trait]
impl EndpointStrategy for ScriptedEndpoint {
    fn name(&self) -> &str {
        self.name
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<String, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply.clone()
    }
}

pub fn assistant_with(endpoints: &[&Arc<ScriptedEndpoint>]) -> Assistant {
    Assistant::new(Gateway::new(
        endpoints
            .iter()
            .map(|endpoint| Arc::clone(*endpoint) as Arc<dyn EndpointStrategy>)
            .collect(),
    ))
}
