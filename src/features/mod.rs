//! Feature controllers.
//!
//! Every feature follows the same shape: validate against the session,
//! build a payload, call the gateway, parse the reply, apply it to the
//! session. Each controller exposes these as a `prepare` / `execute` /
//! `apply` triple so a UI can hold the session in a signal across the
//! network call, plus a `run_*` helper that drives all three against a
//! `&mut Session`.
//!
//! - `analyze` - six-section report over every uploaded file
//! - `translate` - one rewrite of a text per selected audience
//! - `crossref` - comparison of the two cross-reference slots
//! - `chat` - conversational assistant over the accumulated context

pub mod analyze;
pub mod chat;
pub mod crossref;
pub mod translate;

pub use analyze::{AnalysisOutcome, AnalyzeRequest, run_analysis};
pub use chat::{CHAT_ERROR_REPLY, ChatReply, ChatTurn, run_chat};
pub use crossref::{CrossRefOutcome, CrossRefRequest, run_cross_reference};
pub use translate::{TranslateOutcome, TranslateRequest, run_translate};

use crate::ai::{Gateway, GatewayError, GenerationConfig};
use crate::config::Settings;
use crate::session::Session;
use anyhow::Result;
use std::fmt;
use tracing::error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feature {
    Analyze,
    Translate,
    CrossReference,
    Chat,
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Feature::Analyze => "Analysis",
            Feature::Translate => "Translation",
            Feature::CrossReference => "Cross-reference analysis",
            Feature::Chat => "Chat",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeatureState {
    Idle,
    InFlight,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum FeatureError {
    /// Preconditions not met; no request was sent.
    #[error("{0}")]
    Validation(String),

    #[error("{feature} failed: {source}")]
    Gateway {
        feature: Feature,
        #[source]
        source: GatewayError,
    },
}

impl FeatureError {
    pub fn validation(message: impl Into<String>) -> Self {
        FeatureError::Validation(message.into())
    }

    fn gateway(feature: Feature) -> impl FnOnce(GatewayError) -> Self {
        move |source| FeatureError::Gateway { feature, source }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A transient, user-visible notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Info,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Error,
        }
    }
}

impl From<&FeatureError> for Notice {
    fn from(err: &FeatureError) -> Self {
        Notice::error(err.to_string())
    }
}

/// The gateway plus the generation settings each feature uses.
#[derive(Clone)]
pub struct Assistant {
    pub gateway: Gateway,
    pub documents: GenerationConfig,
    pub chat: GenerationConfig,
}

impl Assistant {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            documents: GenerationConfig::DOCUMENTS,
            chat: GenerationConfig::CHAT,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            gateway: Gateway::from_settings(settings)?,
            documents: settings.document_generation(),
            chat: settings.chat_generation(),
        })
    }

    /// Create the assistant from environment configuration
    pub fn from_env() -> Result<Self> {
        Self::from_settings(&Settings::from_env()?)
    }
}

/// Returns the feature to idle and logs a failure, whatever the outcome.
/// Callers driving `execute` themselves apply the outcome first.
pub fn settle<T>(
    session: &mut Session,
    feature: Feature,
    result: Result<T, FeatureError>,
) -> Result<T, FeatureError> {
    session.finish(feature);
    if let Err(err) = &result {
        error!(%feature, error = %err, "feature request failed");
    }
    result
}
