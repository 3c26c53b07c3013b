//! Runtime settings read from the environment.
//!
//! The credential is never compiled in. When the endpoints point at a
//! server-side proxy that holds the key, leave it unset.

use crate::ai::GenerationConfig;
use anyhow::{Context, Result};
use std::env;

pub const GEMINI_3_FLASH_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent";
pub const GEMINI_2_FLASH_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Tried in order, first success wins.
    pub endpoints: Vec<String>,
    pub api_key: Option<String>,
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub chat_max_output_tokens: u32,
    /// No timeout unless set.
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoints: vec![GEMINI_3_FLASH_URL.to_string(), GEMINI_2_FLASH_URL.to_string()],
            api_key: None,
            temperature: 0.7,
            max_output_tokens: 4096,
            chat_max_output_tokens: 2048,
            request_timeout_secs: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup`, so tests need not touch the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let endpoints = match get("CLARITY_ENDPOINTS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.endpoints,
        };

        let api_key = get("CLARITY_API_KEY").or_else(|| get("GEMINI_API_KEY"));

        let temperature = match get("CLARITY_TEMPERATURE") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("CLARITY_TEMPERATURE is not a number: {raw}"))?,
            None => defaults.temperature,
        };
        let max_output_tokens = match get("CLARITY_MAX_OUTPUT_TOKENS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("CLARITY_MAX_OUTPUT_TOKENS is not a count: {raw}"))?,
            None => defaults.max_output_tokens,
        };
        let chat_max_output_tokens = match get("CLARITY_CHAT_MAX_OUTPUT_TOKENS") {
            Some(raw) => raw.parse().with_context(|| {
                format!("CLARITY_CHAT_MAX_OUTPUT_TOKENS is not a count: {raw}")
            })?,
            None => defaults.chat_max_output_tokens,
        };
        // 0 means no timeout, same as leaving it unset.
        let request_timeout_secs = match get("CLARITY_REQUEST_TIMEOUT_SECS") {
            Some(raw) => Some(
                raw.parse::<u64>()
                    .with_context(|| format!("CLARITY_REQUEST_TIMEOUT_SECS is not seconds: {raw}"))?,
            )
            .filter(|secs| *secs > 0),
            None => None,
        };

        Ok(Self {
            endpoints,
            api_key,
            temperature,
            max_output_tokens,
            chat_max_output_tokens,
            request_timeout_secs,
        })
    }

    /// Generation settings for analysis, translation and comparison.
    pub fn document_generation(&self) -> GenerationConfig {
        GenerationConfig {
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        }
    }

    pub fn chat_generation(&self) -> GenerationConfig {
        GenerationConfig {
            temperature: self.temperature,
            max_output_tokens: self.chat_max_output_tokens,
        }
    }
}
