//! Tolerant extraction of JSON from free-form model output.
//!
//! Models asked for "JSON only" still wrap it in prose or code fences.
//! [`extract_structured`] tries the whole text, then the first fenced block,
//! then the widest `{...}` span, and hands back the original text when none
//! of them parse.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```(?:json)?\s*([\s\S]*?)```").expect("valid fence pattern"));

/// Response text that could not be parsed as JSON, returned unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawText(pub String);

impl fmt::Display for RawText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn extract_structured(text: &str) -> Result<Value, RawText> {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return Ok(value);
    }

    if let Some(captures) = FENCED_BLOCK.captures(text)
        && let Some(inner) = captures.get(1)
        && let Ok(value) = serde_json::from_str::<Value>(inner.as_str().trim())
    {
        return Ok(value);
    }

    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}'))
        && end > start
        && let Ok(value) = serde_json::from_str::<Value>(&text[start..=end])
    {
        return Ok(value);
    }

    Err(RawText(text.to_string()))
}

/// A parsed response, or the raw text when parsing failed.
#[derive(Clone, Debug, PartialEq)]
pub enum StructuredResult {
    Structured(Value),
    Raw(String),
}

impl StructuredResult {
    pub fn from_response(text: &str) -> Self {
        match extract_structured(text) {
            Ok(value) => StructuredResult::Structured(value),
            Err(RawText(raw)) => StructuredResult::Raw(raw),
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            StructuredResult::Structured(value) => Some(value),
            StructuredResult::Raw(_) => None,
        }
    }

    /// Text for a fallback card: the raw string, or pretty-printed JSON.
    pub fn display_text(&self) -> String {
        match self {
            StructuredResult::Raw(raw) => raw.clone(),
            StructuredResult::Structured(Value::String(text)) => text.clone(),
            StructuredResult::Structured(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }

    fn view<T: for<'de> Deserialize<'de>>(&self) -> Option<T> {
        self.as_value()
            .and_then(|value| T::deserialize(value).ok())
    }

    pub fn analysis(&self) -> Option<AnalysisReport> {
        self.view()
    }

    pub fn translations(&self) -> Option<TranslationSet> {
        self.view()
    }

    pub fn cross_reference(&self) -> Option<CrossRefReport> {
        self.view()
    }
}

// ============================================
// Typed views
// ============================================

/// Content that should be a list of bullets but may arrive as one string.
fn lenient_lines<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.into_iter().map(value_text).collect(),
        Value::Null => Vec::new(),
        other => vec![value_text(other)],
    })
}

/// Content that should be a string but may arrive as a list.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .map(value_text)
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Null => String::new(),
        other => value_text(other),
    })
}

fn value_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AnalysisReport {
    pub sections: Vec<AnalysisSection>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSection {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub icon_class: String,
    #[serde(default, deserialize_with = "lenient_lines")]
    pub content: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TranslationSet {
    pub translations: Vec<Translation>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Translation {
    #[serde(default)]
    pub audience: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CrossRefReport {
    pub sections: Vec<CrossRefSection>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CrossRefSection {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub content: String,
}
