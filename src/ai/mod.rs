/// AI module for Clarity
///
/// This module owns everything between a feature controller and the remote
/// generative-language API: request payloads, endpoint strategies, and the
/// gateway that falls back across them.
///
/// # Architecture
///
/// - `payload` - Parts, conversation contents, generation settings
/// - `providers` - Endpoint strategies (Gemini `generateContent`)
/// - `client` - Gateway trying each endpoint in order
///
/// # Usage
///
/// ```rust,no_run
/// use clarity::ai::{Gateway, GenerationConfig, Part};
///
/// # async fn example() -> anyhow::Result<()> {
/// let gateway = Gateway::from_env()?;
/// let text = gateway
///     .generate(vec![Part::text("Hello!")], GenerationConfig::DOCUMENTS)
///     .await?;
/// # Ok(())
/// # }
/// ```
mod client;
mod payload;
mod providers;

// Re-export main types
pub use client::{Gateway, GatewayError, GatewayResult};
pub use payload::{
    Content, GenerateRequest, GenerationConfig, InlineData, Part, comparison_parts,
    conversation_contents, document_parts,
};
pub use providers::{
    EndpointStrategy, GeminiEndpoint, ProviderError, endpoints_from_settings,
    gemini::{parse_generate_response, status_error},
};
