use super::{Assistant, Feature, FeatureError, settle};
use crate::ai::Part;
use crate::parser::StructuredResult;
use crate::prompts::translate_prompt;
use crate::session::Session;
use crate::types::Audience;

#[derive(Clone, Debug)]
pub struct TranslateRequest {
    prompt: String,
}

impl TranslateRequest {
    /// Validates the text and audience selection. Fails before any request
    /// is built when either is empty.
    pub fn prepare(input: &str, audiences: &[Audience]) -> Result<Self, FeatureError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(FeatureError::validation(
                "Please paste some content to translate.",
            ));
        }
        if audiences.is_empty() {
            return Err(FeatureError::validation(
                "Please select at least one target audience.",
            ));
        }
        Ok(Self {
            prompt: translate_prompt(input, audiences),
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub async fn execute(self, assistant: &Assistant) -> Result<TranslateOutcome, FeatureError> {
        let response = assistant
            .gateway
            .generate(vec![Part::text(self.prompt)], assistant.documents)
            .await
            .map_err(FeatureError::gateway(Feature::Translate))?;
        Ok(TranslateOutcome {
            result: StructuredResult::from_response(&response),
            response,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TranslateOutcome {
    pub response: String,
    pub result: StructuredResult,
}

impl TranslateOutcome {
    /// Translations do not feed the chat context.
    pub fn apply(&self, session: &mut Session) {
        session.translation = Some(self.result.clone());
    }
}

pub async fn run_translate(
    session: &mut Session,
    assistant: &Assistant,
    input: &str,
    audiences: &[Audience],
) -> Result<TranslateOutcome, FeatureError> {
    let request = TranslateRequest::prepare(input, audiences)?;
    session.begin(Feature::Translate);
    let result = request.execute(assistant).await;
    if let Ok(outcome) = &result {
        outcome.apply(session);
    }
    settle(session, Feature::Translate, result)
}
