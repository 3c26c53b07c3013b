use super::{Assistant, Feature, FeatureError, settle};
use crate::ai::{Part, comparison_parts};
use crate::parser::StructuredResult;
use crate::prompts::cross_reference_prompt;
use crate::session::Session;

#[derive(Clone, Debug)]
pub struct CrossRefRequest {
    parts: Vec<Part>,
}

impl CrossRefRequest {
    pub fn prepare(session: &Session) -> Result<Self, FeatureError> {
        let Some((a, b)) = session.crossref.both() else {
            return Err(FeatureError::validation("Please upload both documents."));
        };
        let instruction = cross_reference_prompt(a.name(), b.name());
        Ok(Self {
            parts: comparison_parts(&instruction, a, b),
        })
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub async fn execute(self, assistant: &Assistant) -> Result<CrossRefOutcome, FeatureError> {
        let response = assistant
            .gateway
            .generate(self.parts, assistant.documents)
            .await
            .map_err(FeatureError::gateway(Feature::CrossReference))?;
        Ok(CrossRefOutcome {
            result: StructuredResult::from_response(&response),
            response,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CrossRefOutcome {
    pub response: String,
    pub result: StructuredResult,
}

impl CrossRefOutcome {
    /// Appends the comparison to the chat context.
    pub fn apply(&self, session: &mut Session) {
        session.cross_reference = Some(self.result.clone());
        session.document_context.push_str("\n\nCross-reference analysis:\n");
        session.document_context.push_str(&self.response);
    }
}

pub async fn run_cross_reference(
    session: &mut Session,
    assistant: &Assistant,
) -> Result<CrossRefOutcome, FeatureError> {
    let request = CrossRefRequest::prepare(session)?;
    session.begin(Feature::CrossReference);
    let result = request.execute(assistant).await;
    if let Ok(outcome) = &result {
        outcome.apply(session);
    }
    settle(session, Feature::CrossReference, result)
}
