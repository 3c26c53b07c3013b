use super::{Assistant, Feature, FeatureError, settle};
use crate::ai::{Part, document_parts};
use crate::parser::StructuredResult;
use crate::prompts::ANALYSIS_PROMPT;
use crate::session::Session;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

const RESULT_TIME_FORMAT: &[FormatItem<'static>] = format_description!(
    "[hour repr:12 padding:zero]:[minute padding:zero]:[second padding:zero] [period case:upper]"
);

/// A validated analysis request over every uploaded file.
#[derive(Clone, Debug)]
pub struct AnalyzeRequest {
    parts: Vec<Part>,
    file_count: usize,
}

impl AnalyzeRequest {
    pub fn prepare(session: &Session) -> Result<Self, FeatureError> {
        if session.uploaded.is_empty() {
            return Err(FeatureError::validation(
                "Please upload at least one file first.",
            ));
        }
        Ok(Self {
            parts: document_parts(ANALYSIS_PROMPT, &session.uploaded),
            file_count: session.uploaded.len(),
        })
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub async fn execute(self, assistant: &Assistant) -> Result<AnalysisOutcome, FeatureError> {
        let response = assistant
            .gateway
            .generate(self.parts, assistant.documents)
            .await
            .map_err(FeatureError::gateway(Feature::Analyze))?;
        Ok(AnalysisOutcome {
            result: StructuredResult::from_response(&response),
            response,
            file_count: self.file_count,
            analyzed_at: OffsetDateTime::now_utc(),
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisOutcome {
    pub response: String,
    pub result: StructuredResult,
    pub file_count: usize,
    pub analyzed_at: OffsetDateTime,
}

impl AnalysisOutcome {
    /// Stores the result and makes the raw response the chat context.
    pub fn apply(&self, session: &mut Session) {
        session.analysis = Some(self.result.clone());
        session.document_context = self.response.clone();
    }

    /// "Analyzed 2 file(s) · 03:41:07 PM", in local time when known.
    pub fn summary_line(&self) -> String {
        let mut at = self.analyzed_at;
        if let Ok(offset) = UtcOffset::current_local_offset() {
            at = at.to_offset(offset);
        }
        let time = at.format(RESULT_TIME_FORMAT).unwrap_or_default();
        format!("Analyzed {} file(s) · {}", self.file_count, time)
    }
}

pub async fn run_analysis(
    session: &mut Session,
    assistant: &Assistant,
) -> Result<AnalysisOutcome, FeatureError> {
    let request = AnalyzeRequest::prepare(session)?;
    session.begin(Feature::Analyze);
    let result = request.execute(assistant).await;
    if let Ok(outcome) = &result {
        outcome.apply(session);
    }
    settle(session, Feature::Analyze, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachment::Attachment;
    use time::macros::datetime;

    #[test]
    fn requires_an_upload() {
        let err = AnalyzeRequest::prepare(&Session::new()).unwrap_err();
        assert_eq!(err.to_string(), "Please upload at least one file first.");
    }

    #[test]
    fn instruction_precedes_documents() {
        let mut session = Session::new();
        session.add_files([Attachment::new(
            "q3.txt",
            "text/plain",
            b"Revenue up 12%".to_vec(),
        )]);
        let request = AnalyzeRequest::prepare(&session).unwrap();
        assert_eq!(request.parts()[0].as_text(), Some(ANALYSIS_PROMPT));
        assert!(
            request.parts()[1]
                .as_text()
                .is_some_and(|text| text.contains("Revenue up 12%"))
        );
    }

    #[test]
    fn apply_replaces_the_chat_context() {
        let mut session = Session::new();
        session.document_context = "stale".to_string();
        let outcome = AnalysisOutcome {
            response: "fresh analysis".to_string(),
            result: StructuredResult::Raw("fresh analysis".to_string()),
            file_count: 1,
            analyzed_at: datetime!(2026-01-05 15:41:07 UTC),
        };
        outcome.apply(&mut session);
        assert_eq!(session.document_context, "fresh analysis");
        assert_eq!(session.analysis, Some(outcome.result.clone()));
        assert!(outcome.summary_line().starts_with("Analyzed 1 file(s) · "));
    }
}
