// Structured Extraction Pipeline
// Turns decoded resume text into a validated CandidateProfile and role
// postings into RoleAnalysis records, via forced tool use. All LLM calls go
// through llm_client; the validators here never trust the raw payload.

pub mod candidate;
pub mod prompts;
pub mod role;
pub mod schema;

use thiserror::Error;

use crate::llm_client::LlmError;

/// Failure of an extraction call as a whole. Field-level problems inside a
/// structured payload are not errors — they are corrected locally and
/// logged. Callers of role analysis recover with the deterministic
/// fallback; resume ingestion surfaces the error to the client.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("input text is empty")]
    EmptyInput,

    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),
}
