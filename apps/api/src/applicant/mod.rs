// Applicant intake: typed questionnaire models plus the declarative schema
// validator that rejects malformed submissions before any LLM call.

pub mod models;
pub mod validate;
