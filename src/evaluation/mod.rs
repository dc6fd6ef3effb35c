//! Property evaluations: validate the submitted details, ask the completion
//! API for an appraisal and persist the combined record.

pub mod handlers;
pub mod prompt;

pub use handlers::{create_evaluation, EvaluationRequest};
