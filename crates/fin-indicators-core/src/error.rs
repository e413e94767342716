use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinIndicatorsError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Unknown industry: '{0}'")]
    UnknownIndustry(String),
}
