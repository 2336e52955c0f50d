#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageRangeError {
    #[error("pages expression cannot be empty")]
    EmptyExpression,
    #[error("invalid page token `{token}`: {reason}")]
    Syntax { token: String, reason: String },
    #[error("page numbers must be positive, got {0}")]
    InvalidPageNumber(i64),
    #[error("page {page} out of bounds (total pages: {total})")]
    OutOfBounds { page: i64, total: u32 },
    #[error("range step {step} does not progress from {start} to {end}")]
    NonProgressingRange { start: i64, end: i64, step: i64 },
    #[error("no pages selected")]
    EmptySelection,
}

impl PageRangeError {
    pub(crate) fn syntax(token: &str, reason: impl Into<String>) -> Self {
        PageRangeError::Syntax {
            token: token.to_string(),
            reason: reason.into(),
        }
    }
}
