use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadinessError {
    #[error("invalid answer for question '{question}' ({answer}): {reason}")]
    InvalidAnswer {
        question: String,
        answer: String,
        reason: String,
    },

    #[error("unknown question: {0}")]
    UnknownQuestion(String),

    #[error("invalid score report: {0}")]
    InvalidReport(String),

    #[error("invalid catalog: {0}")]
    CatalogInvalid(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("telemetry error: {0}")]
    Telemetry(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReadinessError {
    pub(crate) fn invalid_answer(
        question: &str,
        answer: impl std::fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidAnswer {
            question: question.to_string(),
            answer: answer.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReadinessError>;
