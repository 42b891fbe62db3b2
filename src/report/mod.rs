pub mod export;
pub mod json;
pub mod md;

use crate::error::ReadinessError;
use crate::types::report::Evaluation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Md,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Result<Self, ReadinessError> {
        match value {
            "json" => Ok(OutputFormat::Json),
            "md" => Ok(OutputFormat::Md),
            other => Err(ReadinessError::ConfigParse(format!(
                "unsupported report format: {other}"
            ))),
        }
    }
}

pub fn render(evaluation: &Evaluation, format: OutputFormat) -> Result<String, ReadinessError> {
    match format {
        OutputFormat::Json => json::to_json(evaluation).map_err(ReadinessError::Json),
        OutputFormat::Md => Ok(md::to_markdown(evaluation)),
    }
}
