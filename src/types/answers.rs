use crate::error::{ReadinessError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Question holding the organization name shown on reports.
pub const ORGANIZATION_QUESTION_ID: &str = "company_name";

const UNKNOWN_ORGANIZATION: &str = "N/A";

/// Raw answer as collected from the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(f64),
    Text(String),
}

impl AnswerValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(text) => Some(text),
            AnswerValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(number) => Some(*number),
            AnswerValue::Text(_) => None,
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Text(text) => f.write_str(text),
            AnswerValue::Number(number) if number.fract() == 0.0 => write!(f, "{number:.0}"),
            AnswerValue::Number(number) => write!(f, "{number}"),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Text(value)
    }
}

impl From<f64> for AnswerValue {
    fn from(value: f64) -> Self {
        AnswerValue::Number(value)
    }
}

/// Answers keyed by question id. Missing entries are unanswered questions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    values: BTreeMap<String, AnswerValue>,
}

#[derive(Debug, Deserialize)]
struct AnswersFile {
    #[serde(default)]
    answers: AnswerSet,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an answers file whose `[answers]` table maps question ids to values.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: AnswersFile = toml::from_str(content)?;
        Ok(file.answers)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ReadinessError::PathNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let answers = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), answered = answers.len(), "loaded answers");
        Ok(answers)
    }

    pub fn insert(&mut self, question_id: impl Into<String>, value: impl Into<AnswerValue>) {
        self.values.insert(question_id.into(), value.into());
    }

    pub fn remove(&mut self, question_id: &str) -> Option<AnswerValue> {
        self.values.remove(question_id)
    }

    pub fn get(&self, question_id: &str) -> Option<&AnswerValue> {
        self.values.get(question_id)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn organization(&self) -> String {
        self.get(ORGANIZATION_QUESTION_ID)
            .map(ToString::to_string)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_ORGANIZATION.to_string())
    }
}
