use crate::error::{ReadinessError, Result};
use crate::types::answers::AnswerValue;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::Path;

/// Category holding descriptive questions that never contribute to a score.
pub const GENERAL_CATEGORY_ID: &str = "general";

/// Weight a KO question must award for the requirement to count as met.
pub const FULL_COMPLIANCE: u32 = 100;

const BUILTIN_CATALOG: &str = include_str!("../../catalog/ifs_food_v8.toml");

/// Read-only question bank: ordered categories of ordered questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "QuestionDef", into = "QuestionDef")]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub kind: QuestionKind,
    /// KO flag: anything below [`FULL_COMPLIANCE`] leaves the requirement unmet.
    pub mandatory: bool,
    pub reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuestionKind {
    FreeText,
    Numeric,
    SingleSelect(Choices),
    SingleChoice(Choices),
}

/// Declared options of a select/choice question. When present, `weights[i]`
/// is awarded for `options[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Choices {
    pub options: Vec<String>,
    pub weights: Option<Vec<u32>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum KindTag {
    FreeText,
    Numeric,
    SingleSelect,
    SingleChoice,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct QuestionDef {
    id: String,
    prompt: String,
    kind: KindTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    weights: Option<Vec<u32>>,
    #[serde(default)]
    mandatory: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reference: Option<String>,
}

impl TryFrom<QuestionDef> for Question {
    type Error = ReadinessError;

    fn try_from(def: QuestionDef) -> Result<Self> {
        let kind = match def.kind {
            KindTag::FreeText | KindTag::Numeric => {
                if def.options.is_some() || def.weights.is_some() {
                    return Err(ReadinessError::CatalogInvalid(format!(
                        "question '{}' is not a select/choice question but declares options or weights",
                        def.id
                    )));
                }
                if matches!(def.kind, KindTag::FreeText) {
                    QuestionKind::FreeText
                } else {
                    QuestionKind::Numeric
                }
            }
            KindTag::SingleSelect | KindTag::SingleChoice => {
                let options = def.options.unwrap_or_default();
                if options.is_empty() {
                    return Err(ReadinessError::CatalogInvalid(format!(
                        "question '{}' must declare at least one option",
                        def.id
                    )));
                }
                if let Some(weights) = &def.weights {
                    if weights.len() != options.len() {
                        return Err(ReadinessError::CatalogInvalid(format!(
                            "question '{}' declares {} options but {} weights",
                            def.id,
                            options.len(),
                            weights.len()
                        )));
                    }
                }
                let choices = Choices {
                    options,
                    weights: def.weights,
                };
                if matches!(def.kind, KindTag::SingleSelect) {
                    QuestionKind::SingleSelect(choices)
                } else {
                    QuestionKind::SingleChoice(choices)
                }
            }
        };

        Ok(Self {
            id: def.id,
            prompt: def.prompt,
            kind,
            mandatory: def.mandatory,
            reference: def.reference,
        })
    }
}

impl From<Question> for QuestionDef {
    fn from(question: Question) -> Self {
        let (kind, options, weights) = match question.kind {
            QuestionKind::FreeText => (KindTag::FreeText, None, None),
            QuestionKind::Numeric => (KindTag::Numeric, None, None),
            QuestionKind::SingleSelect(choices) => {
                (KindTag::SingleSelect, Some(choices.options), choices.weights)
            }
            QuestionKind::SingleChoice(choices) => {
                (KindTag::SingleChoice, Some(choices.options), choices.weights)
            }
        };
        Self {
            id: question.id,
            prompt: question.prompt,
            kind,
            options,
            weights,
            mandatory: question.mandatory,
            reference: question.reference,
        }
    }
}

impl Choices {
    pub fn index_of(&self, answer: &str) -> Option<usize> {
        self.options.iter().position(|option| option == answer)
    }

    pub fn weight_at(&self, index: usize) -> Option<u32> {
        self.weights
            .as_ref()
            .and_then(|weights| weights.get(index))
            .copied()
    }
}

impl Question {
    pub fn choices(&self) -> Option<&Choices> {
        match &self.kind {
            QuestionKind::SingleSelect(choices) | QuestionKind::SingleChoice(choices) => {
                Some(choices)
            }
            QuestionKind::FreeText | QuestionKind::Numeric => None,
        }
    }

    /// Choices of a question that carries scoring weights.
    pub fn scoring(&self) -> Option<&Choices> {
        self.choices().filter(|choices| choices.weights.is_some())
    }

    pub fn max_weight(&self) -> Option<u32> {
        self.scoring()
            .and_then(|choices| choices.weights.as_ref())
            .and_then(|weights| weights.iter().copied().max())
    }

    /// Points awarded for `answer`. Fails when the answer is not a declared option.
    pub fn weight_for(&self, answer: &AnswerValue) -> Result<Option<u32>> {
        let Some(choices) = self.choices() else {
            return Ok(None);
        };
        let text = answer.as_text().ok_or_else(|| {
            ReadinessError::invalid_answer(&self.id, answer, "expected one of the declared options")
        })?;
        let index = choices.index_of(text).ok_or_else(|| {
            ReadinessError::invalid_answer(&self.id, answer, "not a declared option")
        })?;
        Ok(choices.weight_at(index))
    }
}

impl Category {
    pub fn is_scored(&self) -> bool {
        self.id != GENERAL_CATEGORY_ID
    }

    pub fn scored_questions(&self) -> impl Iterator<Item = &Question> {
        self.questions
            .iter()
            .filter(|question| question.scoring().is_some())
    }
}

impl Catalog {
    /// The IFS Food v8 question bank shipped with the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let catalog: Catalog = toml::from_str(content)
            .map_err(|e| ReadinessError::CatalogInvalid(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ReadinessError::PathNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&content).map_err(|e| match e {
            ReadinessError::CatalogInvalid(reason) => {
                ReadinessError::CatalogInvalid(format!("{}: {}", path.display(), reason))
            }
            other => other,
        })?;
        tracing::debug!(
            path = %path.display(),
            categories = catalog.categories.len(),
            "loaded question catalog"
        );
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<()> {
        let mut category_ids = HashSet::new();
        let mut question_ids = HashSet::new();
        let mut weight_total = 0u64;

        for category in &self.categories {
            if !category_ids.insert(category.id.as_str()) {
                return Err(ReadinessError::CatalogInvalid(format!(
                    "duplicate category id: {}",
                    category.id
                )));
            }
            for question in &category.questions {
                if !question_ids.insert(question.id.as_str()) {
                    return Err(ReadinessError::CatalogInvalid(format!(
                        "duplicate question id: {}",
                        question.id
                    )));
                }
                weight_total += u64::from(question.max_weight().unwrap_or(0));
                if question.mandatory {
                    match question.max_weight() {
                        Some(FULL_COMPLIANCE) => {}
                        Some(max) => {
                            return Err(ReadinessError::CatalogInvalid(format!(
                                "KO question '{}' must offer a {FULL_COMPLIANCE}-point option (max is {max})",
                                question.id
                            )));
                        }
                        None => {
                            return Err(ReadinessError::CatalogInvalid(format!(
                                "KO question '{}' must be a weighted select/choice question",
                                question.id
                            )));
                        }
                    }
                }
            }
        }

        if weight_total > u64::from(u32::MAX) {
            return Err(ReadinessError::CatalogInvalid(format!(
                "total maximum weight {weight_total} exceeds {} points",
                u32::MAX
            )));
        }

        Ok(())
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions().find(|question| question.id == id)
    }

    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.categories
            .iter()
            .flat_map(|category| category.questions.iter())
    }

    /// Validates a raw answer against the declared question before it is recorded.
    pub fn check_answer(&self, question_id: &str, value: &AnswerValue) -> Result<()> {
        let question = self
            .question(question_id)
            .ok_or_else(|| ReadinessError::UnknownQuestion(question_id.to_string()))?;
        match &question.kind {
            QuestionKind::FreeText => {
                if value.as_text().is_none() {
                    return Err(ReadinessError::invalid_answer(
                        question_id,
                        value,
                        "expected text",
                    ));
                }
            }
            QuestionKind::Numeric => match value.as_number() {
                Some(number) if number.is_finite() && number >= 0.0 => {}
                _ => {
                    return Err(ReadinessError::invalid_answer(
                        question_id,
                        value,
                        "expected a non-negative number",
                    ));
                }
            },
            QuestionKind::SingleSelect(_) | QuestionKind::SingleChoice(_) => {
                question.weight_for(value)?;
            }
        }
        Ok(())
    }

    /// Hex SHA-256 of the canonical JSON form, used to identify the question bank revision.
    pub fn digest(&self) -> Result<String> {
        let canonical = serde_json::to_vec(self)?;
        let digest = Sha256::digest(&canonical);
        Ok(digest.iter().map(|byte| format!("{byte:02x}")).collect())
    }
}
