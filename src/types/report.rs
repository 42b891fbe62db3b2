use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub id: String,
    pub title: String,
    pub achieved: u32,
    pub possible: u32,
    pub percentage: f64,
}

/// A mandatory requirement answered below full compliance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KoFinding {
    pub prompt: String,
    pub reference: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub achieved: u32,
    pub possible: u32,
    pub percentage: f64,
    /// Categories with a non-zero possible total, in catalog order.
    pub categories: Vec<CategoryScore>,
    /// Unmet KO requirements in question encounter order.
    pub unmet_ko: Vec<KoFinding>,
}

impl ScoreReport {
    pub fn category(&self, id: &str) -> Option<&CategoryScore> {
        self.categories.iter().find(|category| category.id == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Eligible,
    EligibleWithReservations,
    ImprovementsRequired,
    NotEligible,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Eligible => "ELIGIBLE",
            Status::EligibleWithReservations => "ELIGIBLE WITH RESERVATIONS",
            Status::ImprovementsRequired => "SIGNIFICANT IMPROVEMENTS REQUIRED",
            Status::NotEligible => "NOT ELIGIBLE",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            Status::Eligible => Severity::Success,
            Status::EligibleWithReservations | Status::ImprovementsRequired => Severity::Warning,
            Status::NotEligible => Severity::Danger,
        }
    }
}

/// Presentation class of a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityVerdict {
    pub status: Status,
    pub severity: Severity,
    pub label: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionPlan {
    pub heading: &'static str,
    pub steps: &'static [&'static str],
}

/// Display band of a single category percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Good,
    Fair,
    Poor,
}

impl Band {
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            Band::Good
        } else if percentage >= 50.0 {
            Band::Fair
        } else {
            Band::Poor
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Band::Good => "good",
            Band::Fair => "fair",
            Band::Poor => "poor",
        }
    }
}

/// One scored and classified assessment, ready to render or export.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub evaluated_at: chrono::DateTime<chrono::Local>,
    pub organization: String,
    pub catalog_digest: String,
    pub report: ScoreReport,
    pub verdict: EligibilityVerdict,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_bounds_are_inclusive() {
        assert_eq!(Band::for_percentage(80.0), Band::Good);
        assert_eq!(Band::for_percentage(79.9).as_str(), "fair");
        assert_eq!(Band::for_percentage(50.0), Band::Fair);
        assert_eq!(Band::for_percentage(49.9).as_str(), "poor");
        assert_eq!(Band::Good.as_str(), "good");
    }
}
