use crate::error::Result;
use crate::types::report::{Evaluation, KoFinding, Status};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Downloadable report. Percentages carry one decimal, the display precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportPayload {
    pub evaluated_at: String,
    pub organization: String,
    pub catalog_digest: String,
    pub results: ExportResults,
    pub categories: Vec<ExportCategory>,
    pub unmet_ko: Vec<KoFinding>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportResults {
    pub score_percent: f64,
    pub achieved: u32,
    pub possible: u32,
    pub status: Status,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportCategory {
    pub id: String,
    pub title: String,
    pub score_percent: f64,
}

impl ExportPayload {
    pub fn from_evaluation(evaluation: &Evaluation) -> Self {
        let report = &evaluation.report;
        Self {
            evaluated_at: evaluation.evaluated_at.format(TIMESTAMP_FORMAT).to_string(),
            organization: evaluation.organization.clone(),
            catalog_digest: evaluation.catalog_digest.clone(),
            results: ExportResults {
                score_percent: one_decimal(report.percentage),
                achieved: report.achieved,
                possible: report.possible,
                status: evaluation.verdict.status,
                label: evaluation.verdict.label.clone(),
            },
            categories: report
                .categories
                .iter()
                .map(|category| ExportCategory {
                    id: category.id.clone(),
                    title: category.title.clone(),
                    score_percent: one_decimal(category.percentage),
                })
                .collect(),
            unmet_ko: report.unmet_ko.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

/// `evaluation_ifs_<organization>_<YYYYMMDD>.json`, spaces replaced by underscores.
pub fn export_file_name(organization: &str, date: NaiveDate) -> String {
    let name = organization.trim();
    let name = if name.is_empty() || name == "N/A" {
        "company"
    } else {
        name
    };
    let sanitized = name
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            other => other,
        })
        .collect::<String>();
    format!("evaluation_ifs_{}_{}.json", sanitized, date.format("%Y%m%d"))
}

fn one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score;
    use crate::types::answers::AnswerSet;
    use crate::types::catalog::Catalog;

    fn sample_evaluation() -> Evaluation {
        let catalog = Catalog::builtin().expect("builtin catalog should load");
        let mut answers = AnswerSet::new();
        answers.insert("company_name", "Acme Foods");
        answers.insert("ko_1", "Yes");
        answers.insert("ko_2", "Partially");
        answers.insert("quality_policy", "Yes, but not communicated");
        answers.insert("haccp", "Being drafted");
        score::evaluate(&catalog, &answers).expect("evaluation should succeed")
    }

    #[test]
    fn payload_round_trips_through_json() {
        let evaluation = sample_evaluation();
        let payload = ExportPayload::from_evaluation(&evaluation);
        let parsed = ExportPayload::from_json(&payload.to_json().expect("payload should serialize"))
            .expect("payload should parse");

        assert_eq!(parsed, payload);
        assert_eq!(parsed.unmet_ko, evaluation.report.unmet_ko);
        assert_eq!(parsed.results.score_percent, one_decimal(evaluation.report.percentage));
        assert!((parsed.results.score_percent - evaluation.report.percentage).abs() <= 0.05);
    }

    #[test]
    fn payload_carries_every_reported_field() {
        let payload = ExportPayload::from_evaluation(&sample_evaluation());
        assert_eq!(payload.organization, "Acme Foods");
        assert_eq!(payload.results.status, Status::NotEligible);
        assert_eq!(payload.unmet_ko.len(), 1);
        assert_eq!(payload.unmet_ko[0].reference, "KO n°2 - 2.3.9.1");
        // 130/200 KO points, 15/50 quality system points.
        let ids: Vec<&str> = payload
            .categories
            .iter()
            .map(|category| category.id.as_str())
            .collect();
        assert_eq!(ids, ["ko_prerequisites", "quality_system"]);
        assert_eq!(payload.categories[0].score_percent, 65.0);
        assert_eq!(payload.categories[1].score_percent, 30.0);
        assert_eq!(payload.evaluated_at.len(), "2026-01-01 00:00".len());

        let json = payload.to_json().expect("payload should serialize");
        assert!(json.contains("\"status\": \"NOT_ELIGIBLE\""));
    }

    #[test]
    fn file_name_uses_organization_and_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).expect("date should be valid");
        assert_eq!(
            export_file_name("Acme Fine Foods", date),
            "evaluation_ifs_Acme_Fine_Foods_20261018.json"
        );
        assert_eq!(export_file_name("N/A", date), "evaluation_ifs_company_20261018.json");
    }
}
