use crate::report::export::ExportPayload;
use crate::types::report::Evaluation;

pub fn to_json(evaluation: &Evaluation) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ExportPayload::from_evaluation(evaluation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score;
    use crate::types::answers::AnswerSet;
    use crate::types::catalog::Catalog;

    #[test]
    fn json_report_contains_score_and_status() {
        let catalog = Catalog::builtin().expect("builtin catalog should load");
        let mut answers = AnswerSet::new();
        answers.insert("ko_1", "Yes");
        answers.insert("calibration", "Occasionally");
        let evaluation = score::evaluate(&catalog, &answers).expect("evaluation should succeed");

        let rendered = to_json(&evaluation).expect("json should serialize");
        // 105/115 points.
        assert!(rendered.contains("\"score_percent\": 91.3"));
        assert!(rendered.contains("\"status\": \"ELIGIBLE\""));
        assert!(rendered.contains("\"unmet_ko\": []"));
    }
}
