use crate::score::action_plan;
use crate::types::report::{Band, Evaluation};

const ADVISORY_NOTICE: &str =
    "This tool is provided for guidance only. A full evaluation is carried out during the official audit.";

pub fn to_markdown(evaluation: &Evaluation) -> String {
    let report = &evaluation.report;
    let verdict = &evaluation.verdict;

    let mut output = String::new();
    output.push_str("# IFS Food v8 Readiness Report\n\n");
    output.push_str(&format!("Organization: {}\n", evaluation.organization));
    output.push_str(&format!(
        "Evaluated at: {}\n\n",
        evaluation.evaluated_at.format("%Y-%m-%d %H:%M")
    ));

    output.push_str(&format!("## Verdict: {}\n\n", verdict.label));
    output.push_str(&format!(
        "Score: {:.1}% ({}/{} points)\n\n",
        report.percentage, report.achieved, report.possible
    ));
    output.push_str(&format!("{}\n\n", verdict.message));

    if !report.unmet_ko.is_empty() {
        output.push_str("## Unmet KO Requirements (critical)\n\n");
        output.push_str(
            "The following requirements are MANDATORY and must be in place before certification:\n\n",
        );
        for (index, finding) in report.unmet_ko.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", index + 1, finding.prompt));
            output.push_str(&format!("   - Reference: {}\n", finding.reference));
            output.push_str(&format!("   - Your answer: {}\n", finding.answer));
        }
        output.push('\n');
    }

    output.push_str("## Category Scores\n\n");
    if report.categories.is_empty() {
        output.push_str("- none\n\n");
    } else {
        for category in &report.categories {
            let band = Band::for_percentage(category.percentage).as_str();
            output.push_str(&format!(
                "- [{}] {}: {:.0}% ({}/{} points)\n",
                band, category.title, category.percentage, category.achieved, category.possible
            ));
        }
        output.push('\n');
    }

    let plan = action_plan(verdict.status);
    output.push_str("## Recommendations\n\n");
    output.push_str(&format!("{}\n\n", plan.heading));
    for (index, step) in plan.steps.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", index + 1, step));
    }
    output.push('\n');

    output.push_str(&format!("_{ADVISORY_NOTICE}_\n"));
    output
}
