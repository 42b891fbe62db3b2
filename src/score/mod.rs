pub mod calculator;
pub mod eligibility;

pub use calculator::compute;
pub use eligibility::{action_plan, classify};

use crate::error::Result;
use crate::types::answers::AnswerSet;
use crate::types::catalog::Catalog;
use crate::types::report::Evaluation;
use chrono::Local;

/// Scores and classifies `answers`, stamping the result with the current time.
pub fn evaluate(catalog: &Catalog, answers: &AnswerSet) -> Result<Evaluation> {
    let report = compute(catalog, answers)?;
    let verdict = classify(&report)?;
    Ok(Evaluation {
        evaluated_at: Local::now(),
        organization: answers.organization(),
        catalog_digest: catalog.digest()?,
        report,
        verdict,
    })
}
