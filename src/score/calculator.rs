use crate::error::{ReadinessError, Result};
use crate::types::answers::AnswerSet;
use crate::types::catalog::{Catalog, FULL_COMPLIANCE};
use crate::types::report::{CategoryScore, KoFinding, ScoreReport};

/// Computes weighted scores per category and collects unmet KO requirements.
///
/// Only answered, weighted select/choice questions count: an unanswered
/// question adds nothing to either the achieved or the possible total.
/// Categories that end with a zero possible total are left out.
pub fn compute(catalog: &Catalog, answers: &AnswerSet) -> Result<ScoreReport> {
    let mut achieved = 0u32;
    let mut possible = 0u32;
    let mut categories = Vec::new();
    let mut unmet_ko = Vec::new();

    for category in catalog.categories.iter().filter(|category| category.is_scored()) {
        let mut category_achieved = 0u32;
        let mut category_possible = 0u32;

        for question in category.scored_questions() {
            let Some(answer) = answers.get(&question.id) else {
                continue;
            };
            let points = question.weight_for(answer)?.unwrap_or(0);
            category_possible = add_points(category_possible, question.max_weight().unwrap_or(0))?;
            category_achieved = add_points(category_achieved, points)?;

            if question.mandatory && points < FULL_COMPLIANCE {
                tracing::debug!(question = %question.id, points, "KO requirement not met");
                unmet_ko.push(KoFinding {
                    prompt: question.prompt.clone(),
                    reference: question.reference.clone().unwrap_or_default(),
                    answer: answer.to_string(),
                });
            }
        }

        if category_possible == 0 {
            continue;
        }

        let percentage = percentage_of(category_achieved, category_possible);
        tracing::debug!(
            category = %category.id,
            achieved = category_achieved,
            possible = category_possible,
            percentage,
            "category scored"
        );
        categories.push(CategoryScore {
            id: category.id.clone(),
            title: category.title.clone(),
            achieved: category_achieved,
            possible: category_possible,
            percentage,
        });
        achieved = add_points(achieved, category_achieved)?;
        possible = add_points(possible, category_possible)?;
    }

    let percentage = percentage_of(achieved, possible);
    tracing::info!(
        achieved,
        possible,
        percentage,
        unmet_ko = unmet_ko.len(),
        "assessment scored"
    );

    Ok(ScoreReport {
        achieved,
        possible,
        percentage,
        categories,
        unmet_ko,
    })
}

fn add_points(total: u32, points: u32) -> Result<u32> {
    total.checked_add(points).ok_or_else(|| {
        ReadinessError::CatalogInvalid(format!(
            "weight total exceeds {} points",
            u32::MAX
        ))
    })
}

fn percentage_of(achieved: u32, possible: u32) -> f64 {
    if possible == 0 {
        0.0
    } else {
        f64::from(achieved) / f64::from(possible) * 100.0
    }
}
