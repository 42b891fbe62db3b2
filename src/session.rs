use crate::error::Result;
use crate::score;
use crate::types::answers::{AnswerSet, AnswerValue};
use crate::types::catalog::{Catalog, Category};
use crate::types::report::Evaluation;

/// Caller-owned questionnaire progress: one step per category plus a final results step.
///
/// Steps are 1-based and always stay within `1..=total_steps()`.
#[derive(Debug, Clone)]
pub struct Session<'c> {
    catalog: &'c Catalog,
    step: usize,
    answers: AnswerSet,
}

impl<'c> Session<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            step: 1,
            answers: AnswerSet::new(),
        }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn total_steps(&self) -> usize {
        self.catalog.categories.len() + 1
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn is_on_results(&self) -> bool {
        self.step == self.total_steps()
    }

    /// Category shown at the current step, `None` on the results step.
    pub fn current_category(&self) -> Option<&'c Category> {
        self.catalog.categories.get(self.step - 1)
    }

    /// Fraction of the way from the first step to the results step.
    pub fn progress(&self) -> f64 {
        let total = self.total_steps();
        if total > 1 {
            (self.step - 1) as f64 / (total - 1) as f64
        } else {
            0.0
        }
    }

    /// Stores an answer after checking it against the catalog.
    pub fn record(&mut self, question_id: &str, value: impl Into<AnswerValue>) -> Result<()> {
        let value = value.into();
        self.catalog.check_answer(question_id, &value)?;
        tracing::debug!(question = question_id, answer = %value, "answer recorded");
        self.answers.insert(question_id, value);
        Ok(())
    }

    pub fn clear_answer(&mut self, question_id: &str) {
        self.answers.remove(question_id);
    }

    pub fn advance(&mut self) {
        self.step = (self.step + 1).min(self.total_steps());
    }

    pub fn retreat(&mut self) {
        self.step = self.step.saturating_sub(1).max(1);
    }

    /// Leaves the results step for the last questionnaire page.
    pub fn back_to_questionnaire(&mut self) {
        self.step = self.catalog.categories.len().max(1);
    }

    pub fn reset(&mut self) {
        self.step = 1;
        self.answers.clear();
    }

    /// Scores the answers collected so far. Does not change the session.
    pub fn evaluate(&self) -> Result<Evaluation> {
        score::evaluate(self.catalog, &self.answers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReadinessError;
    use crate::types::report::Status;

    fn builtin() -> Catalog {
        Catalog::builtin().expect("builtin catalog should load")
    }

    #[test]
    fn navigation_is_clamped_to_valid_steps() {
        let catalog = builtin();
        let mut session = Session::new(&catalog);
        assert_eq!(session.total_steps(), 6);
        assert_eq!(session.progress(), 0.0);

        session.retreat();
        assert_eq!(session.step(), 1);

        for _ in 0..10 {
            session.advance();
        }
        assert!(session.is_on_results());
        assert!(session.current_category().is_none());
        assert_eq!(session.progress(), 1.0);

        session.back_to_questionnaire();
        assert_eq!(session.step(), 5);
        assert_eq!(
            session.current_category().map(|category| category.id.as_str()),
            Some("controls")
        );
    }

    #[test]
    fn record_validates_against_the_catalog() {
        let catalog = builtin();
        let mut session = Session::new(&catalog);
        session
            .record("ko_1", "Yes")
            .expect("declared option should be accepted");
        assert!(matches!(
            session.record("ko_1", "Perhaps"),
            Err(ReadinessError::InvalidAnswer { .. })
        ));
        assert_eq!(session.answers().len(), 1);
    }

    #[test]
    fn reset_discards_answers_and_returns_to_first_step() {
        let catalog = builtin();
        let mut session = Session::new(&catalog);
        session
            .record("company_name", "Acme")
            .expect("text answer should be accepted");
        session.advance();
        session.advance();

        session.reset();
        assert_eq!(session.step(), 1);
        assert!(session.answers().is_empty());
    }

    #[test]
    fn evaluate_uses_recorded_answers() {
        let catalog = builtin();
        let mut session = Session::new(&catalog);
        session
            .record("ko_9", "Yes, but not tested")
            .expect("declared option should be accepted");

        let evaluation = session.evaluate().expect("evaluation should succeed");
        assert_eq!(evaluation.report.unmet_ko.len(), 1);
        assert_eq!(evaluation.verdict.status, Status::NotEligible);

        session.clear_answer("ko_9");
        let evaluation = session.evaluate().expect("evaluation should succeed");
        assert!(evaluation.report.unmet_ko.is_empty());
    }
}
