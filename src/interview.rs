use crate::error::{ReadinessError, Result};
use crate::report::md;
use crate::session::Session;
use crate::types::answers::AnswerValue;
use crate::types::catalog::{Question, QuestionKind};
use crate::types::report::Evaluation;
use std::io::{BufRead, Write};

#[derive(Debug)]
pub enum Outcome {
    Completed(Box<Evaluation>),
    Quit,
}

enum Command {
    Back,
    Next,
    Reset,
    Quit,
    Skip,
    Clear,
    Answer(String),
}

fn parse_command(line: &str) -> Command {
    match line.trim() {
        ":back" => Command::Back,
        ":next" => Command::Next,
        ":reset" => Command::Reset,
        ":quit" => Command::Quit,
        ":clear" => Command::Clear,
        "" | ":skip" => Command::Skip,
        other => Command::Answer(other.to_string()),
    }
}

/// Walks the session page by page until the results step, reading one line per question.
///
/// The report is written once the results step is reached; from there `:back`
/// reopens the last page and `:reset` starts over. End of input on a page is
/// treated as `:quit`, on the results step it finishes the assessment.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session<'_>,
    input: &mut R,
    output: &mut W,
) -> Result<Outcome> {
    writeln!(
        output,
        "Commands: :back, :next, :skip (or empty line), :clear, :reset, :quit"
    )?;

    loop {
        if !walk_pages(session, input, output)? {
            return Ok(Outcome::Quit);
        }

        let evaluation = session.evaluate()?;
        writeln!(output)?;
        writeln!(output, "{}", md::to_markdown(&evaluation))?;

        loop {
            write!(
                output,
                "Results: :back to revise answers, :reset for a new evaluation, :quit (or empty line) to finish\n> "
            )?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(Outcome::Completed(Box::new(evaluation)));
            }

            match line.trim() {
                "" | ":quit" => return Ok(Outcome::Completed(Box::new(evaluation))),
                ":back" => {
                    session.back_to_questionnaire();
                    break;
                }
                ":reset" => {
                    session.reset();
                    writeln!(output, "new evaluation started")?;
                    break;
                }
                other => writeln!(output, "unknown command: {other}")?,
            }
        }
    }
}

/// Runs the questionnaire pages. Returns `false` when the user quits.
fn walk_pages<R: BufRead, W: Write>(
    session: &mut Session<'_>,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    'pages: while let Some(category) = session.current_category() {
        writeln!(output)?;
        writeln!(
            output,
            "== Step {}/{}: {} ==",
            session.step(),
            session.total_steps(),
            category.title
        )?;
        writeln!(output, "progress: {:.0}%", session.progress() * 100.0)?;
        if let Some(description) = &category.description {
            writeln!(output, "{description}")?;
        }

        let mut index = 0;
        while let Some(question) = category.questions.get(index) {
            ask(question, session.answers().get(&question.id), output)?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(false);
            }

            match parse_command(&line) {
                Command::Quit => return Ok(false),
                Command::Back => {
                    session.retreat();
                    continue 'pages;
                }
                Command::Next => {
                    session.advance();
                    continue 'pages;
                }
                Command::Reset => {
                    session.reset();
                    writeln!(output, "answers cleared")?;
                    continue 'pages;
                }
                Command::Skip => index += 1,
                Command::Clear => {
                    session.clear_answer(&question.id);
                    index += 1;
                }
                Command::Answer(raw) => {
                    match parse_answer(question, &raw)
                        .and_then(|value| session.record(&question.id, value))
                    {
                        Ok(()) => index += 1,
                        Err(
                            e @ (ReadinessError::InvalidAnswer { .. }
                            | ReadinessError::UnknownQuestion(_)),
                        ) => {
                            writeln!(output, "{e}")?;
                        }
                        Err(e) => return Err(e),
                    }
                }
            }
        }

        session.advance();
    }

    Ok(true)
}

fn ask<W: Write>(question: &Question, current: Option<&AnswerValue>, output: &mut W) -> Result<()> {
    writeln!(output)?;
    writeln!(output, "{}", question.prompt)?;
    if let Some(reference) = &question.reference {
        writeln!(output, "  Reference: {reference}")?;
    }
    if let Some(choices) = question.choices() {
        for (position, option) in choices.options.iter().enumerate() {
            writeln!(output, "  {}) {}", position + 1, option)?;
        }
    }
    if let Some(current) = current {
        writeln!(output, "  [current: {current}]")?;
    }
    write!(output, "> ")?;
    output.flush()?;
    Ok(())
}

/// Accepts an option number or the option text for select/choice questions.
fn parse_answer(question: &Question, raw: &str) -> Result<AnswerValue> {
    match &question.kind {
        QuestionKind::FreeText => Ok(AnswerValue::from(raw)),
        QuestionKind::Numeric => raw.parse::<f64>().map(AnswerValue::Number).map_err(|_| {
            ReadinessError::invalid_answer(&question.id, raw, "expected a number")
        }),
        QuestionKind::SingleSelect(choices) | QuestionKind::SingleChoice(choices) => {
            let by_number = raw
                .parse::<usize>()
                .ok()
                .and_then(|position| position.checked_sub(1))
                .and_then(|index| choices.options.get(index));
            Ok(AnswerValue::from(by_number.map_or(raw, String::as_str)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::catalog::Catalog;
    use crate::types::report::Status;
    use std::io::Cursor;

    fn small_catalog() -> Catalog {
        Catalog::from_toml_str(
            r#"
[[categories]]
id = "general"
title = "General Information"

[[categories.questions]]
id = "company_name"
prompt = "Company name"
kind = "free-text"

[[categories.questions]]
id = "employee_count"
prompt = "Number of employees"
kind = "numeric"

[[categories]]
id = "ko"
title = "KO"
description = "Mandatory items"

[[categories.questions]]
id = "ko_1"
prompt = "Quality manager?"
reference = "KO n°1 - 1.2.1"
kind = "single-choice"
options = ["Yes", "No"]
weights = [100, 0]
mandatory = true
"#,
        )
        .expect("test catalog should load")
    }

    fn drive(catalog: &Catalog, script: &str) -> (Outcome, String) {
        let mut session = Session::new(catalog);
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        let outcome = run(&mut session, &mut input, &mut output).expect("interview should run");
        (outcome, String::from_utf8(output).expect("output should be utf-8"))
    }

    #[test]
    fn completes_with_numbered_and_text_answers() {
        let catalog = small_catalog();
        let (outcome, transcript) = drive(&catalog, "Acme\n12\n1\n");
        let Outcome::Completed(evaluation) = outcome else {
            panic!("interview should complete");
        };
        assert_eq!(evaluation.organization, "Acme");
        assert_eq!(evaluation.report.percentage, 100.0);
        assert_eq!(evaluation.verdict.status, Status::Eligible);
        assert!(transcript.contains("== Step 2/3: KO =="));
        assert!(transcript.contains("Reference: KO n°1 - 1.2.1"));
    }

    #[test]
    fn invalid_answers_are_asked_again() {
        let catalog = small_catalog();
        let (outcome, transcript) = drive(&catalog, "Acme\nlots\n7\n9\nNo\n");
        let Outcome::Completed(evaluation) = outcome else {
            panic!("interview should complete");
        };
        assert!(transcript.contains("expected a number"));
        assert!(transcript.contains("not a declared option"));
        assert_eq!(evaluation.report.unmet_ko.len(), 1);
        assert_eq!(evaluation.report.unmet_ko[0].answer, "No");
    }

    #[test]
    fn back_revisits_the_previous_page_and_keeps_answers() {
        let catalog = small_catalog();
        let (outcome, transcript) = drive(&catalog, "Acme\n\n:back\n\n\n2\n");
        let Outcome::Completed(evaluation) = outcome else {
            panic!("interview should complete");
        };
        assert!(transcript.contains("[current: Acme]"));
        assert_eq!(evaluation.organization, "Acme");
        assert_eq!(evaluation.verdict.status, Status::NotEligible);
    }

    #[test]
    fn clear_removes_a_previous_answer() {
        let catalog = small_catalog();
        let (outcome, _) = drive(&catalog, "Acme\n\n:back\n:clear\n\n1\n");
        let Outcome::Completed(evaluation) = outcome else {
            panic!("interview should complete");
        };
        assert_eq!(evaluation.organization, "N/A");
    }

    #[test]
    fn end_of_input_quits_without_evaluating() {
        let catalog = small_catalog();
        let (outcome, _) = drive(&catalog, "Acme\n");
        assert!(matches!(outcome, Outcome::Quit));
    }

    #[test]
    fn next_skips_to_results_with_no_scored_answers() {
        let catalog = small_catalog();
        let (outcome, _) = drive(&catalog, ":next\n:next\n");
        let Outcome::Completed(evaluation) = outcome else {
            panic!("interview should complete");
        };
        assert_eq!(evaluation.report.percentage, 0.0);
        assert_eq!(evaluation.verdict.status, Status::NotEligible);
    }

    #[test]
    fn report_is_shown_before_finishing() {
        let catalog = small_catalog();
        let (_, transcript) = drive(&catalog, "Acme\n12\n1\n:quit\n");
        assert!(transcript.contains("## Verdict: ELIGIBLE"));
        assert!(transcript.contains("Results: :back to revise answers"));
    }

    #[test]
    fn back_from_results_reopens_the_last_page() {
        let catalog = small_catalog();
        let (outcome, transcript) = drive(&catalog, "Acme\n12\n1\n:back\n2\n\n");
        let Outcome::Completed(evaluation) = outcome else {
            panic!("interview should complete");
        };
        assert!(transcript.contains("[current: Yes]"));
        assert_eq!(evaluation.report.unmet_ko.len(), 1);
        assert_eq!(evaluation.verdict.status, Status::NotEligible);
    }

    #[test]
    fn reset_from_results_starts_a_new_evaluation() {
        let catalog = small_catalog();
        let (outcome, transcript) =
            drive(&catalog, "Acme\n12\n1\n:reset\nBeta\n\n2\n:quit\n");
        let Outcome::Completed(evaluation) = outcome else {
            panic!("interview should complete");
        };
        assert!(transcript.contains("new evaluation started"));
        assert_eq!(evaluation.organization, "Beta");
        assert_eq!(evaluation.report.unmet_ko.len(), 1);
    }

    #[test]
    fn unknown_results_command_prompts_again() {
        let catalog = small_catalog();
        let (outcome, transcript) = drive(&catalog, "Acme\n12\n1\n:next\n\n");
        assert!(matches!(outcome, Outcome::Completed(_)));
        assert!(transcript.contains("unknown command: :next"));
    }
}
