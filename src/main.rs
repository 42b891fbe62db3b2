mod cli;
mod config;
mod error;
mod interview;
mod report;
mod score;
mod session;
mod telemetry;
mod types;

use crate::error::ReadinessError;
use crate::types::answers::AnswerSet;
use crate::types::catalog::{Catalog, QuestionKind};
use crate::types::config::ReadinessConfig;
use crate::types::report::Status;
use clap::Parser;
use std::path::{Path, PathBuf};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const BLOCKING: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn exit_code_for(status: Status) -> i32 {
    match status {
        Status::Eligible => exit_code::SUCCESS,
        Status::EligibleWithReservations | Status::ImprovementsRequired => exit_code::WARNINGS,
        Status::NotEligible => exit_code::BLOCKING,
    }
}

fn load_catalog(
    explicit: Option<&Path>,
    cfg: &ReadinessConfig,
    root: &Path,
) -> Result<Catalog, ReadinessError> {
    let configured = cfg.catalog_path().map(|path| root.join(path));
    match explicit.map(Path::to_path_buf).or(configured) {
        Some(path) => Catalog::load(&path),
        None => Catalog::builtin(),
    }
}

fn run() -> Result<i32, ReadinessError> {
    let cli = cli::Cli::parse();
    let root = std::env::current_dir()?;
    let cfg = config::load_config(&root)?.unwrap_or_default();
    telemetry::init(&telemetry::level_for(
        cli.verbose,
        cli.quiet,
        cfg.log_level(),
    ))?;

    let catalog = load_catalog(cli.catalog.as_deref(), &cfg, &root)?;

    match cli.command {
        cli::Commands::Evaluate(cmd) => {
            let answers = AnswerSet::load(&cmd.answers)?;
            let evaluation = score::evaluate(&catalog, &answers)?;

            let output_format = match cmd.format {
                Some(cli::ReportFormat::Json) => report::OutputFormat::Json,
                Some(cli::ReportFormat::Md) => report::OutputFormat::Md,
                None => match cfg.report_format() {
                    Some(format) => report::OutputFormat::parse(format)?,
                    None => report::OutputFormat::Md,
                },
            };
            let rendered = report::render(&evaluation, output_format)?;

            match &cmd.output {
                Some(path) => {
                    std::fs::write(path, &rendered)?;
                    println!("report written to {}", path.display());
                }
                None => println!("{rendered}"),
            }

            Ok(exit_code_for(evaluation.verdict.status))
        }
        cli::Commands::Assess(cmd) => {
            let mut session = session::Session::new(&catalog);
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut output = std::io::stdout();

            let evaluation = match interview::run(&mut session, &mut input, &mut output)? {
                interview::Outcome::Completed(evaluation) => evaluation,
                interview::Outcome::Quit => {
                    eprintln!("assessment abandoned; no report produced");
                    return Ok(exit_code::SUCCESS);
                }
            };

            let export_dir = cmd
                .export
                .or_else(|| cfg.export_dir().map(|dir| root.join(dir)));
            if let Some(dir) = export_dir {
                let path = write_export(&dir, &evaluation)?;
                println!("report file: {}", path.display());
            }

            Ok(exit_code_for(evaluation.verdict.status))
        }
        cli::Commands::Catalog(cmd) => {
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&catalog)?);
                return Ok(exit_code::SUCCESS);
            }

            for category in &catalog.categories {
                let scope = if category.is_scored() {
                    ""
                } else {
                    " (not scored)"
                };
                println!("{}: {}{}", category.id, category.title, scope);
                for question in &category.questions {
                    let kind = match question.kind {
                        QuestionKind::FreeText => "free-text",
                        QuestionKind::Numeric => "numeric",
                        QuestionKind::SingleSelect(_) => "single-select",
                        QuestionKind::SingleChoice(_) => "single-choice",
                    };
                    let ko = if question.mandatory { " KO" } else { "" };
                    println!("  - {} [{}{}]: {}", question.id, kind, ko, question.prompt);
                }
            }
            println!("digest: {}", catalog.digest()?);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Inspect(cmd) => {
            if !cmd.report.exists() {
                return Err(ReadinessError::PathNotFound(cmd.report.display().to_string()));
            }
            let content = std::fs::read_to_string(&cmd.report)?;
            let payload = report::export::ExportPayload::from_json(&content)?;

            println!("{} ({})", payload.organization, payload.evaluated_at);
            println!(
                "{}: {:.1}% ({}/{} points)",
                payload.results.label,
                payload.results.score_percent,
                payload.results.achieved,
                payload.results.possible
            );
            for category in &payload.categories {
                println!("- {}: {:.1}%", category.title, category.score_percent);
            }
            for finding in &payload.unmet_ko {
                println!("[KO] {}: {}", finding.reference, finding.answer);
            }
            if payload.catalog_digest != catalog.digest()? {
                eprintln!("warning: report was produced with a different question catalog");
            }
            Ok(exit_code_for(payload.results.status))
        }
    }
}

fn write_export(
    dir: &Path,
    evaluation: &types::report::Evaluation,
) -> Result<PathBuf, ReadinessError> {
    std::fs::create_dir_all(dir)?;
    let payload = report::export::ExportPayload::from_evaluation(evaluation);
    let name = report::export::export_file_name(
        &evaluation.organization,
        evaluation.evaluated_at.date_naive(),
    );
    let path = dir.join(name);
    std::fs::write(&path, payload.to_json()?)?;
    tracing::info!(path = %path.display(), "export written");
    Ok(path)
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
