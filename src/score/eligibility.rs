use crate::error::{ReadinessError, Result};
use crate::types::report::{ActionPlan, EligibilityVerdict, ScoreReport, Status};

pub const ELIGIBLE_THRESHOLD: f64 = 90.0;
pub const RESERVATIONS_THRESHOLD: f64 = 75.0;
pub const IMPROVEMENTS_THRESHOLD: f64 = 50.0;

const PERCENTAGE_TOLERANCE: f64 = 1e-6;

const READY_PLAN: ActionPlan = ActionPlan {
    heading: "Recommended next steps:",
    steps: &[
        "Contact our certification body to schedule the initial audit",
        "Prepare the requested documentation",
        "Appoint a dedicated contact person",
        "Schedule the audit (recommended lead time: 2-3 months)",
    ],
};

const RESERVATIONS_PLAN: ActionPlan = ActionPlan {
    heading: "Recommended actions before the audit:",
    steps: &[
        "Strengthen the weak points identified",
        "Complete the missing documentation",
        "Consider a pre-audit (optional)",
        "Train your team on IFS requirements",
        "Recommended lead time before the audit: 3-6 months",
    ],
};

const REMEDIATION_PLAN: ActionPlan = ActionPlan {
    heading: "Recommended action plan:",
    steps: &[
        "Put the essential prerequisites (KO requirements) in place",
        "Develop the quality management system",
        "Train the team",
        "Get support from an IFS consultant (strongly recommended)",
        "Minimum lead time before certification: 6-12 months",
    ],
};

/// Derives the eligibility tier. Unmet KO requirements override any percentage.
pub fn classify(report: &ScoreReport) -> Result<EligibilityVerdict> {
    check_report(report)?;

    let ko_count = report.unmet_ko.len();
    let (status, message) = if ko_count > 0 {
        (
            Status::NotEligible,
            format!(
                "{ko_count} KO requirement(s) not met. These essential prerequisites are MANDATORY for IFS Food certification."
            ),
        )
    } else if report.percentage >= ELIGIBLE_THRESHOLD {
        (
            Status::Eligible,
            "Your company appears ready to begin the IFS Food v8 certification process."
                .to_string(),
        )
    } else if report.percentage >= RESERVATIONS_THRESHOLD {
        (
            Status::EligibleWithReservations,
            "Your company has the necessary foundations, but improvements are recommended before the audit."
                .to_string(),
        )
    } else if report.percentage >= IMPROVEMENTS_THRESHOLD {
        (
            Status::ImprovementsRequired,
            "A significant upgrade of your quality system is required before certification can be considered."
                .to_string(),
        )
    } else {
        (
            Status::NotEligible,
            "The fundamental prerequisites are not in place. Support is strongly recommended."
                .to_string(),
        )
    };

    tracing::info!(?status, percentage = report.percentage, ko_count, "assessment classified");

    Ok(EligibilityVerdict {
        status,
        severity: status.severity(),
        label: status.label().to_string(),
        message,
    })
}

/// Fixed recommendation text for a tier.
pub fn action_plan(status: Status) -> ActionPlan {
    match status {
        Status::Eligible => READY_PLAN,
        Status::EligibleWithReservations => RESERVATIONS_PLAN,
        Status::ImprovementsRequired | Status::NotEligible => REMEDIATION_PLAN,
    }
}

fn check_report(report: &ScoreReport) -> Result<()> {
    if !report.percentage.is_finite() || !(0.0..=100.0).contains(&report.percentage) {
        return Err(ReadinessError::InvalidReport(format!(
            "percentage {} is outside 0..=100",
            report.percentage
        )));
    }
    if report.achieved > report.possible {
        return Err(ReadinessError::InvalidReport(format!(
            "achieved {} exceeds possible {}",
            report.achieved, report.possible
        )));
    }
    let expected = if report.possible == 0 {
        0.0
    } else {
        f64::from(report.achieved) / f64::from(report.possible) * 100.0
    };
    if (expected - report.percentage).abs() > PERCENTAGE_TOLERANCE {
        return Err(ReadinessError::InvalidReport(format!(
            "percentage {} does not match {}/{}",
            report.percentage, report.achieved, report.possible
        )));
    }
    Ok(())
}
