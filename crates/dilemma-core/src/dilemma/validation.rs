//! Input gate run before scoring.
//!
//! The scorer assumes well-formed input. Callers run [`validate`] first and
//! refuse to analyze anything it rejects. All issues are collected so a form
//! can show every problem at once.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::parser::{DilemmaError, EthicalDilemma};

/// Minimum number of complete options a dilemma must offer.
pub const MIN_OPTIONS: usize = 2;

/// Minimum number of named stakeholders.
pub const MIN_STAKEHOLDERS: usize = 1;

/// A single reason a dilemma cannot be analyzed.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "issue")]
pub enum ValidationIssue {
    #[error("title is empty")]
    EmptyTitle,

    #[error("scenario is empty")]
    EmptyScenario,

    #[error("needs at least 2 options with a title and description, found {found}")]
    TooFewOptions { found: usize },

    #[error("needs at least one named stakeholder")]
    NoStakeholders,
}

/// Check a dilemma against the analysis preconditions.
pub fn validate(dilemma: &EthicalDilemma) -> Result<(), DilemmaError> {
    let issues = collect_issues(dilemma);
    if issues.is_empty() {
        Ok(())
    } else {
        tracing::warn!(dilemma_id = %dilemma.id, ?issues, "dilemma rejected");
        Err(DilemmaError::ValidationError(issues))
    }
}

/// List every validation issue without failing.
pub fn collect_issues(dilemma: &EthicalDilemma) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if dilemma.title.trim().is_empty() {
        issues.push(ValidationIssue::EmptyTitle);
    }

    if dilemma.scenario.trim().is_empty() {
        issues.push(ValidationIssue::EmptyScenario);
    }

    let complete = dilemma.options.iter().filter(|o| o.is_complete()).count();
    if complete < MIN_OPTIONS {
        issues.push(ValidationIssue::TooFewOptions { found: complete });
    }

    let named = dilemma
        .stakeholders
        .iter()
        .filter(|s| !s.trim().is_empty())
        .count();
    if named < MIN_STAKEHOLDERS {
        issues.push(ValidationIssue::NoStakeholders);
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dilemma::DilemmaOption;

    fn option(id: &str) -> DilemmaOption {
        DilemmaOption::new(id, format!("Option {id}"), "Do the thing", vec!["ok".into()])
    }

    fn valid() -> EthicalDilemma {
        EthicalDilemma::new(
            "Test",
            "A scenario",
            vec![option("1"), option("2")],
            vec!["Staff".into()],
        )
    }

    #[test]
    fn test_valid_dilemma_passes() {
        assert!(validate(&valid()).is_ok());
    }

    #[test]
    fn test_one_option_rejected() {
        let mut dilemma = valid();
        dilemma.options.truncate(1);

        let issues = collect_issues(&dilemma);
        assert_eq!(issues, vec![ValidationIssue::TooFewOptions { found: 1 }]);
    }

    #[test]
    fn test_incomplete_option_does_not_count() {
        let mut dilemma = valid();
        dilemma.options[1].description = "  ".into();

        assert!(matches!(
            collect_issues(&dilemma).as_slice(),
            [ValidationIssue::TooFewOptions { found: 1 }]
        ));
    }

    #[test]
    fn test_blank_stakeholders_rejected() {
        let mut dilemma = valid();
        dilemma.stakeholders = vec!["   ".into()];

        assert_eq!(collect_issues(&dilemma), vec![ValidationIssue::NoStakeholders]);
    }

    #[test]
    fn test_all_issues_collected() {
        let dilemma = EthicalDilemma::new(" ", "", vec![], vec![]);

        let err = validate(&dilemma).unwrap_err();
        match err {
            DilemmaError::ValidationError(issues) => {
                assert_eq!(issues.len(), 4);
                assert_eq!(issues[0], ValidationIssue::EmptyTitle);
                assert_eq!(issues[1], ValidationIssue::EmptyScenario);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_error_message_lists_issues() {
        let dilemma = EthicalDilemma::new("", "S", vec![option("1"), option("2")], vec!["A".into()]);
        let err = validate(&dilemma).unwrap_err();
        assert_eq!(err.to_string(), "Dilemma validation failed: title is empty");
    }
}
