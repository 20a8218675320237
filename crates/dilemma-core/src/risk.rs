//! Coarse risk derivation.
//!
//! | Severity | Condition | Likelihood | Impact |
//! |----------|-----------|------------|--------|
//! | high | more than 5 stakeholders | 0.8 | 0.7 |
//! | medium | an option has a consequence mentioning "harm" or "risk" (any case) | 0.6 | 0.5 |
//!
//! Medium entries are emitted once per qualifying option, in option order,
//! after the high entry.

use crate::dilemma::EthicalDilemma;
use crate::types::{RiskAssessment, RiskSeverity};

/// Stakeholder count above which a dilemma is flagged as complex.
pub const STAKEHOLDER_COMPLEXITY_THRESHOLD: usize = 5;

const NEGATIVE_MARKERS: &[&str] = &["harm", "risk"];

/// Derive risks from stakeholder count and consequence wording.
pub fn assess_risks(dilemma: &EthicalDilemma) -> Vec<RiskAssessment> {
    let mut risks = Vec::new();

    if dilemma.stakeholders.len() > STAKEHOLDER_COMPLEXITY_THRESHOLD {
        risks.push(RiskAssessment {
            severity: RiskSeverity::High,
            description: "Large number of stakeholders increases complexity".to_string(),
            likelihood: 0.8,
            impact: 0.7,
        });
    }

    for option in &dilemma.options {
        let negative = option.consequences.iter().any(|c| {
            let lower = c.to_lowercase();
            NEGATIVE_MARKERS.iter().any(|m| lower.contains(m))
        });

        if negative {
            risks.push(RiskAssessment {
                severity: RiskSeverity::Medium,
                description: format!("Potential negative outcomes in {}", option.title),
                likelihood: 0.6,
                impact: 0.5,
            });
        }
    }

    risks
}
