//! Justice Lens
//!
//! **Question**: Are benefits and burdens distributed fairly?
//!
//! Counts scenario tokens containing any of: fair, equal, distribute, equity, rights.
//! Score is `0.4 + 0.1 * count`, capped at 0.9.

use crate::dilemma::EthicalDilemma;
use crate::frameworks;

use super::{count_keyword_tokens, linear_score, reasons, Lens, LensScore};

const KEYWORDS: &[&str] = &["fair", "equal", "distribute", "equity", "rights"];
const BASE: f64 = 0.4;
const STEP: f64 = 0.1;

/// The Justice lens.
pub struct JusticeLens;

impl JusticeLens {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JusticeLens {
    fn default() -> Self {
        Self::new()
    }
}

impl Lens for JusticeLens {
    fn framework_id(&self) -> &'static str {
        frameworks::JUSTICE
    }

    fn score(&self, dilemma: &EthicalDilemma) -> LensScore {
        let matches = count_keyword_tokens(&dilemma.scenario, KEYWORDS);

        LensScore {
            value: linear_score(BASE, STEP, matches),
            explanation: "Evaluates fairness and equitable distribution".to_string(),
            reasoning: reasons(&[
                "Considers fair distribution of benefits and burdens",
                "Evaluates equal treatment and non-discrimination",
                "Focuses on procedural and distributive justice",
            ]),
            confidence: 0.85,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fair_distribution_scenario() {
        let dilemma = EthicalDilemma::new(
            "Test",
            "We must act fairly and distribute resources with equity",
            vec![],
            vec!["Residents".into()],
        );
        let score = JusticeLens::new().score(&dilemma);
        assert!((score.value - 0.7).abs() < 1e-9);
        assert_eq!(score.explanation, "Evaluates fairness and equitable distribution");
    }

    #[test]
    fn test_rights_also_counts() {
        let dilemma = EthicalDilemma::new("T", "Equal rights", vec![], vec![]);
        let score = JusticeLens::new().score(&dilemma);
        assert!((score.value - 0.6).abs() < 1e-9);
    }
}
