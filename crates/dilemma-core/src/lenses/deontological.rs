//! Deontological Lens
//!
//! **Question**: Does this honor duties, rights, and principles?
//!
//! Counts scenario tokens containing any of: duty, right, obligation, principle.
//! Score is `0.3 + 0.15 * count`, capped at 0.9.

use crate::dilemma::EthicalDilemma;
use crate::frameworks;

use super::{count_keyword_tokens, linear_score, reasons, Lens, LensScore};

const KEYWORDS: &[&str] = &["duty", "right", "obligation", "principle"];
const BASE: f64 = 0.3;
const STEP: f64 = 0.15;

/// The Deontological lens.
pub struct DeontologicalLens;

impl DeontologicalLens {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DeontologicalLens {
    fn default() -> Self {
        Self::new()
    }
}

impl Lens for DeontologicalLens {
    fn framework_id(&self) -> &'static str {
        frameworks::DEONTOLOGICAL
    }

    fn score(&self, dilemma: &EthicalDilemma) -> LensScore {
        let matches = count_keyword_tokens(&dilemma.scenario, KEYWORDS);

        LensScore {
            value: linear_score(BASE, STEP, matches),
            explanation: "Evaluates adherence to moral rules and duties".to_string(),
            reasoning: reasons(&[
                "Focuses on inherent rightness or wrongness of actions",
                "Considers universal moral principles",
                "Emphasizes respect for human dignity and rights",
            ]),
            confidence: 0.75,
        }
    }
}
