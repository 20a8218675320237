//! Virtue Lens: looks for named character virtues in the scenario.

use crate::dilemma::EthicalDilemma;
use crate::frameworks;

use super::{count_keyword_tokens, linear_score, reasons, Lens, LensScore};

const KEYWORDS: &[&str] = &["honesty", "courage", "compassion", "integrity", "wisdom"];
const BASE: f64 = 0.4;
const STEP: f64 = 0.1;

/// The Virtue lens.
pub struct VirtueLens;

impl VirtueLens {
    pub fn new() -> Self {
        Self
    }
}

impl Default for VirtueLens {
    fn default() -> Self {
        Self::new()
    }
}

impl Lens for VirtueLens {
    fn framework_id(&self) -> &'static str {
        frameworks::VIRTUE
    }

    fn score(&self, dilemma: &EthicalDilemma) -> LensScore {
        let matches = count_keyword_tokens(&dilemma.scenario, KEYWORDS);

        LensScore {
            value: linear_score(BASE, STEP, matches),
            explanation: "Assesses character virtues and moral excellence".to_string(),
            reasoning: reasons(&[
                "Evaluates what a virtuous person would do",
                "Considers long-term character development",
                "Focuses on moral excellence and human flourishing",
            ]),
            confidence: 0.7,
        }
    }
}
