//! Care Lens
//!
//! **Question**: Does this sustain relationships and attend to need?
//!
//! Note that "care" also matches "careful" and "careless".

use crate::dilemma::EthicalDilemma;
use crate::frameworks;

use super::{count_keyword_tokens, linear_score, reasons, Lens, LensScore};

const KEYWORDS: &[&str] = &["relationship", "empathy", "care", "support", "help"];
const BASE: f64 = 0.35;
const STEP: f64 = 0.12;

pub struct CareLens;

impl CareLens {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CareLens {
    fn default() -> Self {
        Self::new()
    }
}

impl Lens for CareLens {
    fn framework_id(&self) -> &'static str {
        frameworks::CARE
    }

    fn score(&self, dilemma: &EthicalDilemma) -> LensScore {
        let matches = count_keyword_tokens(&dilemma.scenario, KEYWORDS);

        LensScore {
            value: linear_score(BASE, STEP, matches),
            explanation: "Prioritizes relationships and emotional connections".to_string(),
            reasoning: reasons(&[
                "Emphasizes maintaining relationships and trust",
                "Considers emotional impact on individuals",
                "Values empathy and contextual understanding",
            ]),
            confidence: 0.8,
        }
    }
}
