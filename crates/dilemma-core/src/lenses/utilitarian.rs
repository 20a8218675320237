//! Utilitarian Lens
//!
//! **Question**: How much good does this produce, for how many?
//!
//! Unlike the keyword lenses this one ignores the scenario text. It counts
//! stakeholders (weighted 0.1 each) and consequences that mention "benefit",
//! then divides the sum by ten.
//!
//! The "benefit" match is case-sensitive.

use crate::dilemma::EthicalDilemma;
use crate::frameworks;

use super::{reasons, round_score, Lens, LensScore, MAX_SCORE};

const BENEFIT_MARKER: &str = "benefit";
const STAKEHOLDER_WEIGHT: f64 = 0.1;
const SCALE: f64 = 10.0;

/// The Utilitarian lens.
pub struct UtilitarianLens;

impl UtilitarianLens {
    pub fn new() -> Self {
        Self
    }

    fn benefit_count(dilemma: &EthicalDilemma) -> usize {
        dilemma
            .options
            .iter()
            .flat_map(|o| o.consequences.iter())
            .filter(|c| c.contains(BENEFIT_MARKER))
            .count()
    }
}

impl Default for UtilitarianLens {
    fn default() -> Self {
        Self::new()
    }
}

impl Lens for UtilitarianLens {
    fn framework_id(&self) -> &'static str {
        frameworks::UTILITARIAN
    }

    fn score(&self, dilemma: &EthicalDilemma) -> LensScore {
        let beneficiaries = dilemma.stakeholders.len();
        let positive_outcomes = Self::benefit_count(dilemma);

        let raw = (positive_outcomes as f64 + beneficiaries as f64 * STAKEHOLDER_WEIGHT) / SCALE;

        LensScore {
            value: round_score(raw).clamp(0.0, MAX_SCORE),
            explanation: format!("Maximizes benefit for {} stakeholders", beneficiaries),
            reasoning: reasons(&[
                "Considers overall well-being of all affected parties",
                "Weighs positive and negative consequences",
                "Aims to maximize happiness and minimize suffering",
            ]),
            confidence: 0.8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dilemma::DilemmaOption;

    fn dilemma(stakeholders: usize, consequences: &[&str]) -> EthicalDilemma {
        EthicalDilemma::new(
            "T",
            "S",
            vec![
                DilemmaOption::new(
                    "1",
                    "A",
                    "a",
                    consequences.iter().map(|c| c.to_string()).collect(),
                ),
                DilemmaOption::new("2", "B", "b", vec!["Neutral".into()]),
            ],
            (0..stakeholders).map(|i| format!("S{i}")).collect(),
        )
    }

    #[test]
    fn test_stakeholders_only() {
        let score = UtilitarianLens::new().score(&dilemma(3, &[]));
        assert!((score.value - 0.03).abs() < 1e-9);
        assert_eq!(score.explanation, "Maximizes benefit for 3 stakeholders");
    }

    #[test]
    fn test_benefit_consequences_count() {
        let score = UtilitarianLens::new().score(&dilemma(
            2,
            &["Workers benefit", "Community benefits", "Costs rise"],
        ));
        // (2 + 0.2) / 10
        assert!((score.value - 0.22).abs() < 1e-9);
    }

    #[test]
    fn test_benefit_is_case_sensitive() {
        let score = UtilitarianLens::new().score(&dilemma(0, &["Benefit to all"]));
        assert_eq!(score.value, 0.0);
    }

    #[test]
    fn test_caps_at_max() {
        let many: Vec<&str> = std::iter::repeat("benefit").take(20).collect();
        let score = UtilitarianLens::new().score(&dilemma(1, &many));
        assert_eq!(score.value, MAX_SCORE);
    }

    #[test]
    fn test_fixed_confidence_and_reasoning() {
        let score = UtilitarianLens::new().score(&dilemma(1, &[]));
        assert_eq!(score.confidence, 0.8);
        assert_eq!(score.reasoning.len(), 3);
    }
}
