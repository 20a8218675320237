//! One lens per ethical framework.
//!
//! Each lens scores a dilemma independently. Lenses never see each other's
//! results; combining them is the synthesizer's job.
//!
//! ## Scoring shape
//!
//! Four of the five lenses count scenario tokens that contain one of their
//! keywords and apply `base + step * count`. The utilitarian lens counts
//! stakeholders and "benefit" consequences instead. Every score is capped at
//! [`MAX_SCORE`].

mod care;
mod deontological;
mod justice;
mod utilitarian;
mod virtue;

pub use care::CareLens;
pub use deontological::DeontologicalLens;
pub use justice::JusticeLens;
pub use utilitarian::UtilitarianLens;
pub use virtue::VirtueLens;

use crate::dilemma::EthicalDilemma;
use crate::frameworks;
use crate::types::FrameworkScore;

/// No framework ever reports full alignment.
pub const MAX_SCORE: f64 = 0.9;

/// Score assigned when a framework identifier has no lens.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Output of a single lens.
#[derive(Debug, Clone, PartialEq)]
pub struct LensScore {
    pub value: f64,
    pub explanation: String,
    pub reasoning: Vec<String>,
    pub confidence: f64,
}

/// Trait implemented by all lenses.
pub trait Lens {
    /// Registry identifier of the framework this lens scores.
    fn framework_id(&self) -> &'static str;

    /// Score the dilemma under this framework.
    fn score(&self, dilemma: &EthicalDilemma) -> LensScore;
}

/// Resolve the lens for a framework identifier.
pub fn lens_for(framework_id: &str) -> Option<Box<dyn Lens>> {
    match framework_id {
        frameworks::UTILITARIAN => Some(Box::new(UtilitarianLens::new())),
        frameworks::DEONTOLOGICAL => Some(Box::new(DeontologicalLens::new())),
        frameworks::VIRTUE => Some(Box::new(VirtueLens::new())),
        frameworks::CARE => Some(Box::new(CareLens::new())),
        frameworks::JUSTICE => Some(Box::new(JusticeLens::new())),
        _ => None,
    }
}

/// Score one framework, falling back to a neutral score for unknown ids.
pub fn score_framework(framework_id: &str, dilemma: &EthicalDilemma) -> FrameworkScore {
    let result = match lens_for(framework_id) {
        Some(lens) => lens.score(dilemma),
        None => {
            tracing::warn!(framework = framework_id, "no lens registered for framework");
            unknown_framework_score()
        }
    };

    tracing::debug!(
        framework = framework_id,
        score = result.value,
        "framework scored"
    );

    FrameworkScore {
        framework: framework_id.to_string(),
        score: result.value.clamp(0.0, 1.0),
        explanation: result.explanation,
        reasoning: result.reasoning,
        confidence: result.confidence.clamp(0.0, 1.0),
    }
}

/// Neutral result for a framework with no lens.
pub(crate) fn unknown_framework_score() -> LensScore {
    LensScore {
        value: NEUTRAL_SCORE,
        explanation: "Unknown framework".to_string(),
        reasoning: vec![],
        confidence: NEUTRAL_SCORE,
    }
}

/// Count scenario tokens containing any keyword.
///
/// The text is lower-cased and split on whitespace. Each token counts at
/// most once, however many keywords it contains.
pub(crate) fn count_keyword_tokens(text: &str, keywords: &[&str]) -> usize {
    text.to_lowercase()
        .split_whitespace()
        .filter(|token| keywords.iter().any(|k| token.contains(k)))
        .count()
}

/// `base + step * count`, capped at [`MAX_SCORE`].
pub(crate) fn linear_score(base: f64, step: f64, count: usize) -> f64 {
    round_score(base + step * count as f64).clamp(0.0, MAX_SCORE)
}

/// Round to nine decimal places.
///
/// Formulas that agree on paper (0.3 + 0.15 * 2 and 0.4 + 0.1 * 2) must
/// produce the same f64, or the summary's tie rule ranks float noise.
pub(crate) fn round_score(value: f64) -> f64 {
    (value * 1e9).round() / 1e9
}

pub(crate) fn reasons(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dilemma(scenario: &str) -> EthicalDilemma {
        EthicalDilemma::new("T", scenario, vec![], vec!["A".into()])
    }

    #[test]
    fn test_count_is_case_insensitive_substring() {
        let keywords = ["fair", "equal"];
        assert_eq!(count_keyword_tokens("Fairly UNEQUAL outcomes", &keywords), 2);
        assert_eq!(count_keyword_tokens("nothing here", &keywords), 0);
    }

    #[test]
    fn test_token_counts_once() {
        // "fairequal" contains two keywords but is one token
        assert_eq!(count_keyword_tokens("fairequal", &["fair", "equal"]), 1);
    }

    #[test]
    fn test_splits_on_any_whitespace() {
        assert_eq!(count_keyword_tokens("fair\tequal\nequity", &["fair", "equal", "equity"]), 3);
    }

    #[test]
    fn test_linear_score_caps() {
        assert_eq!(linear_score(0.4, 0.1, 0), 0.4);
        assert_eq!(linear_score(0.4, 0.1, 50), MAX_SCORE);
    }

    #[test]
    fn test_equal_formulas_produce_equal_scores() {
        // 0.3 + 0.15 * 2 and 0.4 + 0.1 * 2 differ by one ulp before rounding
        assert_eq!(linear_score(0.3, 0.15, 2), linear_score(0.4, 0.1, 2));
        assert_eq!(linear_score(0.4, 0.1, 2), 0.6);
        assert_eq!(round_score(0.1 + 0.2), 0.3);
    }

    #[test]
    fn test_unknown_framework_is_neutral() {
        let score = score_framework("egoism", &dilemma("anything"));
        assert_eq!(score.framework, "egoism");
        assert_eq!(score.score, 0.5);
        assert_eq!(score.explanation, "Unknown framework");
        assert!(score.reasoning.is_empty());
        assert_eq!(score.confidence, 0.5);
    }

    #[test]
    fn test_every_registered_framework_has_a_lens() {
        for framework in frameworks::frameworks() {
            let lens = lens_for(framework.id).expect("lens");
            assert_eq!(lens.framework_id(), framework.id);
        }
    }
}
