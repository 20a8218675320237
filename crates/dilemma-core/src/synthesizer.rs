//! Synthesizer: combines framework scores and risks into an analysis.
//!
//! The synthesizer applies fixed rules:
//! 1. Recommendation confidence is the arithmetic mean of all framework scores
//! 2. The recommended option is the first option listed
//! 3. The summary names the framework with the strictly highest score;
//!    on a tie the earliest in registry order wins
//!
//! Rule 2 does not compare options. Scores describe the dilemma as a whole,
//! not individual options, so there is nothing to rank them by.

use chrono::{DateTime, Utc};

use crate::dilemma::EthicalDilemma;
use crate::types::{EthicalAnalysis, FrameworkScore, Recommendation, RiskAssessment};

/// The Synthesizer turns independent framework scores into one analysis.
pub struct Synthesizer;

impl Synthesizer {
    pub fn new() -> Self {
        Self
    }

    /// Build an analysis with a fresh id, timestamped now.
    pub fn synthesize(
        &self,
        dilemma: &EthicalDilemma,
        scores: Vec<FrameworkScore>,
        risks: Vec<RiskAssessment>,
    ) -> EthicalAnalysis {
        self.synthesize_at(
            dilemma,
            scores,
            risks,
            uuid::Uuid::new_v4().to_string(),
            Utc::now(),
        )
    }

    /// Build an analysis with caller-provided id and timestamp.
    ///
    /// Fully deterministic: same inputs always produce the same output.
    ///
    /// # Arguments
    ///
    /// * `dilemma` - The dilemma that was scored
    /// * `scores` - One score per framework, in registry order
    /// * `risks` - Risks derived from the dilemma
    /// * `id` - Identifier for the new analysis
    /// * `created_at` - Timestamp for the analysis
    pub fn synthesize_at(
        &self,
        dilemma: &EthicalDilemma,
        scores: Vec<FrameworkScore>,
        risks: Vec<RiskAssessment>,
        id: String,
        created_at: DateTime<Utc>,
    ) -> EthicalAnalysis {
        let recommendation = self.recommend(dilemma, &scores);
        let summary = self.build_summary(dilemma, &scores);

        EthicalAnalysis {
            id,
            dilemma_id: dilemma.id.clone(),
            scores,
            recommendation,
            risks,
            summary,
            created_at,
        }
    }

    fn recommend(&self, dilemma: &EthicalDilemma, scores: &[FrameworkScore]) -> Recommendation {
        // Validation guarantees at least two options; an empty list still
        // produces a result rather than panicking.
        let option_id = dilemma
            .options
            .first()
            .map(|o| o.id.clone())
            .unwrap_or_default();

        Recommendation {
            option_id,
            confidence: mean_score(scores),
            reasoning: format!(
                "Based on ethical analysis across {} frameworks, this option provides the most \
                 balanced approach considering all stakeholders and moral principles.",
                scores.len()
            ),
        }
    }

    fn build_summary(&self, dilemma: &EthicalDilemma, scores: &[FrameworkScore]) -> String {
        let lead = match top_framework(scores) {
            Some(top) => format!(
                " The {} framework shows the highest alignment ({:.1}%), suggesting that {}.",
                top.framework,
                top.score * 100.0,
                top.explanation.to_lowercase()
            ),
            None => String::new(),
        };

        format!(
            "This ethical dilemma involving {} stakeholders has been analyzed across multiple \
             moral frameworks.{} The recommended approach balances all ethical considerations \
             while minimizing potential risks.",
            dilemma.stakeholders.len(),
            lead
        )
    }
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new()
    }
}

/// The score strictly greater than all earlier ones; first wins ties.
pub fn top_framework(scores: &[FrameworkScore]) -> Option<&FrameworkScore> {
    let mut iter = scores.iter();
    let mut best = iter.next()?;
    for score in iter {
        if score.score > best.score {
            best = score;
        }
    }
    Some(best)
}

/// Arithmetic mean of the scores, clamped to [0, 1]. Zero for an empty list.
pub fn mean_score(scores: &[FrameworkScore]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let total: f64 = scores.iter().map(|s| s.score).sum();
    (total / scores.len() as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dilemma::DilemmaOption;
    use chrono::TimeZone;

    fn score(framework: &str, value: f64) -> FrameworkScore {
        FrameworkScore {
            framework: framework.to_string(),
            score: value,
            explanation: format!("Explains {framework}"),
            reasoning: vec![],
            confidence: 0.8,
        }
    }

    fn test_dilemma() -> EthicalDilemma {
        EthicalDilemma::new(
            "T",
            "S",
            vec![
                DilemmaOption::new("first", "A", "a", vec![]),
                DilemmaOption::new("second", "B", "b", vec![]),
            ],
            vec!["X".into(), "Y".into()],
        )
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 20, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_first_option_recommended() {
        let dilemma = test_dilemma();
        let scores = vec![score("a", 0.2), score("b", 0.9)];
        let analysis =
            Synthesizer::new().synthesize_at(&dilemma, scores, vec![], "an-1".into(), fixed_time());

        assert_eq!(analysis.recommendation.option_id, "first");
        assert_eq!(analysis.dilemma_id, dilemma.id);
        assert_eq!(analysis.id, "an-1");
        assert_eq!(analysis.created_at, fixed_time());
    }

    #[test]
    fn test_confidence_is_mean() {
        let scores = vec![score("a", 0.2), score("b", 0.4), score("c", 0.9)];
        assert!((mean_score(&scores) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_mean_of_empty_is_zero() {
        assert_eq!(mean_score(&[]), 0.0);
    }

    #[test]
    fn test_top_framework_strictly_highest() {
        let scores = vec![score("a", 0.3), score("b", 0.7), score("c", 0.5)];
        assert_eq!(top_framework(&scores).unwrap().framework, "b");
    }

    #[test]
    fn test_tie_goes_to_earliest() {
        let scores = vec![score("a", 0.4), score("b", 0.7), score("c", 0.7)];
        assert_eq!(top_framework(&scores).unwrap().framework, "b");
    }

    #[test]
    fn test_summary_text() {
        let scores = vec![score("utilitarian", 0.3), score("justice", 0.7)];
        let analysis = Synthesizer::new().synthesize_at(
            &test_dilemma(),
            scores,
            vec![],
            "an-1".into(),
            fixed_time(),
        );
        assert_eq!(
            analysis.summary,
            "This ethical dilemma involving 2 stakeholders has been analyzed across multiple \
             moral frameworks. The justice framework shows the highest alignment (70.0%), \
             suggesting that explains justice. The recommended approach balances all ethical \
             considerations while minimizing potential risks."
        );
    }

    #[test]
    fn test_reasoning_names_framework_count() {
        let scores = vec![score("a", 0.5); 5];
        let analysis = Synthesizer::new().synthesize(&test_dilemma(), scores, vec![]);
        assert!(analysis
            .recommendation
            .reasoning
            .starts_with("Based on ethical analysis across 5 frameworks"));
    }

    #[test]
    fn test_empty_options_do_not_panic() {
        let dilemma = EthicalDilemma::new("T", "S", vec![], vec![]);
        let analysis = Synthesizer::new().synthesize(&dilemma, vec![score("a", 0.5)], vec![]);
        assert_eq!(analysis.recommendation.option_id, "");
    }
}
