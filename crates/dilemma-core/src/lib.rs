//! # dilemma-core
//!
//! Deterministic ethical dilemma scoring.
//!
//! This crate scores a decision dilemma under five ethical frameworks and
//! answers:
//! - How strongly does each framework's vocabulary show up?
//! - What risks does the dilemma's shape suggest?
//! - Which option is recommended, and with what confidence?
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: same dilemma, id, and timestamp always yield the same analysis
//! 2. **No model calls**: every score comes from keyword counting and fixed formulas
//! 3. **Bounded**: every score and confidence lies in [0, 1]
//! 4. **Complete**: exactly one score per registered framework, in registry order
//!
//! ## Example
//!
//! ```rust,ignore
//! use dilemma_core::{analyze, validate, EthicalDilemma};
//!
//! let dilemma = EthicalDilemma::from_yaml_file("dilemma.yaml")?;
//! validate(&dilemma)?;
//! let analysis = analyze(&dilemma);
//!
//! for score in &analysis.scores {
//!     println!("{}: {:.0}%", score.framework, score.score * 100.0);
//! }
//! println!("{}", analysis.summary);
//! ```

pub mod dilemma;
pub mod export;
pub mod frameworks;
pub mod lenses;
pub mod risk;
pub mod synthesizer;
pub mod types;

// Re-export main types at crate root
pub use dilemma::{
    collect_issues, validate, DilemmaError, DilemmaOption, EthicalDilemma, ValidationIssue,
};
pub use export::AnalysisExport;
pub use frameworks::{framework_by_id, frameworks, Framework, FRAMEWORKS};
pub use lenses::{
    score_framework, CareLens, DeontologicalLens, JusticeLens, Lens, LensScore, UtilitarianLens,
    VirtueLens,
};
pub use risk::assess_risks;
pub use synthesizer::Synthesizer;
pub use types::{
    EthicalAnalysis, FrameworkScore, Recommendation, RiskAssessment, RiskSeverity, ScoreBand,
};

use chrono::{DateTime, Utc};

/// Analyze a dilemma under every registered framework.
///
/// This is the main entry point. The scorer does not validate its input;
/// run [`validate`] first.
///
/// # Determinism
///
/// This function generates a new analysis id and uses the current system
/// time. For reproducible results use [`analyze_at`] or
/// [`analyze_with_id_at`].
pub fn analyze(dilemma: &EthicalDilemma) -> EthicalAnalysis {
    analyze_at(dilemma, Utc::now())
}

/// Analyze with an explicit timestamp.
pub fn analyze_at(dilemma: &EthicalDilemma, created_at: DateTime<Utc>) -> EthicalAnalysis {
    analyze_with_id_at(dilemma, uuid::Uuid::new_v4().to_string(), created_at)
}

/// Analyze with explicit analysis id and timestamp.
///
/// Fully deterministic: same inputs always produce the same output.
///
/// # Arguments
///
/// * `dilemma` - The dilemma to score
/// * `id` - Identifier for the resulting analysis
/// * `created_at` - Timestamp for the analysis
pub fn analyze_with_id_at(
    dilemma: &EthicalDilemma,
    id: impl Into<String>,
    created_at: DateTime<Utc>,
) -> EthicalAnalysis {
    // Fan-out: one independent score per framework, in registry order
    let scores: Vec<FrameworkScore> = FRAMEWORKS
        .iter()
        .map(|framework| score_framework(framework.id, dilemma))
        .collect();

    let risks = assess_risks(dilemma);

    // Fan-in
    let analysis = Synthesizer::new().synthesize_at(dilemma, scores, risks, id.into(), created_at);

    tracing::info!(
        dilemma_id = %analysis.dilemma_id,
        confidence = analysis.recommendation.confidence,
        risks = analysis.risks.len(),
        "dilemma analyzed"
    );

    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const HIRING_YAML: &str = r#"
id: "hiring"
title: "AI Ethics in Hiring"
scenario: "Is it fair to let an algorithm screen candidates when we have a duty to treat every applicant with equal respect?"
stakeholders:
  - "Candidates"
  - "Recruiters"
  - "Legal team"
options:
  - id: "automate"
    title: "Automate screening"
    description: "Let the model shortlist candidates"
    consequences:
      - "Recruiters benefit from saved time"
      - "Risk of encoding historical bias"
  - id: "manual"
    title: "Keep manual review"
    description: "Humans read every application"
    consequences:
      - "Candidates benefit from individual attention"
      - "Slower hiring"
createdAt: "2025-12-20T10:00:00Z"
"#;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 20, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_basic_analysis() {
        let dilemma = EthicalDilemma::from_yaml(HIRING_YAML).unwrap();
        validate(&dilemma).unwrap();

        let analysis = analyze_with_id_at(&dilemma, "an-1", fixed_time());

        let ids: Vec<_> = analysis.scores.iter().map(|s| s.framework.as_str()).collect();
        assert_eq!(ids, vec!["utilitarian", "deontological", "virtue", "care", "justice"]);
        assert_eq!(analysis.dilemma_id, "hiring");
        assert_eq!(analysis.recommendation.option_id, "automate");
    }

    #[test]
    fn test_expected_scores() {
        let dilemma = EthicalDilemma::from_yaml(HIRING_YAML).unwrap();
        let analysis = analyze_with_id_at(&dilemma, "an-1", fixed_time());

        // (2 benefit consequences + 3 * 0.1) / 10
        let utilitarian = analysis.score_for("utilitarian").unwrap().score;
        assert!((utilitarian - 0.23).abs() < 1e-9);

        // "duty"
        let deontological = analysis.score_for("deontological").unwrap().score;
        assert!((deontological - 0.45).abs() < 1e-9);

        // "fair", "equal"
        let justice = analysis.score_for("justice").unwrap().score;
        assert!((justice - 0.6).abs() < 1e-9);

        assert_eq!(analysis.score_for("virtue").unwrap().score, 0.4);
        assert_eq!(analysis.score_for("care").unwrap().score, 0.35);
    }

    #[test]
    fn test_summary_names_top_framework() {
        let dilemma = EthicalDilemma::from_yaml(HIRING_YAML).unwrap();
        let analysis = analyze(&dilemma);

        assert!(analysis.summary.contains("involving 3 stakeholders"));
        assert!(analysis.summary.contains("The justice framework shows the highest alignment (60.0%)"));
        assert!(analysis.summary.contains("evaluates fairness and equitable distribution"));
    }

    #[test]
    fn test_equal_scores_tie_to_earlier_framework() {
        // Deontological 0.3 + 0.15 * 2 and virtue 0.4 + 0.1 * 2 are both 0.6
        let dilemma = EthicalDilemma::new(
            "Tie",
            "duty duty honesty honesty",
            vec![
                DilemmaOption::new("1", "A", "a", vec![]),
                DilemmaOption::new("2", "B", "b", vec![]),
            ],
            vec!["Staff".into()],
        );
        let analysis = analyze_with_id_at(&dilemma, "an-1", fixed_time());

        assert_eq!(
            analysis.score_for("deontological").unwrap().score,
            analysis.score_for("virtue").unwrap().score
        );
        assert!(analysis
            .summary
            .contains("The deontological framework shows the highest alignment (60.0%)"));
    }

    #[test]
    fn test_risks_from_consequences() {
        let dilemma = EthicalDilemma::from_yaml(HIRING_YAML).unwrap();
        let analysis = analyze(&dilemma);

        assert_eq!(analysis.risks.len(), 1);
        assert_eq!(analysis.risks[0].severity, RiskSeverity::Medium);
        assert!(!analysis.has_high_risk());
    }

    #[test]
    fn test_determinism_same_input_same_output() {
        let dilemma = EthicalDilemma::from_yaml(HIRING_YAML).unwrap();

        let first = analyze_with_id_at(&dilemma, "fixed", fixed_time());
        let second = analyze_with_id_at(&dilemma, "fixed", fixed_time());

        assert_eq!(first, second);
    }

    #[test]
    fn test_analyze_generates_distinct_ids() {
        let dilemma = EthicalDilemma::from_yaml(HIRING_YAML).unwrap();
        assert_ne!(analyze(&dilemma).id, analyze(&dilemma).id);
    }
}
