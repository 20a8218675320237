//! Analysis result types.
//!
//! Field names serialize in camelCase so exported documents keep the shape
//! of the browser application's JSON exports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Score assigned by one framework.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkScore {
    /// Framework identifier (e.g., "utilitarian")
    pub framework: String,

    /// Alignment score in [0, 1]
    pub score: f64,

    pub explanation: String,

    /// Up to three supporting statements
    #[serde(default)]
    pub reasoning: Vec<String>,

    /// How much the framework trusts its own score, in [0, 1]
    pub confidence: f64,
}

impl FrameworkScore {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }
}

/// Coarse display bucket for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    /// 0.7 and above
    Strong,
    /// 0.5 up to 0.7
    Moderate,
    /// Below 0.5
    Weak,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.7 {
            ScoreBand::Strong
        } else if score >= 0.5 {
            ScoreBand::Moderate
        } else {
            ScoreBand::Weak
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Strong => "strong",
            ScoreBand::Moderate => "moderate",
            ScoreBand::Weak => "weak",
        }
    }
}

/// Severity tag on a risk entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskSeverity {
    High,
    Medium,
    Low,
}

impl RiskSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskSeverity::High => "high",
            RiskSeverity::Medium => "medium",
            RiskSeverity::Low => "low",
        }
    }
}

/// A coarse risk derived from the dilemma's shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskAssessment {
    #[serde(rename = "type")]
    pub severity: RiskSeverity,

    pub description: String,

    /// In [0, 1]
    pub likelihood: f64,

    /// In [0, 1]
    pub impact: f64,
}

/// The option the analysis points to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub option_id: String,

    /// Mean of the framework scores
    pub confidence: f64,

    pub reasoning: String,
}

/// Result of analyzing one dilemma.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EthicalAnalysis {
    pub id: String,

    /// Id of the dilemma this analysis was computed from
    pub dilemma_id: String,

    /// One entry per registered framework, in registry order
    pub scores: Vec<FrameworkScore>,

    pub recommendation: Recommendation,

    #[serde(default)]
    pub risks: Vec<RiskAssessment>,

    pub summary: String,

    pub created_at: DateTime<Utc>,
}

impl EthicalAnalysis {
    /// Look up the score a given framework produced.
    pub fn score_for(&self, framework: &str) -> Option<&FrameworkScore> {
        self.scores.iter().find(|s| s.framework == framework)
    }

    pub fn has_high_risk(&self) -> bool {
        self.risks.iter().any(|r| r.severity == RiskSeverity::High)
    }
}
