//! Analysis history kept in the key/value store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dilemma_core::{frameworks, EthicalAnalysis, EthicalDilemma};

use crate::store::KeyValueStore;

pub const HISTORY_KEY: &str = "ethical-analyses";

/// Characters of scenario text kept in a history preview.
const PREVIEW_CHARS: usize = 120;

/// One past analysis, summarized for listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub analysis_id: String,
    pub dilemma_id: String,
    pub title: String,
    pub preview: String,
    /// Display names of the frameworks that scored the dilemma
    pub frameworks: Vec<String>,
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn from_analysis(dilemma: &EthicalDilemma, analysis: &EthicalAnalysis) -> Self {
        let mut preview: String = dilemma.scenario.chars().take(PREVIEW_CHARS).collect();
        if dilemma.scenario.chars().count() > PREVIEW_CHARS {
            preview.push_str("...");
        }

        Self {
            analysis_id: analysis.id.clone(),
            dilemma_id: dilemma.id.clone(),
            title: dilemma.title.clone(),
            preview,
            frameworks: analysis
                .scores
                .iter()
                .map(|s| frameworks::display_name(&s.framework).to_string())
                .collect(),
            confidence: analysis.recommendation.confidence,
            timestamp: analysis.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisHistory {
    store: KeyValueStore,
}

impl AnalysisHistory {
    pub fn new(store: KeyValueStore) -> Self {
        Self { store }
    }

    /// Newest first.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.store.get_or(HISTORY_KEY, Vec::new())
    }

    pub fn record(&self, dilemma: &EthicalDilemma, analysis: &EthicalAnalysis) -> HistoryEntry {
        let entry = HistoryEntry::from_analysis(dilemma, analysis);
        let mut entries = self.entries();
        entries.insert(0, entry.clone());
        self.store.set(HISTORY_KEY, &entries);
        entry
    }

    pub fn clear(&self) {
        self.store.remove(HISTORY_KEY);
    }
}
