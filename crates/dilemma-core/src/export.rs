//! Downloadable analysis reports.
//!
//! A report bundles the dilemma, its analysis, and the export time into one
//! pretty-printed JSON document.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::dilemma::{DilemmaError, EthicalDilemma};
use crate::types::EthicalAnalysis;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// A dilemma and its analysis, ready to write to disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisExport {
    pub dilemma: EthicalDilemma,
    pub analysis: EthicalAnalysis,
    pub exported_at: DateTime<Utc>,
}

impl AnalysisExport {
    pub fn new(dilemma: EthicalDilemma, analysis: EthicalAnalysis) -> Self {
        Self::new_at(dilemma, analysis, Utc::now())
    }

    pub fn new_at(
        dilemma: EthicalDilemma,
        analysis: EthicalAnalysis,
        exported_at: DateTime<Utc>,
    ) -> Self {
        Self {
            dilemma,
            analysis,
            exported_at,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, DilemmaError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, DilemmaError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DilemmaError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// `ethical-analysis-<slug>.json`, where the slug is the dilemma title
    /// lower-cased with each whitespace run replaced by `-`.
    pub fn file_name(&self) -> String {
        let slug = WHITESPACE_RUN.replace_all(&self.dilemma.title, "-");
        format!("ethical-analysis-{}.json", slug.to_lowercase())
    }

    /// Write the report into `dir` and return the path written.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf, DilemmaError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        fs::write(&path, self.to_json_pretty()?)?;
        tracing::info!(path = %path.display(), "analysis exported");
        Ok(path)
    }
}
