//! Drill report and export functionality

use crate::highlight::NextKeyTracker;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Complete drill report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillReport {
    pub metadata: ReportMetadata,
    pub summary: DrillSummary,
    /// Wrongly typed keys, most frequent first
    pub mistakes: Vec<MistakeEntry>,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Report generation timestamp
    pub generated_at: String,
    /// Application version
    pub version: String,
    /// Session duration in seconds
    pub duration_secs: f64,
}

/// Letter drill summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillSummary {
    pub target_text: String,
    pub target_len: usize,
    pub position: usize,
    pub correct_presses: usize,
    pub incorrect_presses: u32,
    /// Correct presses over all presses, `None` before the first press
    pub accuracy_percent: Option<f64>,
    pub finished: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MistakeEntry {
    pub key: String,
    pub count: u32,
}

impl DrillReport {
    /// Build a report from the letter drill tracker and the mistake tally
    pub fn new(start_time: Instant, tracker: &NextKeyTracker, mistakes: &BTreeMap<char, u32>) -> Self {
        let duration_secs = start_time.elapsed().as_secs_f64();
        let now: DateTime<Utc> = Utc::now();

        let correct_presses = tracker.correct_keys().len();
        let incorrect_presses: u32 = mistakes.values().sum();
        let total = correct_presses as f64 + incorrect_presses as f64;
        let accuracy_percent = (total > 0.0).then(|| correct_presses as f64 / total * 100.0);

        let mut mistakes: Vec<MistakeEntry> = mistakes
            .iter()
            .map(|(key, &count)| MistakeEntry {
                key: key.to_string(),
                count,
            })
            .collect();
        // Stable sort keeps key order among equal counts
        mistakes.sort_by(|a, b| b.count.cmp(&a.count));

        Self {
            metadata: ReportMetadata {
                generated_at: now.to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                duration_secs,
            },
            summary: DrillSummary {
                target_text: tracker.target_text(),
                target_len: tracker.target().len(),
                position: tracker.position().min(tracker.target().len()),
                correct_presses,
                incorrect_presses,
                accuracy_percent,
                finished: tracker.is_finished(),
            },
            mistakes,
        }
    }

    /// Export report to JSON file
    pub fn export_json(&self, path: &Path) -> Result<(), ReportError> {
        let json = self.to_json()?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Export report to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
