use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::note::Outcome;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub file: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedFile {
    pub file: String,
    pub error: String,
}

/// Tally of one conversion run, filled in by the vault walker as it goes.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    pub converted: Vec<String>,
    pub skipped: Vec<SkippedFile>,
    pub failed: Vec<FailedFile>,
    pub media_files: usize,
}

impl Report {
    pub fn record(&mut self, file: &str, outcome: &Outcome) {
        match outcome {
            Outcome::Converted(_) => self.converted.push(file.to_string()),
            Outcome::Skipped(reason) => self.skipped.push(SkippedFile {
                file: file.to_string(),
                reason: reason.to_string(),
            }),
            Outcome::Failed(err) => self.failed.push(FailedFile {
                file: file.to_string(),
                error: err.to_string(),
            }),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} converted, {} skipped, {} failed, {} media files copied",
            self.converted.len(),
            self.skipped.len(),
            self.failed.len(),
            self.media_files
        )
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to '{}'", path.display()))
    }
}
