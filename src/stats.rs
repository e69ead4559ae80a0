//! Run statistics log
//!
//! Append-only record of finished runs, persisted as JSON. The sim never
//! touches this - the caller records a run after the phase turns Complete.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::RunOutcome;

/// One finished run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    /// Level preset index
    pub level: u8,
    /// How the run ended
    pub outcome: RunOutcome,
    /// Elapsed run time (seconds)
    pub time_secs: f32,
    /// Health remaining at the end
    pub health: i32,
    /// Unix timestamp (ms) when recorded
    pub timestamp_ms: u64,
}

/// The on-disk run log
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunLog {
    pub records: Vec<RunRecord>,
}

impl RunLog {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a finished run
    pub fn record(&mut self, record: RunRecord) {
        log::info!(
            "run recorded: level {} {:?} in {:.2}s ({} hp)",
            record.level,
            record.outcome,
            record.time_secs,
            record.health
        );
        self.records.push(record);
    }

    /// Fastest cleared time for a level, if any run cleared it
    pub fn best_time(&self, level: u8) -> Option<f32> {
        self.records
            .iter()
            .filter(|r| r.level == level && r.outcome == RunOutcome::Cleared)
            .map(|r| r.time_secs)
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }

    /// Runs cleared on a level
    pub fn clear_count(&self, level: u8) -> usize {
        self.records
            .iter()
            .filter(|r| r.level == level && r.outcome == RunOutcome::Cleared)
            .count()
    }

    /// Load from a JSON file; a missing file is an empty log
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(log) => log,
                Err(err) => {
                    log::warn!("run log unreadable ({err}), starting fresh");
                    Self::new()
                }
            },
            Err(_) => {
                log::info!("no run log found, starting fresh");
                Self::new()
            }
        }
    }

    /// Save as JSON, creating parent directories as needed
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path, json)?;
        log::info!("run log saved ({} entries)", self.records.len());
        Ok(())
    }
}
