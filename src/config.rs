// ⚙️ Analytics Configuration - report sizes and export location

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Number of entries in each ranking of an exported report
pub const DEFAULT_REPORT_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Size of the popularity and activity rankings in exported reports
    #[serde(default = "default_report_limit")]
    pub report_limit: usize,

    /// Size of the rankings printed to the console
    #[serde(default = "default_display_limit")]
    pub display_limit: usize,

    /// Where `export_report_with` writes the JSON report
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,
}

fn default_report_limit() -> usize {
    DEFAULT_REPORT_LIMIT
}

fn default_display_limit() -> usize {
    5
}

fn default_report_path() -> PathBuf {
    PathBuf::from("library_analytics_report.json")
}

impl AnalyticsConfig {
    /// Load configuration from a JSON file; missing fields take defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        AnalyticsConfig {
            report_limit: default_report_limit(),
            display_limit: default_display_limit(),
            report_path: default_report_path(),
        }
    }
}
