// 📊 Analytics Report - statistics + rankings, exported as JSON
//
// Export format (UTF-8, 2-space indent):
//   {
//     "timestamp": ...,
//     "statistics": { total_books, total_members, total_checkouts,
//                     average_checkouts_per_book, generated_at },
//     "most_popular_books": [...],
//     "most_active_members": [...]
//   }

use crate::entities::{BookSnapshot, MemberSnapshot};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

// ============================================================================
// USAGE STATISTICS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageStatistics {
    pub total_books: usize,
    pub total_members: usize,
    pub total_checkouts: u64,
    /// Rounded to 2 decimal places; 0 when the catalog is empty
    pub average_checkouts_per_book: f64,
    pub generated_at: DateTime<Utc>,
}

impl UsageStatistics {
    pub fn new(total_books: usize, total_members: usize, total_checkouts: u64) -> Self {
        let average = if total_books > 0 {
            round_to_cents(total_checkouts as f64 / total_books as f64)
        } else {
            0.0
        };

        UsageStatistics {
            total_books,
            total_members,
            total_checkouts,
            average_checkouts_per_book: average,
            generated_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Books: {}, Members: {}, Checkouts: {}, Avg per book: {:.2}",
            self.total_books,
            self.total_members,
            self.total_checkouts,
            self.average_checkouts_per_book
        )
    }
}

/// Two decimal places, exact halves to even (1/8 -> 0.12, 3/8 -> 0.38)
fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

// ============================================================================
// ANALYTICS REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub timestamp: DateTime<Utc>,
    pub statistics: UsageStatistics,
    pub most_popular_books: Vec<BookSnapshot>,
    pub most_active_members: Vec<MemberSnapshot>,
}

impl AnalyticsReport {
    pub fn new(
        statistics: UsageStatistics,
        most_popular_books: Vec<BookSnapshot>,
        most_active_members: Vec<MemberSnapshot>,
    ) -> Self {
        AnalyticsReport {
            timestamp: Utc::now(),
            statistics,
            most_popular_books,
            most_active_members,
        }
    }

    /// Write the report as pretty-printed JSON to `path`
    ///
    /// The file handle is dropped on every exit path. I/O failures are
    /// returned to the caller with the original `std::io::Error` as source.
    pub fn write_json(&self, path: &Path) -> Result<PathBuf> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create report file: {:?}", path))?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, self)
            .with_context(|| format!("Failed to write report: {:?}", path))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush report: {:?}", path))?;

        Ok(path.to_path_buf())
    }
}

// ============================================================================
// TESTS
// ============================================================================
