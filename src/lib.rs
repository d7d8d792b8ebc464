// Library Usage Analytics - Core Library
// Exposes all modules for use in the demo binary and tests

pub mod entities;
pub mod analytics;
pub mod report;
pub mod config;
pub mod import;

// Re-export commonly used types
pub use entities::{
    Book, BookCheckout, BookSnapshot,
    Member, MemberCheckout, MemberSnapshot,
};
pub use analytics::LibraryAnalytics;
pub use report::{AnalyticsReport, UsageStatistics};
pub use config::{AnalyticsConfig, DEFAULT_REPORT_LIMIT};
pub use import::{load_books, load_members, load_books_from_reader, load_members_from_reader};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
