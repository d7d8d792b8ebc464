// 📈 Library Analytics - Registry of books + members, checkout mediation, reports
//
// Single owner of every Book and Member. All mutation goes through here:
// registration is insert-if-absent, checkouts validate both ids first.
// Iteration order is always registration order, so stable sorts keep ties
// in the order they were added.

use crate::config::{AnalyticsConfig, DEFAULT_REPORT_LIMIT};
use crate::entities::{Book, BookSnapshot, Member, MemberCheckout, MemberSnapshot};
use crate::report::{AnalyticsReport, UsageStatistics};
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

// ============================================================================
// LIBRARY ANALYTICS
// ============================================================================

#[derive(Debug, Default)]
pub struct LibraryAnalytics {
    /// Books in registration order
    books: Vec<Book>,
    /// book_id → position in `books`
    book_index: HashMap<String, usize>,

    /// Members in registration order
    members: Vec<Member>,
    /// member_id → position in `members`
    member_index: HashMap<String, usize>,
}

impl LibraryAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // REGISTRATION
    // ========================================================================

    /// Register a book; returns false (and changes nothing) if the id exists
    pub fn add_book(&mut self, book: Book) -> bool {
        if self.book_index.contains_key(&book.book_id) {
            warn!(book_id = %book.book_id, "book already registered");
            return false;
        }

        debug!(book_id = %book.book_id, title = %book.title, "registered book");
        self.book_index.insert(book.book_id.clone(), self.books.len());
        self.books.push(book);
        true
    }

    /// Register a member; returns false (and changes nothing) if the id exists
    pub fn add_member(&mut self, member: Member) -> bool {
        if self.member_index.contains_key(&member.member_id) {
            warn!(member_id = %member.member_id, "member already registered");
            return false;
        }

        debug!(member_id = %member.member_id, name = %member.name, "registered member");
        self.member_index
            .insert(member.member_id.clone(), self.members.len());
        self.members.push(member);
        true
    }

    /// Register every book, skipping duplicates. Returns how many were added.
    pub fn import_books<I: IntoIterator<Item = Book>>(&mut self, books: I) -> usize {
        let mut added = 0;
        for book in books {
            if self.add_book(book) {
                added += 1;
            }
        }
        added
    }

    /// Register every member, skipping duplicates. Returns how many were added.
    pub fn import_members<I: IntoIterator<Item = Member>>(&mut self, members: I) -> usize {
        let mut added = 0;
        for member in members {
            if self.add_member(member) {
                added += 1;
            }
        }
        added
    }

    // ========================================================================
    // LOOKUPS
    // ========================================================================

    pub fn book(&self, book_id: &str) -> Option<&Book> {
        self.book_index.get(book_id).and_then(|&i| self.books.get(i))
    }

    pub fn member(&self, member_id: &str) -> Option<&Member> {
        self.member_index
            .get(member_id)
            .and_then(|&i| self.members.get(i))
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    // ========================================================================
    // TRANSACTIONS
    // ========================================================================

    /// Check out `book_id` to `member_id`
    ///
    /// Returns false without touching anything if either id is unknown.
    /// There is no availability check: a book may be held by several
    /// members at once.
    pub fn process_checkout(
        &mut self,
        member_id: &str,
        book_id: &str,
        checkout_date: DateTime<Utc>,
    ) -> bool {
        let (Some(&m), Some(&b)) = (self.member_index.get(member_id), self.book_index.get(book_id))
        else {
            warn!(member_id, book_id, "checkout rejected: unknown member or book");
            return false;
        };

        // members and books are disjoint fields
        let member = &mut self.members[m];
        let book = &mut self.books[b];
        member.checkout_book(book, checkout_date);

        debug!(member_id, book_id, %checkout_date, "processed checkout");
        true
    }

    /// Return one held copy of `book_id` from `member_id`
    ///
    /// Only the member's held list changes. The book's `total_checkouts`
    /// counts every checkout ever made and is never decremented.
    pub fn process_return(&mut self, member_id: &str, book_id: &str) -> bool {
        let Some(&m) = self.member_index.get(member_id) else {
            warn!(member_id, book_id, "return rejected: unknown member");
            return false;
        };

        let returned = self.members[m].return_book(book_id);
        if returned {
            debug!(member_id, book_id, "processed return");
        } else {
            warn!(member_id, book_id, "return rejected: book not held");
        }
        returned
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Top `limit` books by total checkouts, ties in registration order
    pub fn get_most_popular_books(&self, limit: usize) -> Vec<BookSnapshot> {
        let mut ranked: Vec<&Book> = self.books.iter().collect();
        ranked.sort_by(|a, b| b.total_checkouts().cmp(&a.total_checkouts()));

        ranked
            .into_iter()
            .take(limit)
            .map(Book::snapshot)
            .collect()
    }

    /// Top `limit` members by checkout history length, ties in registration order
    pub fn get_most_active_members(&self, limit: usize) -> Vec<MemberSnapshot> {
        let mut ranked: Vec<&Member> = self.members.iter().collect();
        ranked.sort_by(|a, b| b.total_checkouts().cmp(&a.total_checkouts()));

        ranked
            .into_iter()
            .take(limit)
            .map(Member::snapshot)
            .collect()
    }

    /// All books whose author matches exactly, ignoring case
    pub fn get_books_by_author(&self, author: &str) -> Vec<BookSnapshot> {
        self.books
            .iter()
            .filter(|b| b.is_by(author))
            .map(Book::snapshot)
            .collect()
    }

    /// Checkout history of a member; empty if the member is unknown
    pub fn get_member_checkout_history(&self, member_id: &str) -> Vec<MemberCheckout> {
        self.member(member_id)
            .map(|m| m.checkout_history().to_vec())
            .unwrap_or_default()
    }

    pub fn get_usage_statistics(&self) -> UsageStatistics {
        let total_checkouts = self.books.iter().map(Book::total_checkouts).sum();
        UsageStatistics::new(self.books.len(), self.members.len(), total_checkouts)
    }

    // ========================================================================
    // EXPORT
    // ========================================================================

    /// Assemble a report with rankings of size `limit`
    pub fn build_report(&self, limit: usize) -> AnalyticsReport {
        AnalyticsReport::new(
            self.get_usage_statistics(),
            self.get_most_popular_books(limit),
            self.get_most_active_members(limit),
        )
    }

    /// Export the standard top-10 report to `path`; returns the path written
    pub fn export_report(&self, path: &Path) -> Result<PathBuf> {
        let written = self.build_report(DEFAULT_REPORT_LIMIT).write_json(path)?;
        info!(path = %written.display(), "exported analytics report");
        Ok(written)
    }

    /// Export using the configured ranking size and destination
    pub fn export_report_with(&self, config: &AnalyticsConfig) -> Result<PathBuf> {
        let written = self
            .build_report(config.report_limit)
            .write_json(&config.report_path)?;
        info!(path = %written.display(), limit = config.report_limit, "exported analytics report");
        Ok(written)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, day, 0, 0, 0).unwrap()
    }

    fn temp_report_path() -> PathBuf {
        std::env::temp_dir().join(format!("analytics-{}.json", uuid::Uuid::new_v4()))
    }

    /// B001..B005, M001..M003 and six checkouts
    fn sample_library() -> LibraryAnalytics {
        let mut analytics = LibraryAnalytics::new();

        let books = [
            ("B001", "The Great Gatsby", "F. Scott Fitzgerald", "978-0-7432-7356-5"),
            ("B002", "1984", "George Orwell", "978-0-452-28423-4"),
            ("B003", "To Kill a Mockingbird", "Harper Lee", "978-0-06-112008-4"),
            ("B004", "Pride and Prejudice", "Jane Austen", "978-0-14-143951-8"),
            ("B005", "The Catcher in the Rye", "J.D. Salinger", "978-0-316-76948-0"),
        ];
        for (id, title, author, isbn) in books {
            assert!(analytics.add_book(Book::new(id, title, author, isbn)));
        }

        let members = [
            ("M001", "Alice Johnson", "alice@example.com"),
            ("M002", "Bob Smith", "bob@example.com"),
            ("M003", "Carol Davis", "carol@example.com"),
        ];
        for (id, name, email) in members {
            assert!(analytics.add_member(Member::new(id, name, email)));
        }

        let checkouts = [
            ("M001", "B001", 5),
            ("M001", "B002", 10),
            ("M002", "B001", 6),
            ("M002", "B003", 12),
            ("M003", "B004", 8),
            ("M001", "B004", 15),
        ];
        for (member_id, book_id, day) in checkouts {
            assert!(analytics.process_checkout(member_id, book_id, date(day)));
        }

        analytics
    }

    #[test]
    fn test_add_book_rejects_duplicate() {
        let mut analytics = LibraryAnalytics::new();
        assert!(analytics.add_book(Book::new("B001", "Original", "A", "1")));
        assert!(!analytics.add_book(Book::new("B001", "Impostor", "B", "2")));

        assert_eq!(analytics.book_count(), 1);
        assert_eq!(analytics.book("B001").unwrap().title, "Original");
    }

    #[test]
    fn test_add_member_rejects_duplicate() {
        let mut analytics = LibraryAnalytics::new();
        assert!(analytics.add_member(Member::new("M001", "Alice", "a@x")));
        assert!(!analytics.add_member(Member::new("M001", "Mallory", "m@x")));

        assert_eq!(analytics.member_count(), 1);
        assert_eq!(analytics.member("M001").unwrap().name, "Alice");
    }

    #[test]
    fn test_checkout_unknown_ids_mutates_nothing() {
        let mut analytics = sample_library();
        let before = analytics.get_usage_statistics().total_checkouts;

        assert!(!analytics.process_checkout("M999", "B001", date(20)));
        assert!(!analytics.process_checkout("M001", "B999", date(20)));
        assert!(!analytics.process_checkout("M999", "B999", date(20)));

        assert_eq!(analytics.get_usage_statistics().total_checkouts, before);
        assert_eq!(analytics.book("B001").unwrap().total_checkouts(), 2);
        assert_eq!(analytics.member("M001").unwrap().total_checkouts(), 3);
    }

    #[test]
    fn test_total_checkouts_equals_successful_calls() {
        let mut analytics = LibraryAnalytics::new();
        analytics.add_book(Book::new("B001", "T", "A", "I"));
        analytics.add_member(Member::new("M001", "N", "E"));
        analytics.add_member(Member::new("M002", "N", "E"));

        for day in 1..=7 {
            let member = if day % 2 == 0 { "M001" } else { "M002" };
            assert!(analytics.process_checkout(member, "B001", date(day)));
        }

        let book = analytics.book("B001").unwrap();
        assert_eq!(book.total_checkouts(), 7);
        assert_eq!(book.last_checkout(), Some(date(7)));
    }

    #[test]
    fn test_sample_scenario_popularity() {
        let analytics = sample_library();
        let popular = analytics.get_most_popular_books(10);

        assert_eq!(popular.len(), 5);
        assert_eq!(popular[0].book_id, "B001");
        assert_eq!(popular[0].total_checkouts, 2);
        assert_eq!(popular[1].book_id, "B004");
        assert_eq!(popular[1].total_checkouts, 2);
        // Remaining ties (B002, B003 at 1; B005 at 0) keep registration order
        let rest: Vec<&str> = popular[2..].iter().map(|b| b.book_id.as_str()).collect();
        assert_eq!(rest, ["B002", "B003", "B005"]);
    }

    #[test]
    fn test_sample_scenario_statistics() {
        let stats = sample_library().get_usage_statistics();

        assert_eq!(stats.total_books, 5);
        assert_eq!(stats.total_members, 3);
        assert_eq!(stats.total_checkouts, 6);
        assert_eq!(stats.average_checkouts_per_book, 1.2);
    }

    #[test]
    fn test_popularity_respects_limit() {
        let analytics = sample_library();
        assert_eq!(analytics.get_most_popular_books(2).len(), 2);
        assert!(analytics.get_most_popular_books(0).is_empty());
        assert_eq!(analytics.get_most_popular_books(100).len(), 5);

        let counts: Vec<u64> = analytics
            .get_most_popular_books(5)
            .iter()
            .map(|b| b.total_checkouts)
            .collect();
        assert!(counts.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_most_active_members() {
        let active = sample_library().get_most_active_members(10);

        let ids: Vec<&str> = active.iter().map(|m| m.member_id.as_str()).collect();
        assert_eq!(ids, ["M001", "M002", "M003"]);
        assert_eq!(active[0].total_checkouts, 3);
        assert_eq!(active[1].total_checkouts, 2);
        assert_eq!(active[2].total_checkouts, 1);
    }

    #[test]
    fn test_most_active_members_ties_keep_registration_order() {
        let mut analytics = sample_library();
        analytics.add_member(Member::new("M004", "Dan Evans", "dan@example.com"));
        // M004 ties M003 at 1 checkout, M002 stays ahead at 2
        assert!(analytics.process_checkout("M004", "B005", date(20)));

        let active = analytics.get_most_active_members(10);
        let ids: Vec<&str> = active.iter().map(|m| m.member_id.as_str()).collect();
        assert_eq!(ids, ["M001", "M002", "M003", "M004"]);

        // M002 catches up with M001 at 3; M001 registered first, so stays first
        assert!(analytics.process_checkout("M002", "B005", date(21)));
        let active = analytics.get_most_active_members(10);
        assert_eq!(active[0].member_id, "M001");
        assert_eq!(active[1].member_id, "M002");
        assert_eq!(active[0].total_checkouts, active[1].total_checkouts);
    }

    #[test]
    fn test_most_active_members_respects_limit() {
        let analytics = sample_library();

        for k in 0..5 {
            assert!(analytics.get_most_active_members(k).len() <= k);
        }
        let top_two: Vec<String> = analytics
            .get_most_active_members(2)
            .into_iter()
            .map(|m| m.member_id)
            .collect();
        assert_eq!(top_two, ["M001", "M002"]);
    }

    #[test]
    fn test_books_by_author() {
        let analytics = sample_library();

        let austen = analytics.get_books_by_author("jane austen");
        assert_eq!(austen.len(), 1);
        assert_eq!(austen[0].book_id, "B004");

        assert!(analytics.get_books_by_author("Austen").is_empty());
        assert!(analytics.get_books_by_author("Unknown Author").is_empty());
    }

    #[test]
    fn test_member_checkout_history() {
        let analytics = sample_library();

        let history = analytics.get_member_checkout_history("M001");
        let ids: Vec<&str> = history.iter().map(|h| h.book_id.as_str()).collect();
        assert_eq!(ids, ["B001", "B002", "B004"]);
        assert_eq!(history[0].checkout_date, date(5));

        assert!(analytics.get_member_checkout_history("M999").is_empty());
    }

    #[test]
    fn test_process_return_keeps_counters() {
        let mut analytics = sample_library();

        assert!(analytics.process_return("M001", "B001"));
        assert!(!analytics.process_return("M001", "B001"));
        assert!(!analytics.process_return("M999", "B001"));
        assert!(!analytics.process_return("M003", "B001"));

        assert_eq!(analytics.book("B001").unwrap().total_checkouts(), 2);
        let member = analytics.member("M001").unwrap();
        assert_eq!(member.books_checked_out().len(), 2);
        assert_eq!(member.total_checkouts(), 3);
    }

    #[test]
    fn test_import_skips_duplicates() {
        let mut analytics = sample_library();

        let added = analytics.import_books(vec![
            Book::new("B001", "Dup", "X", "0"),
            Book::new("B006", "Emma", "Jane Austen", "978-0-14-143958-7"),
        ]);
        assert_eq!(added, 1);
        assert_eq!(analytics.book_count(), 6);

        let added = analytics.import_members(vec![
            Member::new("M003", "Dup", "x"),
            Member::new("M004", "Dan", "dan@example.com"),
        ]);
        assert_eq!(added, 1);
        assert_eq!(analytics.member_count(), 4);
    }

    #[test]
    fn test_empty_registry_statistics() {
        let analytics = LibraryAnalytics::new();
        let stats = analytics.get_usage_statistics();

        assert_eq!(stats.total_books, 0);
        assert_eq!(stats.total_checkouts, 0);
        assert_eq!(stats.average_checkouts_per_book, 0.0);
        assert!(analytics.get_most_popular_books(10).is_empty());
    }

    #[test]
    fn test_export_report_round_trip() {
        let analytics = sample_library();
        let path = temp_report_path();

        let written = analytics.export_report(&path).unwrap();
        assert_eq!(written, path);

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert_eq!(value["statistics"]["total_books"], 5);
        assert_eq!(value["statistics"]["total_checkouts"], 6);
        assert_eq!(value["statistics"]["average_checkouts_per_book"], 1.2);
        assert_eq!(value["most_popular_books"][0]["book_id"], "B001");
        assert_eq!(value["most_active_members"][0]["member_id"], "M001");
        assert!(value["timestamp"].is_string());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_export_report_caps_rankings_at_ten() {
        let mut analytics = LibraryAnalytics::new();
        for i in 0..12 {
            analytics.add_book(Book::new(format!("B{:03}", i), "T", "A", "I"));
            analytics.add_member(Member::new(format!("M{:03}", i), "N", "E"));
        }
        let path = temp_report_path();

        analytics.export_report(&path).unwrap();
        let report: AnalyticsReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(report.statistics.total_books, 12);
        assert_eq!(report.most_popular_books.len(), 10);
        assert_eq!(report.most_active_members.len(), 10);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_export_report_with_config() {
        let analytics = sample_library();
        let config = AnalyticsConfig {
            report_limit: 2,
            report_path: temp_report_path(),
            ..AnalyticsConfig::default()
        };

        let written = analytics.export_report_with(&config).unwrap();
        let report: AnalyticsReport =
            serde_json::from_str(&std::fs::read_to_string(&written).unwrap()).unwrap();

        assert_eq!(report.most_popular_books.len(), 2);
        assert_eq!(report.most_active_members.len(), 2);

        std::fs::remove_file(&written).unwrap();
    }

    #[test]
    fn test_export_report_unwritable_path() {
        let analytics = sample_library();
        let result = analytics.export_report(Path::new("/nonexistent/dir/report.json"));

        assert!(result.is_err());
        assert!(result.unwrap_err().downcast_ref::<std::io::Error>().is_some());
    }
}
