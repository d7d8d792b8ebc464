// 📚 Book Entity - Catalog entry + cumulative checkout counters
//
// "total_checkouts" means EVER checked out, not currently checked out.
// Returning a book never decrements it and never closes a history record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// CHECKOUT RECORD
// ============================================================================

/// One entry in a book's checkout history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookCheckout {
    pub member_id: String,
    pub checkout_date: DateTime<Utc>,
}

// ============================================================================
// BOOK ENTITY
// ============================================================================

/// A book in the library catalog
///
/// Bibliographic fields are fixed at creation. The counters are derived and
/// only move through `record_checkout`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    /// Unique key inside the registry
    pub book_id: String,
    pub title: String,
    pub author: String,
    /// Opaque, never validated
    pub isbn: String,

    total_checkouts: u64,
    last_checkout: Option<DateTime<Utc>>,
    checkout_history: Vec<BookCheckout>,
}

impl Book {
    pub fn new(
        book_id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        Book {
            book_id: book_id.into(),
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            total_checkouts: 0,
            last_checkout: None,
            checkout_history: Vec::new(),
        }
    }

    /// Record a checkout of this book by `member_id`
    ///
    /// The member id is not validated here; the registry does that.
    pub fn record_checkout(&mut self, member_id: &str, checkout_date: DateTime<Utc>) {
        self.total_checkouts += 1;
        self.checkout_history.push(BookCheckout {
            member_id: member_id.to_string(),
            checkout_date,
        });
        self.last_checkout = Some(checkout_date);
    }

    /// Number of times this book has ever been checked out
    pub fn total_checkouts(&self) -> u64 {
        self.total_checkouts
    }

    pub fn last_checkout(&self) -> Option<DateTime<Utc>> {
        self.last_checkout
    }

    pub fn checkout_history(&self) -> &[BookCheckout] {
        &self.checkout_history
    }

    /// Case-insensitive exact author match
    pub fn is_by(&self, author: &str) -> bool {
        self.author.to_lowercase() == author.to_lowercase()
    }

    /// Point-in-time snapshot for reports
    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            book_id: self.book_id.clone(),
            title: self.title.clone(),
            author: self.author.clone(),
            isbn: self.isbn.clone(),
            total_checkouts: self.total_checkouts,
            last_checkout: self.last_checkout,
        }
    }
}

// ============================================================================
// BOOK SNAPSHOT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub total_checkouts: u64,
    pub last_checkout: Option<DateTime<Utc>>,
}

impl BookSnapshot {
    pub fn summary(&self) -> String {
        format!(
            "{} by {} ({} checkouts)",
            self.title, self.author, self.total_checkouts
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================
