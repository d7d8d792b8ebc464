// 👤 Member Entity - Library patron + checkout history

use crate::entities::book::Book;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry in a member's checkout history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberCheckout {
    pub book_id: String,
    pub checkout_date: DateTime<Utc>,
}

// ============================================================================
// MEMBER ENTITY
// ============================================================================

/// A registered library member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Unique key inside the registry
    pub member_id: String,
    pub name: String,
    pub email: String,

    /// Books currently held; the same id may appear more than once
    books_checked_out: Vec<String>,
    checkout_history: Vec<MemberCheckout>,
}

impl Member {
    pub fn new(
        member_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Member {
            member_id: member_id.into(),
            name: name.into(),
            email: email.into(),
            books_checked_out: Vec::new(),
            checkout_history: Vec::new(),
        }
    }

    /// Check out `book` to this member
    ///
    /// Updates both sides: the member's held list and history, then the
    /// book's counters. There is no availability check, so checking out the
    /// same book twice leaves two held entries.
    pub fn checkout_book(&mut self, book: &mut Book, checkout_date: DateTime<Utc>) {
        self.books_checked_out.push(book.book_id.clone());
        self.checkout_history.push(MemberCheckout {
            book_id: book.book_id.clone(),
            checkout_date,
        });
        book.record_checkout(&self.member_id, checkout_date);
    }

    /// Return one held copy of `book_id`
    ///
    /// Returns false if the book is not held. History and the book's
    /// checkout counters are left untouched.
    pub fn return_book(&mut self, book_id: &str) -> bool {
        match self.books_checked_out.iter().position(|id| id == book_id) {
            Some(pos) => {
                self.books_checked_out.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn books_checked_out(&self) -> &[String] {
        &self.books_checked_out
    }

    pub fn checkout_history(&self) -> &[MemberCheckout] {
        &self.checkout_history
    }

    /// Lifetime checkout count (history length)
    pub fn total_checkouts(&self) -> usize {
        self.checkout_history.len()
    }

    pub fn snapshot(&self) -> MemberSnapshot {
        MemberSnapshot {
            member_id: self.member_id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            books_currently_checked_out: self.books_checked_out.len(),
            total_checkouts: self.total_checkouts(),
        }
    }
}

// ============================================================================
// MEMBER SNAPSHOT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberSnapshot {
    pub member_id: String,
    pub name: String,
    pub email: String,
    pub books_currently_checked_out: usize,
    pub total_checkouts: usize,
}

impl MemberSnapshot {
    pub fn summary(&self) -> String {
        format!("{} ({} checkouts)", self.name, self.total_checkouts)
    }
}

// ============================================================================
// TESTS
// ============================================================================
