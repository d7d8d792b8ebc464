// 📥 CSV Import - catalog and membership rows
//
// Books:   book_id,title,author,isbn
// Members: member_id,name,email

use crate::entities::{Book, Member};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct BookRow {
    book_id: String,
    title: String,
    author: String,
    isbn: String,
}

#[derive(Debug, Deserialize)]
struct MemberRow {
    member_id: String,
    name: String,
    email: String,
}

/// Load books from a CSV file
pub fn load_books(csv_path: &Path) -> Result<Vec<Book>> {
    let rdr = csv::Reader::from_path(csv_path)
        .with_context(|| format!("Failed to open books CSV: {:?}", csv_path))?;
    read_books(rdr)
}

/// Load members from a CSV file
pub fn load_members(csv_path: &Path) -> Result<Vec<Member>> {
    let rdr = csv::Reader::from_path(csv_path)
        .with_context(|| format!("Failed to open members CSV: {:?}", csv_path))?;
    read_members(rdr)
}

/// Load books from any CSV source (must include a header row)
pub fn load_books_from_reader<R: Read>(reader: R) -> Result<Vec<Book>> {
    read_books(csv::Reader::from_reader(reader))
}

/// Load members from any CSV source (must include a header row)
pub fn load_members_from_reader<R: Read>(reader: R) -> Result<Vec<Member>> {
    read_members(csv::Reader::from_reader(reader))
}

fn read_books<R: Read>(mut rdr: csv::Reader<R>) -> Result<Vec<Book>> {
    let mut books = Vec::new();

    for result in rdr.deserialize() {
        let row: BookRow = result.context("Failed to deserialize book row")?;
        books.push(Book::new(row.book_id, row.title, row.author, row.isbn));
    }

    Ok(books)
}

fn read_members<R: Read>(mut rdr: csv::Reader<R>) -> Result<Vec<Member>> {
    let mut members = Vec::new();

    for result in rdr.deserialize() {
        let row: MemberRow = result.context("Failed to deserialize member row")?;
        members.push(Member::new(row.member_id, row.name, row.email));
    }

    Ok(members)
}
