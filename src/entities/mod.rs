// Entity Models
//
// Each entity has:
// - Caller-supplied identity (book_id / member_id), unique inside the registry
// - Static descriptive fields
// - Append-only checkout history
// - A serializable snapshot type for reports

pub mod book;
pub mod member;

pub use book::{Book, BookCheckout, BookSnapshot};
pub use member::{Member, MemberCheckout, MemberSnapshot};
