//! Data models for the Book List API

pub mod author;
pub mod book;

// Re-export commonly used types
pub use author::{Author, CreateAuthor, PatchAuthor, ReplaceAuthor};
pub use book::{AuthorRef, Book, CreateBook, PatchBook, ReplaceBook};
