//! # Storage Layer
//!
//! The [`BookStore`] trait abstracts where a book document lives so the
//! command layer and API never touch the filesystem directly.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage — one JSON document on disk,
//!   with timestamped backup copies in a separate directory
//! - [`memory::InMemoryStore`]: in-memory storage for tests, holding the
//!   serialized document so save/load round-trips exercise the same wire
//!   format as the file store
//!
//! A missing document is not an error: `load` returns the default
//! single-page book, which is how `init` bootstraps a new project.

use crate::error::Result;
use crate::model::Book;

pub mod fs;
pub mod memory;

/// Abstract interface for book persistence.
pub trait BookStore {
    /// Load the book, or the default book if none has been saved yet.
    fn load(&self) -> Result<Book>;

    /// Persist the book, replacing any previous document.
    fn save(&mut self, book: &Book) -> Result<()>;

    /// Write a timestamped copy of the current document and return a
    /// human-readable label for it (file name, key, ...).
    fn backup(&mut self, book: &Book) -> Result<String>;
}
