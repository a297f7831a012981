use super::BookStore;
use crate::error::Result;
use crate::model::Book;

/// In-memory storage for testing and development.
/// Holds the serialized document so save/load exercises the wire format.
#[derive(Default)]
pub struct InMemoryStore {
    document: Option<String>,
    backups: Vec<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn backup_count(&self) -> usize {
        self.backups.len()
    }
}

impl BookStore for InMemoryStore {
    fn load(&self) -> Result<Book> {
        match &self.document {
            Some(text) => Book::from_json(text),
            None => Ok(Book::starter()),
        }
    }

    fn save(&mut self, book: &Book) -> Result<()> {
        self.document = Some(book.to_json()?);
        Ok(())
    }

    fn backup(&mut self, book: &Book) -> Result<String> {
        self.backups.push(book.to_json()?);
        Ok(format!("backup #{}", self.backups.len()))
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Button, Page, DEFAULT_SEQUENCE};

    /// Builder for pre-populated stores.
    pub struct BookFixture {
        book: Book,
    }

    impl Default for BookFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl BookFixture {
        pub fn new() -> Self {
            Self { book: Book::new() }
        }

        pub fn with_pool(mut self, files: &[&str]) -> Self {
            self.book.audio_pool = files.iter().map(|f| f.to_string()).collect();
            self
        }

        pub fn with_page(mut self, id: &str) -> Self {
            self.book.pages.insert(
                id,
                Page {
                    sequence: DEFAULT_SEQUENCE.to_vec(),
                    ..Default::default()
                },
            );
            self
        }

        pub fn with_button(mut self, page_id: &str, x: f64, y: f64, pos: usize) -> Self {
            let page = self
                .book
                .pages
                .get_mut(page_id)
                .expect("fixture page must exist before its buttons");
            page.buttons.push(Button::new(x, y, pos));
            self
        }

        pub fn book(self) -> Book {
            self.book
        }

        pub fn store(self) -> InMemoryStore {
            let mut store = InMemoryStore::new();
            store.save(&self.book).expect("fixture book serializes");
            store
        }
    }
}
