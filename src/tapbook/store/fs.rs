use super::BookStore;
use crate::error::{Result, TapbookError};
use crate::model::Book;
use std::fs;
use std::path::{Path, PathBuf};

pub struct FileStore {
    book_path: PathBuf,
    backup_dir: PathBuf,
}

impl FileStore {
    pub fn new(book_path: PathBuf, backup_dir: PathBuf) -> Self {
        Self {
            book_path,
            backup_dir,
        }
    }

    pub fn book_path(&self) -> &Path {
        &self.book_path
    }

    fn ensure_dir(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(TapbookError::Io)?;
        }
        Ok(())
    }
}

impl BookStore for FileStore {
    fn load(&self) -> Result<Book> {
        if !self.book_path.exists() {
            return Ok(Book::starter());
        }
        let content = fs::read_to_string(&self.book_path).map_err(TapbookError::Io)?;
        Book::from_json(&content)
    }

    fn save(&mut self, book: &Book) -> Result<()> {
        if let Some(parent) = self.book_path.parent() {
            Self::ensure_dir(parent)?;
        }
        fs::write(&self.book_path, book.to_json()?).map_err(TapbookError::Io)?;
        Ok(())
    }

    fn backup(&mut self, book: &Book) -> Result<String> {
        Self::ensure_dir(&self.backup_dir)?;
        let stamp = chrono::Utc::now().format("%Y-%m-%d-%H-%M-%S");
        let name = format!("backup_{}.json", stamp);
        fs::write(self.backup_dir.join(&name), book.to_json()?).map_err(TapbookError::Io)?;
        Ok(name)
    }
}
