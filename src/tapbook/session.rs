//! Editing context: the book plus the two cursors every interactive client
//! needs (current page, selected button). Operations take the session
//! explicitly instead of reaching for ambient UI state, so the same code
//! drives the editor canvas, the player, and headless tests.

use crate::error::{Result, TapbookError};
use crate::model::Book;

#[derive(Debug, Clone)]
pub struct Session {
    pub book: Book,
    current_page: Option<String>,
    selected_button: Option<usize>,
}

impl Session {
    /// Wrap a book; the first page (if any) becomes current.
    pub fn new(book: Book) -> Self {
        let current_page = book.pages.first_id().map(str::to_string);
        Self {
            book,
            current_page,
            selected_button: None,
        }
    }

    pub fn current_page(&self) -> Option<&str> {
        self.current_page.as_deref()
    }

    pub fn selected_button(&self) -> Option<usize> {
        self.selected_button
    }

    /// Switch the current page. Selecting a page clears the button cursor.
    pub fn select_page(&mut self, id: &str) -> Result<()> {
        if !self.book.pages.contains(id) {
            return Err(TapbookError::PageNotFound(id.to_string()));
        }
        self.current_page = Some(id.to_string());
        self.selected_button = None;
        Ok(())
    }

    pub fn select_button(&mut self, index: usize) -> Result<()> {
        // No current page means the book is empty; the cursors only clear
        // when every page is gone.
        let page_id = self.current_page.clone().ok_or(TapbookError::NoPages)?;
        self.book.button(&page_id, index)?;
        self.selected_button = Some(index);
        Ok(())
    }

    pub fn clear_button_selection(&mut self) {
        self.selected_button = None;
    }

    /// Re-point the cursors after structural changes. Used by the mutation
    /// commands; a vanished current page falls back to the first page in
    /// order, a dangling button selection is dropped.
    pub(crate) fn reconcile(&mut self) {
        let current_ok = self
            .current_page
            .as_deref()
            .is_some_and(|id| self.book.pages.contains(id));
        if !current_ok {
            self.current_page = self.book.pages.first_id().map(str::to_string);
            self.selected_button = None;
        }
        if let (Some(id), Some(idx)) = (self.current_page.as_deref(), self.selected_button) {
            let count = self.book.pages.get(id).map_or(0, |p| p.buttons.len());
            if idx >= count {
                self.selected_button = None;
            }
        }
    }

    pub(crate) fn set_current_page(&mut self, id: impl Into<String>) {
        self.current_page = Some(id.into());
    }

    pub(crate) fn set_selected_button(&mut self, index: Option<usize>) {
        self.selected_button = index;
    }
}
