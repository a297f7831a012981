//! # API Facade
//!
//! A **thin facade** over the command layer: the single entry point for
//! every tapbook client, CLI or otherwise.
//!
//! The facade:
//! - **Dispatches** each operation to its command function
//! - **Persists** the book after every successful mutation, so clients
//!   never observe a half-applied document
//! - **Returns structured types** (`Result<CmdResult>`, [`MediaRef`])
//!
//! It explicitly avoids:
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **Presentation concerns**: no stdout, no string formatting
//!
//! `TapbookApi<S: BookStore>` is generic over the storage backend —
//! `FileStore` in production, `InMemoryStore` in tests — so the whole
//! facade is testable without touching the filesystem.

use crate::commands;
use crate::error::Result;
use crate::model::{Book, Orientation};
use crate::resolver::{self, MediaRef};
use crate::session::Session;
use crate::store::BookStore;

pub struct TapbookApi<S: BookStore> {
    store: S,
    session: Session,
}

impl<S: BookStore> TapbookApi<S> {
    /// Load the stored book (or the starter book) into a fresh session.
    pub fn new(store: S) -> Result<Self> {
        let book = store.load()?;
        Ok(Self {
            store,
            session: Session::new(book),
        })
    }

    pub fn book(&self) -> &Book {
        &self.session.book
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Persist the current document as-is. Mutations save themselves; this
    /// exists for `init` and for clients that edit the session directly.
    pub fn save(&mut self) -> Result<()> {
        self.store.save(&self.session.book)
    }

    /// Write a timestamped copy of the current document; returns its label.
    pub fn backup(&mut self) -> Result<String> {
        self.store.backup(&self.session.book)
    }

    pub fn select_page(&mut self, id: &str) -> Result<()> {
        self.session.select_page(id)
    }

    pub fn select_button(&mut self, index: usize) -> Result<()> {
        self.session.select_button(index)
    }

    // --- Mutations (command dispatch + save) ---

    fn persisted(&mut self, result: Result<commands::CmdResult>) -> Result<commands::CmdResult> {
        let result = result?;
        self.store.save(&self.session.book)?;
        Ok(result)
    }

    pub fn add_page(&mut self) -> Result<commands::CmdResult> {
        let r = commands::add_page::run(&mut self.session);
        self.persisted(r)
    }

    pub fn remove_page(&mut self, id: &str) -> Result<commands::CmdResult> {
        let r = commands::remove_page::run(&mut self.session, id);
        self.persisted(r)
    }

    pub fn rename_page(&mut self, from: &str, to: &str) -> Result<commands::CmdResult> {
        let r = commands::rename_page::run(&mut self.session, from, to);
        self.persisted(r)
    }

    pub fn add_button(&mut self, page_id: &str, x: f64, y: f64) -> Result<commands::CmdResult> {
        let r = commands::add_button::run(&mut self.session, page_id, x, y);
        self.persisted(r)
    }

    pub fn delete_button(&mut self, page_id: &str, index: usize) -> Result<commands::CmdResult> {
        let r = commands::delete_button::run(&mut self.session, page_id, index);
        self.persisted(r)
    }

    pub fn move_button(
        &mut self,
        page_id: &str,
        index: usize,
        direction: commands::MoveDirection,
    ) -> Result<commands::CmdResult> {
        let r = commands::move_button::run(&mut self.session, page_id, index, direction);
        self.persisted(r)
    }

    pub fn set_position(
        &mut self,
        page_id: &str,
        index: usize,
        x: f64,
        y: f64,
    ) -> Result<commands::CmdResult> {
        let r = commands::set_position::run(&mut self.session, page_id, index, x, y);
        self.persisted(r)
    }

    pub fn set_override(
        &mut self,
        page_id: &str,
        index: usize,
        value: Option<&str>,
    ) -> Result<commands::CmdResult> {
        let r = commands::set_override::run(&mut self.session, page_id, index, value);
        self.persisted(r)
    }

    pub fn set_sequence(&mut self, page_id: &str, text: &str) -> Result<commands::CmdResult> {
        let r = commands::set_sequence::run(&mut self.session, page_id, text);
        self.persisted(r)
    }

    pub fn clear_buttons(&mut self, page_id: &str) -> Result<commands::CmdResult> {
        let r = commands::clear_buttons::run(&mut self.session, page_id);
        self.persisted(r)
    }

    pub fn set_pool(&mut self, text: &str) -> Result<commands::CmdResult> {
        let r = commands::set_pool::run(&mut self.session, text);
        self.persisted(r)
    }

    pub fn set_image(
        &mut self,
        page_id: &str,
        image: Option<&str>,
        orientation: Option<Orientation>,
    ) -> Result<commands::CmdResult> {
        let r = commands::set_image::run(&mut self.session, page_id, image, orientation);
        self.persisted(r)
    }

    // --- Queries ---

    /// Resolve one button to its playable media.
    pub fn resolve(&self, page_id: &str, index: usize) -> Result<MediaRef> {
        let button = self.session.book.button(page_id, index)?;
        resolver::resolve(&self.session.book, page_id, button)
    }

    /// The deduplicated media a player should prefetch for a page.
    pub fn preload_plan(&self, page_id: &str) -> Result<Vec<MediaRef>> {
        resolver::page_preload_urls(&self.session.book, page_id)
    }
}

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel, MoveDirection};
