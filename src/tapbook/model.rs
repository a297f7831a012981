//! # Domain Model: the Book document
//!
//! A [`Book`] is the root document both the editor and the player consume:
//! a flat pool of audio filenames, a directory prefix for resolving them,
//! and an ordered set of [`Page`]s. Each page carries a background image,
//! an audio-index [`Page::sequence`], and the tappable [`Button`]s.
//!
//! ## Ordering is data
//!
//! Page order is navigation order and button order is tab/auto-play order,
//! so both must survive save/load byte-for-byte. JSON objects carry their
//! key order on the wire, which is why `pages` is a [`PageMap`] (an
//! insertion-ordered map with unique keys) rather than a hash map.
//!
//! ## Leniency on load
//!
//! Documents in the wild are partially populated. Every field defaults:
//! missing `pages` is an empty map, missing `audioPool` an empty pool,
//! missing `imageSettings` is portrait, missing `audioBase` is `"audio/"`.
//! Sequence entries may even be negative (authors use them to park a slot);
//! the resolver rejects those per-lookup instead of the model rejecting the
//! document.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, TapbookError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Orientation::Portrait => write!(f, "portrait"),
            Orientation::Landscape => write!(f, "landscape"),
        }
    }
}

/// Layout hints for a page image. Preserved verbatim; the core never
/// interprets orientation beyond carrying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ImageSettings {
    #[serde(default)]
    pub orientation: Orientation,
}

/// A tappable hotspot. `x`/`y` are fractions of the page canvas, kept in
/// [0, 1] by every mutation path. `pos` indexes the owning page's
/// `sequence`, not the audio pool. A non-empty `override` bypasses
/// pos/sequence resolution entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Button {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub pos: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#override: Option<String>,
}

impl Button {
    pub fn new(x: f64, y: f64, pos: usize) -> Self {
        Self {
            x: clamp_unit(x),
            y: clamp_unit(y),
            pos,
            r#override: None,
        }
    }

    /// True when the override is present and non-empty. Documents edited by
    /// hand sometimes carry `"override": ""`, which means "no override".
    pub fn has_override(&self) -> bool {
        self.r#override.as_deref().is_some_and(|o| !o.is_empty())
    }
}

pub(crate) fn clamp_unit(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Page {
    #[serde(default)]
    pub image: String,
    #[serde(default, rename = "imageSettings")]
    pub image_settings: ImageSettings,
    #[serde(default)]
    pub sequence: Vec<i64>,
    #[serde(default)]
    pub buttons: Vec<Button>,
}

/// Insertion-ordered map from page id to [`Page`].
///
/// Serialized as a plain JSON object; the object's key order is the page
/// order, so round-trips preserve navigation order. Keys are unique:
/// inserting an existing id replaces the page in place without moving it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageMap {
    entries: Vec<(String, Page)>,
}

impl PageMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == id)
    }

    pub fn get(&self, id: &str) -> Option<&Page> {
        self.entries.iter().find(|(k, _)| k == id).map(|(_, p)| p)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Page> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == id)
            .map(|(_, p)| p)
    }

    /// Insert or replace. A new id is appended at the end of the order; an
    /// existing id keeps its position.
    pub fn insert(&mut self, id: impl Into<String>, page: Page) {
        let id = id.into();
        match self.get_mut(&id) {
            Some(slot) => *slot = page,
            None => self.entries.push((id, page)),
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Page> {
        let idx = self.entries.iter().position(|(k, _)| k == id)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Page)> {
        self.entries.iter().map(|(k, p)| (k.as_str(), p))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn first_id(&self) -> Option<&str> {
        self.entries.first().map(|(k, _)| k.as_str())
    }
}

impl Serialize for PageMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, page) in &self.entries {
            map.serialize_entry(id, page)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PageMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct PageMapVisitor;

        impl<'de> Visitor<'de> for PageMapVisitor {
            type Value = PageMap;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of page id to page")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut pages = PageMap::new();
                while let Some((id, page)) = access.next_entry::<String, Page>()? {
                    // Duplicate keys in hand-edited JSON: last one wins,
                    // keeping the first occurrence's position.
                    pages.insert(id, page);
                }
                Ok(pages)
            }
        }

        deserializer.deserialize_map(PageMapVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(default = "default_audio_base", rename = "audioBase")]
    pub audio_base: String,
    #[serde(default, rename = "audioPool")]
    pub audio_pool: Vec<String>,
    #[serde(default)]
    pub pages: PageMap,
}

fn default_audio_base() -> String {
    "audio/".to_string()
}

/// Fresh pages start with a three-slot sequence so the first buttons
/// authors drop on them resolve without extra setup.
pub const DEFAULT_SEQUENCE: [i64; 3] = [0, 1, 2];

impl Default for Book {
    fn default() -> Self {
        Self {
            audio_base: default_audio_base(),
            audio_pool: Vec::new(),
            pages: PageMap::new(),
        }
    }
}

impl Book {
    pub fn new() -> Self {
        Self::default()
    }

    /// The document a brand-new project starts from: a single empty page
    /// wired to the first three pool slots. Never fewer than one page, so
    /// the last-page guard holds from the first save onward.
    pub fn starter() -> Self {
        let mut book = Self::new();
        book.pages.insert(
            "page1",
            Page {
                sequence: DEFAULT_SEQUENCE.to_vec(),
                ..Default::default()
            },
        );
        book
    }

    /// Parse a serialized book. Unparseable input is a hard failure; the
    /// caller decides whether to substitute a default document.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(TapbookError::MalformedDocument)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(TapbookError::Serialization)
    }

    pub fn page(&self, id: &str) -> Result<&Page> {
        self.pages
            .get(id)
            .ok_or_else(|| TapbookError::PageNotFound(id.to_string()))
    }

    pub fn page_mut(&mut self, id: &str) -> Result<&mut Page> {
        self.pages
            .get_mut(id)
            .ok_or_else(|| TapbookError::PageNotFound(id.to_string()))
    }

    pub fn button(&self, page_id: &str, index: usize) -> Result<&Button> {
        self.page(page_id)?
            .buttons
            .get(index)
            .ok_or_else(|| TapbookError::ButtonNotFound {
                page: page_id.to_string(),
                index,
            })
    }

    pub fn button_mut(&mut self, page_id: &str, index: usize) -> Result<&mut Button> {
        self.page_mut(page_id)?
            .buttons
            .get_mut(index)
            .ok_or_else(|| TapbookError::ButtonNotFound {
                page: page_id.to_string(),
                index,
            })
    }

    /// Number of buttons on the pages preceding `page_id` in book order.
    /// Players label hotspots with a book-global number; this is the offset
    /// the page's local indices are shifted by.
    pub fn global_button_offset(&self, page_id: &str) -> usize {
        self.pages
            .iter()
            .take_while(|(id, _)| *id != page_id)
            .map(|(_, p)| p.buttons.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book() -> Book {
        let mut book = Book::new();
        book.audio_pool = vec!["a.mp3".into(), "b.mp3".into()];
        let mut p1 = Page {
            image: "x.webp".into(),
            sequence: vec![1, 0],
            ..Default::default()
        };
        p1.buttons.push(Button::new(0.5, 0.5, 0));
        book.pages.insert("p1", p1);
        book.pages.insert("p2", Page::default());
        book
    }

    #[test]
    fn button_new_clamps_coordinates() {
        let b = Button::new(-0.2, 1.7, 3);
        assert_eq!(b.x, 0.0);
        assert_eq!(b.y, 1.0);
        assert_eq!(b.pos, 3);
    }

    #[test]
    fn empty_override_counts_as_absent() {
        let mut b = Button::new(0.1, 0.1, 0);
        assert!(!b.has_override());
        b.r#override = Some(String::new());
        assert!(!b.has_override());
        b.r#override = Some("clip.wav".into());
        assert!(b.has_override());
    }

    #[test]
    fn page_map_keeps_insertion_order() {
        let mut pages = PageMap::new();
        pages.insert("intro", Page::default());
        pages.insert("middle", Page::default());
        pages.insert("end", Page::default());
        let ids: Vec<&str> = pages.ids().collect();
        assert_eq!(ids, vec!["intro", "middle", "end"]);
    }

    #[test]
    fn page_map_insert_existing_keeps_position() {
        let mut pages = PageMap::new();
        pages.insert("a", Page::default());
        pages.insert("b", Page::default());
        pages.insert(
            "a",
            Page {
                image: "new.webp".into(),
                ..Default::default()
            },
        );
        let ids: Vec<&str> = pages.ids().collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(pages.get("a").unwrap().image, "new.webp");
    }

    #[test]
    fn round_trip_preserves_order_and_values() {
        let book = sample_book();
        let json = book.to_json().unwrap();
        let parsed = Book::from_json(&json).unwrap();
        assert_eq!(parsed, book);
        let ids: Vec<&str> = parsed.pages.ids().collect();
        assert_eq!(ids, vec!["p1", "p2"]);
    }

    #[test]
    fn wire_field_names_match_the_document_contract() {
        let json = sample_book().to_json().unwrap();
        assert!(json.contains("\"audioBase\""));
        assert!(json.contains("\"audioPool\""));
        // No override on the sample button, so the key is omitted entirely.
        assert!(!json.contains("\"override\""));
    }

    #[test]
    fn lenient_load_fills_defaults() {
        let book = Book::from_json("{}").unwrap();
        assert_eq!(book.audio_base, "audio/");
        assert!(book.audio_pool.is_empty());
        assert!(book.pages.is_empty());

        let book = Book::from_json(r#"{"pages":{"p1":{}}}"#).unwrap();
        let page = book.page("p1").unwrap();
        assert_eq!(page.image, "");
        assert_eq!(page.image_settings.orientation, Orientation::Portrait);
        assert!(page.sequence.is_empty());
        assert!(page.buttons.is_empty());
    }

    #[test]
    fn negative_sequence_entries_survive_load() {
        let book = Book::from_json(r#"{"pages":{"p1":{"sequence":[2,-1,0]}}}"#).unwrap();
        assert_eq!(book.page("p1").unwrap().sequence, vec![2, -1, 0]);
    }

    #[test]
    fn malformed_document_is_a_hard_error() {
        let err = Book::from_json("{not json").unwrap_err();
        assert!(matches!(err, TapbookError::MalformedDocument(_)));
    }

    #[test]
    fn global_button_offset_counts_preceding_pages() {
        let mut book = sample_book();
        book.pages
            .get_mut("p2")
            .unwrap()
            .buttons
            .push(Button::new(0.2, 0.2, 0));
        book.pages.insert("p3", Page::default());
        assert_eq!(book.global_button_offset("p1"), 0);
        assert_eq!(book.global_button_offset("p2"), 1);
        assert_eq!(book.global_button_offset("p3"), 2);
    }

    #[test]
    fn orientation_round_trips_lowercase() {
        let json = serde_json::to_string(&ImageSettings {
            orientation: Orientation::Landscape,
        })
        .unwrap();
        assert_eq!(json, r#"{"orientation":"landscape"}"#);
    }
}
