//! # Media resolution
//!
//! Pure functions that turn `(Book, page id, Button)` into a concrete media
//! reference. No side effects and no UI dependency; safe to call repeatedly
//! and from anywhere.
//!
//! Resolution priority, first match wins:
//!
//! 1. Non-empty override that looks absolute (`http://`, `https://`, or a
//!    leading `/`): used verbatim.
//! 2. Non-empty relative override: `audio_base` (normalized to end in `/`)
//!    prepended.
//! 3. No override: `page.sequence[button.pos]` indexes the audio pool.
//!    Any out-of-range hop is an [`InvalidSequenceIndex`] error value —
//!    "nothing to play", never a panic.
//!
//! [`InvalidSequenceIndex`]: crate::error::TapbookError::InvalidSequenceIndex

use crate::error::{Result, TapbookError};
use crate::model::{Book, Button};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Audio => write!(f, "audio"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

/// A resolved, playable media reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRef {
    pub url: String,
    pub kind: MediaKind,
}

/// Ensure the audio base ends with a path separator before concatenation.
pub fn normalize_base(base: &str) -> String {
    if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{}/", base)
    }
}

/// Classify a URL by file extension. `mp4`, `webm` and `ogg` go to the
/// video sink; everything else (including extensionless URLs) is audio.
/// `ogg` on the video side is a known wart: books shipped against players
/// that route it there, so reclassifying would re-route existing content.
pub fn classify(url: &str) -> MediaKind {
    let ext = url.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "mp4" | "webm" | "ogg" => MediaKind::Video,
        _ => MediaKind::Audio,
    }
}

fn is_absolute(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://") || path.starts_with('/')
}

/// Resolve one button against the book. See the module docs for the
/// priority rules.
pub fn resolve(book: &Book, page_id: &str, button: &Button) -> Result<MediaRef> {
    if button.has_override() {
        let path = button.r#override.as_deref().unwrap_or_default();
        let url = if is_absolute(path) {
            path.to_string()
        } else {
            format!("{}{}", normalize_base(&book.audio_base), path)
        };
        return Ok(MediaRef {
            kind: classify(&url),
            url,
        });
    }

    let page = book.page(page_id)?;
    let fail = || TapbookError::InvalidSequenceIndex {
        page: page_id.to_string(),
        pos: button.pos,
    };
    let pool_index = *page.sequence.get(button.pos).ok_or_else(fail)?;
    if pool_index < 0 || pool_index as usize >= book.audio_pool.len() {
        return Err(fail());
    }
    let url = format!(
        "{}{}",
        normalize_base(&book.audio_base),
        book.audio_pool[pool_index as usize]
    );
    Ok(MediaRef {
        kind: classify(&url),
        url,
    })
}

/// The distinct media URLs one page can reach, in button order.
/// Players use this to warm caches before the reader gets there;
/// unresolvable buttons are simply left out of the plan.
pub fn page_preload_urls(book: &Book, page_id: &str) -> Result<Vec<MediaRef>> {
    let page = book.page(page_id)?;
    let mut plan: Vec<MediaRef> = Vec::new();
    for button in &page.buttons {
        if let Ok(media) = resolve(book, page_id, button) {
            if !plan.iter().any(|m| m.url == media.url) {
                plan.push(media);
            }
        }
    }
    Ok(plan)
}
