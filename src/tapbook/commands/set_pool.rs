use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::session::Session;

/// Replace the book-wide audio pool from a newline- or comma-separated
/// listing. Blank entries are dropped; order is significant because the
/// pool is index-addressed by every page sequence.
pub fn run(session: &mut Session, text: &str) -> Result<CmdResult> {
    let pool: Vec<String> = text
        .split(['\n', ','])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    let count = pool.len();
    session.book.audio_pool = pool;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Audio pool replaced ({} file{})",
        count,
        if count == 1 { "" } else { "s" }
    )));
    Ok(result)
}
