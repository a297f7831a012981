use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, TapbookError};
use crate::session::Session;

/// Remove a page. The interactive editing context never lets a book drop
/// to zero pages; bulk edits elsewhere may still produce one, and players
/// must tolerate reading it.
pub fn run(session: &mut Session, id: &str) -> Result<CmdResult> {
    if !session.book.pages.contains(id) {
        return Err(TapbookError::PageNotFound(id.to_string()));
    }
    if session.book.pages.len() == 1 {
        return Err(TapbookError::LastPageProtected);
    }

    session.book.pages.remove(id);
    session.reconcile();

    let mut result = CmdResult::default().with_page(id);
    result.add_message(CmdMessage::success(format!("Page '{}' removed", id)));
    if let Some(current) = session.current_page() {
        result.add_message(CmdMessage::info(format!("Current page is now '{}'", current)));
    }
    Ok(result)
}
