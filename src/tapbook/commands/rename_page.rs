use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, TapbookError};
use crate::session::Session;

/// Move a page to a new id. The entry lands at the tail of the page order;
/// ids are identity here, position after a rename is tolerated drift.
pub fn run(session: &mut Session, old_id: &str, new_id: &str) -> Result<CmdResult> {
    if new_id.is_empty() {
        return Err(TapbookError::InvalidPageId("(empty)".to_string()));
    }
    if new_id == old_id {
        return Err(TapbookError::InvalidPageId(format!(
            "'{}' is already the page's id",
            new_id
        )));
    }
    if session.book.pages.contains(new_id) {
        return Err(TapbookError::DuplicatePage(new_id.to_string()));
    }

    let page = session
        .book
        .pages
        .remove(old_id)
        .ok_or_else(|| TapbookError::PageNotFound(old_id.to_string()))?;
    session.book.pages.insert(new_id, page);
    if session.current_page() == Some(old_id) {
        session.set_current_page(new_id);
    }

    let mut result = CmdResult::default().with_page(new_id);
    result.add_message(CmdMessage::success(format!(
        "Page '{}' renamed to '{}'",
        old_id, new_id
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Book, Page};

    fn session() -> Session {
        let mut book = Book::new();
        book.pages.insert(
            "p1",
            Page {
                image: "cover.webp".into(),
                ..Default::default()
            },
        );
        book.pages.insert("p2", Page::default());
        Session::new(book)
    }

    #[test]
    fn rename_moves_the_page_value() {
        let mut s = session();
        run(&mut s, "p1", "cover").unwrap();
        assert!(!s.book.pages.contains("p1"));
        assert_eq!(s.book.page("cover").unwrap().image, "cover.webp");
    }

    #[test]
    fn rename_follows_the_current_page_cursor() {
        let mut s = session();
        assert_eq!(s.current_page(), Some("p1"));
        run(&mut s, "p1", "cover").unwrap();
        assert_eq!(s.current_page(), Some("cover"));
    }

    #[test]
    fn empty_same_and_taken_ids_are_rejected() {
        let mut s = session();
        assert!(matches!(
            run(&mut s, "p1", "").unwrap_err(),
            TapbookError::InvalidPageId(_)
        ));
        assert!(matches!(
            run(&mut s, "p1", "p1").unwrap_err(),
            TapbookError::InvalidPageId(_)
        ));
        assert!(matches!(
            run(&mut s, "p1", "p2").unwrap_err(),
            TapbookError::DuplicatePage(_)
        ));
        assert!(s.book.pages.contains("p1"));
    }

    #[test]
    fn renaming_a_missing_page_fails() {
        let mut s = session();
        assert!(matches!(
            run(&mut s, "ghost", "new").unwrap_err(),
            TapbookError::PageNotFound(_)
        ));
    }
}
