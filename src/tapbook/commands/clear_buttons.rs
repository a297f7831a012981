use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::session::Session;

/// Wipe every button from a page in one stroke.
pub fn run(session: &mut Session, page_id: &str) -> Result<CmdResult> {
    let page = session.book.page_mut(page_id)?;
    let count = page.buttons.len();
    page.buttons.clear();
    if session.current_page() == Some(page_id) {
        session.set_selected_button(None);
    }

    let mut result = CmdResult::default().with_page(page_id);
    result.add_message(CmdMessage::success(format!(
        "Removed {} button{} from '{}'",
        count,
        if count == 1 { "" } else { "s" },
        page_id
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add_button;
    use crate::model::{Book, Page};

    #[test]
    fn clears_all_buttons_and_the_selection() {
        let mut book = Book::new();
        book.pages.insert(
            "p1",
            Page {
                sequence: vec![0],
                ..Default::default()
            },
        );
        let mut s = Session::new(book);
        add_button::run(&mut s, "p1", 0.5, 0.5).unwrap();
        add_button::run(&mut s, "p1", 0.2, 0.2).unwrap();
        assert_eq!(s.selected_button(), Some(1));

        run(&mut s, "p1").unwrap();
        assert!(s.book.page("p1").unwrap().buttons.is_empty());
        assert_eq!(s.selected_button(), None);
    }
}
