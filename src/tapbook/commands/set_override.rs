use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::session::Session;

/// Set or clear a button's explicit media path. An empty value clears the
/// override, reverting the button to pool/sequence resolution.
pub fn run(
    session: &mut Session,
    page_id: &str,
    index: usize,
    value: Option<&str>,
) -> Result<CmdResult> {
    let button = session.book.button_mut(page_id, index)?;
    let cleaned = value.map(str::trim).filter(|v| !v.is_empty());
    button.r#override = cleaned.map(str::to_string);

    let mut result = CmdResult::default().with_page(page_id).with_button(index);
    result.add_message(match cleaned {
        Some(path) => CmdMessage::success(format!("Button {} overrides to '{}'", index + 1, path)),
        None => CmdMessage::success(format!(
            "Button {} override cleared; back to sequence audio",
            index + 1
        )),
    });
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Book, Button, Page};

    fn session() -> Session {
        let mut page = Page::default();
        page.buttons.push(Button::new(0.5, 0.5, 0));
        let mut book = Book::new();
        book.pages.insert("p1", page);
        Session::new(book)
    }

    #[test]
    fn sets_and_clears_the_override() {
        let mut s = session();
        run(&mut s, "p1", 0, Some("clip.wav")).unwrap();
        assert!(s.book.button("p1", 0).unwrap().has_override());

        run(&mut s, "p1", 0, None).unwrap();
        assert_eq!(s.book.button("p1", 0).unwrap().r#override, None);
    }

    #[test]
    fn empty_and_whitespace_values_clear() {
        let mut s = session();
        run(&mut s, "p1", 0, Some("clip.wav")).unwrap();
        run(&mut s, "p1", 0, Some("   ")).unwrap();
        assert_eq!(s.book.button("p1", 0).unwrap().r#override, None);
    }

    #[test]
    fn unknown_button_is_reported() {
        let mut s = session();
        assert!(run(&mut s, "p1", 3, Some("clip.wav")).is_err());
    }
}
