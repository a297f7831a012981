use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, TapbookError};
use crate::session::Session;

pub fn run(session: &mut Session, page_id: &str, index: usize) -> Result<CmdResult> {
    let page = session.book.page_mut(page_id)?;
    if index >= page.buttons.len() {
        return Err(TapbookError::ButtonNotFound {
            page: page_id.to_string(),
            index,
        });
    }
    page.buttons.remove(index);

    // Keep the selection meaningful: a dangling cursor is dropped, one
    // past the removal point shifts down with the buttons.
    if session.current_page() == Some(page_id) {
        match session.selected_button() {
            Some(sel) if sel == index => session.set_selected_button(None),
            Some(sel) if sel > index => session.set_selected_button(Some(sel - 1)),
            _ => {}
        }
    }

    let mut result = CmdResult::default().with_page(page_id).with_button(index);
    result.add_message(CmdMessage::success(format!(
        "Button {} deleted from '{}'",
        index + 1,
        page_id
    )));
    Ok(result)
}
