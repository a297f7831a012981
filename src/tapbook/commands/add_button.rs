use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Button;
use crate::session::Session;

/// Append a button to a page. The default `pos` cycles through the page's
/// sequence slots (`count % sequence_len`), so dropping buttons one after
/// another walks the page audio in order without manual wiring.
pub fn run(session: &mut Session, page_id: &str, x: f64, y: f64) -> Result<CmdResult> {
    let page = session.book.page_mut(page_id)?;
    let pos = page.buttons.len() % page.sequence.len().max(1);
    page.buttons.push(Button::new(x, y, pos));
    let index = page.buttons.len() - 1;

    if session.current_page() == Some(page_id) {
        session.set_selected_button(Some(index));
    }

    let mut result = CmdResult::default().with_page(page_id).with_button(index);
    result.add_message(CmdMessage::success(format!(
        "Button {} added on '{}' (pos {})",
        index + 1,
        page_id,
        pos
    )));
    Ok(result)
}
