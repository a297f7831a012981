use crate::commands::{CmdMessage, CmdResult, MoveDirection};
use crate::error::{Result, TapbookError};
use crate::session::Session;

/// Swap a button with its neighbour in the array. This is the variant that
/// reorders tab and auto-play order; the buttons keep their own `pos`
/// values, so their audio mapping travels with them. Moving past either end
/// is a no-op with a warning, not an error.
pub fn run(
    session: &mut Session,
    page_id: &str,
    index: usize,
    direction: MoveDirection,
) -> Result<CmdResult> {
    let page = session.book.page_mut(page_id)?;
    if index >= page.buttons.len() {
        return Err(TapbookError::ButtonNotFound {
            page: page_id.to_string(),
            index,
        });
    }

    let target = match direction {
        MoveDirection::Up => index.checked_sub(1),
        MoveDirection::Down => {
            let down = index + 1;
            (down < page.buttons.len()).then_some(down)
        }
    };

    let mut result = CmdResult::default().with_page(page_id);
    let Some(target) = target else {
        result.add_message(CmdMessage::warning(format!(
            "Button {} is already at the {} of '{}'",
            index + 1,
            match direction {
                MoveDirection::Up => "top",
                MoveDirection::Down => "bottom",
            },
            page_id
        )));
        return Ok(result);
    };

    page.buttons.swap(index, target);
    if session.current_page() == Some(page_id) {
        session.set_selected_button(Some(target));
    }

    result.affected_buttons.push(target);
    result.add_message(CmdMessage::success(format!(
        "Button {} moved to slot {} on '{}'",
        index + 1,
        target + 1,
        page_id
    )));
    Ok(result)
}
