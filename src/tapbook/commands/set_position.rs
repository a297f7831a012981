use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, TapbookError};
use crate::session::Session;

/// Place a button at explicit canvas coordinates. Unlike the drag path
/// (which clamps), typed-in coordinates outside [0, 1] are rejected so a
/// slipped keystroke doesn't silently teleport the hotspot to an edge.
pub fn run(session: &mut Session, page_id: &str, index: usize, x: f64, y: f64) -> Result<CmdResult> {
    if !(0.0..=1.0).contains(&x) || !(0.0..=1.0).contains(&y) {
        return Err(TapbookError::OutOfRange(format!(
            "coordinates ({}, {}) must be within [0, 1]",
            x, y
        )));
    }

    let button = session.book.button_mut(page_id, index)?;
    button.x = x;
    button.y = y;

    let mut result = CmdResult::default().with_page(page_id).with_button(index);
    result.add_message(CmdMessage::success(format!(
        "Button {} placed at ({:.3}, {:.3})",
        index + 1,
        x,
        y
    )));
    Ok(result)
}
