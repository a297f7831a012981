use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Orientation;
use crate::session::Session;

/// Update a page's background image path and/or its orientation hint.
pub fn run(
    session: &mut Session,
    page_id: &str,
    image: Option<&str>,
    orientation: Option<Orientation>,
) -> Result<CmdResult> {
    let page = session.book.page_mut(page_id)?;
    let mut result = CmdResult::default().with_page(page_id);

    if let Some(image) = image {
        page.image = image.to_string();
        result.add_message(CmdMessage::success(format!(
            "Image on '{}' set to '{}'",
            page_id, image
        )));
    }
    if let Some(orientation) = orientation {
        page.image_settings.orientation = orientation;
        result.add_message(CmdMessage::success(format!(
            "Orientation on '{}' set to {}",
            page_id, orientation
        )));
    }
    if result.messages.is_empty() {
        result.add_message(CmdMessage::info(format!("Nothing to change on '{}'", page_id)));
    }
    Ok(result)
}
