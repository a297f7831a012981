use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Page, DEFAULT_SEQUENCE};
use crate::session::Session;

pub fn run(session: &mut Session) -> Result<CmdResult> {
    let id = fresh_page_id(session);
    session.book.pages.insert(
        id.clone(),
        Page {
            sequence: DEFAULT_SEQUENCE.to_vec(),
            ..Default::default()
        },
    );
    session.set_current_page(id.clone());
    session.set_selected_button(None);

    let mut result = CmdResult::default().with_page(id.clone());
    result.add_message(CmdMessage::success(format!("Page '{}' created", id)));
    Ok(result)
}

/// `page{count+1}`, probing forward past any author-chosen ids that
/// already occupy the candidate name.
fn fresh_page_id(session: &Session) -> String {
    let mut n = session.book.pages.len() + 1;
    loop {
        let candidate = format!("page{}", n);
        if !session.book.pages.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
