use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::session::Session;

/// Replace a page's sequence from delimited text. Authors paste these from
/// spreadsheets and IMEs, so both the ASCII and the full-width comma are
/// delimiters and non-numeric tokens are dropped without complaint.
/// Negative entries are kept: they park a slot so it resolves to nothing.
pub fn run(session: &mut Session, page_id: &str, text: &str) -> Result<CmdResult> {
    let sequence = parse_sequence(text);
    let page = session.book.page_mut(page_id)?;
    let count = sequence.len();
    page.sequence = sequence;

    let mut result = CmdResult::default().with_page(page_id);
    result.add_message(CmdMessage::success(format!(
        "Sequence on '{}' replaced ({} entr{})",
        page_id,
        count,
        if count == 1 { "y" } else { "ies" }
    )));
    Ok(result)
}

pub fn parse_sequence(text: &str) -> Vec<i64> {
    text.split([',', '，'])
        .filter_map(|token| token.trim().parse::<i64>().ok())
        .collect()
}
