//! The mutation boundary. Every structural change to a [`Book`] goes
//! through exactly one `run` function in this module tree; nothing else in
//! the crate (or its clients) is allowed to restructure pages or buttons.
//! Each operation is atomic — it either applies fully or reports a failure
//! with the prior state intact — and returns a [`CmdResult`] for the UI to
//! render. Commands never print.
//!
//! [`Book`]: crate::model::Book

pub mod add_button;
pub mod add_page;
pub mod clear_buttons;
pub mod delete_button;
pub mod move_button;
pub mod remove_page;
pub mod rename_page;
pub mod set_image;
pub mod set_override;
pub mod set_pool;
pub mod set_position;
pub mod set_sequence;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Page ids touched by the operation.
    pub affected_pages: Vec<String>,
    /// Button indices touched, local to the affected page.
    pub affected_buttons: Vec<usize>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_page(mut self, id: impl Into<String>) -> Self {
        self.affected_pages.push(id.into());
        self
    }

    pub fn with_button(mut self, index: usize) -> Self {
        self.affected_buttons.push(index);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}
