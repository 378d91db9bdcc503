//! # Application State
//!
//! Core business state for tarefa. Domain logic only - no TUI-specific
//! types. Presentation state (focus, scroll, cursor) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── tasks: TaskList               // the ordered, unique task list
//! ├── pending_input: String         // text field contents, not yet committed
//! ├── dialog: Option<Dialog>        // blocking alert / delete confirmation
//! ├── status_message: String        // title bar text
//! ├── hydrated: bool                // startup load has been applied
//! ├── mutated_before_hydration: bool
//! └── saves_blocked: bool           // stored value could not be read
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::task_list::{TaskList, ValidationError};

pub const ALERT_TITLE: &str = "Atenção";
pub const CONFIRM_DELETE_TITLE: &str = "Deletar Task";
pub const CONFIRM_DELETE_MESSAGE: &str = "Tem certeza que deseja deletar esta tarefa?";

/// A blocking dialog. While one is open, the rest of the screen ignores input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    /// Single-button ("OK") notice.
    Alert { title: String, message: String },
    /// Two-button ("Cancel" / "OK") prompt guarding a delete.
    ConfirmDelete { task: String },
}

impl Dialog {
    pub fn validation(error: ValidationError) -> Self {
        Dialog::Alert {
            title: ALERT_TITLE.to_string(),
            message: error.alert_message().to_string(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Dialog::Alert { title, .. } => title,
            Dialog::ConfirmDelete { .. } => CONFIRM_DELETE_TITLE,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Dialog::Alert { message, .. } => message,
            Dialog::ConfirmDelete { .. } => CONFIRM_DELETE_MESSAGE,
        }
    }

    /// Button labels, left to right.
    pub fn buttons(&self) -> &'static [&'static str] {
        match self {
            Dialog::Alert { .. } => &["OK"],
            Dialog::ConfirmDelete { .. } => &["Cancel", "OK"],
        }
    }
}

pub struct App {
    pub tasks: TaskList,
    pub pending_input: String,
    pub dialog: Option<Dialog>,
    pub status_message: String,
    /// True once the startup load has been applied (or failed).
    pub hydrated: bool,
    /// True if the user committed a mutation before hydration arrived.
    pub mutated_before_hydration: bool,
    /// True if the startup load could not read storage. Saves stay off for
    /// the session so the unread value is never overwritten.
    pub saves_blocked: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            tasks: TaskList::new(),
            pending_input: String::new(),
            dialog: None,
            status_message: String::from("Carregando tarefas..."),
            hydrated: false,
            mutated_before_hydration: false,
            saves_blocked: false,
        }
    }

    /// Whether a mutation may be written to storage now. Before hydration the
    /// stored value has not been read yet, and writing would clobber it.
    pub fn can_persist(&self) -> bool {
        self.hydrated && !self.saves_blocked
    }

    /// The task awaiting delete confirmation, if any.
    pub fn pending_delete(&self) -> Option<&str> {
        match &self.dialog {
            Some(Dialog::ConfirmDelete { task }) => Some(task),
            _ => None,
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
