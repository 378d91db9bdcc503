//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard and mouse events into `core::Action` values, and runs
//! the effects `update()` asks for.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Focus
//!
//! The text field plays the role of a phone's on-screen keyboard: while it
//! has focus, typing edits the pending input. `Effect::DismissKeyboard` moves
//! focus to the list, where arrows select rows and Delete asks to remove one.
//! Typing anything while the list has focus jumps back to the field.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 250ms waiting for input and only
//! redraws after an event or a background action (load finished).

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::mpsc;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::layout::Rect;

use crate::core::action::{Action, Effect, update};
use crate::core::state::{App, Dialog};
use crate::core::task_list::MAX_TASK_LEN;
use crate::storage::{PersistenceAdapter, SaveQueue};
use crate::tui::component::EventHandler;
use crate::tui::components::{DialogEvent, DialogState, InputBox, InputEvent, TaskListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::ui::ClickTarget;

/// Which part of the screen receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Typing edits the task field.
    Input,
    /// Arrows move the selection, Delete removes.
    List,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub input_box: InputBox,
    pub task_list: TaskListState,
    pub focus: Focus,
    pub dialog: DialogState,
    dialog_open: bool,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            input_box: InputBox::new(MAX_TASK_LEN),
            task_list: TaskListState::new(),
            focus: Focus::Input, // User expects to type immediately
            dialog: DialogState::new(1),
            dialog_open: false,
        }
    }

    /// Pull presentation state in line with `App` after an update.
    pub fn sync(&mut self, app: &App) {
        self.input_box.set_text(&app.pending_input);
        self.task_list.clamp(app.tasks.len());

        match (&app.dialog, self.dialog_open) {
            (Some(dialog), false) => {
                self.dialog = DialogState::new(dialog.buttons().len());
                self.dialog_open = true;
            }
            (None, true) => self.dialog_open = false,
            _ => {}
        }
    }

    /// Translate one terminal event into the actions it implies.
    pub fn route_event(&mut self, event: &TuiEvent, app: &App, frame_area: Rect) -> Vec<Action> {
        if matches!(event, TuiEvent::ForceQuit) {
            return vec![Action::Quit];
        }
        if matches!(event, TuiEvent::Resize) {
            return Vec::new();
        }

        // A dialog swallows everything while it is open
        if let Some(dialog) = &app.dialog {
            return self.route_dialog_event(event, dialog, frame_area);
        }

        if let TuiEvent::MouseClick(column, row) = *event {
            return self.route_click(column, row, app, frame_area);
        }

        match self.focus {
            Focus::Input => self.route_input_event(event, app),
            Focus::List => self.route_list_event(event, app),
        }
    }

    fn route_dialog_event(&mut self, event: &TuiEvent, dialog: &Dialog, frame_area: Rect) -> Vec<Action> {
        let dialog_event = match *event {
            TuiEvent::MouseClick(column, row) => {
                let layout = components::dialog::dialog_layout(dialog, frame_area);
                components::dialog::hit_test_button(&layout, column, row).map(DialogEvent::Activate)
            }
            _ => self.dialog.handle_event(event),
        };

        let Some(dialog_event) = dialog_event else {
            return Vec::new();
        };
        let action = match (dialog, dialog_event) {
            (Dialog::Alert { .. }, _) => Action::DismissAlert,
            (Dialog::ConfirmDelete { .. }, DialogEvent::Activate(1)) => Action::ConfirmDelete,
            (Dialog::ConfirmDelete { .. }, _) => Action::CancelDelete,
        };
        vec![action]
    }

    fn route_click(&mut self, column: u16, row: u16, app: &App, frame_area: Rect) -> Vec<Action> {
        let target = ui::hit_test_click(
            column,
            row,
            frame_area,
            self.task_list.offset(),
            app.tasks.len(),
        );
        match target {
            Some(ClickTarget::AddButton) => vec![Action::Submit],
            Some(ClickTarget::Input) => {
                self.focus = Focus::Input;
                Vec::new()
            }
            Some(ClickTarget::Row(hit)) => {
                self.task_list.select(Some(hit.index));
                if hit.on_delete_icon
                    && let Some(task) = app.tasks.get(hit.index)
                {
                    return vec![Action::RequestDelete(task.to_string())];
                }
                self.focus = Focus::List;
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    fn route_input_event(&mut self, event: &TuiEvent, app: &App) -> Vec<Action> {
        match event {
            TuiEvent::Escape => {
                self.focus_list(app);
                Vec::new()
            }
            TuiEvent::CursorUp | TuiEvent::CursorDown | TuiEvent::Tab => {
                self.focus_list(app);
                Vec::new()
            }
            TuiEvent::ScrollUp => {
                self.task_list.select_prev(app.tasks.len());
                Vec::new()
            }
            TuiEvent::ScrollDown => {
                self.task_list.select_next(app.tasks.len());
                Vec::new()
            }
            _ => match self.input_box.handle_event(event) {
                Some(InputEvent::Submit) => vec![Action::Submit],
                Some(InputEvent::Changed(text)) => vec![Action::InputChanged(text)],
                None => Vec::new(),
            },
        }
    }

    fn route_list_event(&mut self, event: &TuiEvent, app: &App) -> Vec<Action> {
        let len = app.tasks.len();
        match event {
            TuiEvent::CursorUp | TuiEvent::ScrollUp => {
                self.task_list.select_prev(len);
                Vec::new()
            }
            TuiEvent::CursorDown | TuiEvent::ScrollDown => {
                self.task_list.select_next(len);
                Vec::new()
            }
            TuiEvent::Delete | TuiEvent::Backspace => self
                .task_list
                .selected()
                .and_then(|idx| app.tasks.get(idx))
                .map(|task| vec![Action::RequestDelete(task.to_string())])
                .unwrap_or_default(),
            TuiEvent::Submit | TuiEvent::Tab => {
                self.focus = Focus::Input;
                Vec::new()
            }
            // Typing jumps back to the field and forwards the keystroke
            TuiEvent::InputChar(_) | TuiEvent::Paste(_) => {
                self.focus = Focus::Input;
                self.route_input_event(event, app)
            }
            _ => Vec::new(),
        }
    }

    fn focus_list(&mut self, app: &App) {
        self.focus = Focus::List;
        if self.task_list.selected().is_none() && !app.tasks.is_empty() {
            self.task_list.select(Some(app.tasks.len() - 1));
        }
    }

    /// Run effects returned by `update()`. Returns `true` on quit.
    pub fn apply_effects(&mut self, effects: &[Effect], app: &App, queue: &SaveQueue) -> bool {
        let mut quit = false;
        for effect in effects {
            match effect {
                Effect::Persist => queue.enqueue(app.tasks.to_vec()),
                Effect::DismissKeyboard => {
                    self.focus = Focus::List;
                    if !app.tasks.is_empty() {
                        self.task_list.select(Some(app.tasks.len() - 1));
                    }
                }
                Effect::Quit => quit = true,
            }
        }
        quit
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

/// Load the persisted list in the background and hand the result to the loop.
fn spawn_load(adapter: PersistenceAdapter, tx: mpsc::Sender<Action>) {
    info!(
        "Loading tasks from {} store (key {:?})",
        adapter.store_name(),
        adapter.key()
    );
    tokio::spawn(async move {
        let outcome = adapter.load().await;
        if tx.send(Action::Hydrated(outcome)).is_err() {
            warn!("Failed to deliver loaded tasks: receiver dropped");
        }
    });
}

/// Run the UI until the user quits. Must be called inside a tokio runtime;
/// saves are handed to `queue` and the caller is expected to drain it.
pub fn run(adapter: PersistenceAdapter, queue: &SaveQueue) -> std::io::Result<()> {
    let mut app = App::new();
    let mut tui = TuiState::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    spawn_load(adapter, tx);

    let mut terminal = ratatui::init();
    let terminal_mode_guard = match TerminalModeGuard::new() {
        Ok(guard) => Some(guard),
        Err(e) => {
            warn!("Failed to enable terminal modes: {}", e);
            None
        }
    };

    let mut needs_redraw = true; // Force first frame

    let result = loop {
        if needs_redraw {
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &app, &mut tui)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(std::time::Duration::from_millis(250));
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain all pending events before next draw
        let mut should_quit = false;
        let frame_area = terminal.get_frame().area();
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            for action in tui.route_event(&event, &app, frame_area) {
                let effects = update(&mut app, action);
                tui.sync(&app);
                should_quit |= tui.apply_effects(&effects, &app, queue);
            }
        }

        // Handle background task actions
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effects = update(&mut app, action);
            tui.sync(&app);
            should_quit |= tui.apply_effects(&effects, &app, queue);
        }

        if should_quit {
            info!("Quitting with {} tasks", app.tasks.len());
            break Ok(());
        }
    };

    drop(terminal_mode_guard);
    ratatui::restore();
    result
}
