//! # Actions
//!
//! Everything that can happen in tarefa becomes an `Action`.
//! User presses Enter in the text field? That's `Action::Submit`.
//! The startup load finishes? That's `Action::Hydrated(outcome)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns the side effects the adapter must run. No I/O here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Vec<Effect>
//! ```
//!
//! ## Flows
//!
//! ```text
//! add:     Idle → Validating → { RejectedEmpty | RejectedDuplicate | Accepted } → Idle
//! delete:  Idle → ConfirmPending → { Cancelled | Confirmed } → Idle
//! ```
//!
//! While a dialog is open only dialog actions, `Hydrated` and `Quit` get
//! through; everything else is dropped.
//!
//! `Effect::Persist` is only emitted once the stored list has been read.
//! Mutations made earlier are written by the hydration save, after merging.

use log::{debug, info, warn};

use crate::core::state::{App, Dialog};
use crate::core::task_list::{MAX_TASK_LEN, TaskList, ValidationError, truncate_chars};
use crate::storage::LoadOutcome;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Text field contents changed.
    InputChanged(String),
    /// Commit `pending_input` as a new task.
    Submit,
    /// Ask for confirmation before deleting this task.
    RequestDelete(String),
    ConfirmDelete,
    CancelDelete,
    /// Close a single-button alert.
    DismissAlert,
    /// The startup load finished.
    Hydrated(LoadOutcome),
    Quit,
}

impl Action {
    fn allowed_while_dialog_open(&self) -> bool {
        matches!(
            self,
            Action::ConfirmDelete
                | Action::CancelDelete
                | Action::DismissAlert
                | Action::Hydrated(_)
                | Action::Quit
        )
    }
}

/// Side effects requested by `update()`, executed by the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Write the current task list to storage.
    Persist,
    /// Drop text input focus (the terminal's version of hiding the keyboard).
    DismissKeyboard,
    Quit,
}

/// Terminal state of the add flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Accepted,
    RejectedEmpty,
    RejectedDuplicate,
}

pub fn update(app: &mut App, action: Action) -> Vec<Effect> {
    if app.dialog.is_some() && !action.allowed_while_dialog_open() {
        debug!("Dialog open, ignoring {:?}", action);
        return Vec::new();
    }

    match action {
        Action::Quit => vec![Effect::Quit],
        Action::InputChanged(text) => {
            app.pending_input = truncate_chars(&text, MAX_TASK_LEN);
            Vec::new()
        }
        Action::Submit => match add_task(app) {
            AddOutcome::Accepted => {
                let mut effects = vec![Effect::DismissKeyboard];
                effects.extend(persist(app));
                effects
            }
            AddOutcome::RejectedDuplicate => vec![Effect::DismissKeyboard],
            AddOutcome::RejectedEmpty => Vec::new(),
        },
        Action::RequestDelete(task) => {
            debug!("Delete requested: {:?}", task);
            app.dialog = Some(Dialog::ConfirmDelete { task });
            Vec::new()
        }
        Action::ConfirmDelete => {
            let Some(task) = app.pending_delete().map(str::to_string) else {
                return Vec::new();
            };
            app.dialog = None;
            let removed = app.tasks.remove(&task);
            info!("Deleted {:?} ({} removed)", task, removed);
            app.status_message = String::from("Tarefa removida");
            note_mutation(app);
            persist(app).into_iter().collect()
        }
        Action::CancelDelete => {
            if app.pending_delete().is_some() {
                app.dialog = None;
                app.status_message = String::from("Exclusão cancelada");
            }
            Vec::new()
        }
        Action::DismissAlert => {
            if matches!(app.dialog, Some(Dialog::Alert { .. })) {
                app.dialog = None;
            }
            Vec::new()
        }
        Action::Hydrated(outcome) => hydrate(app, outcome),
    }
}

/// Run the add flow against `pending_input`.
pub fn add_task(app: &mut App) -> AddOutcome {
    let text = app.pending_input.clone();
    match app.tasks.add(&text) {
        Ok(()) => {
            info!("Added task {:?}", text);
            app.pending_input.clear();
            app.status_message = String::from("Tarefa adicionada");
            note_mutation(app);
            AddOutcome::Accepted
        }
        Err(error @ ValidationError::Empty) => {
            debug!("Rejected add: {}", error);
            app.dialog = Some(Dialog::validation(error));
            AddOutcome::RejectedEmpty
        }
        Err(error @ ValidationError::Duplicate) => {
            debug!("Rejected add of {:?}: {}", text, error);
            app.dialog = Some(Dialog::validation(error));
            app.pending_input.clear();
            AddOutcome::RejectedDuplicate
        }
    }
}

fn persist(app: &App) -> Option<Effect> {
    if app.can_persist() {
        Some(Effect::Persist)
    } else {
        debug!("Holding save (hydrated: {}, blocked: {})", app.hydrated, app.saves_blocked);
        None
    }
}

fn note_mutation(app: &mut App) {
    if !app.hydrated {
        app.mutated_before_hydration = true;
    }
}

fn hydrate(app: &mut App, outcome: LoadOutcome) -> Vec<Effect> {
    if app.hydrated {
        warn!("Ignoring repeated hydration");
        return Vec::new();
    }
    app.hydrated = true;

    match outcome {
        LoadOutcome::Absent => {
            info!("No persisted tasks");
            app.status_message = String::new();
            vec![Effect::Persist]
        }
        LoadOutcome::Restored(raw) => {
            let loaded = TaskList::from_persisted(raw);
            if app.mutated_before_hydration {
                info!(
                    "Merging {} persisted tasks with {} added before load",
                    loaded.len(),
                    app.tasks.len()
                );
                let mut merged = loaded;
                merged.merge_missing(&app.tasks);
                app.tasks = merged;
            } else {
                app.tasks = loaded;
            }
            app.status_message = format!("{} tarefas carregadas", app.tasks.len());
            vec![Effect::Persist]
        }
        LoadOutcome::Corrupt { reason } => {
            warn!("Persisted tasks unreadable, starting empty: {}", reason);
            app.status_message = String::from("Dados salvos ilegíveis; lista reiniciada");
            vec![Effect::Persist]
        }
        LoadOutcome::Unavailable { reason } => {
            // Don't overwrite data we could not read, now or later
            warn!("Storage unavailable at startup, saves disabled: {}", reason);
            app.saves_blocked = true;
            app.status_message =
                String::from("Armazenamento indisponível; alterações não serão salvas");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{hydrated_app, type_and_submit};

    #[test]
    fn test_add_to_empty_list() {
        let mut app = hydrated_app(&[]);
        let effects = type_and_submit(&mut app, "Buy milk");
        assert_eq!(app.tasks.as_slice(), ["Buy milk"]);
        assert!(app.pending_input.is_empty());
        assert_eq!(effects, vec![Effect::DismissKeyboard, Effect::Persist]);
        assert!(app.dialog.is_none());
    }

    #[test]
    fn test_add_duplicate_alerts_and_clears_input() {
        let mut app = hydrated_app(&["Buy milk"]);
        let effects = type_and_submit(&mut app, "Buy milk");
        assert_eq!(app.tasks.as_slice(), ["Buy milk"]);
        assert!(app.pending_input.is_empty());
        assert_eq!(effects, vec![Effect::DismissKeyboard]);
        assert_eq!(
            app.dialog.as_ref().map(Dialog::message),
            Some("Tarefa já existente!")
        );
    }

    #[test]
    fn test_add_empty_alerts_and_keeps_input() {
        let mut app = hydrated_app(&["Buy milk"]);
        let effects = update(&mut app, Action::Submit);
        assert!(effects.is_empty());
        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.pending_input, "");
        assert_eq!(
            app.dialog.as_ref().map(Dialog::message),
            Some("Insira uma tarefa antes de enviar!")
        );
    }

    #[test]
    fn test_confirm_delete_removes_task() {
        let mut app = hydrated_app(&["Buy milk", "Walk dog"]);
        update(&mut app, Action::RequestDelete("Walk dog".to_string()));
        assert_eq!(app.pending_delete(), Some("Walk dog"));
        assert_eq!(app.tasks.len(), 2, "Nothing changes while confirmation is pending");

        let effects = update(&mut app, Action::ConfirmDelete);
        assert_eq!(effects, vec![Effect::Persist]);
        assert_eq!(app.tasks.as_slice(), ["Buy milk"]);
        assert!(app.dialog.is_none());
    }

    #[test]
    fn test_cancel_delete_keeps_task() {
        let mut app = hydrated_app(&["Buy milk", "Walk dog"]);
        update(&mut app, Action::RequestDelete("Walk dog".to_string()));
        let effects = update(&mut app, Action::CancelDelete);
        assert!(effects.is_empty());
        assert_eq!(app.tasks.as_slice(), ["Buy milk", "Walk dog"]);
        assert!(app.dialog.is_none());
    }

    #[test]
    fn test_delete_absent_task_is_noop() {
        let mut app = hydrated_app(&["Buy milk"]);
        update(&mut app, Action::RequestDelete("Ghost".to_string()));
        update(&mut app, Action::ConfirmDelete);
        assert_eq!(app.tasks.as_slice(), ["Buy milk"]);
    }

    #[test]
    fn test_dialog_blocks_other_actions() {
        let mut app = hydrated_app(&[]);
        update(&mut app, Action::Submit);
        assert!(app.dialog.is_some());

        update(&mut app, Action::InputChanged("typed behind alert".to_string()));
        update(&mut app, Action::RequestDelete("x".to_string()));
        assert_eq!(app.pending_input, "");
        assert!(matches!(app.dialog, Some(Dialog::Alert { .. })));

        // Confirm does not close an alert
        update(&mut app, Action::ConfirmDelete);
        assert!(matches!(app.dialog, Some(Dialog::Alert { .. })));

        update(&mut app, Action::DismissAlert);
        assert!(app.dialog.is_none());
    }

    #[test]
    fn test_input_is_truncated() {
        let mut app = hydrated_app(&[]);
        update(&mut app, Action::InputChanged("a".repeat(40)));
        assert_eq!(app.pending_input.chars().count(), MAX_TASK_LEN);
    }

    #[test]
    fn test_cold_start_restores_list() {
        let mut app = App::new();
        let effects = update(
            &mut app,
            Action::Hydrated(LoadOutcome::Restored(vec!["A".into(), "B".into()])),
        );
        assert_eq!(app.tasks.as_slice(), ["A", "B"]);
        assert!(app.hydrated);
        assert_eq!(effects, vec![Effect::Persist]);
    }

    #[test]
    fn test_hydration_after_early_add_merges() {
        let mut app = App::new();
        type_and_submit(&mut app, "Typed early");
        update(
            &mut app,
            Action::Hydrated(LoadOutcome::Restored(vec!["A".into(), "Typed early".into()])),
        );
        assert_eq!(app.tasks.as_slice(), ["A", "Typed early"]);
    }

    #[test]
    fn test_no_save_before_hydration() {
        let mut app = App::new();
        let effects = type_and_submit(&mut app, "Typed early");
        assert_eq!(effects, vec![Effect::DismissKeyboard]);

        update(&mut app, Action::RequestDelete("Typed early".to_string()));
        assert!(update(&mut app, Action::ConfirmDelete).is_empty());
        assert!(app.tasks.is_empty());

        // The hydration save covers everything done before it
        let effects = update(
            &mut app,
            Action::Hydrated(LoadOutcome::Restored(vec!["A".into()])),
        );
        assert_eq!(effects, vec![Effect::Persist]);
        assert_eq!(type_and_submit(&mut app, "B"), vec![Effect::DismissKeyboard, Effect::Persist]);
    }

    #[test]
    fn test_corrupt_data_starts_empty() {
        let mut app = App::new();
        let effects = update(
            &mut app,
            Action::Hydrated(LoadOutcome::Corrupt { reason: "bad json".into() }),
        );
        assert!(app.tasks.is_empty());
        assert_eq!(effects, vec![Effect::Persist]);
    }

    #[test]
    fn test_unavailable_storage_is_not_overwritten() {
        let mut app = App::new();
        let effects = update(
            &mut app,
            Action::Hydrated(LoadOutcome::Unavailable { reason: "denied".into() }),
        );
        assert!(effects.is_empty());
        assert!(app.hydrated);
        assert!(app.saves_blocked);

        // Later edits still work in memory but are never written
        assert_eq!(type_and_submit(&mut app, "Buy milk"), vec![Effect::DismissKeyboard]);
        assert_eq!(app.tasks.as_slice(), ["Buy milk"]);
        update(&mut app, Action::RequestDelete("Buy milk".to_string()));
        assert!(update(&mut app, Action::ConfirmDelete).is_empty());
    }

    #[test]
    fn test_second_hydration_is_ignored() {
        let mut app = hydrated_app(&["A"]);
        let effects = update(
            &mut app,
            Action::Hydrated(LoadOutcome::Restored(vec!["Z".into()])),
        );
        assert!(effects.is_empty());
        assert_eq!(app.tasks.as_slice(), ["A"]);
    }

    #[test]
    fn test_quit() {
        let mut app = hydrated_app(&[]);
        assert_eq!(update(&mut app, Action::Quit), vec![Effect::Quit]);
    }
}
