//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: title, task count and status message
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `InputBox`: the task entry field (owns buffer + cursor)
//! - `TaskListView` / `TaskListState`: scrollable rows with delete icons
//! - `DialogView` / `DialogState`: modal alert and delete confirmation
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as props, never by reaching into `App`:
//!
//! ```rust,ignore
//! // Good: dependencies are explicit
//! TaskListView::new(&app.tasks, &mut tui.task_list, focused).render(frame, area);
//!
//! // Bad: hidden dependency on global state
//! task_list.render(frame, area); // reads from global App
//! ```
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (top line)
//! ├── task_list.rs     (rows + hit testing)
//! ├── dialog.rs        (modal overlay)
//! └── input_box/       (entry field + cursor)
//! ```

pub mod dialog;
pub mod input_box;
pub mod task_list;
mod title_bar;

pub use dialog::{DialogEvent, DialogState, DialogView};
pub use input_box::{InputBox, InputEvent};
pub use task_list::{TaskListState, TaskListView};
pub use title_bar::TitleBar;
