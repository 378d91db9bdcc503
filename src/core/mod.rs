//! # Core Application Logic
//!
//! This module contains tarefa's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • TaskList (the data)  │
//!                    │  • App (root state)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect::Persist
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │  Storage   │
//!     │  Adapter   │                          │ (key-value)│
//!     │ (ratatui)  │                          │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`task_list`]: The `TaskList` type and its add/remove rules
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`config`]: Config file, env var and CLI resolution

pub mod action;
pub mod config;
pub mod state;
pub mod task_list;
