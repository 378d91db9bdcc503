//! # TitleBar Component
//!
//! Top line: app title, task count and the last status message.
//!
//! Stateless; every field is a prop set by the parent each frame:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(app.tasks.len(), app.status_message.clone());
//! title_bar.render(frame, title_area);
//! ```
//!
//! The text changes with state:
//!
//! 1. **Status message**: `"To do List ✓ (3) | Tarefa adicionada"`
//! 2. **Default**: `"To do List ✓ (3)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub const APP_TITLE: &str = "To do List ✓";

pub struct TitleBar {
    pub task_count: usize,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(task_count: usize, status_message: String) -> Self {
        Self {
            task_count,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                APP_TITLE,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" ({})", self.task_count),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                self.status_message.clone(),
                Style::default().fg(Color::Gray),
            ));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
