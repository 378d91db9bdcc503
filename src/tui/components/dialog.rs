//! # Dialog Component
//!
//! Centered modal for alerts ("OK") and delete confirmation ("Cancel" / "OK").
//! The dialog content comes from `core::state::Dialog`; this module only
//! tracks which button has focus.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::core::state::Dialog;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const MAX_WIDTH: u16 = 50;
const BUTTON_GAP: u16 = 2;

/// Events emitted by the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogEvent {
    /// Button at this index was pressed.
    Activate(usize),
    /// Esc: close without choosing.
    Dismiss,
}

/// Focus state for the open dialog.
pub struct DialogState {
    pub button_count: usize,
    pub focused: usize,
}

impl DialogState {
    /// Focus starts on the first button ("Cancel" for confirmations).
    pub fn new(button_count: usize) -> Self {
        Self {
            button_count,
            focused: 0,
        }
    }

    fn last(&self) -> usize {
        self.button_count.saturating_sub(1)
    }
}

impl EventHandler for DialogState {
    type Event = DialogEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CursorLeft => {
                self.focused = self.focused.saturating_sub(1);
                None
            }
            TuiEvent::CursorRight => {
                self.focused = (self.focused + 1).min(self.last());
                None
            }
            TuiEvent::Tab => {
                self.focused = (self.focused + 1) % self.button_count.max(1);
                None
            }
            TuiEvent::Submit | TuiEvent::InputChar(' ') => Some(DialogEvent::Activate(self.focused)),
            TuiEvent::Escape => Some(DialogEvent::Dismiss),
            // Shortcuts: o/y for OK (always the last button), c/n for Cancel
            TuiEvent::InputChar('o' | 'O' | 'y' | 'Y') => Some(DialogEvent::Activate(self.last())),
            TuiEvent::InputChar('c' | 'C' | 'n' | 'N') if self.button_count > 1 => {
                Some(DialogEvent::Activate(0))
            }
            _ => None,
        }
    }
}

/// Geometry of a dialog drawn inside some area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogLayout {
    pub overlay: Rect,
    pub message_lines: Vec<String>,
    pub buttons: Vec<Rect>,
}

fn button_label(label: &str) -> String {
    format!("[ {label} ]")
}

pub fn dialog_layout(dialog: &Dialog, area: Rect) -> DialogLayout {
    let width = MAX_WIDTH.min(area.width.saturating_sub(4)).max(12);
    let inner_width = width.saturating_sub(4).max(1);

    let message_lines: Vec<String> = textwrap::wrap(dialog.message(), inner_width as usize)
        .into_iter()
        .map(|line| line.into_owned())
        .collect();

    // border + message + blank line + buttons + border
    let height = (message_lines.len() as u16 + 4).min(area.height);
    let overlay = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width: width.min(area.width),
        height,
    };

    let labels: Vec<String> = dialog.buttons().iter().map(|b| button_label(b)).collect();
    let total: u16 = labels.iter().map(|l| l.chars().count() as u16).sum::<u16>()
        + BUTTON_GAP * labels.len().saturating_sub(1) as u16;
    // Buttons are right-aligned on the row above the bottom border
    let row = overlay.y + overlay.height.saturating_sub(2);
    let mut x = (overlay.x + overlay.width).saturating_sub(total + 2);
    let mut buttons = Vec::with_capacity(labels.len());
    for label in &labels {
        let w = label.chars().count() as u16;
        buttons.push(Rect::new(x, row, w, 1));
        x += w + BUTTON_GAP;
    }

    DialogLayout {
        overlay,
        message_lines,
        buttons,
    }
}

/// Index of the button under a click, if any.
pub fn hit_test_button(layout: &DialogLayout, column: u16, row: u16) -> Option<usize> {
    layout.buttons.iter().position(|b| {
        row == b.y && column >= b.x && column < b.x + b.width
    })
}

/// Transient render wrapper.
pub struct DialogView<'a> {
    dialog: &'a Dialog,
    state: &'a DialogState,
}

impl<'a> DialogView<'a> {
    pub fn new(dialog: &'a Dialog, state: &'a DialogState) -> Self {
        Self { dialog, state }
    }
}

impl Component for DialogView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let layout = dialog_layout(self.dialog, area);
        frame.render_widget(Clear, layout.overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Yellow))
            .title(Span::styled(
                format!(" {} ", self.dialog.title()),
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .title_alignment(Alignment::Left);

        let lines: Vec<Line> = layout
            .message_lines
            .iter()
            .map(|l| Line::from(format!(" {l}")))
            .collect();
        frame.render_widget(Paragraph::new(lines).block(block), layout.overlay);

        for (i, (label, rect)) in self.dialog.buttons().iter().zip(&layout.buttons).enumerate() {
            let style = if i == self.state.focused {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(Color::Gray)
            };
            frame.render_widget(Span::styled(button_label(label), style), *rect);
        }
    }
}
