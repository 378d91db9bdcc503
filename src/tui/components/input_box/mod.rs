//! # InputBox Component
//!
//! The task entry field.
//!
//! ## Responsibilities
//!
//! - Capture text input, capped at a maximum number of characters
//! - Handle editing (backspace, delete, cursor movement, paste)
//! - Emit `Submit` on Enter (validation happens in core)
//! - Show a placeholder when empty and a `n/max` counter
//!
//! ## State Management
//!
//! The field is controlled: every edit is reported as `InputEvent::Changed`,
//! and the parent pushes the committed value back with [`InputBox::set_text`]
//! after each update. The box never clears itself.

mod cursor;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::{CursorState, next_char_boundary, prev_char_boundary};

pub const PLACEHOLDER: &str = "Adicione uma tarefa";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed
    Submit,
    /// Text changed; carries the full new value
    Changed(String),
}

pub struct InputBox {
    buffer: String,
    max_chars: usize,
    /// Prop: whether the field has keyboard focus
    pub focused: bool,
    cursor: CursorState,
}

impl InputBox {
    pub fn new(max_chars: usize) -> Self {
        Self {
            buffer: String::new(),
            max_chars,
            focused: true,
            cursor: CursorState::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Replace the contents if they differ, moving the cursor to the end.
    pub fn set_text(&mut self, text: &str) {
        if self.buffer != text {
            self.buffer = text.to_string();
            self.cursor.to_end(&self.buffer);
        }
    }

    fn char_count(&self) -> usize {
        self.buffer.chars().count()
    }

    /// Insert as much of `text` as fits, skipping control characters.
    /// Returns `true` if anything was inserted.
    fn insert(&mut self, text: &str) -> bool {
        let room = self.max_chars.saturating_sub(self.char_count());
        let accepted: String = text.chars().filter(|c| !c.is_control()).take(room).collect();
        if accepted.is_empty() {
            return false;
        }
        self.buffer.insert_str(self.cursor.pos, &accepted);
        self.cursor.pos += accepted.len();
        true
    }

    fn changed(&self) -> Option<InputEvent> {
        Some(InputEvent::Changed(self.buffer.clone()))
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let counter = format!(" {}/{} ", self.char_count(), self.max_chars);
        let border_style = if self.focused {
            Style::default().fg(Color::Blue)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_bottom(Line::from(counter).right_aligned());

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(self.buffer.as_str()).style(Style::default().fg(Color::White))
        };
        frame.render_widget(paragraph.block(block), area);

        if self.focused {
            let max_x = area.x + area.width.saturating_sub(2);
            let x = (area.x + 1 + self.cursor.column(&self.buffer)).min(max_x);
            frame.set_cursor_position((x, area.y + 1));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut buf = [0u8; 4];
                if self.insert(c.encode_utf8(&mut buf)) {
                    self.changed()
                } else {
                    None
                }
            }
            TuiEvent::Paste(text) => {
                if self.insert(text) {
                    self.changed()
                } else {
                    None
                }
            }
            TuiEvent::Backspace => {
                if self.cursor.pos == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                self.changed()
            }
            TuiEvent::Delete => {
                if self.cursor.pos >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                self.changed()
            }
            TuiEvent::CursorLeft => {
                self.cursor.move_left(&self.buffer);
                None
            }
            TuiEvent::CursorRight => {
                self.cursor.move_right(&self.buffer);
                None
            }
            TuiEvent::CursorHome => {
                self.cursor.pos = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor.to_end(&self.buffer);
                None
            }
            TuiEvent::Submit => Some(InputEvent::Submit),
            _ => None,
        }
    }
}
