//! # Task List Component
//!
//! Scrollable list of tasks, one row each: the task text on the left and a
//! delete icon on the right. Shows a muted notice when the list is empty.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `TaskListState` lives in `TuiState` (selection, scroll offset)
//! - `TaskListView` is created each frame with borrowed state and props

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::task_list::TaskList;
use crate::tui::component::Component;

pub const EMPTY_NOTICE: &str = "Nenhuma tarefa criada";
pub const DELETE_ICON: &str = " ✗ ";

/// Columns taken by the delete icon at the right edge of each row.
const ICON_WIDTH: u16 = 3;

/// Persistent selection/scroll state for the list.
#[derive(Default)]
pub struct TaskListState {
    pub list_state: ListState,
}

impl TaskListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.list_state.select(index);
    }

    pub fn select_prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let idx = self
            .selected()
            .map(|i| i.saturating_sub(1))
            .unwrap_or(len - 1);
        self.select(Some(idx));
    }

    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let idx = self.selected().map(|i| (i + 1).min(len - 1)).unwrap_or(0);
        self.select(Some(idx));
    }

    /// Keep the selection valid after the list shrank or grew.
    pub fn clamp(&mut self, len: usize) {
        match self.selected() {
            Some(_) if len == 0 => self.select(None),
            Some(i) if i >= len => self.select(Some(len - 1)),
            _ => {}
        }
        if len == 0 {
            *self.list_state.offset_mut() = 0;
        }
    }

    pub fn offset(&self) -> usize {
        self.list_state.offset()
    }
}

/// Where a click on the list landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowHit {
    pub index: usize,
    pub on_delete_icon: bool,
}

/// Map a screen position to a row, given the list's area and scroll offset.
pub fn hit_test_row(
    column: u16,
    row: u16,
    area: Rect,
    offset: usize,
    len: usize,
) -> Option<RowHit> {
    let inner = inner_area(area);
    if row < inner.y
        || row >= inner.y + inner.height
        || column < inner.x
        || column >= inner.x + inner.width
    {
        return None;
    }
    let index = offset + (row - inner.y) as usize;
    if index >= len {
        return None;
    }
    let icon_start = inner.x + inner.width.saturating_sub(ICON_WIDTH);
    Some(RowHit {
        index,
        on_delete_icon: column >= icon_start,
    })
}

fn block() -> Block<'static> {
    Block::default().padding(Padding::horizontal(1))
}

fn inner_area(area: Rect) -> Rect {
    block().inner(area)
}

/// Transient render wrapper.
pub struct TaskListView<'a> {
    tasks: &'a TaskList,
    state: &'a mut TaskListState,
    /// Highlight the selection only when the list has focus.
    focused: bool,
}

impl<'a> TaskListView<'a> {
    pub fn new(tasks: &'a TaskList, state: &'a mut TaskListState, focused: bool) -> Self {
        Self {
            tasks,
            state,
            focused,
        }
    }
}

impl Component for TaskListView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.tasks.is_empty() {
            let empty = Paragraph::new(EMPTY_NOTICE)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block().padding(Padding::new(1, 1, 1, 0)));
            frame.render_widget(empty, area);
            return;
        }

        let inner_width = inner_area(area).width;
        let text_width = inner_width.saturating_sub(ICON_WIDTH) as usize;

        let items: Vec<ListItem> = self
            .tasks
            .iter()
            .map(|task| {
                let pad = text_width.saturating_sub(task.width());
                ListItem::new(Line::from(vec![
                    Span::raw(task.to_string()),
                    Span::raw(" ".repeat(pad)),
                    Span::styled(DELETE_ICON, Style::default().fg(Color::LightRed)),
                ]))
            })
            .collect();

        let highlight = if self.focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };

        let list = List::new(items)
            .block(block())
            .style(Style::default().fg(Color::Gray))
            .highlight_style(highlight);

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
