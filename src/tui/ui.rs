use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::task_list::{RowHit, hit_test_row};
use crate::tui::components::{DialogView, TaskListView, TitleBar};
use crate::tui::{Focus, TuiState};

const ADD_BUTTON_WIDTH: u16 = 7;

/// Screen regions, shared by drawing and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub title: Rect,
    pub list: Rect,
    pub input: Rect,
    pub add_button: Rect,
    pub hints: Rect,
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    use Constraint::{Length, Min};
    let [title, list, form, hints] =
        Layout::vertical([Length(1), Min(0), Length(3), Length(1)]).areas(area);
    let [input, add_button] = Layout::horizontal([Min(0), Length(ADD_BUTTON_WIDTH)]).areas(form);
    ScreenLayout {
        title,
        list,
        input,
        add_button,
        hints,
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let layout = screen_layout(frame.area());

    TitleBar::new(app.tasks.len(), app.status_message.clone()).render(frame, layout.title);

    TaskListView::new(&app.tasks, &mut tui.task_list, tui.focus == Focus::List)
        .render(frame, layout.list);

    tui.input_box.focused = tui.focus == Focus::Input && app.dialog.is_none();
    tui.input_box.render(frame, layout.input);
    draw_add_button(frame, layout.add_button);

    frame.render_widget(
        Paragraph::new(hints_text(tui.focus)).style(Style::default().fg(Color::DarkGray)),
        layout.hints,
    );

    if let Some(dialog) = &app.dialog {
        DialogView::new(dialog, &tui.dialog).render(frame, frame.area());
    }
}

fn draw_add_button(frame: &mut Frame, area: Rect) {
    let button = Paragraph::new(Line::from("+"))
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Blue)),
        );
    frame.render_widget(button, area);
}

fn hints_text(focus: Focus) -> &'static str {
    match focus {
        Focus::Input => " Enter adicionar  Esc lista  Ctrl+C sair",
        Focus::List => " ↑↓ selecionar  Del excluir  Enter digitar  Ctrl+C sair",
    }
}

/// What a mouse click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Row(RowHit),
    Input,
    AddButton,
}

pub fn hit_test_click(
    column: u16,
    row: u16,
    frame_area: Rect,
    list_offset: usize,
    task_count: usize,
) -> Option<ClickTarget> {
    let layout = screen_layout(frame_area);
    if layout.add_button.contains((column, row).into()) {
        return Some(ClickTarget::AddButton);
    }
    if layout.input.contains((column, row).into()) {
        return Some(ClickTarget::Input);
    }
    hit_test_row(column, row, layout.list, list_offset, task_count).map(ClickTarget::Row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::hydrated_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen_text(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(60, 16);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_empty_screen() {
        let app = hydrated_app(&[]);
        let mut tui = TuiState::new();
        let text = screen_text(&app, &mut tui);
        assert!(text.contains("To do List"));
        assert!(text.contains("Nenhuma tarefa criada"));
        assert!(text.contains("Adicione uma tarefa"));
    }

    #[test]
    fn test_draw_cold_start_list() {
        let app = hydrated_app(&["A", "B"]);
        let mut tui = TuiState::new();
        let text = screen_text(&app, &mut tui);
        assert!(!text.contains("Nenhuma tarefa criada"));
        assert_eq!(text.matches('✗').count(), 2);
    }

    #[test]
    fn test_draw_with_dialog() {
        let mut app = hydrated_app(&["Walk dog"]);
        update(&mut app, Action::RequestDelete("Walk dog".to_string()));
        let mut tui = TuiState::new();
        tui.sync(&app);
        let text = screen_text(&app, &mut tui);
        assert!(text.contains("Deletar Task"));
    }

    #[test]
    fn test_add_button_is_bordered_plus() {
        let app = hydrated_app(&[]);
        let mut tui = TuiState::new();
        let backend = TestBackend::new(60, 16);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, &app, &mut tui)).unwrap();

        let button = screen_layout(Rect::new(0, 0, 60, 16)).add_button;
        let buffer = terminal.backend().buffer();
        let cell = |x: u16, y: u16| buffer[(x, y)].symbol().to_string();
        assert_eq!(cell(button.x, button.y), "╭");
        assert_eq!(cell(button.x + button.width - 1, button.y + 2), "╯");
        assert_eq!(cell(button.x + button.width / 2, button.y + 1), "+");
    }

    #[test]
    fn test_layout_regions() {
        let layout = screen_layout(Rect::new(0, 0, 60, 16));
        assert_eq!(layout.title.height, 1);
        assert_eq!(layout.input.y, 12);
        assert_eq!(layout.add_button.width, ADD_BUTTON_WIDTH);
        assert_eq!(layout.add_button.x, 53);
        assert_eq!(layout.hints.y, 15);
    }

    #[test]
    fn test_hit_test_click() {
        let area = Rect::new(0, 0, 60, 16);
        assert_eq!(hit_test_click(55, 13, area, 0, 0), Some(ClickTarget::AddButton));
        assert_eq!(hit_test_click(10, 13, area, 0, 0), Some(ClickTarget::Input));
        assert_eq!(
            hit_test_click(57, 1, area, 0, 2),
            Some(ClickTarget::Row(RowHit { index: 0, on_delete_icon: true }))
        );
        assert_eq!(hit_test_click(5, 0, area, 0, 2), None);
    }
}
