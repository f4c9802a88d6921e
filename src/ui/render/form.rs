use super::Frame;
use crate::state::{Form, FormField};
use crate::ui::widgets::styling;
use crate::ui::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders},
};

/// Height of one single-line input including its borders.
///
const INPUT_HEIGHT: u16 = 3;

/// Render every input of the form in display order. The focused input gets
/// the active border and a visible cursor.
///
pub fn form<F: FormField>(frame: &mut Frame, size: Rect, title: &str, form: &mut Form<F>, theme: &Theme) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {} ", title),
            styling::active_block_title_style(),
        ))
        .border_style(styling::normal_block_border_style(theme));
    let inner = outer.inner(size);
    frame.render_widget(outer, size);

    let mut constraints: Vec<Constraint> = F::ALL
        .iter()
        .map(|_| Constraint::Length(INPUT_HEIGHT))
        .collect();
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .horizontal_margin(1)
        .split(inner);

    for (index, (id, area, focused)) in form.inputs_mut().enumerate() {
        let border_style = if focused {
            styling::active_block_border_style(theme)
        } else {
            styling::normal_block_border_style(theme)
        };
        let cursor_style = if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        area.set_cursor_style(cursor_style);
        area.set_style(styling::normal_text_style(theme));
        area.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(id.label())
                .border_style(border_style),
        );
        frame.render_widget(area.widget(), rows[index]);
    }
}
