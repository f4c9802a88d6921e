use super::Frame;
use crate::state::{State, View};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Return key hints for the view.
///
fn hints(view: View, input_focused: bool) -> &'static str {
    match view {
        _ if view.is_form() && input_focused => {
            " Tab/Shift+Tab: move, Enter: next / submit, Esc: release input, Ctrl+C: quit"
        }
        View::Login => " Enter/Tab: type, s: create account, q: quit",
        View::Chat => {
            " Enter/Tab: type, 1-9: ask, +/-: rate reply, p/e: place/event details, r: refresh, Esc: back"
        }
        View::Signup | View::LocationForm | View::EventForm => " Enter/Tab: type, Esc: back",
        View::Locations => {
            " j/k: navigate, Enter: events, n: new, e: edit, d: delete, c: chat, r: refresh, o: sign out, q: quit"
        }
        View::Events => {
            " j/k: navigate, n: new, e: edit, d: delete, s: schedule, r: refresh, Esc: back, q: quit"
        }
        View::Schedule | View::Detail => " r: refresh, Esc: back, q: quit",
    }
}

/// Render the status message above the key hints of the current view.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(size);

    let status = match state.get_status() {
        Some(status) => Line::from(Span::styled(
            format!(" {}", status.text),
            styling::status_style(theme, status.kind),
        )),
        None => Line::from(""),
    };
    frame.render_widget(Paragraph::new(status), rows[0]);

    let hints = Line::from(Span::styled(
        hints(state.current_view(), state.is_form_input_focused()),
        styling::muted_text_style(theme),
    ));
    frame.render_widget(Paragraph::new(hints), rows[1]);
}
