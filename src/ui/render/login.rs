use super::{form, Frame};
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

pub const BANNER: &str = "
                                      _         _
 __   __ ___  _ __   _   _   ___     | |_ _   _(_)
 \\ \\ / // _ \\| '_ \\ | | | | / _ \\____| __| | | | |
  \\ V /|  __/| | | || |_| ||  __/____| |_| |_| | |
   \\_/  \\___||_| |_| \\__,_| \\___|     \\__|\\__,_|_|
";

/// Render the login form below the banner.
///
pub fn login(frame: &mut Frame, size: Rect, state: &mut State) {
    let rows = split(size);
    banner(frame, rows[0], state);
    hint(
        frame,
        rows[2],
        state,
        "Enter: next field / sign in, Esc: release input, s: create account, q: quit",
    );
    let theme = state.get_theme().clone();
    form(frame, rows[1], "Sign In", state.login_form_mut(), &theme);
}

/// Render the account creation form below the banner.
///
pub fn signup(frame: &mut Frame, size: Rect, state: &mut State) {
    let rows = split(size);
    banner(frame, rows[0], state);
    hint(
        frame,
        rows[2],
        state,
        "Enter: next field / create account, Esc: release input, then Esc: back",
    );
    let theme = state.get_theme().clone();
    form(frame, rows[1], "Create Account", state.signup_form_mut(), &theme);
}

fn split(size: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Banner
            Constraint::Min(8),    // Form
            Constraint::Length(1), // Hint
        ])
        .split(size)
}

fn banner(frame: &mut Frame, size: Rect, state: &State) {
    let banner = Paragraph::new(BANNER).style(styling::banner_style(state.get_theme()));
    frame.render_widget(banner, size);
}

fn hint(frame: &mut Frame, size: Rect, state: &State, text: &'static str) {
    let line = Line::from(Span::styled(text, styling::muted_text_style(state.get_theme())));
    frame.render_widget(Paragraph::new(line), size);
}
