use super::*;
use crate::state::{DeleteTarget, State, View};
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Render all widgets according to state.
///
pub fn all(frame: &mut Frame, state: &mut State) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Current view
            Constraint::Length(7), // Log
            Constraint::Length(2), // Status and key hints
        ])
        .split(frame.size());

    header(frame, rows[0], state);
    match state.current_view() {
        View::Login => login(frame, rows[1], state),
        View::Signup => signup(frame, rows[1], state),
        View::Locations => locations(frame, rows[1], state),
        View::LocationForm => {
            let theme = state.get_theme().clone();
            let title = match state.get_location_form_mode() {
                crate::state::FormMode::Create => "New Location",
                crate::state::FormMode::Edit(_) => "Edit Location",
            };
            form(frame, rows[1], title, state.location_form_mut(), &theme);
        }
        View::Events => events(frame, rows[1], state),
        View::EventForm => {
            let theme = state.get_theme().clone();
            let title = match state.get_event_form_mode() {
                crate::state::FormMode::Create => "New Event",
                crate::state::FormMode::Edit(_) => "Edit Event",
            };
            form(frame, rows[1], title, state.event_form_mut(), &theme);
        }
        View::Schedule => schedule(frame, rows[1], state),
        View::Chat => chat(frame, rows[1], state),
        View::Detail => detail(frame, rows[1], state),
    }
    if let Some(target) = state.get_delete_confirmation() {
        delete_confirmation(frame, rows[1], target, state);
    }
    log(frame, rows[2], state);
    footer(frame, rows[3], state);
}

/// Render the title bar with the signed-in user and a spinner while loading.
///
fn header(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let user = match state.get_user() {
        Some(user) => format!("{} <{}>", user.name, user.email),
        None if state.is_signed_in() => state.last_email().unwrap_or_default().to_string(),
        None => "Not signed in".to_string(),
    };
    let mut spans = vec![
        Span::styled(" venue-tui ", styling::accent_text_style(theme)),
        Span::styled(
            format!("| {} ", state.current_view().title()),
            styling::normal_text_style(theme),
        ),
        Span::styled(format!("| {}", user), styling::muted_text_style(theme)),
    ];
    if state.is_loading() {
        spans.push(Span::styled(
            format!("  {}", spinner::frame(*state.get_spinner_index())),
            styling::accent_text_style(theme),
        ));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), size);
}

fn delete_confirmation(frame: &mut Frame, size: Rect, target: DeleteTarget, state: &State) {
    let theme = state.get_theme();
    let name = match target {
        DeleteTarget::Location(id) => state
            .get_locations()
            .iter()
            .find(|l| l.id == id)
            .map(|l| l.name.to_owned()),
        DeleteTarget::Event(id) => state
            .get_events()
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.title.to_owned()),
    }
    .unwrap_or_else(|| "this record".to_string());
    let area = centered(size, 50, 7);
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Delete {}?", name),
            styling::normal_text_style(theme),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "y: confirm, any other key: cancel",
            styling::muted_text_style(theme),
        )),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" Confirm ", styling::active_block_title_style()))
        .border_style(ratatui::style::Style::default().fg(theme.error.to_color()));
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// Return a rect of the given width percentage and height centered in `size`.
///
fn centered(size: Rect, percent_x: u16, height: u16) -> Rect {
    let width = size.width * percent_x / 100;
    let height = height.min(size.height);
    Rect::new(
        size.x + (size.width - width) / 2,
        size.y + (size.height - height) / 2,
        width,
        height,
    )
}
