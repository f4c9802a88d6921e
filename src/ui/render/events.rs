use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use crate::ui::Theme;
use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

/// Render the events of the shown location beside the selected event.
///
pub fn events(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(size);

    let location_name = state
        .events_location()
        .map(|l| l.name.to_owned())
        .unwrap_or_default();
    let items: Vec<ListItem> = state
        .get_events()
        .iter()
        .map(|event| {
            ListItem::new(Line::from(vec![
                Span::styled(event.title.to_owned(), styling::normal_text_style(&theme)),
                Span::styled(
                    format!("  {}", event.date.as_deref().unwrap_or("no date")),
                    styling::muted_text_style(&theme),
                ),
            ]))
        })
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    format!(" Events at {} ", location_name),
                    styling::active_block_title_style(),
                ))
                .border_style(styling::active_block_border_style(&theme)),
        )
        .highlight_style(styling::active_list_item_style(&theme))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, columns[0], state.get_events_list_state());

    let details: Vec<Line> = match state.selected_event() {
        Some(event) => vec![
            Line::from(Span::styled(
                event.title.to_owned(),
                styling::accent_text_style(&theme),
            )),
            Line::from(format!("When: {}", event.date.as_deref().unwrap_or("-"))),
            Line::from(format!("Likes: {}", event.likes)),
            Line::from(format!("Tags: {}", event.tags.join(", "))),
            Line::from(""),
            Line::from(event.description.to_owned()),
        ],
        None => vec![Line::from(Span::styled(
            "No events yet, n: create one.",
            styling::muted_text_style(&theme),
        ))],
    };
    frame.render_widget(details_paragraph(details, &theme), columns[1]);
}

/// Render upcoming and past events of the shown location in order.
///
pub fn schedule(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let now = Local::now().naive_local();
    let schedule = state.schedule(now);
    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        "Upcoming",
        styling::accent_text_style(&theme),
    ))];
    if schedule.upcoming.is_empty() {
        lines.push(Line::from(Span::styled("  nothing planned", styling::muted_text_style(&theme))));
    }
    for scheduled in &schedule.upcoming {
        lines.push(Line::from(format!(
            "  {}  {}",
            scheduled.starts_at.format("%a %d %b %H:%M"),
            scheduled.event.title
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Past", styling::accent_text_style(&theme))));
    for scheduled in &schedule.past {
        lines.push(Line::from(Span::styled(
            format!(
                "  {}  {}",
                scheduled.starts_at.format("%a %d %b %Y"),
                scheduled.event.title
            ),
            styling::muted_text_style(&theme),
        )));
    }
    if !schedule.undated.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Undated", styling::accent_text_style(&theme))));
        for event in &schedule.undated {
            lines.push(Line::from(format!("  {}", event.title)));
        }
    }
    frame.render_widget(details_paragraph(lines, &theme), size);
}

pub(super) fn details_paragraph<'a>(lines: Vec<Line<'a>>, theme: &Theme) -> Paragraph<'a> {
    Paragraph::new(lines)
        .style(styling::normal_text_style(theme))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styling::normal_block_border_style(theme)),
        )
        .wrap(Wrap { trim: false })
}
