use super::events::details_paragraph;
use super::Frame;
use crate::state::{Detail, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
};

/// Render the restaurant or event the assistant suggested.
///
pub fn detail(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let lines: Vec<Line> = match state.get_detail() {
        Some(Detail::Location(location)) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    location.name.to_owned(),
                    styling::accent_text_style(&theme),
                )),
                Line::from(format!("Category: {}", location.category)),
                Line::from(format!("Address: {}", location.address)),
                Line::from(format!("Rating: {:.1}", location.rating)),
                Line::from(format!("Contact: {}", location.contact)),
                Line::from(format!("Tags: {}", location.tags.join(", "))),
                Line::from(""),
                Line::from(location.description.to_owned()),
            ];
            if !location.events.is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "Events",
                    styling::accent_text_style(&theme),
                )));
                for event in &location.events {
                    lines.push(Line::from(format!("  {} ({} likes)", event.title, event.likes)));
                }
            }
            lines
        }
        Some(Detail::Event(event)) => vec![
            Line::from(Span::styled(
                event.title.to_owned(),
                styling::accent_text_style(&theme),
            )),
            Line::from(format!("At: {}", event.company)),
            Line::from(format!("Likes: {}", event.likes)),
            Line::from(format!("Tags: {}", event.tags.join(", "))),
            Line::from(""),
            Line::from(event.description.to_owned()),
        ],
        None => vec![Line::from(Span::styled(
            "Loading...",
            styling::muted_text_style(&theme),
        ))],
    };
    frame.render_widget(details_paragraph(lines, &theme), size);
}
