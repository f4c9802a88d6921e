use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

/// Render the location list beside the details of the selected location.
///
pub fn locations(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(size);

    let items: Vec<ListItem> = state
        .get_locations()
        .iter()
        .map(|location| {
            ListItem::new(Line::from(vec![
                Span::styled(location.name.to_owned(), styling::normal_text_style(&theme)),
                Span::styled(
                    format!("  {}", location.category),
                    styling::muted_text_style(&theme),
                ),
            ]))
        })
        .collect();
    let title = if items.is_empty() {
        " Locations (none yet, n: create) ".to_string()
    } else {
        format!(" Locations ({}) ", items.len())
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title, styling::active_block_title_style()))
                .border_style(styling::active_block_border_style(&theme)),
        )
        .highlight_style(styling::active_list_item_style(&theme))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, columns[0], state.get_locations_list_state());

    let details: Vec<Line> = match state.selected_location() {
        Some(location) => vec![
            Line::from(Span::styled(
                location.name.to_owned(),
                styling::accent_text_style(&theme),
            )),
            Line::from(Span::styled(
                location.category.to_owned(),
                styling::muted_text_style(&theme),
            )),
            Line::from(""),
            Line::from(format!("Address: {}", location.address)),
            Line::from(format!("Email: {}", location.email)),
            Line::from(format!(
                "Coordinates: {:.5}, {:.5}",
                location.latitude, location.longitude
            )),
            Line::from(format!("Tags: {}", location.tags.join(", "))),
            Line::from(""),
            Line::from(location.description.to_owned()),
        ],
        None => vec![Line::from(Span::styled(
            "No location selected.",
            styling::muted_text_style(&theme),
        ))],
    };
    let paragraph = Paragraph::new(details)
        .style(styling::normal_text_style(&theme))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Details ")
                .border_style(styling::normal_block_border_style(&theme)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, columns[1]);
}
