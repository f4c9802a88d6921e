use super::{form, Frame};
use crate::state::{Author, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Render the assistant transcript, suggested prompts and message input.
///
pub fn chat(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Transcript
            Constraint::Length(4), // Suggestions
            Constraint::Length(5), // Input
        ])
        .split(size);

    let mut lines: Vec<Line> = vec![];
    for message in state.get_chat_messages() {
        let (who, style) = match message.author {
            Author::User => ("You", styling::accent_text_style(&theme)),
            Author::Assistant => ("Assistant", styling::active_block_title_style()),
        };
        let mut header = vec![Span::styled(format!("{}:", who), style)];
        if let Some(rating) = message.rating {
            header.push(Span::styled(
                format!(" rated {}/5", rating),
                styling::muted_text_style(&theme),
            ));
        }
        lines.push(Line::from(header));
        for text in message.text.lines() {
            lines.push(Line::from(format!("  {}", text)));
        }
    }
    // Keep the latest messages in view
    let height = rows[0].height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(height) as u16;
    let transcript = Paragraph::new(lines)
        .style(styling::normal_text_style(&theme))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Assistant ")
                .border_style(styling::normal_block_border_style(&theme)),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(transcript, rows[0]);

    let suggestions: Vec<Span> = state
        .get_suggestions()
        .iter()
        .take(9)
        .enumerate()
        .map(|(index, suggestion)| {
            Span::styled(
                format!("{}: {}  ", index + 1, suggestion.text),
                styling::muted_text_style(&theme),
            )
        })
        .collect();
    let suggestions = Paragraph::new(Line::from(suggestions))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Suggestions (Esc then number) ")
                .border_style(styling::normal_block_border_style(&theme)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(suggestions, rows[1]);

    form(frame, rows[2], "Message", state.chat_form_mut(), &theme);
}
