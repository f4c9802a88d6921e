use crate::state::{State, View};
use anyhow::Result;
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};
use tui_textarea::CursorMove;

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Default for Handler {
    fn default() -> Self {
        Handler::new()
    }
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            loop {
                match event::poll(tick_rate) {
                    Ok(true) => match event::read() {
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            if tx_clone.send(Event::Input(key)).is_err() {
                                break;
                            }
                        }
                        Ok(_) => (),
                        Err(e) => error!("Failed to read terminal event: {}", e),
                    },
                    Ok(false) => (),
                    Err(e) => error!("Failed to poll terminal events: {}", e),
                }
                if tx_clone.send(Event::Tick).is_err() {
                    break;
                }
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(event) => Ok(handle_key(state, event)),
            Event::Tick => {
                if state.is_loading() {
                    state.advance_spinner_index();
                }
                Ok(true)
            }
        }
    }
}

/// Apply a key press to state. Returns false if exit was requested.
///
pub fn handle_key(state: &mut State, event: KeyEvent) -> bool {
    if let KeyEvent {
        code: KeyCode::Char('c'),
        modifiers: KeyModifiers::CONTROL,
        ..
    } = event
    {
        debug!("Processing exit terminal event '{:?}'...", event);
        return false;
    }
    if state.get_delete_confirmation().is_some() {
        match event.code {
            KeyCode::Char('y') => state.confirm_delete(),
            _ => state.cancel_delete(),
        }
        return true;
    }
    let view = state.current_view();
    if view.is_form() {
        handle_form_key(state, view, event)
    } else {
        handle_list_key(state, view, event)
    }
}

/// Keys for views built around a form. Typing goes to the focused input;
/// with nothing focused, letters act as commands.
///
fn handle_form_key(state: &mut State, view: View, event: KeyEvent) -> bool {
    let focused = state.is_form_input_focused();
    match event.code {
        KeyCode::Tab => state.form_focus_next(),
        KeyCode::BackTab => state.form_focus_previous(),
        KeyCode::Enter => state.form_advance(),
        KeyCode::Esc if focused => {
            state.clear_status();
            state.form_blur_all();
        }
        KeyCode::Esc => {
            state.clear_status();
            if view != View::Login {
                state.pop_view();
            }
        }
        KeyCode::Backspace if focused => {
            state.form_delete_char();
        }
        KeyCode::Left if focused => state.form_move_cursor(CursorMove::Back),
        KeyCode::Right if focused => state.form_move_cursor(CursorMove::Forward),
        KeyCode::Home if focused => state.form_move_cursor(CursorMove::Head),
        KeyCode::End if focused => state.form_move_cursor(CursorMove::End),
        KeyCode::Char(c)
            if focused && (event.modifiers == KeyModifiers::NONE
                || event.modifiers == KeyModifiers::SHIFT) =>
        {
            state.form_insert_char(c);
        }
        KeyCode::Char('q') if view == View::Login => return false,
        KeyCode::Char('s') if view == View::Login => state.show_signup(),
        KeyCode::Char(c) if view == View::Chat && c.is_ascii_digit() && c != '0' => {
            if let Some(index) = c.to_digit(10) {
                state.send_suggestion(index as usize - 1);
            }
        }
        KeyCode::Char('r') if view == View::Chat => state.refresh(),
        KeyCode::Char('+') if view == View::Chat => state.rate_last_reply(5),
        KeyCode::Char('-') if view == View::Chat => state.rate_last_reply(1),
        KeyCode::Char('p') if view == View::Chat => state.open_location_detail(),
        KeyCode::Char('e') if view == View::Chat => state.open_event_detail(),
        _ => debug!("Skipping processing of terminal event '{:?}'...", event),
    }
    true
}

/// Keys for list and read-only views.
///
fn handle_list_key(state: &mut State, view: View, event: KeyEvent) -> bool {
    match (view, event.code) {
        (_, KeyCode::Char('q')) => return false,
        (_, KeyCode::Esc)
        | (View::Events, KeyCode::Char('h'))
        | (View::Schedule, KeyCode::Char('h'))
        | (View::Detail, KeyCode::Char('h')) => {
            state.clear_status();
            state.pop_view();
        }
        (_, KeyCode::Char('r')) => state.refresh(),
        (_, KeyCode::Char('c')) => state.open_chat(),
        (_, KeyCode::Char('o')) => state.sign_out(),
        (View::Locations, KeyCode::Char('j')) | (View::Locations, KeyCode::Down) => {
            state.select_next_location()
        }
        (View::Locations, KeyCode::Char('k')) | (View::Locations, KeyCode::Up) => {
            state.select_previous_location()
        }
        (View::Locations, KeyCode::Enter) | (View::Locations, KeyCode::Char('l')) => {
            state.open_events()
        }
        (View::Locations, KeyCode::Char('n')) => state.open_create_location(),
        (View::Locations, KeyCode::Char('e')) => state.open_edit_location(),
        (View::Events, KeyCode::Char('j')) | (View::Events, KeyCode::Down) => {
            state.select_next_event()
        }
        (View::Events, KeyCode::Char('k')) | (View::Events, KeyCode::Up) => {
            state.select_previous_event()
        }
        (View::Events, KeyCode::Char('n')) => state.open_create_event(),
        (View::Events, KeyCode::Char('e')) => state.open_edit_event(),
        (View::Events, KeyCode::Char('s')) => state.open_schedule(),
        (View::Locations, KeyCode::Char('d')) | (View::Events, KeyCode::Char('d')) => {
            state.request_delete_selected()
        }
        _ => debug!("Skipping processing of terminal event '{:?}'...", event),
    }
    true
}
