use crate::api::{
    ChatReply, Event, EventDetail, Feedback, HistoryEntry, Location, LocationDetail,
    SearchResults, Session, Suggestion, User,
};
use crate::app::{ConfigSaveSender, NetworkEventSender};
use crate::events::network::Event as NetworkEvent;
use crate::logger::LogBuffer;
use crate::ui::{Theme, SPINNER_FRAME_COUNT};
use chrono::NaiveDateTime;
use log::*;
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use tui_textarea::CursorMove;

use super::fields::{ChatField, EventField, LocationField, LoginField, SignupField};
use super::form::{Form, FormStep};
use super::navigation::{DeleteTarget, DetailTarget, FormMode, View};
use super::schedule::Schedule;
use super::StateError;

/// Who wrote a chat message.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Author {
    User,
    Assistant,
}

/// Defines one line of the chat transcript.
///
#[derive(Debug, PartialEq, Clone)]
pub struct ChatMessage {
    pub author: Author,
    pub text: String,
    pub results: SearchResults, // Empty for user messages
    pub rating: Option<u8>,
}

impl ChatMessage {
    fn from_user(text: String) -> Self {
        ChatMessage {
            author: Author::User,
            text,
            results: SearchResults::default(),
            rating: None,
        }
    }

    fn from_assistant(text: String, results: SearchResults) -> Self {
        ChatMessage {
            author: Author::Assistant,
            text,
            results,
            rating: None,
        }
    }
}

/// Record fetched for the detail view.
///
#[derive(Debug, PartialEq, Clone)]
pub enum Detail {
    Location(LocationDetail),
    Event(EventDetail),
}

impl Detail {
    fn target(&self) -> DetailTarget {
        match self {
            Detail::Location(location) => DetailTarget::Location(location.id),
            Detail::Event(event) => DetailTarget::Event(event.id),
        }
    }
}

/// Severity of the status line message.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

/// Run `$body` against the form of the current view, if it has one.
macro_rules! with_active_form {
    ($state:expr, $form:ident => $body:expr, else $default:expr) => {
        match $state.current_view() {
            View::Login => {
                let $form = &mut $state.login_form;
                $body
            }
            View::Signup => {
                let $form = &mut $state.signup_form;
                $body
            }
            View::LocationForm => {
                let $form = &mut $state.location_form;
                $body
            }
            View::EventForm => {
                let $form = &mut $state.event_form;
                $body
            }
            View::Chat => {
                let $form = &mut $state.chat_form;
                $body
            }
            _ => $default,
        }
    };
}

/// Houses data representative of application state.
///
pub struct State {
    net_sender: Option<NetworkEventSender>,
    config_save_sender: Option<ConfigSaveSender>,
    user: Option<User>,
    session_token: Option<String>,
    last_email: Option<String>,
    terminal_size: Rect,
    spinner_index: usize,
    pending_requests: usize,
    view_stack: Vec<View>,
    locations: Vec<Location>,
    locations_list_state: ListState,
    events: Vec<Event>,
    events_list_state: ListState,
    events_location_id: Option<u64>, // Location whose events are loaded
    chat_messages: Vec<ChatMessage>,
    suggestions: Vec<Suggestion>,
    detail_target: Option<DetailTarget>,
    detail: Option<Detail>,
    login_form: Form<LoginField>,
    signup_form: Form<SignupField>,
    location_form: Form<LocationField>,
    event_form: Form<EventField>,
    chat_form: Form<ChatField>,
    location_form_mode: FormMode,
    event_form_mode: FormMode,
    delete_confirmation: Option<DeleteTarget>,
    status: Option<Status>,
    log_buffer: Option<LogBuffer>,
    theme: Theme,
}

/// Defines default application state.
///
impl Default for State {
    fn default() -> State {
        State {
            net_sender: None,
            config_save_sender: None,
            user: None,
            session_token: None,
            last_email: None,
            terminal_size: Rect::default(),
            spinner_index: 0,
            pending_requests: 0,
            view_stack: vec![View::Login],
            locations: vec![],
            locations_list_state: ListState::default(),
            events: vec![],
            events_list_state: ListState::default(),
            events_location_id: None,
            chat_messages: vec![],
            suggestions: vec![],
            detail_target: None,
            detail: None,
            login_form: Form::new(),
            signup_form: Form::new(),
            location_form: Form::new(),
            event_form: Form::new(),
            chat_form: Form::new(),
            location_form_mode: FormMode::Create,
            event_form_mode: FormMode::Create,
            delete_confirmation: None,
            status: None,
            log_buffer: None,
            theme: Theme::default(),
        }
    }
}

impl State {
    /// Return new state. With a stored session token the user lands on the
    /// locations view, otherwise on the login form.
    ///
    pub fn new(
        net_sender: NetworkEventSender,
        config_save_sender: ConfigSaveSender,
        session_token: Option<String>,
        last_email: Option<String>,
        theme: Theme,
        log_buffer: LogBuffer,
    ) -> Self {
        let mut state = State {
            net_sender: Some(net_sender),
            config_save_sender: Some(config_save_sender),
            theme,
            log_buffer: Some(log_buffer),
            ..State::default()
        };
        if let Some(email) = &last_email {
            state.login_form.set_value(LoginField::Email, email);
        }
        state.last_email = last_email;
        match session_token {
            Some(token) => {
                state.session_token = Some(token);
                state.view_stack = vec![View::Locations];
            }
            None => state.show_login(),
        }
        state
    }

    pub fn set_terminal_size(&mut self, size: Rect) {
        self.terminal_size = size;
    }

    pub fn get_terminal_size(&self) -> Rect {
        self.terminal_size
    }

    pub fn advance_spinner_index(&mut self) {
        self.spinner_index += 1;
        if self.spinner_index >= SPINNER_FRAME_COUNT {
            self.spinner_index = 0;
        }
    }

    pub fn get_spinner_index(&self) -> &usize {
        &self.spinner_index
    }

    /// Returns true while dispatched network events are in flight.
    ///
    pub fn is_loading(&self) -> bool {
        self.pending_requests > 0
    }

    /// Mark one dispatched network event as handled.
    ///
    pub fn finish_request(&mut self) {
        self.pending_requests = self.pending_requests.saturating_sub(1);
    }

    pub fn current_view(&self) -> View {
        self.view_stack.last().copied().unwrap_or(View::Login)
    }

    pub fn push_view(&mut self, view: View) {
        debug!("Pushing view {:?}", view);
        self.view_stack.push(view);
    }

    /// Return to the previous view. The root view is never popped.
    ///
    pub fn pop_view(&mut self) {
        if self.view_stack.len() > 1 {
            self.view_stack.pop();
        }
        self.delete_confirmation = None;
        if self.current_view() == View::Chat {
            self.chat_form.focus_first();
        }
    }

    fn reset_view(&mut self, view: View) {
        self.view_stack = vec![view];
        self.delete_confirmation = None;
    }

    pub fn get_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session_token.is_some()
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    pub fn last_email(&self) -> Option<&str> {
        self.last_email.as_deref()
    }

    /// Enter the signed-in part of the application.
    ///
    pub fn set_session(&mut self, session: Session) {
        info!("Signed in as {}", session.user.email);
        self.last_email = Some(session.user.email.to_owned());
        self.session_token = Some(session.token);
        self.user = Some(session.user);
        self.login_form.clear();
        self.signup_form.clear();
        self.reset_view(View::Locations);
        self.request_config_save();
        self.dispatch(NetworkEvent::Locations);
    }

    /// Drop the session and return to the login form.
    ///
    pub fn sign_out(&mut self) {
        info!("Signing out");
        self.session_token = None;
        self.user = None;
        self.locations.clear();
        self.events.clear();
        self.events_location_id = None;
        self.chat_messages.clear();
        self.detail_target = None;
        self.detail = None;
        self.dispatch(NetworkEvent::SignOut);
        self.request_config_save();
        self.show_login();
    }

    /// Show the login form, focusing the first empty field.
    ///
    pub fn show_login(&mut self) {
        self.reset_view(View::Login);
        if self.login_form.value(LoginField::Email).is_empty() {
            self.login_form.focus_field(LoginField::Email);
        } else {
            self.login_form.focus_field(LoginField::Password);
        }
    }

    pub fn show_signup(&mut self) {
        self.signup_form.clear();
        self.push_view(View::Signup);
        self.signup_form.focus_first();
    }

    pub fn login_form(&self) -> &Form<LoginField> {
        &self.login_form
    }

    pub fn signup_form(&self) -> &Form<SignupField> {
        &self.signup_form
    }

    pub fn location_form(&self) -> &Form<LocationField> {
        &self.location_form
    }

    pub fn event_form(&self) -> &Form<EventField> {
        &self.event_form
    }

    pub fn chat_form(&self) -> &Form<ChatField> {
        &self.chat_form
    }

    pub fn login_form_mut(&mut self) -> &mut Form<LoginField> {
        &mut self.login_form
    }

    pub fn signup_form_mut(&mut self) -> &mut Form<SignupField> {
        &mut self.signup_form
    }

    pub fn location_form_mut(&mut self) -> &mut Form<LocationField> {
        &mut self.location_form
    }

    pub fn event_form_mut(&mut self) -> &mut Form<EventField> {
        &mut self.event_form
    }

    pub fn chat_form_mut(&mut self) -> &mut Form<ChatField> {
        &mut self.chat_form
    }

    pub fn get_location_form_mode(&self) -> FormMode {
        self.location_form_mode
    }

    pub fn get_event_form_mode(&self) -> FormMode {
        self.event_form_mode
    }

    /// Returns true when the current view has a focused input.
    ///
    pub fn is_form_input_focused(&self) -> bool {
        match self.current_view() {
            View::Login => self.login_form.focused().is_some(),
            View::Signup => self.signup_form.focused().is_some(),
            View::LocationForm => self.location_form.focused().is_some(),
            View::EventForm => self.event_form.focused().is_some(),
            View::Chat => self.chat_form.focused().is_some(),
            _ => false,
        }
    }

    pub fn form_insert_char(&mut self, c: char) -> bool {
        with_active_form!(self, form => form.insert_char(c), else false)
    }

    pub fn form_delete_char(&mut self) -> bool {
        with_active_form!(self, form => form.delete_char(), else false)
    }

    pub fn form_move_cursor(&mut self, cursor_move: CursorMove) {
        with_active_form!(self, form => form.move_cursor(cursor_move), else ())
    }

    pub fn form_focus_next(&mut self) {
        with_active_form!(self, form => form.focus_next(), else ())
    }

    pub fn form_focus_previous(&mut self) {
        with_active_form!(self, form => form.focus_previous(), else ())
    }

    pub fn form_blur_all(&mut self) {
        with_active_form!(self, form => form.blur_all(), else ())
    }

    /// Chain to the next input of the current form, submitting it once the
    /// last input is left.
    ///
    pub fn form_advance(&mut self) {
        let step = with_active_form!(self, form => form.advance(), else FormStep::Moved);
        if step == FormStep::Submitted {
            self.submit_active_form();
        }
    }

    /// Validate and send the current form.
    ///
    pub fn submit_active_form(&mut self) {
        let result = match self.current_view() {
            View::Login => self.submit_login(),
            View::Signup => self.submit_signup(),
            View::LocationForm => self.submit_location_form(),
            View::EventForm => self.submit_event_form(),
            View::Chat => self.send_chat(),
            _ => Ok(()),
        };
        if let Err(e) = result {
            warn!("Form not submitted: {}", e);
            self.set_error(e.to_string());
        }
    }

    fn submit_login(&mut self) -> Result<(), StateError> {
        let (email, password) = self.login_form.credentials()?;
        self.login_form.set_value(LoginField::Password, "");
        self.last_email = Some(email.to_owned());
        self.set_info(format!("Signing in as {}...", email));
        self.dispatch(NetworkEvent::Login { email, password });
        Ok(())
    }

    fn submit_signup(&mut self) -> Result<(), StateError> {
        let (name, email, password) = self.signup_form.registration()?;
        self.set_info(format!("Creating account for {}...", email));
        self.dispatch(NetworkEvent::Signup {
            name,
            email,
            password,
        });
        Ok(())
    }

    fn submit_location_form(&mut self) -> Result<(), StateError> {
        let draft = self.location_form.draft()?;
        match self.location_form_mode {
            FormMode::Create => self.dispatch(NetworkEvent::CreateLocation { draft }),
            FormMode::Edit(id) => self.dispatch(NetworkEvent::UpdateLocation { id, draft }),
        }
        self.pop_view();
        Ok(())
    }

    fn submit_event_form(&mut self) -> Result<(), StateError> {
        let location_id = self.events_location_id.ok_or(StateError::NoSelection)?;
        let draft = self.event_form.draft(location_id)?;
        match self.event_form_mode {
            FormMode::Create => self.dispatch(NetworkEvent::CreateEvent { draft }),
            FormMode::Edit(id) => self.dispatch(NetworkEvent::UpdateEvent { id, draft }),
        }
        self.pop_view();
        Ok(())
    }

    fn send_chat(&mut self) -> Result<(), StateError> {
        let message = self.chat_form.take_message();
        self.chat_form.focus_first();
        if let Some(query) = message {
            self.send_chat_query(query);
        }
        Ok(())
    }

    fn send_chat_query(&mut self, query: String) {
        self.chat_messages.push(ChatMessage::from_user(query.to_owned()));
        let user_id = self.user.as_ref().map(|user| user.id);
        self.dispatch(NetworkEvent::Chat { query, user_id });
    }

    /// Send the canned prompt at the index of the suggestion list.
    ///
    pub fn send_suggestion(&mut self, index: usize) {
        if let Some(suggestion) = self.suggestions.get(index) {
            let text = suggestion.text.to_owned();
            self.send_chat_query(text);
        }
    }

    pub fn get_locations(&self) -> &[Location] {
        &self.locations
    }

    /// Replace the loaded locations, keeping the selection in range.
    ///
    pub fn set_locations(&mut self, locations: Vec<Location>) {
        self.locations = locations;
        clamp_selection(&mut self.locations_list_state, self.locations.len());
    }

    /// Insert the location or replace the one with the same id.
    ///
    pub fn upsert_location(&mut self, location: Location) {
        match self.locations.iter_mut().find(|l| l.id == location.id) {
            Some(existing) => *existing = location,
            None => {
                self.locations.push(location);
                self.locations_list_state
                    .select(Some(self.locations.len() - 1));
            }
        }
    }

    pub fn remove_location(&mut self, id: u64) {
        self.locations.retain(|l| l.id != id);
        clamp_selection(&mut self.locations_list_state, self.locations.len());
        if self.events_location_id == Some(id) {
            self.events.clear();
            self.events_location_id = None;
        }
    }

    pub fn get_locations_list_state(&mut self) -> &mut ListState {
        &mut self.locations_list_state
    }

    pub fn selected_location(&self) -> Option<&Location> {
        self.locations_list_state
            .selected()
            .and_then(|index| self.locations.get(index))
    }

    pub fn select_next_location(&mut self) {
        select_next(&mut self.locations_list_state, self.locations.len());
    }

    pub fn select_previous_location(&mut self) {
        select_previous(&mut self.locations_list_state, self.locations.len());
    }

    /// Location whose events are loaded.
    ///
    pub fn events_location(&self) -> Option<&Location> {
        self.events_location_id
            .and_then(|id| self.locations.iter().find(|l| l.id == id))
    }

    pub fn get_events(&self) -> &[Event] {
        &self.events
    }

    pub fn set_events(&mut self, location_id: u64, events: Vec<Event>) {
        if self.events_location_id != Some(location_id) {
            debug!("Ignoring events for location {} no longer shown", location_id);
            return;
        }
        self.events = events;
        clamp_selection(&mut self.events_list_state, self.events.len());
    }

    pub fn upsert_event(&mut self, event: Event) {
        match self.events.iter_mut().find(|e| e.id == event.id) {
            Some(existing) => *existing = event,
            None => {
                self.events.push(event);
                self.events_list_state.select(Some(self.events.len() - 1));
            }
        }
    }

    pub fn remove_event(&mut self, id: u64) {
        self.events.retain(|e| e.id != id);
        clamp_selection(&mut self.events_list_state, self.events.len());
    }

    pub fn get_events_list_state(&mut self) -> &mut ListState {
        &mut self.events_list_state
    }

    pub fn selected_event(&self) -> Option<&Event> {
        self.events_list_state
            .selected()
            .and_then(|index| self.events.get(index))
    }

    pub fn select_next_event(&mut self) {
        select_next(&mut self.events_list_state, self.events.len());
    }

    pub fn select_previous_event(&mut self) {
        select_previous(&mut self.events_list_state, self.events.len());
    }

    /// Show the events of the selected location and request them.
    ///
    pub fn open_events(&mut self) {
        let location_id = match self.selected_location() {
            Some(location) => location.id,
            None => return self.set_error(StateError::NoSelection.to_string()),
        };
        if self.events_location_id != Some(location_id) {
            self.events.clear();
            self.events_list_state = ListState::default();
            self.events_location_id = Some(location_id);
        }
        self.push_view(View::Events);
        self.dispatch(NetworkEvent::LocationEvents { location_id });
    }

    /// Request fresh data for the current view.
    ///
    pub fn refresh(&mut self) {
        match self.current_view() {
            View::Locations => self.dispatch(NetworkEvent::Locations),
            View::Events | View::Schedule => {
                if let Some(location_id) = self.events_location_id {
                    self.dispatch(NetworkEvent::LocationEvents { location_id });
                }
            }
            View::Chat => self.dispatch(NetworkEvent::ChatSuggestions),
            View::Detail => {
                if let Some(target) = self.detail_target {
                    self.dispatch(target.into());
                }
            }
            _ => (),
        }
    }

    pub fn open_schedule(&mut self) {
        self.push_view(View::Schedule);
    }

    /// Events of the shown location, ordered around the given time.
    ///
    pub fn schedule(&self, now: NaiveDateTime) -> Schedule<'_> {
        Schedule::build(&self.events, now)
    }

    pub fn open_create_location(&mut self) {
        self.location_form.clear();
        self.location_form_mode = FormMode::Create;
        self.push_view(View::LocationForm);
        self.location_form.focus_first();
    }

    pub fn open_edit_location(&mut self) {
        let location = match self.selected_location() {
            Some(location) => location.clone(),
            None => return self.set_error(StateError::NoSelection.to_string()),
        };
        self.location_form.clear();
        self.location_form.fill(&location);
        self.location_form_mode = FormMode::Edit(location.id);
        self.push_view(View::LocationForm);
        self.location_form.focus_first();
    }

    pub fn open_create_event(&mut self) {
        self.event_form.clear();
        self.event_form_mode = FormMode::Create;
        self.push_view(View::EventForm);
        self.event_form.focus_first();
    }

    pub fn open_edit_event(&mut self) {
        let event = match self.selected_event() {
            Some(event) => event.clone(),
            None => return self.set_error(StateError::NoSelection.to_string()),
        };
        self.event_form.clear();
        self.event_form.fill(&event);
        self.event_form_mode = FormMode::Edit(event.id);
        self.push_view(View::EventForm);
        self.event_form.focus_first();
    }

    /// Ask for confirmation before deleting the selected record.
    ///
    pub fn request_delete_selected(&mut self) {
        let target = match self.current_view() {
            View::Locations => self.selected_location().map(|l| DeleteTarget::Location(l.id)),
            View::Events => self.selected_event().map(|e| DeleteTarget::Event(e.id)),
            _ => None,
        };
        match target {
            Some(target) => self.delete_confirmation = Some(target),
            None => self.set_error(StateError::NoSelection.to_string()),
        }
    }

    pub fn get_delete_confirmation(&self) -> Option<DeleteTarget> {
        self.delete_confirmation
    }

    pub fn confirm_delete(&mut self) {
        match self.delete_confirmation.take() {
            Some(DeleteTarget::Location(id)) => self.dispatch(NetworkEvent::DeleteLocation { id }),
            Some(DeleteTarget::Event(id)) => self.dispatch(NetworkEvent::DeleteEvent { id }),
            None => (),
        }
    }

    pub fn cancel_delete(&mut self) {
        self.delete_confirmation = None;
    }

    /// Open the assistant, requesting suggestions on first use and the
    /// user's earlier exchanges while the transcript is empty.
    ///
    pub fn open_chat(&mut self) {
        self.push_view(View::Chat);
        self.chat_form.focus_first();
        if self.suggestions.is_empty() {
            self.dispatch(NetworkEvent::ChatSuggestions);
        }
        if self.chat_messages.is_empty() {
            if let Some(user_id) = self.user.as_ref().map(|user| user.id) {
                self.dispatch(NetworkEvent::ChatHistory { user_id });
            }
        }
    }

    /// Put earlier exchanges ahead of anything said since the chat opened.
    ///
    pub fn restore_chat_history(&mut self, history: Vec<HistoryEntry>) {
        let mut restored = Vec::with_capacity(history.len() * 2 + self.chat_messages.len());
        for entry in history {
            if !entry.query.is_empty() {
                restored.push(ChatMessage::from_user(entry.query));
            }
            if !entry.response.is_empty() {
                restored.push(ChatMessage::from_assistant(
                    entry.response,
                    SearchResults::default(),
                ));
            }
        }
        debug!("Restored {} chat messages", restored.len());
        restored.append(&mut self.chat_messages);
        self.chat_messages = restored;
    }

    /// Rate the latest assistant reply. The reply's position in the
    /// transcript identifies it to the assistant.
    ///
    pub fn rate_last_reply(&mut self, rating: u8) {
        let index = match self
            .chat_messages
            .iter()
            .rposition(|message| message.author == Author::Assistant)
        {
            Some(index) => index,
            None => return self.set_error("No reply to rate yet.".to_string()),
        };
        self.chat_messages[index].rating = Some(rating);
        let feedback = Feedback {
            message_id: index as u64,
            rating,
            feedback: String::new(),
            user_id: self.user.as_ref().map(|user| user.id),
        };
        self.dispatch(NetworkEvent::ChatFeedback { feedback });
    }

    /// Search results of the latest reply that found anything.
    ///
    fn latest_results(&self) -> Option<&SearchResults> {
        self.chat_messages.iter().rev().map(|m| &m.results).find(|results| {
            !results.restaurants.is_empty() || !results.events.is_empty()
        })
    }

    /// Show the details of the top restaurant the assistant suggested.
    ///
    pub fn open_location_detail(&mut self) {
        let id = self
            .latest_results()
            .and_then(|results| results.restaurants.first())
            .map(|restaurant| restaurant.id);
        match id {
            Some(id) => self.open_detail(DetailTarget::Location(id)),
            None => self.set_error("No suggested restaurant to show.".to_string()),
        }
    }

    /// Show the details of the top event the assistant suggested.
    ///
    pub fn open_event_detail(&mut self) {
        let id = self
            .latest_results()
            .and_then(|results| results.events.first())
            .map(|event| event.id);
        match id {
            Some(id) => self.open_detail(DetailTarget::Event(id)),
            None => self.set_error("No suggested event to show.".to_string()),
        }
    }

    fn open_detail(&mut self, target: DetailTarget) {
        self.chat_form.blur_all();
        self.detail_target = Some(target);
        self.detail = None;
        self.push_view(View::Detail);
        self.dispatch(target.into());
    }

    pub fn get_detail(&self) -> Option<&Detail> {
        self.detail.as_ref()
    }

    /// Store fetched details. Details for anything but the requested record
    /// are stale and ignored.
    ///
    pub fn set_detail(&mut self, detail: Detail) {
        if self.detail_target == Some(detail.target()) {
            self.detail = Some(detail);
        } else {
            debug!("Ignoring stale details for {:?}", detail.target());
        }
    }

    pub fn get_chat_messages(&self) -> &[ChatMessage] {
        &self.chat_messages
    }

    pub fn push_chat_reply(&mut self, reply: ChatReply) {
        let mut text = reply.response;
        for restaurant in &reply.search_results.restaurants {
            text.push_str(&format!("\n  * {} ({})", restaurant.name, restaurant.address));
        }
        for event in &reply.search_results.events {
            text.push_str(&format!("\n  * {} at {}", event.title, event.company));
        }
        self.chat_messages
            .push(ChatMessage::from_assistant(text, reply.search_results));
    }

    pub fn get_suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn set_suggestions(&mut self, suggestions: Vec<Suggestion>) {
        self.suggestions = suggestions;
    }

    pub fn get_status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn set_info(&mut self, text: String) {
        self.status = Some(Status {
            kind: StatusKind::Info,
            text,
        });
    }

    pub fn set_error(&mut self, text: String) {
        self.status = Some(Status {
            kind: StatusKind::Error,
            text,
        });
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Return up to `limit` of the most recent log lines, oldest first.
    ///
    pub fn log_entries(&self, limit: usize) -> Vec<String> {
        match self.log_buffer.as_ref().map(|buffer| buffer.lock()) {
            Some(Ok(buffer)) => {
                let skip = buffer.len().saturating_sub(limit);
                buffer.iter().skip(skip).cloned().collect()
            }
            _ => vec![],
        }
    }

    pub fn get_theme(&self) -> &Theme {
        &self.theme
    }

    /// Ask the config saver to persist the session.
    ///
    fn request_config_save(&self) {
        if let Some(sender) = &self.config_save_sender {
            if let Err(err) = sender.send(()) {
                error!("Failed to request config save: {}", err);
            }
        }
    }

    /// Dispatches an asynchronous network event.
    ///
    pub fn dispatch(&mut self, event: NetworkEvent) {
        if let Some(net_sender) = &self.net_sender {
            match net_sender.send(event) {
                Ok(()) => self.pending_requests += 1,
                Err(err) => error!("Received error from network dispatch: {}", err),
            }
        }
    }
}

fn clamp_selection(list_state: &mut ListState, len: usize) {
    let selected = match (list_state.selected(), len) {
        (_, 0) => None,
        (Some(index), len) => Some(index.min(len - 1)),
        (None, _) => Some(0),
    };
    list_state.select(selected);
}

fn select_next(list_state: &mut ListState, len: usize) {
    if len == 0 {
        return;
    }
    let next = match list_state.selected() {
        Some(index) if index + 1 < len => index + 1,
        _ => 0,
    };
    list_state.select(Some(next));
}

fn select_previous(list_state: &mut ListState, len: usize) {
    if len == 0 {
        return;
    }
    let previous = match list_state.selected() {
        Some(index) if index > 0 => index - 1,
        _ => len - 1,
    };
    list_state.select(Some(previous));
}
