use crate::api::{ApiError, Backend, EventDraft, Feedback, LocationDraft};
use crate::state::{Detail, DetailTarget, State};
use anyhow::Result;
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different network event types.
///
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Login {
        email: String,
        password: String,
    },
    Signup {
        name: String,
        email: String,
        password: String,
    },
    SignOut,
    Locations,
    CreateLocation {
        draft: LocationDraft,
    },
    UpdateLocation {
        id: u64,
        draft: LocationDraft,
    },
    DeleteLocation {
        id: u64,
    },
    LocationEvents {
        location_id: u64,
    },
    CreateEvent {
        draft: EventDraft,
    },
    UpdateEvent {
        id: u64,
        draft: EventDraft,
    },
    DeleteEvent {
        id: u64,
    },
    Chat {
        query: String,
        user_id: Option<u64>,
    },
    ChatSuggestions,
    ChatHistory {
        user_id: u64,
    },
    ChatFeedback {
        feedback: Feedback,
    },
    LocationDetails {
        id: u64,
    },
    EventDetails {
        id: u64,
    },
}

impl From<DetailTarget> for Event {
    fn from(target: DetailTarget) -> Self {
        match target {
            DetailTarget::Location(id) => Event::LocationDetails { id },
            DetailTarget::Event(id) => Event::EventDetails { id },
        }
    }
}

/// Specify struct for managing state with network events.
///
pub struct Handler<'a> {
    state: &'a Arc<Mutex<State>>,
    backend: &'a mut Backend,
}

impl<'a> Handler<'a> {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: &'a Arc<Mutex<State>>, backend: &'a mut Backend) -> Self {
        Handler { state, backend }
    }

    /// Handle network events by type. Failures are reported on the status
    /// line; a rejected session signs the user out.
    ///
    pub async fn handle(&mut self, event: Event) -> Result<()> {
        match &event {
            Event::Login { email, .. } => debug!("Processing network event 'Login' for {}...", email),
            Event::Signup { email, .. } => debug!("Processing network event 'Signup' for {}...", email),
            other => debug!("Processing network event '{:?}'...", other),
        }
        let result = match event {
            Event::Login { email, password } => self.login(email, password).await,
            Event::Signup {
                name,
                email,
                password,
            } => self.signup(name, email, password).await,
            Event::SignOut => self.sign_out().await,
            Event::Locations => self.locations().await,
            Event::CreateLocation { draft } => self.save_location(None, draft).await,
            Event::UpdateLocation { id, draft } => self.save_location(Some(id), draft).await,
            Event::DeleteLocation { id } => self.delete_location(id).await,
            Event::LocationEvents { location_id } => self.location_events(location_id).await,
            Event::CreateEvent { draft } => self.save_event(None, draft).await,
            Event::UpdateEvent { id, draft } => self.save_event(Some(id), draft).await,
            Event::DeleteEvent { id } => self.delete_event(id).await,
            Event::Chat { query, user_id } => self.chat(query, user_id).await,
            Event::ChatSuggestions => self.chat_suggestions().await,
            Event::ChatHistory { user_id } => self.chat_history(user_id).await,
            Event::ChatFeedback { feedback } => self.chat_feedback(feedback).await,
            Event::LocationDetails { id } => self.location_details(id).await,
            Event::EventDetails { id } => self.event_details(id).await,
        };
        let mut state = self.state.lock().await;
        state.finish_request();
        if let Err(e) = &result {
            state.set_error(e.to_string());
            if e.is_unauthorized() && state.is_signed_in() {
                warn!("Session rejected by backend, signing out.");
                state.sign_out();
            }
        }
        Ok(result?)
    }

    async fn login(&mut self, email: String, password: String) -> Result<(), ApiError> {
        info!("Signing in as {}...", email);
        let session = self.backend.login(&email, &password).await?;
        let mut state = self.state.lock().await;
        state.set_session(session);
        state.set_info(format!("Signed in as {}.", email));
        Ok(())
    }

    async fn signup(
        &mut self,
        name: String,
        email: String,
        password: String,
    ) -> Result<(), ApiError> {
        info!("Creating account for {}...", email);
        let session = self.backend.signup(&name, &email, &password).await?;
        let mut state = self.state.lock().await;
        state.set_session(session);
        state.set_info(format!("Welcome, {}!", name));
        Ok(())
    }

    async fn sign_out(&mut self) -> Result<(), ApiError> {
        self.backend.set_session_token(None);
        info!("Signed out.");
        Ok(())
    }

    /// Update state with every location of the user.
    ///
    async fn locations(&mut self) -> Result<(), ApiError> {
        info!("Fetching locations...");
        let locations = self.backend.locations().await?;
        info!("Received {} locations.", locations.len());
        let mut state = self.state.lock().await;
        state.set_locations(locations);
        Ok(())
    }

    async fn save_location(&mut self, id: Option<u64>, draft: LocationDraft) -> Result<(), ApiError> {
        let location = match id {
            Some(id) => self.backend.update_location(id, &draft).await?,
            None => self.backend.create_location(&draft).await?,
        };
        info!("Saved location '{}' (ID: {}).", location.name, location.id);
        let mut state = self.state.lock().await;
        state.set_info(format!("Saved {}.", location.name));
        state.upsert_location(location);
        Ok(())
    }

    async fn delete_location(&mut self, id: u64) -> Result<(), ApiError> {
        self.backend.delete_location(id).await?;
        info!("Location {} deleted.", id);
        let mut state = self.state.lock().await;
        state.remove_location(id);
        state.set_info("Location deleted.".to_string());
        Ok(())
    }

    /// Update state with the events hosted at the location.
    ///
    async fn location_events(&mut self, location_id: u64) -> Result<(), ApiError> {
        info!("Fetching events for location {}...", location_id);
        let events = self.backend.location_events(location_id).await?;
        info!("Received {} events.", events.len());
        let mut state = self.state.lock().await;
        state.set_events(location_id, events);
        Ok(())
    }

    async fn save_event(&mut self, id: Option<u64>, draft: EventDraft) -> Result<(), ApiError> {
        let mut event = match id {
            Some(id) => self.backend.update_event(id, &draft).await?,
            None => self.backend.create_event(&draft).await?,
        };
        event.company_id.get_or_insert(draft.company_id);
        info!("Saved event '{}' (ID: {}).", event.title, event.id);
        let mut state = self.state.lock().await;
        state.set_info(format!("Saved {}.", event.title));
        state.upsert_event(event);
        Ok(())
    }

    async fn delete_event(&mut self, id: u64) -> Result<(), ApiError> {
        self.backend.delete_event(id).await?;
        info!("Event {} deleted.", id);
        let mut state = self.state.lock().await;
        state.remove_event(id);
        state.set_info("Event deleted.".to_string());
        Ok(())
    }

    async fn chat(&mut self, query: String, user_id: Option<u64>) -> Result<(), ApiError> {
        let reply = self.backend.chat(&query, user_id).await?;
        debug!("Assistant answered with intent '{}'.", reply.intent);
        let mut state = self.state.lock().await;
        state.push_chat_reply(reply);
        Ok(())
    }

    async fn chat_suggestions(&mut self) -> Result<(), ApiError> {
        let suggestions = self.backend.chat_suggestions().await?;
        let mut state = self.state.lock().await;
        state.set_suggestions(suggestions);
        Ok(())
    }

    async fn chat_history(&mut self, user_id: u64) -> Result<(), ApiError> {
        let history = self.backend.chat_history(user_id).await?;
        debug!("Received {} earlier chat exchanges.", history.len());
        let mut state = self.state.lock().await;
        state.restore_chat_history(history);
        Ok(())
    }

    async fn chat_feedback(&mut self, feedback: Feedback) -> Result<(), ApiError> {
        self.backend.chat_feedback(&feedback).await?;
        info!(
            "Rated reply {} with {}.",
            feedback.message_id, feedback.rating
        );
        let mut state = self.state.lock().await;
        state.set_info("Thanks for the feedback.".to_string());
        Ok(())
    }

    async fn location_details(&mut self, id: u64) -> Result<(), ApiError> {
        let location = self.backend.location_details(id).await?;
        let mut state = self.state.lock().await;
        state.set_detail(Detail::Location(location));
        Ok(())
    }

    async fn event_details(&mut self, id: u64) -> Result<(), ApiError> {
        let event = self.backend.event_details(id).await?;
        let mut state = self.state.lock().await;
        state.set_detail(Detail::Event(event));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{StatusKind, View};
    use httpmock::prelude::*;
    use serde_json::json;
    use std::time::Duration;

    fn backend(server: &MockServer, token: Option<&str>) -> Backend {
        let mut backend = Backend::new(
            &server.base_url(),
            &server.base_url(),
            Duration::from_secs(5),
        )
        .unwrap();
        backend.set_session_token(token.map(str::to_owned));
        backend
    }

    fn location_json(id: u64, name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "category": "Restaurant",
            "address": "Str. Mare 1",
            "description": null,
            "email": "casa@example.com",
            "tags": [],
            "latitude": 45.75,
            "longitude": 21.22
        })
    }

    #[tokio::test]
    async fn login_starts_session() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/login");
                then.status(200).json_body(json!({
                    "token": "abc",
                    "user": { "id": 7, "name": "Ana", "email": "ana@example.com" }
                }));
            })
            .await;
        let state = Arc::new(Mutex::new(State::default()));
        let mut backend = backend(&server, None);
        let mut handler = Handler::new(&state, &mut backend);
        handler
            .handle(Event::Login {
                email: "ana@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();
        let state = state.lock().await;
        assert_eq!(state.session_token(), Some("abc"));
        assert_eq!(state.current_view(), View::Locations);
        assert_eq!(state.get_user().unwrap().id, 7);
    }

    #[tokio::test]
    async fn locations_fill_state() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/companies");
                then.status(200)
                    .json_body(json!([location_json(1, "Casa"), location_json(2, "Bistro")]));
            })
            .await;
        let state = Arc::new(Mutex::new(State::default()));
        let mut backend = backend(&server, Some("abc"));
        Handler::new(&state, &mut backend)
            .handle(Event::Locations)
            .await
            .unwrap();
        let state = state.lock().await;
        assert_eq!(state.get_locations().len(), 2);
        assert_eq!(state.selected_location().unwrap().name, "Casa");
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn rejected_session_signs_out() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/companies");
                then.status(401)
                    .json_body(json!({ "error": true, "message": "Token expired" }));
            })
            .await;
        let state = Arc::new(Mutex::new(State::default()));
        state.lock().await.set_session(crate::api::Session {
            token: "abc".to_string(),
            user: crate::api::User {
                id: 1,
                name: "Ana".to_string(),
                email: "ana@example.com".to_string(),
            },
        });
        let mut backend = backend(&server, Some("abc"));
        let result = Handler::new(&state, &mut backend)
            .handle(Event::Locations)
            .await;
        assert!(result.is_err());
        let state = state.lock().await;
        assert!(!state.is_signed_in());
        assert_eq!(state.current_view(), View::Login);
        let status = state.get_status().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.contains("Token expired"));
    }

    #[tokio::test]
    async fn create_location_upserts() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/companies")
                    .header("Authorization", "Bearer abc");
                then.status(201).json_body(location_json(5, "Casa Noua"));
            })
            .await;
        let state = Arc::new(Mutex::new(State::default()));
        let mut backend = backend(&server, Some("abc"));
        let draft = LocationDraft {
            name: "Casa Noua".to_string(),
            address: "Str. Mare 1".to_string(),
            ..LocationDraft::default()
        };
        Handler::new(&state, &mut backend)
            .handle(Event::CreateLocation { draft })
            .await
            .unwrap();
        mock.assert_async().await;
        let state = state.lock().await;
        assert_eq!(state.get_locations()[0].id, 5);
        assert_eq!(state.get_status().unwrap().kind, StatusKind::Info);
    }

    #[tokio::test]
    async fn invalid_chat_query_reports_error() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/chat");
                then.status(200);
            })
            .await;
        let state = Arc::new(Mutex::new(State::default()));
        let mut backend = backend(&server, Some("abc"));
        let result = Handler::new(&state, &mut backend)
            .handle(Event::Chat {
                query: "   ".to_string(),
                user_id: None,
            })
            .await;
        assert!(result.is_err());
        mock.assert_hits_async(0).await;
        let state = state.lock().await;
        assert_eq!(state.get_status().unwrap().kind, StatusKind::Error);
    }

    #[tokio::test]
    async fn sign_out_drops_backend_token() {
        let server = MockServer::start_async().await;
        let state = Arc::new(Mutex::new(State::default()));
        let mut backend = backend(&server, Some("abc"));
        Handler::new(&state, &mut backend)
            .handle(Event::SignOut)
            .await
            .unwrap();
        let result = backend.locations().await;
        assert!(matches!(result, Err(ApiError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn chat_history_restores_transcript() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/chat/history").query_param("user_id", "7");
                then.status(200).json_body(json!({
                    "success": true,
                    "history": [{ "query": "vreau pizza", "response": "Try Trattoria." }]
                }));
            })
            .await;
        let state = Arc::new(Mutex::new(State::default()));
        let mut backend = backend(&server, Some("abc"));
        Handler::new(&state, &mut backend)
            .handle(Event::ChatHistory { user_id: 7 })
            .await
            .unwrap();
        let state = state.lock().await;
        let texts: Vec<&str> = state
            .get_chat_messages()
            .iter()
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(texts, vec!["vreau pizza", "Try Trattoria."]);
    }

    #[tokio::test]
    async fn chat_feedback_confirms_on_status_line() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/feedback")
                    .json_body_partial(r#"{ "message_id": 1, "rating": 5 }"#);
                then.status(200).json_body(json!({ "success": true }));
            })
            .await;
        let state = Arc::new(Mutex::new(State::default()));
        let mut backend = backend(&server, Some("abc"));
        let feedback = Feedback {
            message_id: 1,
            rating: 5,
            feedback: String::new(),
            user_id: Some(7),
        };
        Handler::new(&state, &mut backend)
            .handle(Event::ChatFeedback { feedback })
            .await
            .unwrap();
        mock.assert_async().await;
        let state = state.lock().await;
        assert_eq!(state.get_status().unwrap().kind, StatusKind::Info);
    }

    #[tokio::test]
    async fn location_details_fill_detail_view() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/companies/details/7");
                then.status(200).json_body(json!({
                    "success": true,
                    "company": { "id": 7, "name": "Trattoria", "rating": 4.5 }
                }));
            })
            .await;
        let state = Arc::new(Mutex::new(State::default()));
        {
            let mut state = state.lock().await;
            let reply: crate::api::ChatReply = serde_json::from_value(json!({
                "response": "Try Trattoria.",
                "search_results": { "restaurants": [{ "id": 7, "name": "Trattoria" }] }
            }))
            .unwrap();
            state.push_chat_reply(reply);
            state.open_location_detail();
        }
        let mut backend = backend(&server, Some("abc"));
        Handler::new(&state, &mut backend)
            .handle(Event::LocationDetails { id: 7 })
            .await
            .unwrap();
        let state = state.lock().await;
        assert_eq!(state.current_view(), View::Detail);
        match state.get_detail() {
            Some(Detail::Location(location)) => assert_eq!(location.name, "Trattoria"),
            other => panic!("unexpected detail {:?}", other),
        }
    }

    #[test]
    fn detail_targets_map_to_lookups() {
        assert_eq!(
            Event::from(DetailTarget::Location(3)),
            Event::LocationDetails { id: 3 }
        );
        assert_eq!(
            Event::from(DetailTarget::Event(4)),
            Event::EventDetails { id: 4 }
        );
    }
}
