//! Backend API module.
//!
//! `Backend` talks to two services: the venue backend (accounts, locations,
//! events) and the chat assistant. Both speak JSON over HTTP.

mod client;
mod error;
mod resource;

pub use error::ApiError;
pub use resource::*;

use client::Client;
use log::*;
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// Longest chat query the assistant accepts.
///
pub const MAX_QUERY_LENGTH: usize = 1000;

#[derive(Deserialize)]
struct SuggestionList {
    #[serde(default)]
    suggestions: Vec<Suggestion>,
}

#[derive(Deserialize)]
struct HistoryList {
    #[serde(default)]
    history: Vec<HistoryEntry>,
}

#[derive(Deserialize)]
struct LocationDetailEnvelope {
    company: LocationDetail,
}

#[derive(Deserialize)]
struct EventDetailEnvelope {
    event: EventDetail,
}

#[derive(Deserialize)]
struct Acknowledgement {}

/// Responsible for asynchronous interaction with the backend services
/// including transformation of response data into explicitly-defined types.
///
pub struct Backend {
    api: Client,
    chat: Client,
}

impl Backend {
    /// Returns a new instance for the given service URLs.
    ///
    pub fn new(api_url: &str, chat_url: &str, timeout: Duration) -> Result<Backend, ApiError> {
        debug!(
            "Initializing backend client for {} (chat at {})...",
            api_url, chat_url
        );
        Ok(Backend {
            api: Client::new(api_url, timeout)?,
            chat: Client::new(chat_url, timeout)?,
        })
    }

    /// Use the token for all following backend requests.
    ///
    pub fn set_session_token(&mut self, token: Option<String>) {
        self.api.set_access_token(token);
    }

    /// Exchange credentials for a session.
    ///
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Session, ApiError> {
        debug!("Requesting session for {}...", email);
        let session: Session = self
            .api
            .send(
                Method::POST,
                "auth/login",
                &json!({ "email": email, "password": password }),
            )
            .await?;
        self.set_session_token(Some(session.token.to_owned()));
        Ok(session)
    }

    /// Register a new account and return its session.
    ///
    pub async fn signup(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, ApiError> {
        debug!("Registering account for {}...", email);
        let session: Session = self
            .api
            .send(
                Method::POST,
                "auth/register",
                &json!({ "name": name, "email": email, "password": password }),
            )
            .await?;
        self.set_session_token(Some(session.token.to_owned()));
        Ok(session)
    }

    /// Returns every location visible to the signed-in user.
    ///
    pub async fn locations(&self) -> Result<Vec<Location>, ApiError> {
        self.require_session()?;
        debug!("Requesting locations...");
        let locations: Vec<Location> = self.api.get("companies").await?;
        debug!("Retrieved {} locations", locations.len());
        Ok(locations)
    }

    pub async fn create_location(&self, draft: &LocationDraft) -> Result<Location, ApiError> {
        self.require_session()?;
        debug!("Creating location '{}'...", draft.name);
        self.api.send(Method::POST, "companies", draft).await
    }

    pub async fn update_location(
        &self,
        id: u64,
        draft: &LocationDraft,
    ) -> Result<Location, ApiError> {
        self.require_session()?;
        debug!("Updating location {}...", id);
        self.api
            .send(Method::PUT, &format!("companies/{}", id), draft)
            .await
    }

    pub async fn delete_location(&self, id: u64) -> Result<(), ApiError> {
        self.require_session()?;
        debug!("Deleting location {}...", id);
        self.api
            .send_empty(Method::DELETE, &format!("companies/{}", id))
            .await
    }

    /// Returns every published event.
    ///
    pub async fn events(&self) -> Result<Vec<Event>, ApiError> {
        self.require_session()?;
        debug!("Requesting events...");
        let events: Vec<Event> = self.api.get("events").await?;
        debug!("Retrieved {} events", events.len());
        Ok(events)
    }

    /// Returns the events hosted at a location.
    ///
    pub async fn location_events(&self, location_id: u64) -> Result<Vec<Event>, ApiError> {
        self.require_session()?;
        debug!("Requesting events for location {}...", location_id);
        let events: Vec<Event> = self
            .api
            .send(Method::POST, "companyevents", &json!({ "id": location_id }))
            .await?;
        Ok(events
            .into_iter()
            .map(|mut event| {
                event.company_id.get_or_insert(location_id);
                event
            })
            .collect())
    }

    pub async fn create_event(&self, draft: &EventDraft) -> Result<Event, ApiError> {
        self.require_session()?;
        debug!(
            "Creating event '{}' at location {}...",
            draft.title, draft.company_id
        );
        self.api.send(Method::POST, "events", draft).await
    }

    pub async fn update_event(&self, id: u64, draft: &EventDraft) -> Result<Event, ApiError> {
        self.require_session()?;
        debug!("Updating event {}...", id);
        self.api
            .send(Method::PUT, &format!("events/{}", id), draft)
            .await
    }

    pub async fn delete_event(&self, id: u64) -> Result<(), ApiError> {
        self.require_session()?;
        debug!("Deleting event {}...", id);
        self.api
            .send_empty(Method::DELETE, &format!("events/{}", id))
            .await
    }

    /// Ask the chat assistant a question. Queries are trimmed and must be
    /// non-empty and at most `MAX_QUERY_LENGTH` characters.
    ///
    pub async fn chat(&self, query: &str, user_id: Option<u64>) -> Result<ChatReply, ApiError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ApiError::InvalidQuery("Query cannot be empty".to_string()));
        }
        if query.chars().count() > MAX_QUERY_LENGTH {
            return Err(ApiError::InvalidQuery(format!(
                "Query too long (max {} characters)",
                MAX_QUERY_LENGTH
            )));
        }
        debug!("Sending chat query ({} characters)...", query.len());
        self.chat
            .send(
                Method::POST,
                "chat",
                &json!({ "query": query, "user_id": user_id }),
            )
            .await
    }

    /// Returns canned prompts offered by the chat assistant.
    ///
    pub async fn chat_suggestions(&self) -> Result<Vec<Suggestion>, ApiError> {
        debug!("Requesting chat suggestions...");
        let list: SuggestionList = self.chat.get("chat/suggestions").await?;
        Ok(list.suggestions)
    }

    /// Returns the earlier exchanges the assistant kept for the user.
    ///
    pub async fn chat_history(&self, user_id: u64) -> Result<Vec<HistoryEntry>, ApiError> {
        debug!("Requesting chat history for user {}...", user_id);
        let list: HistoryList = self
            .chat
            .get(&format!("chat/history?user_id={}", user_id))
            .await?;
        Ok(list.history)
    }

    /// Rate an assistant reply. Ratings outside 1..=5 are rejected locally.
    ///
    pub async fn chat_feedback(&self, feedback: &Feedback) -> Result<(), ApiError> {
        if !(1..=5).contains(&feedback.rating) {
            return Err(ApiError::InvalidRating(feedback.rating));
        }
        debug!(
            "Rating reply {} with {}...",
            feedback.message_id, feedback.rating
        );
        let _: Acknowledgement = self
            .chat
            .send(Method::POST, "chat/feedback", feedback)
            .await?;
        Ok(())
    }

    /// Returns what the assistant knows about a restaurant from its results.
    ///
    pub async fn location_details(&self, id: u64) -> Result<LocationDetail, ApiError> {
        debug!("Requesting details of location {}...", id);
        let envelope: LocationDetailEnvelope = self
            .chat
            .get(&format!("companies/details/{}", id))
            .await?;
        Ok(envelope.company)
    }

    /// Returns what the assistant knows about an event from its results.
    ///
    pub async fn event_details(&self, id: u64) -> Result<EventDetail, ApiError> {
        debug!("Requesting details of event {}...", id);
        let envelope: EventDetailEnvelope =
            self.chat.get(&format!("events/details/{}", id)).await?;
        Ok(envelope.event)
    }

    fn require_session(&self) -> Result<(), ApiError> {
        if self.api.has_access_token() {
            Ok(())
        } else {
            Err(ApiError::NotAuthenticated)
        }
    }
}
