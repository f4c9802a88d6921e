use fake::Dummy;
use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` the same as a missing field.
///
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Defines user data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub email: String,
}

/// Authenticated session returned by login and signup.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Defines restaurant location data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub category: String,
    #[serde(default, deserialize_with = "nullable")]
    pub address: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub email: String,
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub latitude: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub longitude: f64,
}

/// Fields sent when creating or updating a location.
///
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDraft {
    pub name: String,
    pub category: String,
    pub address: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Defines event data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default)]
    pub date: Option<String>, // ISO 8601 from the backend
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub likes: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub company: String, // Location name
    #[serde(default)]
    pub company_id: Option<u64>,
}

/// Fields sent when creating or updating an event.
///
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub company_id: u64,
    pub title: String,
    pub description: String,
    pub date: String,
    pub tags: Vec<String>,
}

/// Restaurant matched by a chat query.
///
#[derive(Clone, Debug, Dummy, PartialEq, Serialize, Deserialize)]
pub struct RestaurantHit {
    pub id: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub category: String,
    #[serde(default, deserialize_with = "nullable")]
    pub address: String,
    #[serde(default)]
    pub relevance_score: f64,
}

/// Event matched by a chat query.
///
#[derive(Clone, Debug, Dummy, PartialEq, Serialize, Deserialize)]
pub struct EventHit {
    pub id: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub company: String,
    #[serde(default)]
    pub relevance_score: f64,
}

/// Search results attached to a chat reply.
///
#[derive(Clone, Debug, Default, Dummy, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub restaurants: Vec<RestaurantHit>,
    #[serde(default)]
    pub events: Vec<EventHit>,
}

/// Defines chat assistant reply.
///
#[derive(Clone, Debug, Dummy, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub intent: String,
    pub response: String,
    #[serde(default)]
    pub search_results: SearchResults,
}

/// Defines canned chat prompt.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: u64,
    pub text: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub icon: String,
}

/// Earlier exchange restored from the assistant's history.
///
#[derive(Clone, Debug, Dummy, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default, deserialize_with = "nullable")]
    pub query: String,
    #[serde(default, deserialize_with = "nullable")]
    pub response: String,
}

/// Rating of one assistant reply, between 1 and 5.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub message_id: u64,
    pub rating: u8,
    pub feedback: String,
    pub user_id: Option<u64>,
}

/// Restaurant as described by the assistant's detail lookup, with its events.
///
#[derive(Clone, Debug, Dummy, PartialEq, Serialize, Deserialize)]
pub struct LocationDetail {
    pub id: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub category: String,
    #[serde(default, deserialize_with = "nullable")]
    pub address: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub rating: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub contact: String,
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub events: Vec<Event>,
}

/// Event as described by the assistant's detail lookup.
///
#[derive(Clone, Debug, Dummy, PartialEq, Serialize, Deserialize)]
pub struct EventDetail {
    pub id: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub likes: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub company: String,
    #[serde(default)]
    pub company_id: Option<u64>,
}
