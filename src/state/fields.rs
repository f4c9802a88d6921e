//! Concrete forms of the application and the validation of their input.

use super::form::{Form, FormField};
use super::StateError;
use crate::api::{Event, EventDraft, Location, LocationDraft};
use chrono::{NaiveDate, NaiveDateTime};
use log::*;
use regex::Regex;
use std::sync::OnceLock;

/// Format of event dates as typed and as sent to the backend.
///
pub const EVENT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Other date-time layouts the backend is known to send.
const BACKEND_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum LoginField {
    Email,
    Password,
}

impl FormField for LoginField {
    const ALL: &'static [Self] = &[LoginField::Email, LoginField::Password];

    fn label(&self) -> &'static str {
        match self {
            LoginField::Email => "Email",
            LoginField::Password => "Password",
        }
    }

    fn placeholder(&self) -> &'static str {
        match self {
            LoginField::Email => "you@restaurant.com",
            LoginField::Password => "",
        }
    }

    fn is_secret(&self) -> bool {
        matches!(self, LoginField::Password)
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum SignupField {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

impl FormField for SignupField {
    const ALL: &'static [Self] = &[
        SignupField::Name,
        SignupField::Email,
        SignupField::Password,
        SignupField::ConfirmPassword,
    ];

    fn label(&self) -> &'static str {
        match self {
            SignupField::Name => "Name",
            SignupField::Email => "Email",
            SignupField::Password => "Password",
            SignupField::ConfirmPassword => "Confirm Password",
        }
    }

    fn is_secret(&self) -> bool {
        matches!(self, SignupField::Password | SignupField::ConfirmPassword)
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum LocationField {
    Name,
    Category,
    Address,
    Description,
    Latitude,
    Longitude,
}

impl FormField for LocationField {
    const ALL: &'static [Self] = &[
        LocationField::Name,
        LocationField::Category,
        LocationField::Address,
        LocationField::Description,
        LocationField::Latitude,
        LocationField::Longitude,
    ];

    fn label(&self) -> &'static str {
        match self {
            LocationField::Name => "Name",
            LocationField::Category => "Category",
            LocationField::Address => "Address",
            LocationField::Description => "Description",
            LocationField::Latitude => "Latitude",
            LocationField::Longitude => "Longitude",
        }
    }

    fn placeholder(&self) -> &'static str {
        match self {
            LocationField::Category => "italian, romanian, pizza...",
            LocationField::Latitude => "45.7489",
            LocationField::Longitude => "21.2087",
            _ => "",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum EventField {
    Title,
    Description,
    Date,
    Tags,
}

impl FormField for EventField {
    const ALL: &'static [Self] = &[
        EventField::Title,
        EventField::Description,
        EventField::Date,
        EventField::Tags,
    ];

    fn label(&self) -> &'static str {
        match self {
            EventField::Title => "Title",
            EventField::Description => "Description",
            EventField::Date => "Date",
            EventField::Tags => "Tags",
        }
    }

    fn placeholder(&self) -> &'static str {
        match self {
            EventField::Date => "2026-12-31 20:00",
            EventField::Tags => "live music, wine",
            _ => "",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ChatField {
    Message,
}

impl FormField for ChatField {
    const ALL: &'static [Self] = &[ChatField::Message];

    fn label(&self) -> &'static str {
        "Message"
    }

    fn placeholder(&self) -> &'static str {
        "Ask for a restaurant or an event..."
    }
}

fn required<F: FormField>(form: &Form<F>, id: F) -> Result<String, StateError> {
    let value = form.value(id);
    if value.is_empty() {
        return Err(StateError::invalid(id.label(), "is required"));
    }
    Ok(value)
}

fn email<F: FormField>(form: &Form<F>, id: F) -> Result<String, StateError> {
    let value = required(form, id)?;
    let valid = email_regex().map_or(false, |re| re.is_match(&value));
    if !valid {
        return Err(StateError::invalid(id.label(), "must be a valid address"));
    }
    Ok(value)
}

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| match Regex::new(EMAIL_PATTERN) {
            Ok(re) => Some(re),
            Err(e) => {
                error!("Failed to compile email pattern '{}': {}", EMAIL_PATTERN, e);
                None
            }
        })
        .as_ref()
}

fn coordinate<F: FormField>(form: &Form<F>, id: F, limit: f64) -> Result<f64, StateError> {
    let value = form.value(id);
    if value.is_empty() {
        return Ok(0.0);
    }
    match value.parse::<f64>() {
        Ok(number) if number.abs() <= limit => Ok(number),
        _ => Err(StateError::invalid(
            id.label(),
            &format!("must be a number between -{} and {}", limit, limit),
        )),
    }
}

/// Split comma separated tags, dropping blanks.
///
pub fn parse_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse an event date in `EVENT_DATE_FORMAT` or one of the ISO 8601 forms
/// the backend returns. A bare date reads as midnight.
///
pub fn parse_event_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    std::iter::once(EVENT_DATE_FORMAT)
        .chain(BACKEND_DATE_FORMATS.iter().copied())
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

impl Form<LoginField> {
    /// Return validated (email, password).
    ///
    pub fn credentials(&self) -> Result<(String, String), StateError> {
        let email = email(self, LoginField::Email)?;
        let password = required(self, LoginField::Password)?;
        Ok((email, password))
    }
}

impl Form<SignupField> {
    /// Return validated (name, email, password).
    ///
    pub fn registration(&self) -> Result<(String, String, String), StateError> {
        let name = required(self, SignupField::Name)?;
        let email = email(self, SignupField::Email)?;
        let password = required(self, SignupField::Password)?;
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(StateError::invalid(
                SignupField::Password.label(),
                &format!("must be at least {} characters", MIN_PASSWORD_LENGTH),
            ));
        }
        if self.value(SignupField::ConfirmPassword) != password {
            return Err(StateError::invalid(
                SignupField::ConfirmPassword.label(),
                "does not match",
            ));
        }
        Ok((name, email, password))
    }
}

impl Form<LocationField> {
    pub fn draft(&self) -> Result<LocationDraft, StateError> {
        Ok(LocationDraft {
            name: required(self, LocationField::Name)?,
            category: self.value(LocationField::Category),
            address: required(self, LocationField::Address)?,
            description: self.value(LocationField::Description),
            latitude: coordinate(self, LocationField::Latitude, 90.0)?,
            longitude: coordinate(self, LocationField::Longitude, 180.0)?,
        })
    }

    /// Populate the form for editing the location.
    ///
    pub fn fill(&mut self, location: &Location) {
        self.set_value(LocationField::Name, &location.name);
        self.set_value(LocationField::Category, &location.category);
        self.set_value(LocationField::Address, &location.address);
        self.set_value(LocationField::Description, &location.description);
        self.set_value(LocationField::Latitude, &location.latitude.to_string());
        self.set_value(LocationField::Longitude, &location.longitude.to_string());
    }
}

impl Form<EventField> {
    pub fn draft(&self, company_id: u64) -> Result<EventDraft, StateError> {
        let title = required(self, EventField::Title)?;
        let date = required(self, EventField::Date)?;
        let date = match parse_event_date(&date) {
            Some(parsed) => parsed.format(EVENT_DATE_FORMAT).to_string(),
            None => {
                return Err(StateError::invalid(
                    EventField::Date.label(),
                    "must look like 2026-12-31 20:00",
                ))
            }
        };
        Ok(EventDraft {
            company_id,
            title,
            description: self.value(EventField::Description),
            date,
            tags: parse_tags(&self.value(EventField::Tags)),
        })
    }

    /// Populate the form for editing the event.
    ///
    pub fn fill(&mut self, event: &Event) {
        self.set_value(EventField::Title, &event.title);
        self.set_value(EventField::Description, &event.description);
        let date = match event.date.as_deref() {
            Some(text) => match parse_event_date(text) {
                Some(parsed) => parsed.format(EVENT_DATE_FORMAT).to_string(),
                None => text.to_string(),
            },
            None => String::new(),
        };
        self.set_value(EventField::Date, &date);
        self.set_value(EventField::Tags, &event.tags.join(", "));
    }
}

impl Form<ChatField> {
    /// Take the typed message, leaving the input empty.
    ///
    pub fn take_message(&mut self) -> Option<String> {
        let message = self.value(ChatField::Message);
        self.set_value(ChatField::Message, "");
        if message.is_empty() {
            None
        } else {
            Some(message)
        }
    }
}
