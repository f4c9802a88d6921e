//! Application state management module.
//!
//! This module contains the core state management for the application, including:
//! - Main `State` struct that holds all application data
//! - Navigation types (View, FormMode, DeleteTarget, DetailTarget)
//! - Forms whose inputs are coordinated by a `FocusManager`
//! - State error handling

mod error;
mod fields;
mod form;
mod navigation;
mod schedule;

pub use error::StateError;
pub use fields::{
    parse_event_date, parse_tags, ChatField, EventField, LocationField, LoginField, SignupField,
    EVENT_DATE_FORMAT,
};
pub use form::{FocusNotice, Form, FormField, FormStep, InputControl};
pub use navigation::{DeleteTarget, DetailTarget, FormMode, View};
pub use schedule::{Schedule, ScheduledEvent};

// State struct, methods and Default impl are in state_impl.rs
#[path = "state_impl.rs"]
mod state_impl;

pub use state_impl::{Author, ChatMessage, Detail, State, Status, StatusKind};
