//! Terminal client for managing restaurant locations and their events.
//!
//! Forms are built from text inputs whose keyboard focus is coordinated by
//! [`focus::FocusManager`], which keeps at most one input focused and lets
//! Enter chain from one input to the next.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod focus;
pub mod logger;
pub mod state;
pub mod ui;
