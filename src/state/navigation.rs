//! Navigation-related state types.
//!
//! This module contains enums and types related to views and what a form is
//! currently editing.

/// Specifying the different views.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum View {
    Login,
    Signup,
    Locations,
    LocationForm,
    Events,
    EventForm,
    Schedule,
    Chat,
    Detail,
}

impl View {
    /// Returns true for views whose keys go to a form.
    ///
    pub fn is_form(&self) -> bool {
        matches!(
            self,
            View::Login | View::Signup | View::LocationForm | View::EventForm | View::Chat
        )
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Login => "Sign In",
            View::Signup => "Create Account",
            View::Locations => "Locations",
            View::LocationForm => "Location",
            View::Events => "Events",
            View::EventForm => "Event",
            View::Schedule => "Schedule",
            View::Chat => "Assistant",
            View::Detail => "Details",
        }
    }
}

/// Whether a form creates a new record or edits an existing one.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FormMode {
    Create,
    Edit(u64),
}

/// Record awaiting delete confirmation.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DeleteTarget {
    Location(u64),
    Event(u64),
}

/// Record whose details are shown in the detail view.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DetailTarget {
    Location(u64),
    Event(u64),
}
