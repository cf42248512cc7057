//! Overlay state for the ticket detail view
//!
//! Exactly one overlay is active at a time. Overlays that take text input own
//! that text, so the presentation layer writes through [`Overlay::set_input`]
//! instead of keeping its own copy.

use std::fmt;

/// Team members a ticket can be assigned to
pub const TEAM_MEMBERS: &[&str] = &[
    "Sarah (Technical Expert)",
    "Mike (Billing Specialist)",
    "Jessica (General Support)",
    "David (Urgent Issues)",
];

/// Kinds of information that can be requested from the customer
pub const INFO_KINDS: &[&str] = &[
    "Device and OS details",
    "Error screenshots",
    "Account information",
    "Steps to reproduce",
];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    Idle,
    Assigning,
    AddingNotes {
        notes: String,
    },
    RequestingInfo,
    Escalating,
    Rating,
    ShowingResult(String),
}

impl Overlay {
    pub fn adding_notes() -> Self {
        Overlay::AddingNotes {
            notes: String::new(),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Overlay::Idle)
    }

    /// Result message, if a confirmation is showing
    pub fn result_message(&self) -> Option<&str> {
        match self {
            Overlay::ShowingResult(message) => Some(message),
            _ => None,
        }
    }

    /// Replace the text owned by an input overlay. Returns false if this
    /// overlay takes no input.
    pub fn set_input(&mut self, text: &str) -> bool {
        match self {
            Overlay::AddingNotes { notes } => {
                *notes = text.to_string();
                true
            }
            _ => false,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Overlay::Idle => "",
            Overlay::Assigning => "Assign to Team",
            Overlay::AddingNotes { .. } => "Add Internal Notes",
            Overlay::RequestingInfo => "Request More Information",
            Overlay::Escalating => "Escalate Ticket",
            Overlay::Rating => "Customer Satisfaction",
            Overlay::ShowingResult(_) => "Success",
        }
    }
}

impl fmt::Display for Overlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Overlay::Idle => write!(f, "idle"),
            Overlay::ShowingResult(message) => write!(f, "{}: {}", self.title(), message),
            _ => write!(f, "{}", self.title()),
        }
    }
}
