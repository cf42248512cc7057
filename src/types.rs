use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DeskError;

pub const VALID_STATUSES: &[&str] = &["new", "in-progress", "resolved", "escalated"];
pub const VALID_PRIORITIES: &[&str] = &["high", "medium", "low"];

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    #[default]
    New,
    InProgress,
    Resolved,
    Escalated,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 4] = [
        TicketStatus::New,
        TicketStatus::InProgress,
        TicketStatus::Resolved,
        TicketStatus::Escalated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::New => "new",
            TicketStatus::InProgress => "in-progress",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Escalated => "escalated",
        }
    }

    /// Human-readable name, as shown on badges and in the status picker
    pub fn label(&self) -> &'static str {
        match self {
            TicketStatus::New => "New",
            TicketStatus::InProgress => "In Progress",
            TicketStatus::Resolved => "Resolved",
            TicketStatus::Escalated => "Escalated",
        }
    }

    pub fn badge(&self) -> BadgeColor {
        match self {
            TicketStatus::New => BadgeColor::Blue,
            TicketStatus::InProgress => BadgeColor::Yellow,
            TicketStatus::Resolved => BadgeColor::Green,
            TicketStatus::Escalated => BadgeColor::Purple,
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(TicketStatus::New),
            "in-progress" => Ok(TicketStatus::InProgress),
            "resolved" => Ok(TicketStatus::Resolved),
            "escalated" => Ok(TicketStatus::Escalated),
            _ => Err(DeskError::InvalidStatus(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    pub fn badge(&self) -> BadgeColor {
        priority_badge(self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(DeskError::InvalidPriority(s.to_string())),
        }
    }
}

/// Badge color families used by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    Red,
    Amber,
    Emerald,
    Gray,
    Blue,
    Yellow,
    Green,
    Purple,
}

/// Badge color for a priority label. Unrecognized labels are gray.
pub fn priority_badge(label: &str) -> BadgeColor {
    match label {
        "high" => BadgeColor::Red,
        "medium" => BadgeColor::Amber,
        "low" => BadgeColor::Emerald,
        _ => BadgeColor::Gray,
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A support ticket as returned by the ticket service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: u64,

    pub text: String,

    pub priority: Priority,

    #[serde(default, deserialize_with = "null_as_default")]
    pub status: TicketStatus,

    #[serde(default)]
    pub assigned_to: Option<String>,

    #[serde(default)]
    pub customer_rating: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Ticket {
    /// Assignee name, treating an empty string as unassigned
    pub fn assignee(&self) -> Option<&str> {
        self.assigned_to.as_deref().filter(|a| !a.is_empty())
    }

    pub fn is_unassigned(&self) -> bool {
        self.assignee().is_none()
    }

    /// Customer rating, treating zero as unrated
    pub fn rating(&self) -> Option<u8> {
        self.customer_rating.filter(|r| *r > 0)
    }

    /// Copy the session-mutable fields from a server-confirmed ticket
    pub fn apply_confirmed(&mut self, confirmed: &Ticket) {
        self.status = confirmed.status;
        self.assigned_to = confirmed.assigned_to.clone();
        self.customer_rating = confirmed.customer_rating;
    }
}

/// Partial update sent with `PATCH /api/tickets/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TicketUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_rating: Option<u8>,
}

impl TicketUpdate {
    pub fn status(status: TicketStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.assigned_to.is_none() && self.customer_rating.is_none()
    }

    /// Apply this update to a ticket, returning the previous ticket
    pub fn apply_to(&self, ticket: &mut Ticket) -> Ticket {
        let previous = ticket.clone();
        if let Some(status) = self.status {
            ticket.status = status;
        }
        if let Some(assignee) = &self.assigned_to {
            ticket.assigned_to = Some(assignee.clone());
        }
        if let Some(rating) = self.customer_rating {
            ticket.customer_rating = Some(rating);
        }
        previous
    }
}
