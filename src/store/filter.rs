//! Dashboard filtering: search text, status and priority.

use crate::types::{Priority, Ticket, TicketStatus};

/// Filter criteria for the ticket list. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter {
    pub search: String,
    pub status: Option<TicketStatus>,
    pub priority: Option<Priority>,
}

impl TicketFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn status(mut self, status: TicketStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// True when no criterion narrows the list
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.status.is_none() && self.priority.is_none()
    }

    /// Case-insensitive substring match on the message or the assignee
    pub fn matches_search(&self, ticket: &Ticket) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        ticket.text.to_lowercase().contains(&needle)
            || ticket
                .assigned_to
                .as_deref()
                .is_some_and(|a| a.to_lowercase().contains(&needle))
    }

    pub fn matches_status(&self, ticket: &Ticket) -> bool {
        self.status.is_none_or(|s| ticket.status == s)
    }

    pub fn matches_priority(&self, ticket: &Ticket) -> bool {
        self.priority.is_none_or(|p| ticket.priority == p)
    }

    pub fn matches(&self, ticket: &Ticket) -> bool {
        self.matches_search(ticket) && self.matches_status(ticket) && self.matches_priority(ticket)
    }

    /// Apply the filter, preserving the input order
    pub fn apply<'a>(&self, tickets: &'a [Ticket]) -> Vec<&'a Ticket> {
        tickets.iter().filter(|t| self.matches(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(id: u64, text: &str, priority: Priority, status: TicketStatus) -> Ticket {
        Ticket {
            id,
            text: text.to_string(),
            priority,
            status,
            assigned_to: None,
            customer_rating: None,
            source: None,
        }
    }

    fn sample() -> Vec<Ticket> {
        let mut billing = ticket(3, "Billing question", Priority::Medium, TicketStatus::InProgress);
        billing.assigned_to = Some("Mike (Billing Specialist)".to_string());
        vec![
            ticket(1, "URGENT! Payment taken", Priority::High, TicketStatus::New),
            ticket(2, "App keeps freezing", Priority::High, TicketStatus::Escalated),
            billing,
            ticket(4, "Website is slow", Priority::Low, TicketStatus::Resolved),
        ]
    }

    fn ids(tickets: &[&Ticket]) -> Vec<u64> {
        tickets.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let tickets = sample();
        let filter = TicketFilter::new();
        assert!(filter.is_empty());
        assert_eq!(ids(&filter.apply(&tickets)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_search_is_case_insensitive_on_text_and_assignee() {
        let tickets = sample();
        assert_eq!(ids(&TicketFilter::new().search("urgent").apply(&tickets)), vec![1]);
        assert_eq!(ids(&TicketFilter::new().search("MIKE").apply(&tickets)), vec![3]);
    }

    #[test]
    fn test_status_and_priority() {
        let tickets = sample();
        let high = TicketFilter::new().priority(Priority::High);
        assert_eq!(ids(&high.apply(&tickets)), vec![1, 2]);

        let high_new = high.status(TicketStatus::New);
        assert_eq!(ids(&high_new.apply(&tickets)), vec![1]);
    }

    #[test]
    fn test_predicates_commute() {
        let tickets = sample();
        let filter = TicketFilter::new()
            .search("a")
            .status(TicketStatus::New)
            .priority(Priority::High);

        type Pred = fn(&TicketFilter, &Ticket) -> bool;
        let preds: [Pred; 3] = [
            TicketFilter::matches_search,
            TicketFilter::matches_status,
            TicketFilter::matches_priority,
        ];
        let orders = [
            [0, 1, 2],
            [0, 2, 1],
            [1, 0, 2],
            [1, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
        ];

        let expected = ids(&filter.apply(&tickets));
        for order in orders {
            let mut current: Vec<&Ticket> = tickets.iter().collect();
            for i in order {
                current.retain(|t| preds[i](&filter, t));
            }
            assert_eq!(ids(&current), expected, "order {:?}", order);
        }
    }
}
