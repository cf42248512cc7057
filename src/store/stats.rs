//! Aggregate ticket statistics for the dashboard header and analytics view

use serde::Serialize;

use crate::types::{Priority, Ticket, TicketStatus};

/// Counts of tickets by priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl PriorityCounts {
    pub fn for_priority(&self, priority: Priority) -> usize {
        match priority {
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }
}

/// Counts of tickets by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub new: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub escalated: usize,
}

impl StatusCounts {
    pub fn for_status(&self, status: TicketStatus) -> usize {
        match status {
            TicketStatus::New => self.new,
            TicketStatus::InProgress => self.in_progress,
            TicketStatus::Resolved => self.resolved,
            TicketStatus::Escalated => self.escalated,
        }
    }

    pub fn total(&self) -> usize {
        self.new + self.in_progress + self.resolved + self.escalated
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TicketStats {
    pub total: usize,
    pub priority: PriorityCounts,
    pub status: StatusCounts,
    pub unassigned: usize,
    pub rated: usize,
    /// Mean of the ratings of rated tickets, one decimal, "0.0" if none are rated
    pub average_rating: String,
}

impl TicketStats {
    pub fn compute(tickets: &[Ticket]) -> Self {
        let mut stats = TicketStats {
            total: tickets.len(),
            ..Default::default()
        };
        let mut rating_sum: u32 = 0;

        for ticket in tickets {
            match ticket.priority {
                Priority::High => stats.priority.high += 1,
                Priority::Medium => stats.priority.medium += 1,
                Priority::Low => stats.priority.low += 1,
            }
            match ticket.status {
                TicketStatus::New => stats.status.new += 1,
                TicketStatus::InProgress => stats.status.in_progress += 1,
                TicketStatus::Resolved => stats.status.resolved += 1,
                TicketStatus::Escalated => stats.status.escalated += 1,
            }
            if ticket.is_unassigned() {
                stats.unassigned += 1;
            }
            if let Some(rating) = ticket.rating() {
                stats.rated += 1;
                rating_sum += u32::from(rating);
            }
        }

        stats.average_rating = format_average(rating_sum, stats.rated);
        stats
    }
}

fn format_average(sum: u32, count: usize) -> String {
    if count == 0 {
        return "0.0".to_string();
    }
    let tenths = tenths_half_up(f64::from(sum) / count as f64);
    format!("{}.{}", tenths / 10, tenths % 10)
}

const FRACTION_BITS: u32 = 52;
const FRACTION_MASK: u64 = (1 << FRACTION_BITS) - 1;
const EXPONENT_BIAS: i32 = 1075;

/// `x * 10` rounded to an integer, ties up, computed on the exact binary value
/// of `x` the way JavaScript's `toFixed(1)` does: 4.25 gives 43, and 4.35
/// (stored as 4.3499...) gives 43 as well.
fn tenths_half_up(x: f64) -> u64 {
    if x.is_nan() || x <= 0.0 {
        return 0;
    }

    let bits = x.to_bits();
    let exponent = ((bits >> FRACTION_BITS) & 0x7ff) as i32;
    let mantissa = if exponent == 0 {
        bits & FRACTION_MASK
    } else {
        (bits & FRACTION_MASK) | (1 << FRACTION_BITS)
    };

    // x == mantissa * 2^-shift
    let shift = EXPONENT_BIAS - exponent.max(1);
    if shift <= 0 {
        return (x * 10.0) as u64;
    }
    if shift >= 120 {
        return 0;
    }

    let scaled = u128::from(mantissa) * 10;
    ((scaled + (1u128 << (shift - 1))) >> shift) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_ticket(id: u64, priority: Priority, status: TicketStatus, rating: u8) -> Ticket {
        Ticket {
            id,
            text: format!("ticket {id}"),
            priority,
            status,
            assigned_to: None,
            customer_rating: Some(rating),
            source: None,
        }
    }

    #[test]
    fn test_average_skips_unrated() {
        let tickets = vec![
            create_test_ticket(1, Priority::High, TicketStatus::New, 0),
            create_test_ticket(2, Priority::Low, TicketStatus::New, 0),
            create_test_ticket(3, Priority::Low, TicketStatus::Resolved, 4),
            create_test_ticket(4, Priority::Medium, TicketStatus::Resolved, 5),
        ];
        let stats = TicketStats::compute(&tickets);
        assert_eq!(stats.average_rating, "4.5");
        assert_eq!(stats.rated, 2);
    }

    #[test]
    fn test_average_with_none_rated() {
        let tickets = vec![create_test_ticket(1, Priority::High, TicketStatus::New, 0)];
        assert_eq!(TicketStats::compute(&tickets).average_rating, "0.0");
        assert_eq!(TicketStats::compute(&[]).average_rating, "0.0");
    }

    #[test]
    fn test_average_rounds_to_one_decimal() {
        let tickets = vec![
            create_test_ticket(1, Priority::High, TicketStatus::Resolved, 5),
            create_test_ticket(2, Priority::High, TicketStatus::Resolved, 4),
            create_test_ticket(3, Priority::High, TicketStatus::Resolved, 4),
        ];
        // 13 / 3 = 4.333...
        assert_eq!(TicketStats::compute(&tickets).average_rating, "4.3");
    }

    #[test]
    fn test_average_rounds_ties_up() {
        let ratings = |values: &[u8]| -> Vec<Ticket> {
            values
                .iter()
                .enumerate()
                .map(|(i, r)| create_test_ticket(i as u64, Priority::Low, TicketStatus::Resolved, *r))
                .collect()
        };

        // 17 / 4 = 4.25 and 5 / 4 = 1.25 are exact ties
        assert_eq!(TicketStats::compute(&ratings(&[4, 4, 4, 5])).average_rating, "4.3");
        assert_eq!(TicketStats::compute(&ratings(&[1, 1, 1, 2])).average_rating, "1.3");
        assert_eq!(TicketStats::compute(&ratings(&[4, 5])).average_rating, "4.5");
        assert_eq!(TicketStats::compute(&ratings(&[5, 5])).average_rating, "5.0");
    }

    #[test]
    fn test_average_rounds_the_stored_value() {
        // 87 / 20 is stored just below 4.35
        let mut values = vec![5u8; 7];
        values.extend([4u8; 13]);
        let tickets: Vec<Ticket> = values
            .iter()
            .enumerate()
            .map(|(i, r)| create_test_ticket(i as u64, Priority::Low, TicketStatus::Resolved, *r))
            .collect();
        assert_eq!(TicketStats::compute(&tickets).average_rating, "4.3");
    }

    #[test]
    fn test_counts() {
        let mut assigned = create_test_ticket(3, Priority::Medium, TicketStatus::InProgress, 0);
        assigned.assigned_to = Some("Jessica (General Support)".to_string());
        let mut blank = create_test_ticket(4, Priority::Low, TicketStatus::Escalated, 0);
        blank.assigned_to = Some(String::new());

        let tickets = vec![
            create_test_ticket(1, Priority::High, TicketStatus::New, 0),
            create_test_ticket(2, Priority::High, TicketStatus::New, 0),
            assigned,
            blank,
        ];

        let stats = TicketStats::compute(&tickets);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.priority.for_priority(Priority::High), 2);
        assert_eq!(stats.priority.medium, 1);
        assert_eq!(stats.priority.low, 1);
        assert_eq!(stats.status.new, 2);
        assert_eq!(stats.status.for_status(TicketStatus::InProgress), 1);
        assert_eq!(stats.status.escalated, 1);
        assert_eq!(stats.status.total(), 4);
        assert_eq!(stats.unassigned, 3);
    }
}
