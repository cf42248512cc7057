//! Terminal rendering for tickets, badges and stats.
//!
//! Colors come from a [`Palette`] chosen by the caller's [`Theme`]: the light
//! theme uses deep shades, the dark theme pale ones. Output falls back to
//! plain text when stdout does not support color.

use owo_colors::{OwoColorize, Rgb, Stream};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::Theme;
use crate::store::TicketStats;
use crate::types::{BadgeColor, Priority, Ticket, TicketStatus};

/// Theme-specific badge colors
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    theme: Theme,
}

impl Palette {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn badge(&self, badge: BadgeColor) -> Rgb {
        let (light, dark) = match badge {
            BadgeColor::Red => (Rgb(185, 28, 28), Rgb(252, 165, 165)),
            BadgeColor::Amber => (Rgb(180, 83, 9), Rgb(252, 211, 77)),
            BadgeColor::Emerald => (Rgb(4, 120, 87), Rgb(110, 231, 183)),
            BadgeColor::Gray => (Rgb(55, 65, 81), Rgb(209, 213, 219)),
            BadgeColor::Blue => (Rgb(29, 78, 216), Rgb(147, 197, 253)),
            BadgeColor::Yellow => (Rgb(161, 98, 7), Rgb(253, 224, 71)),
            BadgeColor::Green => (Rgb(21, 128, 61), Rgb(134, 239, 172)),
            BadgeColor::Purple => (Rgb(126, 34, 206), Rgb(216, 180, 254)),
        };
        match self.theme {
            Theme::Light => light,
            Theme::Dark => dark,
        }
    }

    /// Paint `text` in a badge color when stdout supports it
    pub fn paint(&self, text: &str, badge: BadgeColor) -> String {
        let rgb = self.badge(badge);
        text.if_supports_color(Stream::Stdout, |t| t.color(rgb))
            .to_string()
    }

    fn dim(&self, text: &str) -> String {
        text.if_supports_color(Stream::Stdout, |t| t.dimmed())
            .to_string()
    }
}

pub fn priority_badge_text(priority: Priority) -> String {
    format!("[{}]", priority.label())
}

pub fn status_badge_text(status: TicketStatus) -> String {
    format!("[{}]", status.label())
}

/// Format a ticket for single-line display
pub fn format_ticket_line(ticket: &Ticket, palette: &Palette) -> String {
    let id = palette.dim(&format!("#{:<4}", ticket.id));
    let priority = palette.paint(&priority_badge_text(ticket.priority), ticket.priority.badge());
    let status = palette.paint(&status_badge_text(ticket.status), ticket.status.badge());

    let mut line = format!("{} {} {} {}", id, priority, status, ticket.text);
    if let Some(assignee) = ticket.assignee() {
        line.push_str(&format!(" ({})", assignee));
    }
    if let Some(rating) = ticket.rating() {
        line.push_str(&format!(" ★{}", rating));
    }
    line
}

/// Format a ticket with one field per line
pub fn format_ticket_detail(ticket: &Ticket, palette: &Palette) -> String {
    let mut lines = vec![
        format!("Ticket #{}", ticket.id),
        format!(
            "Priority: {}",
            palette.paint(ticket.priority.label(), ticket.priority.badge())
        ),
        format!(
            "Status:   {}",
            palette.paint(ticket.status.label(), ticket.status.badge())
        ),
        format!("Assignee: {}", ticket.assignee().unwrap_or("Unassigned")),
        format!(
            "Rating:   {}",
            ticket
                .rating()
                .map(|r| format!("{}/5", r))
                .unwrap_or_else(|| "Not rated".to_string())
        ),
    ];
    if let Some(source) = &ticket.source {
        lines.push(format!("Source:   {}", source));
    }
    lines.push(String::new());
    lines.push(ticket.text.clone());
    lines.join("\n")
}

/// "N of M tickets" summary under a filtered list
pub fn format_list_summary(shown: usize, total: usize) -> String {
    format!("{} of {} tickets", shown, total)
}

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Count")]
    value: String,
}

/// Render stats as a table
pub fn format_stats(stats: &TicketStats) -> String {
    let mut rows = vec![StatRow {
        metric: "Total".to_string(),
        value: stats.total.to_string(),
    }];
    for priority in Priority::ALL {
        rows.push(StatRow {
            metric: format!("{} priority", priority.label()),
            value: stats.priority.for_priority(priority).to_string(),
        });
    }
    for status in TicketStatus::ALL {
        rows.push(StatRow {
            metric: status.label().to_string(),
            value: stats.status.for_status(status).to_string(),
        });
    }
    rows.push(StatRow {
        metric: "Unassigned".to_string(),
        value: stats.unassigned.to_string(),
    });
    rows.push(StatRow {
        metric: "Average rating".to_string(),
        value: format!("{}/5 ({} rated)", stats.average_rating, stats.rated),
    });

    let mut table = Table::new(rows);
    table.with(Style::modern());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ticket() -> Ticket {
        Ticket {
            id: 7,
            text: "The website is very slow today".to_string(),
            priority: Priority::Low,
            status: TicketStatus::InProgress,
            assigned_to: Some("Jessica (General Support)".to_string()),
            customer_rating: Some(4),
            source: Some("demo".to_string()),
        }
    }

    #[test]
    fn test_palette_differs_by_theme() {
        let light = Palette::new(Theme::Light).badge(BadgeColor::Red);
        let dark = Palette::new(Theme::Dark).badge(BadgeColor::Red);
        assert_ne!((light.0, light.1, light.2), (dark.0, dark.1, dark.2));
    }

    #[test]
    fn test_ticket_line_contents() {
        let line = format_ticket_line(&sample_ticket(), &Palette::new(Theme::Light));
        assert!(line.contains("#7"));
        assert!(line.contains("[Low]"));
        assert!(line.contains("[In Progress]"));
        assert!(line.contains("The website is very slow today"));
        assert!(line.contains("(Jessica (General Support))"));
        assert!(line.contains("★4"));
    }

    #[test]
    fn test_ticket_detail_unassigned_unrated() {
        let mut ticket = sample_ticket();
        ticket.assigned_to = None;
        ticket.customer_rating = Some(0);
        let detail = format_ticket_detail(&ticket, &Palette::new(Theme::Dark));
        assert!(detail.contains("Assignee: Unassigned"));
        assert!(detail.contains("Rating:   Not rated"));
    }

    #[test]
    fn test_stats_table_mentions_average() {
        let stats = TicketStats::compute(&[sample_ticket()]);
        let table = format_stats(&stats);
        assert!(table.contains("Average rating"));
        assert!(table.contains("4.0/5 (1 rated)"));
        assert!(table.contains("High priority"));
    }
}
