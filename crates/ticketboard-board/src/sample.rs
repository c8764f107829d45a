//! Built-in sample data served by the listing endpoint.

use ticketboard_domain::{TicketPriority, TicketStatus};

use crate::fetch::TicketPayload;

/// Tags offered by the filter UI.
pub const AVAILABLE_TAGS: [&str; 17] = [
    "frontend",
    "backend",
    "database",
    "api",
    "security",
    "testing",
    "devops",
    "performance",
    "planning",
    "auth",
    "rest",
    "tdd",
    "ci-cd",
    "automation",
    "optimization",
    "monitoring",
    "quality",
];

fn payload(
    id: &str,
    name: &str,
    description: &str,
    created_at: &str,
    updated_at: &str,
    tags: &[&str],
    status: TicketStatus,
    priority: Option<TicketPriority>,
) -> TicketPayload {
    TicketPayload {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        created_at: created_at.to_string(),
        updated_at: updated_at.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        status,
        priority,
    }
}

/// The six sample tickets: three TODO, two IN_PROGRESS, one DONE.
pub fn sample_payloads() -> Vec<TicketPayload> {
    vec![
        payload(
            "1",
            "Implement User Authentication",
            "Create a secure authentication system with JWT tokens and user \
             registration/login functionality.",
            "2024-01-15T10:00:00Z",
            "2024-01-20T14:30:00Z",
            &["frontend", "security", "auth"],
            TicketStatus::Todo,
            Some(TicketPriority::High),
        ),
        payload(
            "2",
            "Design Database Schema",
            "Plan and create the database structure for the user management system.",
            "2024-01-16T09:00:00Z",
            "2024-01-18T16:45:00Z",
            &["database", "planning", "backend"],
            TicketStatus::InProgress,
            Some(TicketPriority::Medium),
        ),
        payload(
            "3",
            "Create API Endpoints",
            "Implement RESTful API endpoints for user CRUD operations.",
            "2024-01-17T11:00:00Z",
            "2024-01-19T10:15:00Z",
            &["api", "backend", "rest"],
            TicketStatus::InProgress,
            Some(TicketPriority::High),
        ),
        payload(
            "4",
            "Write Unit Tests",
            "Create comprehensive unit tests for all components and functions.",
            "2024-01-18T13:00:00Z",
            "2024-01-20T11:20:00Z",
            &["testing", "quality", "tdd"],
            TicketStatus::Done,
            Some(TicketPriority::Medium),
        ),
        // No priority set, shows as "None".
        payload(
            "5",
            "Setup CI/CD Pipeline",
            "Configure continuous integration and deployment pipeline using \
             GitHub Actions.",
            "2024-01-19T08:00:00Z",
            "2024-01-19T08:00:00Z",
            &["devops", "ci-cd", "automation"],
            TicketStatus::Todo,
            None,
        ),
        payload(
            "6",
            "Optimize Performance",
            "Identify and fix performance bottlenecks in the application.",
            "2024-01-20T10:00:00Z",
            "2024-01-20T10:00:00Z",
            &["performance", "optimization", "monitoring"],
            TicketStatus::Todo,
            Some(TicketPriority::Medium),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_ids_are_unique() {
        let payloads = sample_payloads();
        let ids: HashSet<&str> = payloads.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), payloads.len());
    }

    #[test]
    fn test_sample_status_distribution() {
        let payloads = sample_payloads();
        let count = |status| payloads.iter().filter(|p| p.status == status).count();
        assert_eq!(count(TicketStatus::Todo), 3);
        assert_eq!(count(TicketStatus::InProgress), 2);
        assert_eq!(count(TicketStatus::Done), 1);
    }

    #[test]
    fn test_sample_tags_are_known() {
        for payload in sample_payloads() {
            for tag in &payload.tags {
                assert!(
                    AVAILABLE_TAGS.contains(&tag.as_str()),
                    "unknown tag {tag} on ticket {}",
                    payload.id
                );
            }
        }
    }
}
