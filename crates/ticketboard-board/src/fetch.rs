//! The fetch client and the sample ticket API behind it.
//!
//! The listing endpoint speaks JSON with ISO-8601 date strings; the client
//! converts payloads into typed tickets through the permissive timestamp
//! parser, so a malformed date degrades to an invalid timestamp instead of
//! failing the whole fetch.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use ticketboard_core::BoardResult;
use ticketboard_domain::{Ticket, TicketPriority, TicketStatus, Timestamp};

use crate::sample;

/// Retrieves the initial ticket list. The board calls this at most once per
/// load cycle; a retry is an explicit user action.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FetchClient: Send + Sync {
    async fn fetch_tickets(&self) -> BoardResult<Vec<Ticket>>;
}

/// A ticket as the listing endpoint serializes it: dates as strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketPayload {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: TicketStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,
}

impl TicketPayload {
    /// Convert wire dates into timestamps. Never fails: unparseable dates
    /// become invalid timestamps and the ticket proceeds.
    pub fn into_ticket(self) -> Ticket {
        Ticket {
            id: self.id,
            name: self.name,
            description: self.description,
            created_at: Timestamp::parse(&self.created_at),
            updated_at: Timestamp::parse(&self.updated_at),
            tags: self.tags,
            status: self.status,
            priority: self.priority,
        }
    }
}

/// Optional query parameters of the listing endpoint.
#[derive(Debug, Clone, Default)]
pub struct TicketQuery {
    /// Case-insensitive substring over name and description.
    pub search: Option<String>,
    /// Comma-separated tags, OR-combined.
    pub tags: Option<String>,
}

impl TicketQuery {
    fn matches(&self, payload: &TicketPayload) -> bool {
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            let hit = payload.name.to_lowercase().contains(&needle)
                || payload.description.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        if let Some(tags) = self.tags.as_deref().filter(|s| !s.is_empty()) {
            let wanted: Vec<&str> = tags
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect();
            if !wanted.is_empty()
                && !wanted
                    .iter()
                    .any(|tag| payload.tags.iter().any(|t| t == tag))
            {
                return false;
            }
        }
        true
    }
}

/// Response shape of the listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub tickets: Vec<TicketPayload>,
    pub total: usize,
}

/// In-memory listing endpoint serving the built-in sample tickets after an
/// artificial delay. Stands in for a real backend, of which this board has
/// none.
#[derive(Debug, Clone)]
pub struct SampleApi {
    latency: Duration,
}

impl SampleApi {
    pub fn new() -> Self {
        Self {
            latency: Duration::from_millis(300),
        }
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    /// The listing endpoint: filter server-side by search/tags, return
    /// payloads with ISO date strings. No priority filtering here.
    pub async fn list(&self, query: &TicketQuery) -> ListResponse {
        tokio::time::sleep(self.latency).await;

        let tickets: Vec<TicketPayload> = sample::sample_payloads()
            .into_iter()
            .filter(|payload| query.matches(payload))
            .collect();
        let total = tickets.len();
        ListResponse { tickets, total }
    }
}

impl Default for SampleApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FetchClient for SampleApi {
    async fn fetch_tickets(&self) -> BoardResult<Vec<Ticket>> {
        let response = self.list(&TicketQuery::default()).await;
        tracing::debug!("Fetched {} tickets", response.total);
        Ok(response
            .tickets
            .into_iter()
            .map(TicketPayload::into_ticket)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> SampleApi {
        SampleApi::with_latency(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_fetch_returns_sample_tickets() {
        let tickets = api().fetch_tickets().await.unwrap();
        assert_eq!(tickets.len(), 6);
        assert!(tickets.iter().all(|t| t.created_at.is_valid()));
        // Ticket 5 ships without a priority.
        let five = tickets.iter().find(|t| t.id == "5").unwrap();
        assert_eq!(five.priority, None);
    }

    #[tokio::test]
    async fn test_list_search_filters_server_side() {
        let response = api()
            .list(&TicketQuery {
                search: Some("database".to_string()),
                tags: None,
            })
            .await;
        assert_eq!(response.total, 1);
        assert_eq!(response.tickets[0].id, "2");
    }

    #[tokio::test]
    async fn test_list_tags_are_comma_separated_and_or_combined() {
        let response = api()
            .list(&TicketQuery {
                search: None,
                tags: Some("devops, testing".to_string()),
            })
            .await;
        let mut ids: Vec<&str> = response.tickets.iter().map(|t| t.id.as_str()).collect();
        ids.sort_unstable();
        assert_eq!(ids, ["4", "5"]);
    }

    #[tokio::test]
    async fn test_list_empty_query_returns_everything() {
        let response = api().list(&TicketQuery::default()).await;
        assert_eq!(response.total, 6);
    }

    #[test]
    fn test_malformed_date_yields_invalid_timestamp_not_error() {
        let payload = TicketPayload {
            id: "99".to_string(),
            name: "Broken dates".to_string(),
            description: String::new(),
            created_at: "invalid-date".to_string(),
            updated_at: "also invalid".to_string(),
            tags: vec![],
            status: TicketStatus::Todo,
            priority: None,
        };
        let ticket = payload.into_ticket();
        assert!(!ticket.created_at.is_valid());
        assert!(!ticket.updated_at.is_valid());
        assert_eq!(ticket.id, "99");
    }

    #[test]
    fn test_payload_wire_shape() {
        let json = r#"{
            "id": "1",
            "name": "A",
            "description": "B",
            "createdAt": "2024-01-15T10:00:00Z",
            "updatedAt": "2024-01-20T14:30:00Z",
            "tags": ["frontend"],
            "status": "TODO",
            "priority": "high"
        }"#;
        let payload: TicketPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.priority, Some(TicketPriority::High));
        let ticket = payload.into_ticket();
        assert!(ticket.updated_at >= ticket.created_at);
    }
}
