use serde::{Deserialize, Serialize};

use crate::{priority::TicketPriority, status::TicketStatus, timestamp::Timestamp};

/// Ticket ids are assigned externally by the listing endpoint; the board
/// never mints its own.
pub type TicketId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: TicketId,
    pub name: String,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: TicketStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,
}

impl Ticket {
    pub fn new(id: impl Into<TicketId>, name: impl Into<String>) -> Self {
        let now = Timestamp::now();
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            created_at: now,
            updated_at: now,
            tags: Vec::new(),
            status: TicketStatus::Todo,
            priority: None,
        }
    }

    /// Set the status and refresh `updated_at`. Refreshes even when the
    /// status is unchanged (status-stable, not a true no-op).
    pub fn update_status(&mut self, status: TicketStatus) {
        self.status = status;
        self.updated_at = Timestamp::now();
    }

    /// Set or clear the priority and refresh `updated_at`.
    pub fn update_priority(&mut self, priority: Option<TicketPriority>) {
        self.priority = priority;
        self.updated_at = Timestamp::now();
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
