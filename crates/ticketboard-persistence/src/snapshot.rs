use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use ticketboard_domain::{FilterState, Ticket};

/// Fixed storage key the board state lives under, kept from the original
/// browser deployment so exported state stays recognizable.
pub const STORAGE_KEY: &str = "kanban-board-storage";

/// The projection of store state that survives a reload: the tickets plus
/// the user's filter selections. Transient flags (loading, error,
/// hydration) are never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub tickets: Vec<Ticket>,
    #[serde(flatten)]
    pub filters: FilterState,
}

impl PersistedState {
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty() && !self.filters.has_active_filters()
    }
}

/// Default on-disk location: the storage key as a JSON file in the current
/// directory.
pub fn default_state_path() -> PathBuf {
    PathBuf::from(format!("{STORAGE_KEY}.json"))
}
