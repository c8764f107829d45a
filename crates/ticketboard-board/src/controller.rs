//! The board controller.
//!
//! Bridges the ticket store, the fetch client, and drag-and-drop events.
//! Owns the store outright; callers see derived column views and a small
//! set of operations, each of which queues a persistence snapshot.

use std::sync::Arc;
use tokio::sync::mpsc;

use ticketboard_domain::{array_move, Ticket, TicketPriority, TicketStatus};
use ticketboard_persistence::{PersistedState, StateStore};

use crate::fetch::FetchClient;
use crate::store::TicketStore;

/// The one user-facing failure message. Fetch error detail goes to the log
/// only.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load tickets. Please try again.";

/// Where the board is in its initial-load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    AwaitingHydration,
    Loading,
    Loaded,
    Failed,
}

/// What a drop event amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Dropped on a column: cross-column move.
    StatusChanged(TicketStatus),
    /// Dropped on a ticket in the same column: within-column relocation.
    Reordered,
    /// Missing target, unknown ticket, or cross-column drop onto a ticket.
    Ignored,
}

/// One column of the board: the filtered tickets of a status, in store
/// order.
#[derive(Debug, Clone)]
pub struct ColumnView {
    pub status: TicketStatus,
    pub tickets: Vec<Ticket>,
}

pub struct BoardController {
    store: TicketStore,
    fetch: Arc<dyn FetchClient>,
    save_tx: Option<mpsc::UnboundedSender<PersistedState>>,
}

impl BoardController {
    /// Create a controller. With `persist` set, the second return value is
    /// the receiving end of the save channel; feed it to [`run_saver`].
    pub fn new(
        fetch: Arc<dyn FetchClient>,
        persist: bool,
    ) -> (Self, Option<mpsc::UnboundedReceiver<PersistedState>>) {
        let (save_tx, save_rx) = if persist {
            let (tx, rx) = mpsc::unbounded_channel();
            (Some(tx), Some(rx))
        } else {
            (None, None)
        };

        let controller = Self {
            store: TicketStore::new(),
            fetch,
            save_tx,
        };
        (controller, save_rx)
    }

    pub fn store(&self) -> &TicketStore {
        &self.store
    }

    pub fn load_phase(&self) -> LoadPhase {
        if !self.store.is_hydrated() {
            LoadPhase::AwaitingHydration
        } else if self.store.is_loading() {
            LoadPhase::Loading
        } else if self.store.error().is_some() {
            LoadPhase::Failed
        } else {
            LoadPhase::Loaded
        }
    }

    /// Restore persisted state, then mark hydration complete. Storage
    /// failures degrade to an empty board.
    pub async fn hydrate(&mut self, state_store: &dyn StateStore) {
        let state = state_store.load_or_default().await;
        tracing::debug!("Hydrated {} stored tickets", state.tickets.len());
        self.store.hydrate(state);
        self.store.set_hydrated(true);
    }

    /// Fetch the initial ticket list, but only when hydration finished with
    /// an empty board. A board restored with tickets skips the fetch
    /// entirely.
    pub async fn ensure_loaded(&mut self) {
        if !self.store.is_hydrated() || !self.store.tickets().is_empty() {
            return;
        }
        self.load_initial().await;
    }

    /// User-triggered re-entry into the load cycle after a failure.
    pub async fn retry(&mut self) {
        self.load_initial().await;
    }

    async fn load_initial(&mut self) {
        self.store.set_loading(true);
        self.store.set_error(None);

        // The only suspension point in the whole model. Dropping the future
        // here (caller torn down) discards the result without touching the
        // store.
        match self.fetch.fetch_tickets().await {
            Ok(tickets) => {
                tracing::info!("Loaded {} tickets", tickets.len());
                self.store.set_tickets(tickets);
                self.queue_save();
            }
            Err(e) => {
                tracing::error!("Failed to fetch tickets: {e}");
                self.store.set_error(Some(LOAD_ERROR_MESSAGE.to_string()));
            }
        }
        self.store.set_loading(false);
    }

    /// Partition the filtered tickets into the three columns, preserving
    /// store order within each.
    pub fn columns(&self) -> Vec<ColumnView> {
        TicketStatus::ALL
            .iter()
            .map(|&status| ColumnView {
                status,
                tickets: self
                    .store
                    .tickets()
                    .iter()
                    .filter(|t| t.status == status && self.store.filters().matches(t))
                    .cloned()
                    .collect(),
            })
            .collect()
    }

    fn column_ids(&self, status: TicketStatus) -> Vec<String> {
        self.store
            .tickets()
            .iter()
            .filter(|t| t.status == status && self.store.filters().matches(t))
            .map(|t| t.id.clone())
            .collect()
    }

    /// Interpret a drop event.
    ///
    /// A drop target that names a column is a status change; a drop onto a
    /// ticket of the same status is a within-column reorder; everything
    /// else changes nothing.
    pub fn handle_drop(&mut self, dragged_id: &str, target_id: &str) -> DropOutcome {
        if let Some(status) = TicketStatus::parse(target_id) {
            if self.store.ticket(dragged_id).is_none() {
                return DropOutcome::Ignored;
            }
            tracing::debug!("Moving ticket {dragged_id} to {status}");
            self.store.update_ticket_status(dragged_id, status);
            self.queue_save();
            return DropOutcome::StatusChanged(status);
        }

        let Some(dragged_status) = self.store.ticket(dragged_id).map(|t| t.status) else {
            return DropOutcome::Ignored;
        };
        let Some(target_status) = self.store.ticket(target_id).map(|t| t.status) else {
            return DropOutcome::Ignored;
        };
        if dragged_status != target_status {
            return DropOutcome::Ignored;
        }

        let mut column_ids = self.column_ids(dragged_status);
        let old_index = column_ids.iter().position(|id| id == dragged_id);
        let new_index = column_ids.iter().position(|id| id == target_id);
        let (Some(old_index), Some(new_index)) = (old_index, new_index) else {
            return DropOutcome::Ignored;
        };
        if old_index == new_index {
            return DropOutcome::Ignored;
        }

        array_move(&mut column_ids, old_index, new_index);
        self.store.reorder_tickets(&column_ids);
        self.queue_save();
        DropOutcome::Reordered
    }

    pub fn set_ticket_priority(&mut self, id: &str, priority: Option<TicketPriority>) {
        self.store.update_ticket_priority(id, priority);
        self.queue_save();
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.store.set_search_text(text);
        self.queue_save();
    }

    pub fn set_selected_tags(&mut self, tags: Vec<String>) {
        self.store.set_selected_tags(tags);
        self.queue_save();
    }

    pub fn set_selected_priority(&mut self, priority: Option<TicketPriority>) {
        self.store.set_selected_priority(priority);
        self.queue_save();
    }

    pub fn reset(&mut self) {
        self.store.reset();
        self.queue_save();
    }

    /// Fire-and-forget persistence: queue a snapshot for the background
    /// saver. A closed channel is logged, never fatal.
    fn queue_save(&self) {
        if let Some(ref tx) = self.save_tx {
            if let Err(e) = tx.send(self.store.snapshot()) {
                tracing::error!("Failed to queue save: channel closed: {e}");
            }
        }
    }
}

/// Drain queued snapshots into the state store, last write wins. Runs until
/// every controller-side sender is dropped.
pub async fn run_saver(
    mut save_rx: mpsc::UnboundedReceiver<PersistedState>,
    state_store: Arc<dyn StateStore>,
) {
    while let Some(state) = save_rx.recv().await {
        if let Err(e) = state_store.save(&state).await {
            tracing::error!("Failed to persist board state: {e}");
        }
    }
}
