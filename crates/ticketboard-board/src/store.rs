//! The ticket store.
//!
//! Sole owner of the ticket list and the filter/UI state. Every mutation
//! goes through one of the operations here; everything else in the crate
//! holds derived, read-only views. The store itself never does IO: the
//! controller takes `snapshot()` projections and hands them to persistence.

use ticketboard_domain::{
    apply_requested_order, FilterState, Ticket, TicketPriority, TicketStatus,
};
use ticketboard_persistence::PersistedState;

#[derive(Debug, Default)]
pub struct TicketStore {
    tickets: Vec<Ticket>,
    filters: FilterState,
    is_loading: bool,
    error: Option<String>,
    is_hydrated: bool,
}

impl TicketStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn ticket(&self, id: &str) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_hydrated(&self) -> bool {
        self.is_hydrated
    }

    /// Replace the ticket collection wholesale. Uniqueness of ids is the
    /// caller's responsibility.
    pub fn set_tickets(&mut self, tickets: Vec<Ticket>) {
        self.tickets = tickets;
    }

    /// Set a ticket's status and refresh its `updated_at`. Unknown ids are
    /// silently ignored.
    pub fn update_ticket_status(&mut self, id: &str, status: TicketStatus) {
        if let Some(ticket) = self.tickets.iter_mut().find(|t| t.id == id) {
            ticket.update_status(status);
        }
    }

    /// Set or clear a ticket's priority and refresh its `updated_at`.
    /// Unknown ids are silently ignored.
    pub fn update_ticket_priority(&mut self, id: &str, priority: Option<TicketPriority>) {
        if let Some(ticket) = self.tickets.iter_mut().find(|t| t.id == id) {
            ticket.update_priority(priority);
        }
    }

    /// Re-sort the entire collection so tickets listed in `ordered_ids`
    /// take the requested relative order and all others follow in their
    /// original relative order. See `ticketboard_domain::order`.
    pub fn reorder_tickets(&mut self, ordered_ids: &[String]) {
        apply_requested_order(&mut self.tickets, ordered_ids);
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.filters.search_text = text.into();
    }

    pub fn set_selected_tags(&mut self, tags: Vec<String>) {
        self.filters.selected_tags = tags;
    }

    pub fn set_selected_priority(&mut self, priority: Option<TicketPriority>) {
        self.filters.selected_priority = priority;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub fn set_hydrated(&mut self, hydrated: bool) {
        self.is_hydrated = hydrated;
    }

    /// Back to the initial empty state. Hydration tracking is left alone:
    /// restoring persisted data already happened, reset does not undo it.
    pub fn reset(&mut self) {
        self.tickets.clear();
        self.filters.clear();
        self.is_loading = false;
        self.error = None;
    }

    /// Install state restored from storage.
    pub fn hydrate(&mut self, state: PersistedState) {
        self.tickets = state.tickets;
        self.filters = state.filters;
    }

    /// The persisted projection: tickets plus filter selections, none of
    /// the transient flags.
    pub fn snapshot(&self) -> PersistedState {
        PersistedState {
            tickets: self.tickets.clone(),
            filters: self.filters.clone(),
        }
    }
}
