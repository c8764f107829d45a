//! Ticket filtering.
//!
//! Provides the `TicketFilter` trait, the individual search/tag/priority
//! filters, and `FilterState`, the persisted bundle of all three.

use serde::{Deserialize, Serialize};

use crate::{priority::TicketPriority, ticket::Ticket};

/// Trait for filtering tickets by various criteria.
pub trait TicketFilter {
    /// Returns true if the ticket matches the filter criteria.
    fn matches(&self, ticket: &Ticket) -> bool;
}

/// Case-insensitive substring search over ticket name and description.
///
/// An empty query matches every ticket.
pub struct SearchFilter {
    query: String,
}

impl SearchFilter {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into().to_lowercase(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

impl TicketFilter for SearchFilter {
    fn matches(&self, ticket: &Ticket) -> bool {
        if self.query.is_empty() {
            return true;
        }
        ticket.name.to_lowercase().contains(&self.query)
            || ticket.description.to_lowercase().contains(&self.query)
    }
}

/// Match tickets carrying at least one of the selected tags (OR, not AND).
///
/// An empty selection matches every ticket.
pub struct TagFilter {
    tags: Vec<String>,
}

impl TagFilter {
    pub fn new(tags: impl IntoIterator<Item = String>) -> Self {
        Self {
            tags: tags.into_iter().collect(),
        }
    }
}

impl TicketFilter for TagFilter {
    fn matches(&self, ticket: &Ticket) -> bool {
        if self.tags.is_empty() {
            return true;
        }
        self.tags.iter().any(|tag| ticket.has_tag(tag))
    }
}

/// Match tickets with exactly the selected priority.
///
/// A ticket with no priority never matches a concrete selection; selecting
/// no priority is expressed by not applying this filter at all.
pub struct PriorityFilter {
    priority: TicketPriority,
}

impl PriorityFilter {
    pub fn new(priority: TicketPriority) -> Self {
        Self { priority }
    }
}

impl TicketFilter for PriorityFilter {
    fn matches(&self, ticket: &Ticket) -> bool {
        ticket.priority == Some(self.priority)
    }
}

/// Combine multiple filters with AND logic.
///
/// A ticket matches only if it passes all filters; an empty composite
/// matches every ticket.
pub struct CompositeFilter {
    filters: Vec<Box<dyn TicketFilter>>,
}

impl CompositeFilter {
    pub fn new() -> Self {
        Self { filters: vec![] }
    }

    pub fn with_filter(mut self, filter: Box<dyn TicketFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Default for CompositeFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl TicketFilter for CompositeFilter {
    fn matches(&self, ticket: &Ticket) -> bool {
        self.filters.iter().all(|f| f.matches(ticket))
    }
}

/// The user's current filter selections. Persisted alongside the tickets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    #[serde(default)]
    pub search_text: String,
    #[serde(default)]
    pub selected_tags: Vec<String>,
    #[serde(default)]
    pub selected_priority: Option<TicketPriority>,
}

impl FilterState {
    pub fn has_active_filters(&self) -> bool {
        !self.search_text.is_empty()
            || !self.selected_tags.is_empty()
            || self.selected_priority.is_some()
    }

    pub fn clear(&mut self) {
        self.search_text.clear();
        self.selected_tags.clear();
        self.selected_priority = None;
    }

    fn to_filter(&self) -> CompositeFilter {
        let mut composite = CompositeFilter::new();
        if !self.search_text.is_empty() {
            composite = composite.with_filter(Box::new(SearchFilter::new(&self.search_text)));
        }
        if !self.selected_tags.is_empty() {
            composite =
                composite.with_filter(Box::new(TagFilter::new(self.selected_tags.clone())));
        }
        if let Some(priority) = self.selected_priority {
            composite = composite.with_filter(Box::new(PriorityFilter::new(priority)));
        }
        composite
    }

    /// Search AND tag AND priority, each vacuously true when inactive.
    pub fn matches(&self, ticket: &Ticket) -> bool {
        self.to_filter().matches(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ticket() -> Ticket {
        let mut ticket = Ticket::new("1", "Implement User Authentication");
        ticket.description = "Create a secure authentication system.".to_string();
        ticket.tags = vec![
            "frontend".to_string(),
            "security".to_string(),
            "auth".to_string(),
        ];
        ticket.priority = Some(TicketPriority::High);
        ticket
    }

    #[test]
    fn test_search_filter_name_and_description() {
        let ticket = sample_ticket();

        assert!(SearchFilter::new("AUTH").matches(&ticket)); // case-insensitive
        assert!(SearchFilter::new("secure").matches(&ticket)); // description
        assert!(!SearchFilter::new("database").matches(&ticket));
        assert!(SearchFilter::new("").matches(&ticket));
    }

    #[test]
    fn test_tag_filter_is_or_combined() {
        let ticket = sample_ticket();

        assert!(TagFilter::new(vec!["auth".to_string()]).matches(&ticket));
        assert!(
            TagFilter::new(vec!["backend".to_string(), "auth".to_string()]).matches(&ticket)
        );
        assert!(!TagFilter::new(vec!["backend".to_string()]).matches(&ticket));
        assert!(TagFilter::new(vec![]).matches(&ticket));
    }

    #[test]
    fn test_priority_filter_excludes_unset() {
        let mut ticket = sample_ticket();
        let filter = PriorityFilter::new(TicketPriority::High);
        assert!(filter.matches(&ticket));

        // Unset priority must never match a concrete selection, even though
        // both are "no value" conceptually.
        ticket.priority = None;
        assert!(!filter.matches(&ticket));

        ticket.priority = Some(TicketPriority::Low);
        assert!(!filter.matches(&ticket));
    }

    #[test]
    fn test_empty_filter_state_matches_all() {
        let state = FilterState::default();
        assert!(!state.has_active_filters());
        assert!(state.matches(&sample_ticket()));

        let mut no_priority = sample_ticket();
        no_priority.priority = None;
        assert!(state.matches(&no_priority));
    }

    #[test]
    fn test_filter_state_is_and_combined() {
        let ticket = sample_ticket();

        let state = FilterState {
            search_text: "authentication".to_string(),
            selected_tags: vec!["security".to_string()],
            selected_priority: Some(TicketPriority::High),
        };
        assert!(state.matches(&ticket));

        // One failing component fails the whole predicate.
        let state = FilterState {
            selected_priority: Some(TicketPriority::Low),
            ..state
        };
        assert!(!state.matches(&ticket));
    }

    #[test]
    fn test_clear() {
        let mut state = FilterState {
            search_text: "auth".to_string(),
            selected_tags: vec!["security".to_string()],
            selected_priority: Some(TicketPriority::High),
        };
        assert!(state.has_active_filters());
        state.clear();
        assert!(!state.has_active_filters());
    }

    #[test]
    fn test_persisted_wire_names() {
        let state = FilterState {
            search_text: "auth".to_string(),
            selected_tags: vec!["security".to_string()],
            selected_priority: Some(TicketPriority::High),
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["searchText"], "auth");
        assert_eq!(json["selectedTags"][0], "security");
        assert_eq!(json["selectedPriority"], "high");
    }
}
