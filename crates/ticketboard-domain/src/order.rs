//! Ticket ordering.
//!
//! The board expresses a drag-reorder as a column-scoped list of ticket ids.
//! Applying it re-sorts the whole collection: listed ids take the positions
//! requested, everything else keeps its original relative order after them.

use std::collections::HashMap;

use crate::ticket::Ticket;

/// Stable-sort `tickets` so ids appearing in `ordered_ids` come first, in
/// the requested order, and all other tickets follow in their original
/// relative order. Always a permutation: nothing is dropped or duplicated.
///
/// Because the sort is stable, reordering one column's ids never changes
/// the relative order of tickets in other columns.
pub fn apply_requested_order(tickets: &mut [Ticket], ordered_ids: &[String]) {
    let position: HashMap<&str, usize> = ordered_ids
        .iter()
        .enumerate()
        .map(|(index, id)| (id.as_str(), index))
        .collect();

    tickets.sort_by_key(|ticket| {
        position
            .get(ticket.id.as_str())
            .copied()
            .unwrap_or(usize::MAX)
    });
}

/// Relocate a single item from `from` to `to`, shifting the items between
/// them. Standard drag-and-drop array-move semantics.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= items.len() {
        return;
    }
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
}
