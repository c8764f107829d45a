use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use ticketboard_board::sample::AVAILABLE_TAGS;
use ticketboard_board::{BoardController, DropOutcome, LoadPhase};
use ticketboard_domain::{priority, FilterState, Ticket, TicketPriority};

use crate::cli::{MoveArgs, SetPriorityArgs, ShowArgs};
use crate::output::{output_error, output_list, output_success};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TicketRow {
    id: String,
    name: String,
    description: String,
    tags: Vec<String>,
    priority: &'static str,
    priority_icon: &'static str,
    created: String,
    age: String,
}

impl TicketRow {
    fn from_ticket(ticket: &Ticket, now: DateTime<Utc>) -> Self {
        let (label, icon) = priority::describe(ticket.priority);
        Self {
            id: ticket.id.clone(),
            name: ticket.name.clone(),
            description: ticket.description.clone(),
            tags: ticket.tags.clone(),
            priority: label,
            priority_icon: icon,
            created: ticket.created_at.format_date(),
            age: ticket.created_at.age_from(now),
        }
    }
}

#[derive(Serialize)]
struct ColumnRow {
    id: &'static str,
    name: &'static str,
    count: usize,
    tickets: Vec<TicketRow>,
}

#[derive(Serialize)]
struct BoardView {
    total: usize,
    filters: FilterState,
    columns: Vec<ColumnRow>,
}

fn parse_priority(raw: &str) -> TicketPriority {
    match TicketPriority::parse(raw) {
        Some(priority) => priority,
        None => output_error(&format!(
            "Invalid priority '{raw}' (expected low, medium, or high)"
        )),
    }
}

pub async fn show(controller: &mut BoardController, args: ShowArgs) {
    if args.clear_filters {
        controller.set_search_text("");
        controller.set_selected_tags(vec![]);
        controller.set_selected_priority(None);
    }
    if let Some(search) = args.search {
        controller.set_search_text(search);
    }
    if let Some(tags) = args.tags {
        controller.set_selected_tags(tags);
    }
    if let Some(raw) = args.priority {
        controller.set_selected_priority(Some(parse_priority(&raw)));
    }

    controller.ensure_loaded().await;
    if controller.load_phase() == LoadPhase::Failed {
        let message = controller
            .store()
            .error()
            .unwrap_or(ticketboard_board::LOAD_ERROR_MESSAGE)
            .to_string();
        output_error(&message);
    }

    let now = Utc::now();
    let columns = controller
        .columns()
        .iter()
        .map(|column| ColumnRow {
            id: column.status.as_str(),
            name: column.status.label(),
            count: column.tickets.len(),
            tickets: column
                .tickets
                .iter()
                .map(|t| TicketRow::from_ticket(t, now))
                .collect(),
        })
        .collect();

    output_success(BoardView {
        total: controller.store().tickets().len(),
        filters: controller.store().filters().clone(),
        columns,
    });
}

pub fn move_ticket(controller: &mut BoardController, args: MoveArgs) {
    let outcome = match controller.handle_drop(&args.id, &args.onto) {
        DropOutcome::StatusChanged(status) => format!("moved to {status}"),
        DropOutcome::Reordered => "reordered".to_string(),
        DropOutcome::Ignored => "ignored".to_string(),
    };
    output_success(json!({
        "outcome": outcome,
        "ticket": controller.store().ticket(&args.id),
    }));
}

pub fn set_priority(controller: &mut BoardController, args: SetPriorityArgs) {
    let priority = args.priority.as_deref().map(parse_priority);
    controller.set_ticket_priority(&args.id, priority);
    match controller.store().ticket(&args.id) {
        Some(ticket) => output_success(ticket.clone()),
        None => output_error(&format!("Ticket not found: {}", args.id)),
    }
}

pub fn tags() {
    output_list(AVAILABLE_TAGS.iter().map(|t| t.to_string()).collect());
}

pub fn reset(controller: &mut BoardController) {
    controller.reset();
    output_success(json!({ "reset": true }));
}
