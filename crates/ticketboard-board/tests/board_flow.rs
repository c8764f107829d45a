//! End-to-end board flows: hydrate, fetch, drag, persist, reload.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tempfile::tempdir;

use ticketboard_board::{
    run_saver, BoardController, DropOutcome, FetchClient, LoadPhase, SampleApi, TicketPayload,
};
use ticketboard_core::BoardResult;
use ticketboard_domain::{Ticket, TicketStatus};
use ticketboard_persistence::{JsonStateStore, StateStore};

/// Fetch client that counts invocations and serves a fixed list.
struct CountingFetch {
    calls: AtomicUsize,
    tickets: Vec<Ticket>,
}

impl CountingFetch {
    fn new(tickets: Vec<Ticket>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            tickets,
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FetchClient for CountingFetch {
    async fn fetch_tickets(&self) -> BoardResult<Vec<Ticket>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.tickets.clone())
    }
}

fn instant_api() -> Arc<SampleApi> {
    Arc::new(SampleApi::with_latency(std::time::Duration::ZERO))
}

fn column_ids(controller: &BoardController, status: TicketStatus) -> Vec<String> {
    controller
        .columns()
        .into_iter()
        .find(|c| c.status == status)
        .unwrap()
        .tickets
        .into_iter()
        .map(|t| t.id)
        .collect()
}

#[tokio::test]
async fn first_session_fetches_then_second_session_restores_from_disk() {
    let dir = tempdir().unwrap();
    let state_store = Arc::new(JsonStateStore::new(dir.path().join("board.json")));

    // First session: empty storage, so the board fetches the sample list.
    {
        let (mut controller, save_rx) = BoardController::new(instant_api(), true);
        let saver = tokio::spawn(run_saver(
            save_rx.unwrap(),
            state_store.clone() as Arc<dyn StateStore>,
        ));

        controller.hydrate(state_store.as_ref()).await;
        controller.ensure_loaded().await;
        assert_eq!(controller.load_phase(), LoadPhase::Loaded);
        assert_eq!(controller.store().tickets().len(), 6);

        // Reorder TODO (ids 1, 5, 6 in the sample data) and move one across.
        let outcome = controller.handle_drop("6", "1");
        assert_eq!(outcome, DropOutcome::Reordered);
        assert_eq!(column_ids(&controller, TicketStatus::Todo), ["6", "1", "5"]);

        let outcome = controller.handle_drop("5", "IN_PROGRESS");
        assert_eq!(
            outcome,
            DropOutcome::StatusChanged(TicketStatus::InProgress)
        );

        controller.set_search_text("user");

        // Dropping the controller closes the save channel; the saver drains
        // the queued snapshots and exits.
        drop(controller);
        saver.await.unwrap();
    }

    // Second session: storage is populated, so no fetch happens at all.
    {
        let fetch = Arc::new(CountingFetch::new(vec![]));
        let (mut controller, _) = BoardController::new(fetch.clone(), false);
        controller.hydrate(state_store.as_ref()).await;
        controller.ensure_loaded().await;

        assert_eq!(fetch.call_count(), 0);
        assert_eq!(controller.store().tickets().len(), 6);
        assert_eq!(
            controller.store().ticket("5").unwrap().status,
            TicketStatus::InProgress
        );
        assert_eq!(controller.store().filters().search_text, "user");

        // The persisted order survives: 6 before 1 in TODO.
        controller.set_search_text("");
        assert_eq!(column_ids(&controller, TicketStatus::Todo), ["6", "1"]);
    }
}

#[tokio::test]
async fn reorder_of_one_column_leaves_other_columns_alone() {
    let (mut controller, _) = BoardController::new(instant_api(), false);
    controller
        .hydrate(&ticketboard_persistence::MemoryStateStore::new())
        .await;
    controller.ensure_loaded().await;

    let in_progress_before = column_ids(&controller, TicketStatus::InProgress);
    let done_before = column_ids(&controller, TicketStatus::Done);

    controller.handle_drop("5", "1");

    assert_eq!(
        column_ids(&controller, TicketStatus::InProgress),
        in_progress_before
    );
    assert_eq!(column_ids(&controller, TicketStatus::Done), done_before);
    assert_eq!(controller.store().tickets().len(), 6);
}

#[tokio::test]
async fn ticket_with_malformed_dates_still_reaches_the_board() {
    let broken = TicketPayload {
        id: "42".to_string(),
        name: "Broken clock".to_string(),
        description: String::new(),
        created_at: "invalid-date".to_string(),
        updated_at: "invalid-date".to_string(),
        tags: vec![],
        status: TicketStatus::Todo,
        priority: None,
    }
    .into_ticket();
    assert!(!broken.created_at.is_valid());

    let fetch = Arc::new(CountingFetch::new(vec![broken]));
    let (mut controller, _) = BoardController::new(fetch.clone(), false);
    controller
        .hydrate(&ticketboard_persistence::MemoryStateStore::new())
        .await;
    controller.ensure_loaded().await;

    assert_eq!(fetch.call_count(), 1);
    assert_eq!(controller.load_phase(), LoadPhase::Loaded);
    assert_eq!(column_ids(&controller, TicketStatus::Todo), ["42"]);
}
