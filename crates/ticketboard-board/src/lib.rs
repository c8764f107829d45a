pub mod controller;
pub mod fetch;
pub mod sample;
pub mod store;

pub use controller::{
    run_saver, BoardController, ColumnView, DropOutcome, LoadPhase, LOAD_ERROR_MESSAGE,
};
pub use fetch::{FetchClient, ListResponse, SampleApi, TicketPayload, TicketQuery};
pub use store::TicketStore;
