pub mod filter;
pub mod order;
pub mod priority;
pub mod status;
pub mod ticket;
pub mod timestamp;

pub use filter::{
    CompositeFilter, FilterState, PriorityFilter, SearchFilter, TagFilter, TicketFilter,
};
pub use order::{apply_requested_order, array_move};
pub use priority::TicketPriority;
pub use status::TicketStatus;
pub use ticket::{Ticket, TicketId};
pub use timestamp::Timestamp;
