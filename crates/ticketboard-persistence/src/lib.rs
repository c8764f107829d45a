pub mod snapshot;
pub mod store;

pub use snapshot::{default_state_path, PersistedState, STORAGE_KEY};
pub use store::{JsonStateStore, MemoryStateStore, StateMetadata, StateStore};
