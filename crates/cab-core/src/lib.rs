pub mod dispatch;
pub mod engine;
pub mod error;
pub mod preprocess;
pub mod state;
pub mod store;

pub use dispatch::Dispatcher;
pub use engine::{Engine, Explanation, Services};
pub use error::CoreError;
pub use state::{HISTORY_LIMIT, LocalState};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};

#[cfg(test)]
mod tests;
