//! Application services (use cases).
//!
//! These services coordinate the outbound adapters to implement the
//! application's persistence lifecycle.

pub mod persistence;

pub use persistence::{PersistenceManager, StoreStatus, FOREIGN_KEYS_PRAGMA};
