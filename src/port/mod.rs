//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!   ┌──────────────────────┐        ┌───────────────────┐
//!   │  PersistenceManager  │───────▶│ Connector         │
//!   │  (application)       │        │ StoreConnection   │
//!   └──────────────────────┘        │ TableCatalog      │
//!                                   └─────────┬─────────┘
//!                                             ▼
//!                                   ┌───────────────────┐
//!                                   │  SQLite adapter   │
//!                                   └───────────────────┘
//! ```

pub mod outbound;

pub use outbound::catalog::TableCatalog;
pub use outbound::database::{Connector, SqlValue, StoreConnection};
