//! Examprep Store - local persistence for an exam-preparation app.
//!
//! Owns a single SQLite connection, applies versioned schema migrations
//! exactly once each, answers catalog questions and loads development
//! fixtures.
//!
//! # Architecture
//!
//! - **`domain`** - Exam content records and the question content blob
//! - **`port`** - Store access and catalog traits
//! - **`adapter::outbound::sqlite`** - Diesel-backed store, schema, migrations, fixtures
//! - **`adapter::inbound::cli`** - The `examprep-store` command line
//! - **`application`** - [`PersistenceManager`](application::PersistenceManager)
//! - **`infrastructure::config`** - TOML configuration and logging
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use examprep_store::application::PersistenceManager;
//! use examprep_store::infrastructure::config::Config;
//!
//! # async fn demo() -> examprep_store::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let manager = Arc::new(PersistenceManager::from_config(&config.database));
//!
//! manager.initialize().await?;
//! assert!(manager.table_exists("exams").await?);
//! manager.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
