//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the embedded store the persistence manager drives.

pub mod catalog;
pub mod database;
