//! Database layer
//!
//! SQLite-backed persistence for the Vestnik service. The pool is created
//! from configuration and schema changes are applied through embedded,
//! code-based migrations at startup.

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, create_test_pool, DbPool};
