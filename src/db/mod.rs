//! Database layer for todopad.
//!
//! SQLite persistence for tasks: connection management, versioned schema
//! migrations and the `tasks` data-access object.
//!
//! ```rust
//! use todopad::db::{db::Db, tasks::Tasks};
//! use todopad::libs::task::Task;
//!
//! let mut tasks = Tasks::from_db(Db::open_in_memory()?);
//! let id = tasks.insert(&Task::new("Review code", 1_700_000_000_000))?;
//! assert!(id.is_some());
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection opening and schema initialization.
pub mod db;

/// Versioned schema changes, tracked in the `migrations` table.
pub mod migrations;

/// SQL for the `tasks` table, including the list ordering.
pub mod tasks;
