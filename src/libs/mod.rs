//! Core library modules for todopad.
//!
//! - **Tasks**: the task model and display projection (`task`)
//! - **Store**: the async task store contract and its SQLite repository (`store`)
//! - **Controller**: inline-edit state machine and derived task list (`controller`)
//! - **Infrastructure**: configuration, data directory, messages, table output
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use todopad::libs::{controller::TaskListController, store::TaskRepository};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let controller = TaskListController::new(Arc::new(TaskRepository::open_default()?));
//! controller.add_task("Implement feature");
//! controller.settle().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod controller;
pub mod data_storage;
pub mod messages;
pub mod store;
pub mod task;
pub mod view;
