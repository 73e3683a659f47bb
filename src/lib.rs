//! # Todopad
//!
//! A small to-do list: add short text tasks, edit them in place, mark them
//! done or reopen them, and delete them. Tasks live in a local SQLite
//! database and are listed with open tasks first, oldest first, followed by
//! completed tasks, most recently completed first.
//!
//! ## Features
//!
//! - **Task Store**: async store contract with a live stream of ordered snapshots
//! - **Task List Controller**: inline-edit session, new-task text, derived list
//! - **Migrations**: versioned SQLite schema
//! - **CLI**: one-shot commands and an interactive shell
//!
//! ## Usage
//!
//! ```rust,no_run
//! use todopad::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
