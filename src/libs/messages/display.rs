//! Display implementation for todopad messages.
//!
//! All user-facing text is defined here, in one place, so commands only ever
//! refer to [`Message`] variants.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // Task messages
            Message::TaskAdded(text) => format!("Task added: {}", text),
            Message::TaskTextEmpty => "Task text is empty, nothing to add".to_string(),
            Message::TaskMarkedDone(id) => format!("Task #{} marked as done", id),
            Message::TaskReopened(id) => format!("Task #{} reopened", id),
            Message::TaskUpdated(id) => format!("Task #{} updated", id),
            Message::TaskDeleted(id) => format!("Task #{} deleted", id),
            Message::TaskNotFoundWithId(id) => format!("Task with ID {} not found", id),
            Message::TaskNotSaved => "The change was not saved. Set TODOPAD_DEBUG=1 to see why".to_string(),
            Message::TasksHeader => "Tasks:".to_string(),
            Message::NoTasks => "No tasks yet. Add one with `todopad add <text>`".to_string(),
            Message::TaskEditStarted(id) => format!("Editing task #{}", id),
            Message::TaskEditCommitted => "Edit saved".to_string(),
            Message::NoEditInProgress => "No task is being edited".to_string(),

            // Shell messages
            Message::ShellWelcome => "todopad shell. Type `help` for commands, `quit` to leave.".to_string(),
            Message::ShellHelp => [
                "add <text>      add a task",
                "new <text>      set the pending new-task text",
                "submit          add the pending new-task text",
                "done <id>       mark a task as done",
                "reopen <id>     reopen a completed task",
                "edit <id>       start editing a task",
                "text <text>     replace the text of the task being edited",
                "commit          save the edit (blank text deletes the task)",
                "list            show the tasks",
                "quit            leave the shell",
            ]
            .join("\n"),
            Message::ShellUnknownCommand(command) => format!("Unknown command: {}", command),
            Message::ShellInvalidId(raw) => format!("Invalid task ID: {}", raw),
            Message::ShellGoodbye => "Bye".to_string(),
            Message::PromptShell => "todopad".to_string(),

            // Configuration messages
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration deleted".to_string(),
            Message::ConfigFileNotFound => "Configuration file not found".to_string(),
            Message::ConfigModuleStorage => "Storage settings".to_string(),
            Message::PromptDbFileName => "Database file name".to_string(),
            Message::PromptDataDir => "Data directory (leave empty for the default)".to_string(),

            // Migration messages
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("✓ Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("✗ Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All database migrations completed successfully".to_string(),
            Message::DatabaseVersion(version) => format!("Current database version: {}", version),
            Message::DatabaseUpToDate => "Database schema is up to date".to_string(),
            Message::DatabaseNeedsUpdate => "Database schema needs to be updated".to_string(),
            Message::MigrationHistory => "Migration history:".to_string(),
            Message::MigrationHistoryEntry(version, name, applied_at) => {
                format!("  v{}: {} (applied: {})", version, name, applied_at)
            }
            Message::NothingToRollback => "Nothing to rollback".to_string(),
            Message::RollingBack(from, to) => format!("Rolling back from v{} to v{}", from, to),
            Message::RollbackCompleted(version) => format!("Rollback to v{} completed", version),
        };

        write!(f, "{}", text)
    }
}
