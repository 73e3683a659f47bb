use crate::libs::task::TaskId;

#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskAdded(String),
    TaskTextEmpty,
    TaskMarkedDone(TaskId),
    TaskReopened(TaskId),
    TaskUpdated(TaskId),
    TaskDeleted(TaskId),
    TaskNotFoundWithId(TaskId),
    TaskNotSaved,
    TasksHeader,
    NoTasks,
    TaskEditStarted(TaskId),
    TaskEditCommitted,
    NoEditInProgress,

    // === SHELL MESSAGES ===
    ShellWelcome,
    ShellHelp,
    ShellUnknownCommand(String),
    ShellInvalidId(String),
    ShellGoodbye,
    PromptShell,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigFileNotFound,
    ConfigModuleStorage,
    PromptDbFileName,
    PromptDataDir,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
    DatabaseVersion(u32),
    DatabaseUpToDate,
    DatabaseNeedsUpdate,
    MigrationHistory,
    MigrationHistoryEntry(u32, String, String),
    NothingToRollback,
    RollingBack(u32, u32),
    RollbackCompleted(u32),
}
