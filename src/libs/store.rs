//! Task store contract and its SQLite implementation.
//!
//! [`TaskStore`] is what the [`TaskListController`](super::controller::TaskListController)
//! talks to. Besides the id-addressed operations it offers a live stream of
//! ordered snapshots: every mutation that changes a row publishes the full,
//! re-queried list under a new version number. Ignored inserts and updates or
//! deletes of missing ids publish nothing.
//!
//! [`TaskRepository`] implements the contract on top of [`Tasks`]. Statements
//! run on tokio's blocking pool; the connection is shared behind a mutex, so
//! concurrent writes are serialized one statement at a time.

use crate::db::{db::Db, tasks::Tasks};
use crate::libs::task::{Task, TaskId};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("task not found: {0}")]
    NotFound(TaskId),

    #[error("task has not been saved yet and has no identifier")]
    MissingId,

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("storage worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// One ordered view of all tasks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskSnapshot {
    /// Increases with every published snapshot.
    pub version: u64,
    pub tasks: Vec<Task>,
}

/// Live sequence of [`TaskSnapshot`]s.
///
/// The first call to [`next`](TaskStream::next) yields the current snapshot
/// immediately; later calls wait for the store to publish a newer one.
/// Intermediate snapshots may be skipped, the latest one is never lost.
pub struct TaskStream {
    rx: watch::Receiver<TaskSnapshot>,
    primed: bool,
}

impl TaskStream {
    fn new(rx: watch::Receiver<TaskSnapshot>) -> Self {
        TaskStream { rx, primed: false }
    }

    /// Returns `None` once the store has been dropped.
    pub async fn next(&mut self) -> Option<TaskSnapshot> {
        if self.primed {
            self.rx.changed().await.ok()?;
        }
        self.primed = true;
        Some(self.rx.borrow_and_update().clone())
    }

    /// The latest snapshot, without waiting.
    pub fn current(&self) -> TaskSnapshot {
        self.rx.borrow().clone()
    }
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Subscribes to ordered task snapshots.
    fn stream_all_tasks(&self) -> TaskStream;

    async fn get_task_by_id(&self, id: TaskId) -> StoreResult<Option<Task>>;

    /// Stores a new task. A task whose `id` is already taken is ignored and
    /// `None` is returned; otherwise the assigned identifier.
    async fn insert_task(&self, task: &Task) -> StoreResult<Option<TaskId>>;

    /// Replaces the stored record with the same id. No-op when it is absent.
    ///
    /// # Errors
    ///
    /// [`StoreError::MissingId`] when `task.id` is `None`.
    async fn update_task(&self, task: &Task) -> StoreResult<()>;

    /// No-op when the task is absent.
    async fn delete_task_by_id(&self, id: TaskId) -> StoreResult<()>;

    async fn set_done_and_timestamp(&self, id: TaskId, is_done: bool, timestamp: i64) -> StoreResult<()>;
}

/// SQLite-backed [`TaskStore`].
pub struct TaskRepository {
    tasks: Arc<Mutex<Tasks>>,
    snapshots: Arc<watch::Sender<TaskSnapshot>>,
}

impl TaskRepository {
    /// Wraps `tasks` and publishes its current content as the first snapshot.
    pub fn new(tasks: Tasks) -> StoreResult<Self> {
        let initial = TaskSnapshot {
            version: 0,
            tasks: tasks.fetch_ordered()?,
        };
        let (snapshots, _) = watch::channel(initial);

        Ok(TaskRepository {
            tasks: Arc::new(Mutex::new(tasks)),
            snapshots: Arc::new(snapshots),
        })
    }

    /// Repository over the configured database file.
    pub fn open_default() -> anyhow::Result<Self> {
        Ok(Self::new(Tasks::new()?)?)
    }

    pub fn open_in_memory() -> anyhow::Result<Self> {
        Ok(Self::new(Tasks::from_db(Db::open_in_memory()?))?)
    }

    /// Runs `op` on the blocking pool with exclusive access to the DAO.
    /// A fresh snapshot is sent only when `changed` says `op` modified rows.
    async fn run<T, F>(&self, op: F, changed: fn(&T) -> bool) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Tasks) -> rusqlite::Result<T> + Send + 'static,
    {
        let tasks = Arc::clone(&self.tasks);
        let snapshots = Arc::clone(&self.snapshots);

        tokio::task::spawn_blocking(move || -> StoreResult<T> {
            let mut guard = tasks.lock();
            let value = op(&mut *guard)?;
            if changed(&value) {
                let ordered = guard.fetch_ordered()?;
                snapshots.send_modify(|snapshot| {
                    snapshot.version += 1;
                    snapshot.tasks = ordered;
                });
            }
            Ok(value)
        })
        .await?
    }
}

#[async_trait]
impl TaskStore for TaskRepository {
    fn stream_all_tasks(&self) -> TaskStream {
        TaskStream::new(self.snapshots.subscribe())
    }

    async fn get_task_by_id(&self, id: TaskId) -> StoreResult<Option<Task>> {
        self.run(move |tasks| tasks.get_by_id(id), |_| false).await
    }

    async fn insert_task(&self, task: &Task) -> StoreResult<Option<TaskId>> {
        let task = task.clone();
        self.run(move |tasks| tasks.insert(&task), Option::is_some).await
    }

    async fn update_task(&self, task: &Task) -> StoreResult<()> {
        let id = task.id.ok_or(StoreError::MissingId)?;
        let task = task.clone();
        let changed = self.run(move |tasks| tasks.update(id, &task), rows_changed).await?;
        if changed == 0 {
            tracing::debug!(task_id = id, "update skipped, task does not exist");
        }
        Ok(())
    }

    async fn delete_task_by_id(&self, id: TaskId) -> StoreResult<()> {
        self.run(move |tasks| tasks.delete_by_id(id), rows_changed).await?;
        Ok(())
    }

    async fn set_done_and_timestamp(&self, id: TaskId, is_done: bool, timestamp: i64) -> StoreResult<()> {
        self.run(
            move |tasks| tasks.set_done_and_timestamp(id, is_done, timestamp),
            rows_changed,
        )
        .await?;
        Ok(())
    }
}

fn rows_changed(rows: &usize) -> bool {
    *rows > 0
}
