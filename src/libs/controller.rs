//! Task list controller.
//!
//! Sits between user intents and the [`TaskStore`]. It owns the transient
//! editing session, the pending new-task text and the display list derived
//! from the store's live snapshots, and broadcasts a [`TaskListState`] on
//! every change.
//!
//! ## Editing session
//!
//! At most one task is edited at a time. A session starts with
//! [`start_edit`](TaskListController::start_edit) and ends, with the pending
//! text saved, when another task is selected for editing, when the edited task
//! changes its done state, or on [`commit_edit`](TaskListController::commit_edit).
//! Saving blank text deletes the task instead.
//!
//! ## Mutations
//!
//! Intents never wait for the store. Each mutation is queued and applied in
//! order by a single writer task; failures are logged and dropped. Reads that
//! precede a write (`set_done`, `commit_edit`) are not atomic with it: a
//! concurrent external change to the same row is overwritten.
//!
//! Both background tasks (writer and store subscription) are aborted when the
//! controller is dropped, discarding mutations that were not applied yet. Call
//! [`settle`](TaskListController::settle) first to wait for them.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use todopad::libs::controller::TaskListController;
//! use todopad::libs::store::TaskRepository;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let store = Arc::new(TaskRepository::open_in_memory()?);
//! let controller = TaskListController::new(store);
//!
//! controller.add_task("  Buy milk ");
//! controller.settle().await;
//! assert_eq!(controller.state().tasks[0].text, "Buy milk");
//! # Ok(())
//! # }
//! ```

use crate::libs::store::{StoreError, StoreResult, TaskSnapshot, TaskStore, TaskStream};
use crate::libs::task::{now_millis, Task, TaskId, TaskView};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

/// The task currently being edited and its pending text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub task_id: TaskId,
    pub text: String,
}

/// Everything a front end needs to render the task list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListState {
    /// Tasks in store order. The edited task shows its pending text.
    pub tasks: Vec<TaskView>,
    pub new_task_text: String,
    pub editing_task_id: Option<TaskId>,
    /// Empty when no task is being edited.
    pub editing_text: String,
}

#[derive(Debug)]
enum Mutation {
    Insert { text: String, timestamp: i64 },
    SaveEdit { task_id: TaskId, text: String },
    SetDone { task_id: TaskId, is_done: bool, timestamp: i64 },
    Flush(oneshot::Sender<()>),
}

#[derive(Default)]
struct Inner {
    snapshot: TaskSnapshot,
    new_task_text: String,
    session: Option<EditSession>,
}

impl Inner {
    fn to_state(&self) -> TaskListState {
        let tasks = self
            .snapshot
            .tasks
            .iter()
            .filter_map(|task| {
                let id = task.id?;
                let text = match &self.session {
                    Some(session) if session.task_id == id => session.text.clone(),
                    _ => task.text.clone(),
                };
                Some(TaskView {
                    id,
                    text,
                    is_done: task.is_done,
                })
            })
            .collect();

        TaskListState {
            tasks,
            new_task_text: self.new_task_text.clone(),
            editing_task_id: self.session.as_ref().map(|session| session.task_id),
            editing_text: self.session.as_ref().map(|session| session.text.clone()).unwrap_or_default(),
        }
    }
}

pub struct TaskListController {
    store: Arc<dyn TaskStore>,
    inner: Arc<Mutex<Inner>>,
    state: Arc<watch::Sender<TaskListState>>,
    mutations: mpsc::UnboundedSender<Mutation>,
    workers: Vec<JoinHandle<()>>,
}

impl TaskListController {
    /// Creates a controller over `store` and starts its background tasks.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        let stream = store.stream_all_tasks();
        let inner = Inner {
            snapshot: stream.current(),
            ..Inner::default()
        };
        let (state, _) = watch::channel(inner.to_state());
        let inner = Arc::new(Mutex::new(inner));
        let state = Arc::new(state);

        let (mutations, queue) = mpsc::unbounded_channel();
        let writer = tokio::spawn(apply_mutations(Arc::clone(&store), queue));
        let follower = tokio::spawn(follow_store(stream, Arc::clone(&inner), Arc::clone(&state)));

        TaskListController {
            store,
            inner,
            state,
            mutations,
            workers: vec![writer, follower],
        }
    }

    /// Receiver that sees every state change.
    pub fn subscribe(&self) -> watch::Receiver<TaskListState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> TaskListState {
        self.state.borrow().clone()
    }

    pub fn editing_task_id(&self) -> Option<TaskId> {
        self.inner.lock().session.as_ref().map(|session| session.task_id)
    }

    pub fn editing_text(&self) -> String {
        self.inner
            .lock()
            .session
            .as_ref()
            .map(|session| session.text.clone())
            .unwrap_or_default()
    }

    pub fn new_task_text(&self) -> String {
        self.inner.lock().new_task_text.clone()
    }

    pub fn set_new_task_text(&self, text: &str) {
        let mut inner = self.inner.lock();
        inner.new_task_text = text.to_string();
        self.publish(&inner);
    }

    /// Adds a task with the trimmed `text` and clears the pending new-task
    /// text. Blank input changes nothing and returns `false`.
    pub fn add_task(&self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }

        let mut inner = self.inner.lock();
        self.enqueue(Mutation::Insert {
            text: text.to_string(),
            timestamp: now_millis(),
        });
        inner.new_task_text.clear();
        self.publish(&inner);
        true
    }

    /// [`add_task`](Self::add_task) with the pending new-task text.
    pub fn submit_new_task(&self) -> bool {
        let text = self.new_task_text();
        self.add_task(&text)
    }

    /// Marks a task done or reopens it, restamping its timestamp. A pending
    /// edit of the same task is saved first.
    pub fn set_done(&self, task_id: TaskId, is_done: bool) {
        let mut inner = self.inner.lock();
        let editing_this = matches!(&inner.session, Some(session) if session.task_id == task_id);
        if editing_this {
            self.end_session(&mut inner);
        }
        self.enqueue(Mutation::SetDone {
            task_id,
            is_done,
            timestamp: now_millis(),
        });
    }

    /// Starts editing `task_id` with `current_text` as the pending text. An
    /// edit of a different task is saved first.
    pub fn start_edit(&self, task_id: TaskId, current_text: &str) {
        let mut inner = self.inner.lock();
        if let Some(previous) = inner.session.take() {
            if previous.task_id != task_id {
                self.enqueue(Mutation::SaveEdit {
                    task_id: previous.task_id,
                    text: previous.text,
                });
            }
        }
        inner.session = Some(EditSession {
            task_id,
            text: current_text.to_string(),
        });
        tracing::debug!(task_id, "editing started");
        self.publish(&inner);
    }

    /// Replaces the pending text. Ignored when nothing is being edited.
    pub fn change_edit_text(&self, new_text: &str) {
        let mut inner = self.inner.lock();
        let Some(session) = inner.session.as_mut() else {
            return;
        };
        session.text = new_text.to_string();
        self.publish(&inner);
    }

    /// Saves the pending edit (blank text deletes the task) and ends the
    /// session. Ignored when nothing is being edited.
    pub fn commit_edit(&self) {
        let mut inner = self.inner.lock();
        if inner.session.is_some() {
            self.end_session(&mut inner);
        }
    }

    /// Waits until every mutation queued so far has been applied, then
    /// refreshes the task list from the store's latest snapshot.
    pub async fn settle(&self) {
        let (done, applied) = oneshot::channel();
        if self.mutations.send(Mutation::Flush(done)).is_ok() {
            let _ = applied.await;
        }
        apply_snapshot(&self.inner, &self.state, self.store.stream_all_tasks().current());
    }

    fn end_session(&self, inner: &mut Inner) {
        if let Some(session) = inner.session.take() {
            self.enqueue(Mutation::SaveEdit {
                task_id: session.task_id,
                text: session.text,
            });
        }
        self.publish(inner);
    }

    fn enqueue(&self, mutation: Mutation) {
        if let Err(e) = self.mutations.send(mutation) {
            tracing::warn!(mutation = ?e.0, "controller is shut down, mutation dropped");
        }
    }

    fn publish(&self, inner: &Inner) {
        self.state.send_replace(inner.to_state());
    }
}

impl Drop for TaskListController {
    fn drop(&mut self) {
        for worker in &self.workers {
            worker.abort();
        }
    }
}

/// Keeps the derived list in step with the store.
async fn follow_store(mut stream: TaskStream, inner: Arc<Mutex<Inner>>, state: Arc<watch::Sender<TaskListState>>) {
    while let Some(snapshot) = stream.next().await {
        apply_snapshot(&inner, &state, snapshot);
    }
}

fn apply_snapshot(inner: &Mutex<Inner>, state: &watch::Sender<TaskListState>, snapshot: TaskSnapshot) {
    let mut inner = inner.lock();
    if snapshot.version < inner.snapshot.version {
        return;
    }
    inner.snapshot = snapshot;
    state.send_replace(inner.to_state());
}

/// The single writer: applies queued mutations one after another.
async fn apply_mutations(store: Arc<dyn TaskStore>, mut queue: mpsc::UnboundedReceiver<Mutation>) {
    while let Some(mutation) = queue.recv().await {
        match apply(store.as_ref(), mutation).await {
            Ok(()) => {}
            Err(StoreError::NotFound(task_id)) => {
                tracing::error!(task_id, "task not found for updating done status");
            }
            Err(e) => {
                tracing::error!(error = %e, "task mutation failed");
            }
        }
    }
}

async fn apply(store: &dyn TaskStore, mutation: Mutation) -> StoreResult<()> {
    match mutation {
        Mutation::Insert { text, timestamp } => {
            store.insert_task(&Task::new(&text, timestamp)).await?;
        }
        Mutation::SaveEdit { task_id, text } => save_edit(store, task_id, &text).await?,
        Mutation::SetDone {
            task_id,
            is_done,
            timestamp,
        } => {
            let task = store.get_task_by_id(task_id).await?.ok_or(StoreError::NotFound(task_id))?;
            store.update_task(&task.with_done(is_done, timestamp)).await?;
        }
        Mutation::Flush(done) => {
            let _ = done.send(());
        }
    }
    Ok(())
}

/// Blank text deletes the task; otherwise only its text changes. A task that
/// no longer exists is skipped.
async fn save_edit(store: &dyn TaskStore, task_id: TaskId, text: &str) -> StoreResult<()> {
    let text = text.trim();
    if text.is_empty() {
        return store.delete_task_by_id(task_id).await;
    }

    match store.get_task_by_id(task_id).await? {
        Some(task) => store.update_task(&task.with_text(text)).await,
        None => {
            tracing::debug!(task_id, "edited task no longer exists");
            Ok(())
        }
    }
}
