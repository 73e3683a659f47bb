//! One-shot task commands: `add`, `list`, `done`, `reopen`, `edit`, `delete`.
//!
//! Every command opens the configured database, drives a
//! [`TaskListController`] and waits for its mutations to land before exiting.
//! The controller only logs storage failures, so each command reads the list
//! back and reports an error when the expected change is missing.

use crate::{
    libs::{
        controller::TaskListController,
        messages::Message,
        store::{TaskRepository, TaskStore},
        task::{TaskId, TaskView},
        view::View,
    },
    msg_bail_anyhow, msg_error_anyhow, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Task text; several words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    text: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Print the list as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
pub struct IdArgs {
    /// Task ID
    id: TaskId,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Task ID
    id: TaskId,
    /// New task text; blank text deletes the task
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    text: Vec<String>,
}

/// Controller over the configured database.
pub fn open() -> Result<TaskListController> {
    let store = Arc::new(TaskRepository::open_default()?);
    Ok(TaskListController::new(store))
}

/// The task with `id` as currently displayed.
pub fn find_task(controller: &TaskListController, id: TaskId) -> Option<TaskView> {
    controller.state().tasks.into_iter().find(|task| task.id == id)
}

pub async fn add(args: AddArgs) -> Result<()> {
    let controller = open()?;
    match add_task(&controller, &args.text.join(" ")).await? {
        Some(task) => msg_success!(Message::TaskAdded(task.text)),
        None => msg_warning!(Message::TaskTextEmpty),
    }
    Ok(())
}

/// Adds a task and returns it as listed. `None` for blank text.
pub async fn add_task(controller: &TaskListController, text: &str) -> Result<Option<TaskView>> {
    let known: HashSet<TaskId> = controller.state().tasks.iter().map(|task| task.id).collect();
    if !controller.add_task(text) {
        return Ok(None);
    }
    controller.settle().await;

    let text = text.trim();
    controller
        .state()
        .tasks
        .into_iter()
        .find(|task| !known.contains(&task.id) && task.text == text)
        .map(Some)
        .ok_or_else(|| msg_error_anyhow!(Message::TaskNotSaved))
}

pub async fn list(args: ListArgs) -> Result<()> {
    let controller = open()?;
    let state = controller.state();

    if args.json {
        return View::tasks_json(&state.tasks);
    }
    if state.tasks.is_empty() {
        msg_info!(Message::NoTasks);
        return Ok(());
    }

    msg_print!(Message::TasksHeader);
    View::tasks(&state)
}

pub async fn set_done(args: IdArgs, is_done: bool) -> Result<()> {
    let controller = open()?;
    set_task_done(&controller, args.id, is_done).await?;

    if is_done {
        msg_success!(Message::TaskMarkedDone(args.id));
    } else {
        msg_success!(Message::TaskReopened(args.id));
    }
    Ok(())
}

pub async fn set_task_done(controller: &TaskListController, id: TaskId, is_done: bool) -> Result<()> {
    if find_task(controller, id).is_none() {
        msg_bail_anyhow!(Message::TaskNotFoundWithId(id));
    }

    controller.set_done(id, is_done);
    controller.settle().await;

    match find_task(controller, id) {
        Some(task) if task.is_done == is_done => Ok(()),
        Some(_) => Err(msg_error_anyhow!(Message::TaskNotSaved)),
        None => Err(msg_error_anyhow!(Message::TaskNotFoundWithId(id))),
    }
}

pub async fn edit(args: EditArgs) -> Result<()> {
    let controller = open()?;
    match edit_task(&controller, args.id, &args.text.join(" ")).await? {
        Some(task) => msg_success!(Message::TaskUpdated(task.id)),
        None => msg_success!(Message::TaskDeleted(args.id)),
    }
    Ok(())
}

/// Runs the inline-edit flow on one task. Returns the updated task, or
/// `None` when blank text deleted it.
pub async fn edit_task(controller: &TaskListController, id: TaskId, text: &str) -> Result<Option<TaskView>> {
    let Some(task) = find_task(controller, id) else {
        msg_bail_anyhow!(Message::TaskNotFoundWithId(id));
    };

    controller.start_edit(task.id, &task.text);
    controller.change_edit_text(text);
    controller.commit_edit();
    controller.settle().await;

    let text = text.trim();
    match find_task(controller, id) {
        None if text.is_empty() => Ok(None),
        None => Err(msg_error_anyhow!(Message::TaskNotFoundWithId(id))),
        Some(task) if !text.is_empty() && task.text == text => Ok(Some(task)),
        Some(_) => Err(msg_error_anyhow!(Message::TaskNotSaved)),
    }
}

pub async fn delete(args: IdArgs) -> Result<()> {
    let store = TaskRepository::open_default()?;
    delete_task(&store, args.id).await?;

    msg_success!(Message::TaskDeleted(args.id));
    Ok(())
}

pub async fn delete_task(store: &dyn TaskStore, id: TaskId) -> Result<()> {
    if store.get_task_by_id(id).await?.is_none() {
        msg_bail_anyhow!(Message::TaskNotFoundWithId(id));
    }

    store.delete_task_by_id(id).await?;
    if store.get_task_by_id(id).await?.is_some() {
        msg_bail_anyhow!(Message::TaskNotSaved);
    }
    Ok(())
}
