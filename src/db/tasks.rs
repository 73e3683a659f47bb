//! SQLite access for the `tasks` table.
//!
//! `Tasks` is the synchronous data-access object. It knows the SQL, including
//! the list ordering:
//!
//! 1. incomplete tasks before completed ones,
//! 2. incomplete tasks oldest first by `completed_or_reopened_timestamp`,
//! 3. completed tasks most recently completed first,
//! 4. ties broken by ascending `id`.
//!
//! Async callers go through [`TaskRepository`](crate::libs::store::TaskRepository).

use super::db::Db;
use crate::libs::task::{Task, TaskId};
use anyhow::Result as AnyResult;
use rusqlite::{params, Connection, OptionalExtension, Result, Row};

const SELECT_COLUMNS: &str = "SELECT id, text, is_done, completed_or_reopened_timestamp FROM tasks";
const ORDER_TASKS: &str = "ORDER BY is_done ASC,
    CASE WHEN is_done = 0 THEN completed_or_reopened_timestamp END ASC,
    CASE WHEN is_done = 1 THEN completed_or_reopened_timestamp END DESC,
    id ASC";
const WHERE_ID: &str = "WHERE id = ?1";
const INSERT_TASK: &str = "INSERT INTO tasks (text, is_done, completed_or_reopened_timestamp) VALUES (?1, ?2, ?3)";
const INSERT_TASK_WITH_ID: &str =
    "INSERT OR IGNORE INTO tasks (id, text, is_done, completed_or_reopened_timestamp) VALUES (?1, ?2, ?3, ?4)";
const UPDATE_TASK: &str = "UPDATE tasks SET text = ?2, is_done = ?3, completed_or_reopened_timestamp = ?4 WHERE id = ?1";
const UPDATE_DONE_AND_TIMESTAMP: &str = "UPDATE tasks SET is_done = ?2, completed_or_reopened_timestamp = ?3 WHERE id = ?1";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";
const COUNT_TASKS: &str = "SELECT COUNT(*) FROM tasks";

pub struct Tasks {
    pub conn: Connection,
}

impl Tasks {
    /// Opens the configured database.
    pub fn new() -> AnyResult<Tasks> {
        Ok(Self::from_db(Db::new()?))
    }

    pub fn from_db(db: Db) -> Tasks {
        Tasks { conn: db.conn }
    }

    /// All tasks in list order.
    pub fn fetch_ordered(&self) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare_cached(&format!("{} {}", SELECT_COLUMNS, ORDER_TASKS))?;
        let task_iter = stmt.query_map([], task_from_row)?;

        let mut tasks = Vec::new();
        for task_result in task_iter {
            tasks.push(task_result?);
        }

        Ok(tasks)
    }

    pub fn get_by_id(&self, id: TaskId) -> Result<Option<Task>> {
        self.conn
            .query_row(&format!("{} {}", SELECT_COLUMNS, WHERE_ID), params![id], task_from_row)
            .optional()
    }

    /// Inserts `task` and returns its identifier.
    ///
    /// A task carrying an identifier that is already taken is ignored and
    /// `None` is returned.
    pub fn insert(&mut self, task: &Task) -> Result<Option<TaskId>> {
        let affected = match task.id {
            Some(id) => self.conn.execute(
                INSERT_TASK_WITH_ID,
                params![id, task.text, task.is_done, task.completed_or_reopened_timestamp],
            )?,
            None => self
                .conn
                .execute(INSERT_TASK, params![task.text, task.is_done, task.completed_or_reopened_timestamp])?,
        };

        if affected == 0 {
            return Ok(None);
        }
        Ok(Some(self.conn.last_insert_rowid()))
    }

    /// Replaces the stored row with the same id. Returns the number of rows
    /// changed, 0 when the task does not exist.
    pub fn update(&mut self, id: TaskId, task: &Task) -> Result<usize> {
        self.conn.execute(
            UPDATE_TASK,
            params![id, task.text, task.is_done, task.completed_or_reopened_timestamp],
        )
    }

    pub fn set_done_and_timestamp(&mut self, id: TaskId, is_done: bool, timestamp: i64) -> Result<usize> {
        self.conn.execute(UPDATE_DONE_AND_TIMESTAMP, params![id, is_done, timestamp])
    }

    pub fn delete_by_id(&mut self, id: TaskId) -> Result<usize> {
        self.conn.execute(DELETE_TASK, params![id])
    }

    pub fn count(&self) -> Result<usize> {
        self.conn.query_row(COUNT_TASKS, [], |row| row.get(0))
    }
}

fn task_from_row(row: &Row<'_>) -> Result<Task> {
    Ok(Task {
        id: Some(row.get(0)?),
        text: row.get(1)?,
        is_done: row.get(2)?,
        completed_or_reopened_timestamp: row.get(3)?,
    })
}
