use super::controller::TaskListState;
use super::task::TaskView;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    /// Renders the task list as a table. The task being edited is marked
    /// with a pencil.
    pub fn tasks(state: &TaskListState) -> Result<()> {
        Self::table(state).printstd();
        Ok(())
    }

    pub fn tasks_json(tasks: &[TaskView]) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(tasks)?);
        Ok(())
    }

    fn table(state: &TaskListState) -> Table {
        let mut table = Table::new();

        table.add_row(row!["ID", "DONE", "TASK"]);
        for task in &state.tasks {
            let done = if task.is_done { "✔" } else { "" };
            let text = if state.editing_task_id == Some(task.id) {
                format!("✎ {}", task.text)
            } else {
                task.text.clone()
            };
            table.add_row(row![task.id, done, text]);
        }

        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_marks_done_and_edited_tasks() {
        let state = TaskListState {
            tasks: vec![
                TaskView {
                    id: 1,
                    text: "draft".to_string(),
                    is_done: false,
                },
                TaskView {
                    id: 2,
                    text: "shipped".to_string(),
                    is_done: true,
                },
            ],
            editing_task_id: Some(1),
            editing_text: "draft".to_string(),
            ..TaskListState::default()
        };

        let rendered = View::table(&state).to_string();

        assert!(rendered.contains("✎ draft"));
        assert!(rendered.contains("✔"));
        assert!(rendered.contains("shipped"));
    }
}
