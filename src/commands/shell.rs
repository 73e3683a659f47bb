//! Interactive shell.
//!
//! Keeps one [`TaskListController`] alive for the whole session, so the
//! inline-edit flow (`edit`, `text`, `commit`) behaves like it does in a
//! graphical list: selecting another task or completing the edited one saves
//! the pending text.

use crate::{
    commands::task::{find_task, open},
    libs::{controller::TaskListController, messages::Message, task::TaskId, view::View},
    msg_error, msg_info, msg_print, msg_warning,
};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Add(String),
    New(String),
    Submit,
    Done(TaskId),
    Reopen(TaskId),
    Edit(TaskId),
    Text(String),
    Commit,
    List,
    Help,
    Quit,
    Empty,
}

/// Parses one input line. Unknown commands and bad IDs come back as the
/// message to show.
pub fn parse_line(line: &str) -> Result<ShellCommand, Message> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let id = |raw: &str| raw.parse::<TaskId>().map_err(|_| Message::ShellInvalidId(raw.to_string()));

    Ok(match command {
        "" => ShellCommand::Empty,
        "add" | "a" => ShellCommand::Add(rest.to_string()),
        "new" | "n" => ShellCommand::New(rest.to_string()),
        "submit" | "s" => ShellCommand::Submit,
        "done" | "d" => ShellCommand::Done(id(rest)?),
        "reopen" | "r" => ShellCommand::Reopen(id(rest)?),
        "edit" | "e" => ShellCommand::Edit(id(rest)?),
        "text" | "t" => ShellCommand::Text(rest.to_string()),
        "commit" | "c" => ShellCommand::Commit,
        "list" | "l" | "ls" => ShellCommand::List,
        "help" | "h" | "?" => ShellCommand::Help,
        "quit" | "q" | "exit" => ShellCommand::Quit,
        other => return Err(Message::ShellUnknownCommand(other.to_string())),
    })
}

/// Applies `command` to the controller. Returns `false` when the shell should stop.
pub fn execute(controller: &TaskListController, command: ShellCommand) -> bool {
    match command {
        ShellCommand::Add(text) => {
            if !controller.add_task(&text) {
                msg_warning!(Message::TaskTextEmpty);
            }
        }
        ShellCommand::New(text) => controller.set_new_task_text(&text),
        ShellCommand::Submit => {
            if !controller.submit_new_task() {
                msg_warning!(Message::TaskTextEmpty);
            }
        }
        ShellCommand::Done(id) => done_or_reopen(controller, id, true),
        ShellCommand::Reopen(id) => done_or_reopen(controller, id, false),
        ShellCommand::Edit(id) => match find_task(controller, id) {
            Some(task) => {
                controller.start_edit(task.id, &task.text);
                msg_info!(Message::TaskEditStarted(task.id));
            }
            None => msg_error!(Message::TaskNotFoundWithId(id)),
        },
        ShellCommand::Text(text) => {
            if controller.editing_task_id().is_none() {
                msg_warning!(Message::NoEditInProgress);
            }
            controller.change_edit_text(&text);
        }
        ShellCommand::Commit => {
            if controller.editing_task_id().is_none() {
                msg_warning!(Message::NoEditInProgress);
            } else {
                controller.commit_edit();
                msg_info!(Message::TaskEditCommitted);
            }
        }
        ShellCommand::Help => msg_print!(Message::ShellHelp),
        ShellCommand::Quit => return false,
        ShellCommand::List | ShellCommand::Empty => {}
    }
    true
}

fn done_or_reopen(controller: &TaskListController, id: TaskId, is_done: bool) {
    if find_task(controller, id).is_none() {
        msg_error!(Message::TaskNotFoundWithId(id));
        return;
    }
    controller.set_done(id, is_done);
}

pub async fn cmd() -> Result<()> {
    let controller = open()?;
    msg_print!(Message::ShellWelcome);

    loop {
        controller.settle().await;
        let state = controller.state();
        if state.tasks.is_empty() {
            msg_info!(Message::NoTasks);
        } else {
            View::tasks(&state)?;
        }

        let line: String = match Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptShell.to_string())
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => line,
            Err(_) => break,
        };

        match parse_line(&line) {
            Ok(command) => {
                if !execute(&controller, command) {
                    break;
                }
            }
            Err(message) => msg_error!(message),
        }
    }

    controller.commit_edit();
    controller.settle().await;
    msg_print!(Message::ShellGoodbye);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(parse_line("add  Buy milk ").unwrap(), ShellCommand::Add("Buy milk".to_string()));
        assert_eq!(parse_line("d 3").unwrap(), ShellCommand::Done(3));
        assert_eq!(parse_line("edit 12").unwrap(), ShellCommand::Edit(12));
        assert_eq!(parse_line("text").unwrap(), ShellCommand::Text(String::new()));
        assert_eq!(parse_line("   ").unwrap(), ShellCommand::Empty);
        assert_eq!(parse_line("quit").unwrap(), ShellCommand::Quit);
    }

    #[test]
    fn rejects_bad_ids_and_unknown_commands() {
        assert!(matches!(parse_line("done x"), Err(Message::ShellInvalidId(raw)) if raw == "x"));
        assert!(matches!(parse_line("reopen"), Err(Message::ShellInvalidId(_))));
        assert!(matches!(parse_line("frobnicate 1"), Err(Message::ShellUnknownCommand(cmd)) if cmd == "frobnicate"));
    }
}
