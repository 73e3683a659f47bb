pub mod init;
#[cfg(debug_assertions)]
pub mod migrations;
pub mod shell;
pub mod task;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Add a task")]
    Add(task::AddArgs),
    #[command(about = "Show the task list")]
    List(task::ListArgs),
    #[command(about = "Mark a task as done")]
    Done(task::IdArgs),
    #[command(about = "Reopen a completed task")]
    Reopen(task::IdArgs),
    #[command(about = "Replace the text of a task; blank text deletes it")]
    Edit(task::EditArgs),
    #[command(about = "Delete a task")]
    Delete(task::IdArgs),
    #[command(about = "Interactive task list")]
    Shell,
    #[cfg(debug_assertions)]
    #[command(about = "Inspect database migrations")]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Add(args) => task::add(args).await,
            Commands::List(args) => task::list(args).await,
            Commands::Done(args) => task::set_done(args, true).await,
            Commands::Reopen(args) => task::set_done(args, false).await,
            Commands::Edit(args) => task::edit(args).await,
            Commands::Delete(args) => task::delete(args).await,
            Commands::Shell => shell::cmd().await,
            #[cfg(debug_assertions)]
            Commands::Migrations(args) => migrations::cmd(args),
        }
    }
}
