use super::migrations::init_with_migrations;
use crate::libs::config::Config;
use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;

/// An open SQLite connection with the schema brought up to date.
pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the configured database file in the application data directory.
    pub fn new() -> Result<Db> {
        let db_file_path = Config::read()?.db_path()?;
        Self::open(db_file_path)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Db> {
        let mut conn = Connection::open(path)?;
        init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }

    /// Private in-memory database, mostly for tests.
    pub fn open_in_memory() -> Result<Db> {
        let mut conn = Connection::open_in_memory()?;
        init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }

    /// Opens the configured database without touching its schema.
    pub fn new_without_migrations() -> Result<Connection> {
        let db_file_path = Config::read()?.db_path()?;
        Self::open_without_migrations(db_file_path)
    }

    pub fn open_without_migrations(path: impl AsRef<Path>) -> Result<Connection> {
        Ok(Connection::open(path)?)
    }
}
