//! Storage layer for chronos.
//!
//! SQLite persistence for the local task list.

mod database;
mod migrations;

pub use database::Database;
