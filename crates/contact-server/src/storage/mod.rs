//! Storage layer
//!
//! A single `contacts` table in an embedded SQLite file.

pub mod db;

pub use db::Database;
