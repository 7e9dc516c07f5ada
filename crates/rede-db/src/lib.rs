//! PostgreSQL persistence for the rede CMS backend.
//!
//! The user's module list is stored as a JSONB column and mutated by
//! whole-row read-modify-write, mirroring the embedded-document model this
//! layer replaces. Concurrent writers race last-writer-wins.

pub mod config;
pub mod database;
pub mod logos;
pub mod modules;
pub mod news;
pub mod users;

pub use config::DatabaseConfig;
pub use database::Database;
