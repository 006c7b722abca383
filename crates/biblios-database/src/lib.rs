//! # biblios-database
//!
//! PostgreSQL connection management, migrations, and repository
//! implementations for Biblios. Repositories are plain structs over a
//! `PgPool`; the circulation repository additionally runs the guarded
//! status transitions inside transactions.

pub mod connection;
pub mod migration;
pub mod repositories;
