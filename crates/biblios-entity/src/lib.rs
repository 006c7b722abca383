//! # biblios-entity
//!
//! Domain entity models for Biblios: catalog records (authors, genres,
//! books), circulation records (book instances, reservations), and the
//! administrative records (users, budgets, policies, announcements).
//!
//! Entities derive `sqlx::FromRow` and map enums onto Postgres enum types.

pub mod announcement;
pub mod author;
pub mod book;
pub mod budget;
pub mod genre;
pub mod instance;
pub mod policy;
pub mod reservation;
pub mod user;
