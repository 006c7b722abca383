//! HTTP request handlers, organized by domain.

pub mod announcement;
pub mod auth;
pub mod author;
pub mod book;
pub mod budget;
pub mod genre;
pub mod health;
pub mod instance;
pub mod policy;
pub mod reservation;
pub mod user;
