//! Repository implementations, one per table, plus the circulation
//! repository that owns the guarded status transitions.

pub mod announcement;
pub mod author;
pub mod book;
pub mod budget;
pub mod circulation;
pub mod genre;
pub mod instance;
pub mod policy;
pub mod reservation;
pub mod user;
