//! Book instance entity: one physical lending copy of a catalog book.

pub mod model;
pub mod status;

pub use model::{BookInstance, CreateBookInstance, UpdateBookInstance};
pub use status::InstanceStatus;
