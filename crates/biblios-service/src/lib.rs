//! # biblios-service
//!
//! Business logic service layer for Biblios. Each service orchestrates
//! repositories and authentication primitives to implement application-level
//! use cases: account handling, catalog management, circulation, and library
//! administration.
//!
//! Services follow constructor injection; all dependencies are provided
//! at construction time via `Arc` references.

pub mod account;
pub mod admin;
pub mod catalog;
pub mod circulation;
pub mod context;

pub use account::AccountService;
pub use admin::{AdminUserService, AnnouncementService, BudgetService, PolicyService};
pub use catalog::{AuthorService, BookService, GenreService};
pub use circulation::{InstanceService, ReservationService};
pub use context::RequestContext;
