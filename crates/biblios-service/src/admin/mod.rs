//! Library administration: budgets, policies, announcements, users.

pub mod announcement;
pub mod budget;
pub mod policy;
pub mod user;

pub use announcement::AnnouncementService;
pub use budget::BudgetService;
pub use policy::PolicyService;
pub use user::AdminUserService;
