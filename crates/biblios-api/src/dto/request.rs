//! Request DTOs with validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username.
    #[validate(length(min = 3, max = 100))]
    pub username: String,
    /// Email.
    #[validate(email)]
    pub email: Option<String>,
    /// Password. The configured minimum length is enforced by the
    /// account service.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Display name.
    pub display_name: Option<String>,
}

/// Create or update an author.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AuthorRequest {
    /// First name.
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    /// Family name.
    #[validate(length(min = 1, max = 100))]
    pub family_name: String,
    /// Date of birth.
    pub date_of_birth: Option<NaiveDate>,
    /// Date of death.
    pub date_of_death: Option<NaiveDate>,
}

/// Partial author update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAuthorRequest {
    /// First name.
    pub first_name: Option<String>,
    /// Family name.
    pub family_name: Option<String>,
    /// Date of birth.
    pub date_of_birth: Option<NaiveDate>,
    /// Date of death.
    pub date_of_death: Option<NaiveDate>,
}

/// Create or rename a genre.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenreRequest {
    /// Genre name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Create a book.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBookRequest {
    /// Title.
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    /// Author ID.
    pub author_id: Uuid,
    /// Genre ID.
    pub genre_id: Uuid,
    /// Summary.
    pub summary: String,
    /// ISBN.
    pub isbn: String,
}

/// Partial book update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBookRequest {
    /// Title.
    pub title: Option<String>,
    /// Author ID.
    pub author_id: Option<Uuid>,
    /// Genre ID.
    pub genre_id: Option<Uuid>,
    /// Summary.
    pub summary: Option<String>,
    /// ISBN.
    pub isbn: Option<String>,
}

/// Register a new copy of a book.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateInstanceRequest {
    /// The book this copy belongs to.
    pub book_id: Uuid,
    /// Imprint (publisher and edition details).
    #[validate(length(min = 1, max = 255))]
    pub imprint: String,
}

/// Partial copy update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateInstanceRequest {
    /// Imprint.
    pub imprint: Option<String>,
    /// Expected availability date.
    pub available_by: Option<NaiveDate>,
}

/// Reserve a copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    /// The copy to reserve.
    pub instance_id: Uuid,
    /// Who the reservation is for; defaults to the requesting user.
    pub user_id: Option<Uuid>,
}

/// Issue a reservation as a loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueRequest {
    /// Loan due date.
    pub due: NaiveDate,
}

/// Record a budget entry.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBudgetRequest {
    /// Entry title.
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    /// Amount in EUR.
    pub amount: f64,
    /// Date the money was spent.
    pub spent_on: NaiveDate,
    /// Free-form note.
    pub note: Option<String>,
}

/// Partial budget update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBudgetRequest {
    /// Entry title.
    pub title: Option<String>,
    /// Amount in EUR.
    pub amount: Option<f64>,
    /// Date the money was spent.
    pub spent_on: Option<NaiveDate>,
    /// Free-form note.
    pub note: Option<String>,
}

/// Create a policy.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePolicyRequest {
    /// Policy property name (unique).
    #[validate(length(min = 1, max = 100))]
    pub property: String,
    /// Policy value.
    pub value: String,
    /// Whether this is a core policy (undeletable).
    #[serde(default)]
    pub is_core: bool,
}

/// Update a policy's value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePolicyRequest {
    /// New value.
    pub value: String,
}

/// Publish an announcement.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAnnouncementRequest {
    /// Title.
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    /// Body text.
    pub body: String,
    /// Publication date.
    pub published_on: NaiveDate,
}

/// Partial announcement update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAnnouncementRequest {
    /// Title.
    pub title: Option<String>,
    /// Body text.
    pub body: Option<String>,
    /// Publication date.
    pub published_on: Option<NaiveDate>,
}

/// Change a user's role (admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRoleRequest {
    /// New role: `"admin"`, `"librarian"`, or `"member"`.
    pub role: String,
}
