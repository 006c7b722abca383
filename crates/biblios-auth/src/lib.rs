//! # biblios-auth
//!
//! Authentication primitives for Biblios: Argon2id password hashing,
//! signed session tokens (JWT), and the httpOnly session cookie they
//! travel in.

pub mod cookie;
pub mod password;
pub mod token;

pub use password::PasswordHasher;
pub use token::{SessionClaims, TokenCodec};
