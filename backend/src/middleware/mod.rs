//! Request middleware

pub mod auth;

pub use auth::{auth_middleware, ensure_active, AuthUser, CurrentUser};
