//! Request-side helpers shared by the HTTP handlers

pub mod auth;

pub use auth::PasswordUtils;
