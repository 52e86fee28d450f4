/// API route handlers
///
/// Handlers are organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Registration and login
/// - `accounts`: Account lookup and deletion
/// - `tasks`: Task lifecycle

pub mod accounts;
pub mod auth;
pub mod health;
pub mod tasks;
