/// Middleware for the API server
///
/// - `auth`: Bearer-token authentication for mutating routes

pub mod auth;
