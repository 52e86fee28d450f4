/// Database layer for Taskboard
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool with a startup health check
/// - `migrations`: Schema migration runner
///
/// Queries themselves live in [`crate::store::postgres`].

pub mod migrations;
pub mod pool;
