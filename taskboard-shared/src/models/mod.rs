/// Domain models for Taskboard
///
/// # Models
///
/// - `account`: Registered accounts and their outward-facing shape
/// - `task`: Tasks, their status and their outward-facing shape
///
/// Persistence lives in [`crate::store`]; these are plain data types.

pub mod account;
pub mod task;

pub use account::{normalize_email, Account, AccountResponse, NewAccount};
pub use task::{NewTask, Task, TaskChanges, TaskResponse, TaskStatus};
