/// Business logic for accounts and tasks
///
/// Services sit between the HTTP layer and the store. The caller's identity is
/// always an explicit [`IdentityClaims`](crate::auth::identity::IdentityClaims)
/// argument, and every ownership decision goes through
/// [`require_owner`](crate::auth::authorization::require_owner).
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use taskboard_shared::models::TaskStatus;
/// use taskboard_shared::services::{AccountService, CreateTask, TaskService};
/// use taskboard_shared::store::memory::InMemoryStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Arc::new(InMemoryStore::new());
/// let accounts = AccountService::new(store.clone(), store.clone());
/// let tasks = TaskService::new(store.clone(), store);
///
/// let alice = accounts.register("alice", "a@x.com", "pw").await?;
/// let identity = accounts.authenticate("a@x.com", "pw").await?;
///
/// let task = tasks
///     .create(
///         &identity,
///         CreateTask {
///             account_id: alice.id,
///             title: "T".to_string(),
///             description: String::new(),
///             status: TaskStatus::Pending,
///         },
///     )
///     .await?;
/// assert_eq!(task.creator_email, "a@x.com");
/// # Ok(())
/// # }
/// ```

pub mod accounts;
pub mod error;
pub mod tasks;

pub use accounts::AccountService;
pub use error::{ServiceError, ServiceResult};
pub use tasks::{CreateTask, TaskService};
