/// Storage interface for accounts and tasks
///
/// Services never talk to a database directly; they go through these traits.
/// Two backends are provided:
///
/// - [`postgres::PgStore`]: PostgreSQL via sqlx (production)
/// - [`memory::InMemoryStore`]: `RwLock<HashMap>` maps (tests, local runs)
///
/// Each method is a single atomic operation against the backend. Nothing here
/// locks across calls, so two concurrent read-then-write sequences on the
/// same task both succeed and the last write wins.
///
/// # Example
///
/// ```
/// use taskboard_shared::store::{memory::InMemoryStore, AccountStore};
/// use taskboard_shared::models::NewAccount;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = InMemoryStore::new();
/// let account = store
///     .insert(NewAccount {
///         username: "alice".to_string(),
///         email: "a@x.com".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///     })
///     .await?;
///
/// assert!(store.find_by_email("a@x.com").await?.is_some());
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Account, NewAccount, NewTask, Task, TaskChanges, TaskStatus};

pub mod memory;
pub mod postgres;

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique key is already taken (e.g. duplicate email)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Underlying database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Backend could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Storage result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Persisted accounts
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Gets an account by ID
    async fn get(&self, id: Uuid) -> StoreResult<Option<Account>>;

    /// Finds an account by its (normalized) email
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Account>>;

    /// Lists every account, oldest first
    async fn list(&self) -> StoreResult<Vec<Account>>;

    /// Persists a new account
    ///
    /// Returns [`StoreError::Conflict`] if the email is already registered.
    async fn insert(&self, account: NewAccount) -> StoreResult<Account>;

    /// Deletes an account, returning whether it existed
    ///
    /// Tasks assigned to the account stay, with no assignee.
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;
}

/// Persisted tasks
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Gets a task by ID
    async fn get(&self, id: Uuid) -> StoreResult<Option<Task>>;

    /// Lists every task, oldest first
    async fn list(&self) -> StoreResult<Vec<Task>>;

    /// Lists tasks whose status is exactly `status`
    async fn list_by_status(&self, status: TaskStatus) -> StoreResult<Vec<Task>>;

    /// Lists tasks assigned to an account
    async fn list_by_assignee(&self, account_id: Uuid) -> StoreResult<Vec<Task>>;

    /// Persists a new task
    async fn insert(&self, task: NewTask) -> StoreResult<Task>;

    /// Overwrites title, description and status of a task
    ///
    /// Returns `None` if the task does not exist.
    async fn update(&self, id: Uuid, changes: TaskChanges) -> StoreResult<Option<Task>>;

    /// Deletes a task, returning whether it existed
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;

    /// Clears the assignment of every task assigned to `account_id`
    ///
    /// Returns the number of tasks touched.
    async fn unassign_account(&self, account_id: Uuid) -> StoreResult<u64>;
}

/// A complete backend: both stores plus a connectivity check
#[async_trait]
pub trait Store: AccountStore + TaskStore {
    /// Verifies the backend is reachable
    async fn ping(&self) -> StoreResult<()>;
}
