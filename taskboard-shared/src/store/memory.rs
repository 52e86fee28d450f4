/// In-memory store
///
/// Keeps accounts and tasks in `tokio::sync::RwLock<HashMap>` maps. Used by the
/// test suites and by `STORE_BACKEND=memory` for running the server without a
/// database. Data is lost when the process exits.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AccountStore, Store, StoreError, StoreResult, TaskStore};
use crate::models::{Account, NewAccount, NewTask, Task, TaskChanges, TaskStatus};

/// In-memory implementation of [`Store`]
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
    tasks: Arc<RwLock<HashMap<Uuid, Task>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_tasks<'a>(tasks: impl Iterator<Item = &'a Task>) -> Vec<Task> {
    let mut result: Vec<Task> = tasks.cloned().collect();
    result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    result
}

#[async_trait]
impl AccountStore for InMemoryStore {
    async fn get(&self, id: Uuid) -> StoreResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Account>> {
        let accounts = self.accounts.read().await;
        let mut result: Vec<Account> = accounts.values().cloned().collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(result)
    }

    async fn insert(&self, data: NewAccount) -> StoreResult<Account> {
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|a| a.email == data.email) {
            return Err(StoreError::Conflict(format!(
                "Email already registered: {}",
                data.email
            )));
        }

        let account = Account {
            id: Uuid::new_v4(),
            username: data.username,
            email: data.email,
            password_hash: data.password_hash,
            created_at: Utc::now(),
        };
        accounts.insert(account.id, account.clone());

        tracing::debug!(account_id = %account.id, "Inserted account");
        Ok(account)
    }

    /// Removes the account and clears it from every task assigned to it,
    /// matching the `ON DELETE SET NULL` foreign key of the Postgres schema
    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut accounts = self.accounts.write().await;
        if accounts.remove(&id).is_none() {
            return Ok(false);
        }

        let mut tasks = self.tasks.write().await;
        for task in tasks.values_mut() {
            if task.assigned_account_id == Some(id) {
                task.assigned_account_id = None;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl TaskStore for InMemoryStore {
    async fn get(&self, id: Uuid) -> StoreResult<Option<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.get(&id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Task>> {
        let tasks = self.tasks.read().await;
        Ok(sorted_tasks(tasks.values()))
    }

    async fn list_by_status(&self, status: TaskStatus) -> StoreResult<Vec<Task>> {
        let tasks = self.tasks.read().await;
        Ok(sorted_tasks(tasks.values().filter(|t| t.status == status)))
    }

    async fn list_by_assignee(&self, account_id: Uuid) -> StoreResult<Vec<Task>> {
        let tasks = self.tasks.read().await;
        Ok(sorted_tasks(
            tasks
                .values()
                .filter(|t| t.assigned_account_id == Some(account_id)),
        ))
    }

    async fn insert(&self, data: NewTask) -> StoreResult<Task> {
        let task = Task {
            id: Uuid::new_v4(),
            title: data.title,
            description: data.description,
            status: data.status,
            creator_name: data.creator_name,
            creator_email: data.creator_email,
            created_at: data.created_at,
            assigned_account_id: Some(data.assigned_account_id),
        };

        let mut tasks = self.tasks.write().await;
        tasks.insert(task.id, task.clone());

        tracing::debug!(task_id = %task.id, "Inserted task");
        Ok(task)
    }

    async fn update(&self, id: Uuid, changes: TaskChanges) -> StoreResult<Option<Task>> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks.get_mut(&id).map(|task| {
            task.apply(changes);
            task.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks.remove(&id).is_some())
    }

    async fn unassign_account(&self, account_id: Uuid) -> StoreResult<u64> {
        let mut tasks = self.tasks.write().await;
        let mut touched = 0;
        for task in tasks.values_mut() {
            if task.assigned_account_id == Some(account_id) {
                task.assigned_account_id = None;
                touched += 1;
            }
        }
        Ok(touched)
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
