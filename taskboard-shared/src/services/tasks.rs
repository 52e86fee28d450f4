use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::error::{ServiceError, ServiceResult};
use crate::auth::authorization::{require_owner, Action};
use crate::auth::identity::IdentityClaims;
use crate::models::{NewTask, Task, TaskChanges, TaskStatus};
use crate::store::{AccountStore, TaskStore};

/// Input for creating a task on behalf of an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTask {
    /// Account the task is for (not necessarily the creator)
    pub account_id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

/// Task lifecycle with a creator-only mutation guard
///
/// Reads are open to everyone. Update and delete require the caller's email
/// to match the task's `creator_email`.
#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskStore>,
    accounts: Arc<dyn AccountStore>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskStore>, accounts: Arc<dyn AccountStore>) -> Self {
        Self { tasks, accounts }
    }

    /// Creates a task stamped with the caller as creator
    ///
    /// Fails with [`ServiceError::AccountNotFound`] if the target account does
    /// not exist; nothing is persisted in that case.
    #[instrument(skip(self, identity, input), fields(target = %input.account_id, caller = %identity.email))]
    pub async fn create(&self, identity: &IdentityClaims, input: CreateTask) -> ServiceResult<Task> {
        if input.title.trim().is_empty() {
            return Err(ServiceError::Validation("Title must not be empty".to_string()));
        }

        if self.accounts.get(input.account_id).await?.is_none() {
            warn!("Task creation rejected: target account not found");
            return Err(ServiceError::AccountNotFound(input.account_id));
        }

        let task = self
            .tasks
            .insert(NewTask {
                title: input.title,
                description: input.description,
                status: input.status,
                creator_name: identity.name.clone(),
                creator_email: identity.email.clone(),
                created_at: Utc::now(),
                assigned_account_id: input.account_id,
            })
            .await?;

        info!(task_id = %task.id, "Task created");
        Ok(task)
    }

    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn get(&self, id: Uuid) -> ServiceResult<Task> {
        self.tasks
            .get(id)
            .await?
            .ok_or(ServiceError::TaskNotFound(id))
    }

    pub async fn list(&self) -> ServiceResult<Vec<Task>> {
        Ok(self.tasks.list().await?)
    }

    /// Lists tasks with exactly this status, whoever created them
    pub async fn list_by_status(&self, status: TaskStatus) -> ServiceResult<Vec<Task>> {
        Ok(self.tasks.list_by_status(status).await?)
    }

    /// Overwrites title, description and status; creator only
    #[instrument(skip(self, identity, changes), fields(task_id = %id, caller = %identity.email))]
    pub async fn update(
        &self,
        identity: &IdentityClaims,
        id: Uuid,
        changes: TaskChanges,
    ) -> ServiceResult<Task> {
        if changes.title.trim().is_empty() {
            return Err(ServiceError::Validation("Title must not be empty".to_string()));
        }

        let task = self.get(id).await?;
        require_owner(identity, &task.creator_email, Action::UpdateTask)?;

        let updated = self
            .tasks
            .update(id, changes)
            .await?
            .ok_or(ServiceError::TaskNotFound(id))?;

        info!(status = %updated.status, "Task updated");
        Ok(updated)
    }

    /// Removes a task; creator only
    #[instrument(skip(self, identity), fields(task_id = %id, caller = %identity.email))]
    pub async fn delete(&self, identity: &IdentityClaims, id: Uuid) -> ServiceResult<()> {
        let task = self.get(id).await?;
        require_owner(identity, &task.creator_email, Action::DeleteTask)?;

        if !self.tasks.delete(id).await? {
            return Err(ServiceError::TaskNotFound(id));
        }

        info!("Task deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewAccount;
    use crate::store::memory::InMemoryStore;

    struct Fixture {
        service: TaskService,
        store: InMemoryStore,
        alice: IdentityClaims,
        bob: IdentityClaims,
    }

    async fn register(store: &InMemoryStore, name: &str, email: &str) -> IdentityClaims {
        let account = AccountStore::insert(
            store,
            NewAccount {
                username: name.to_string(),
                email: email.to_string(),
                password_hash: "$argon2id$unused".to_string(),
            },
        )
        .await
        .unwrap();

        IdentityClaims {
            account_id: account.id,
            email: account.email,
            name: account.username,
        }
    }

    async fn fixture() -> Fixture {
        let store = InMemoryStore::new();
        let shared = Arc::new(store.clone());
        let service = TaskService::new(shared.clone(), shared);

        let alice = register(&store, "alice", "a@x.com").await;
        let bob = register(&store, "bob", "b@x.com").await;

        Fixture {
            service,
            store,
            alice,
            bob,
        }
    }

    fn input(account_id: Uuid, title: &str, status: TaskStatus) -> CreateTask {
        CreateTask {
            account_id,
            title: title.to_string(),
            description: "details".to_string(),
            status,
        }
    }

    #[tokio::test]
    async fn test_create_stamps_caller_as_creator() {
        let f = fixture().await;

        // Alice creates a task for Bob
        let task = f
            .service
            .create(&f.alice, input(f.bob.account_id, "T", TaskStatus::Pending))
            .await
            .unwrap();

        assert_eq!(task.creator_email, "a@x.com");
        assert_eq!(task.creator_name, "alice");
        assert_eq!(task.assigned_account_id, Some(f.bob.account_id));
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(f.service.get(task.id).await.unwrap(), task);
    }

    #[tokio::test]
    async fn test_create_for_missing_account_persists_nothing() {
        let f = fixture().await;
        let missing = Uuid::new_v4();

        let err = f
            .service
            .create(&f.alice, input(missing, "T", TaskStatus::Pending))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::AccountNotFound(id) if id == missing));
        assert!(f.service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title() {
        let f = fixture().await;
        let err = f
            .service
            .create(&f.alice, input(f.alice.account_id, "   ", TaskStatus::Pending))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(f.service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_task() {
        let f = fixture().await;
        assert!(matches!(
            f.service.get(Uuid::new_v4()).await,
            Err(ServiceError::TaskNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_by_creator_keeps_identity_fields() {
        let f = fixture().await;
        let task = f
            .service
            .create(&f.alice, input(f.bob.account_id, "T", TaskStatus::Pending))
            .await
            .unwrap();

        let updated = f
            .service
            .update(
                &f.alice,
                task.id,
                TaskChanges {
                    title: "T2".to_string(),
                    description: "new".to_string(),
                    status: TaskStatus::Done,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "T2");
        assert_eq!(updated.description, "new");
        assert_eq!(updated.status, TaskStatus::Done);
        assert_eq!(updated.id, task.id);
        assert_eq!(updated.creator_email, task.creator_email);
        assert_eq!(updated.created_at, task.created_at);
        assert_eq!(updated.assigned_account_id, task.assigned_account_id);
    }

    #[tokio::test]
    async fn test_non_creator_cannot_mutate() {
        let f = fixture().await;

        // Assigned to Bob, but Bob is not the creator
        let task = f
            .service
            .create(&f.alice, input(f.bob.account_id, "T", TaskStatus::Pending))
            .await
            .unwrap();

        let err = f
            .service
            .update(
                &f.bob,
                task.id,
                TaskChanges {
                    title: "hijacked".to_string(),
                    description: String::new(),
                    status: TaskStatus::Done,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::AccessDenied(_)));

        let err = f.service.delete(&f.bob, task.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::AccessDenied(_)));

        assert_eq!(f.service.get(task.id).await.unwrap(), task);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_task() {
        let f = fixture().await;
        let changes = TaskChanges {
            title: "T".to_string(),
            description: String::new(),
            status: TaskStatus::Pending,
        };

        assert!(matches!(
            f.service.update(&f.alice, Uuid::new_v4(), changes).await,
            Err(ServiceError::TaskNotFound(_))
        ));
        assert!(matches!(
            f.service.delete(&f.alice, Uuid::new_v4()).await,
            Err(ServiceError::TaskNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_by_creator() {
        let f = fixture().await;
        let task = f
            .service
            .create(&f.alice, input(f.alice.account_id, "T", TaskStatus::InProgress))
            .await
            .unwrap();

        f.service.delete(&f.alice, task.id).await.unwrap();

        assert!(matches!(
            f.service.get(task.id).await,
            Err(ServiceError::TaskNotFound(_))
        ));
        assert!(TaskStore::list(&f.store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_by_status_ignores_creator() {
        let f = fixture().await;

        let a = f
            .service
            .create(&f.alice, input(f.bob.account_id, "a", TaskStatus::Done))
            .await
            .unwrap();
        f.service
            .create(&f.alice, input(f.bob.account_id, "b", TaskStatus::Pending))
            .await
            .unwrap();
        let c = f
            .service
            .create(&f.bob, input(f.alice.account_id, "c", TaskStatus::Done))
            .await
            .unwrap();
        f.service
            .create(&f.bob, input(f.alice.account_id, "d", TaskStatus::InProgress))
            .await
            .unwrap();

        let mut done: Vec<Uuid> = f
            .service
            .list_by_status(TaskStatus::Done)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        done.sort();

        let mut expected = vec![a.id, c.id];
        expected.sort();

        assert_eq!(done, expected);
        assert_eq!(f.service.list().await.unwrap().len(), 4);
    }
}
