/// Account service
///
/// Registration, credential checks, lookups and self-only deletion.
///
/// Nothing returned from this service carries a password hash: accounts leave
/// as [`AccountResponse`] and successful logins as [`IdentityClaims`].

use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::error::{ServiceError, ServiceResult};
use crate::auth::authorization::{require_owner, Action};
use crate::auth::identity::IdentityClaims;
use crate::auth::password::{verify_dummy, verify_password, HashCost};
use crate::models::{normalize_email, AccountResponse, NewAccount, Task};
use crate::store::{AccountStore, TaskStore};

#[derive(Clone)]
pub struct AccountService {
    accounts: Arc<dyn AccountStore>,
    tasks: Arc<dyn TaskStore>,
    hash_cost: HashCost,
}

impl AccountService {
    pub fn new(accounts: Arc<dyn AccountStore>, tasks: Arc<dyn TaskStore>) -> Self {
        Self {
            accounts,
            tasks,
            hash_cost: HashCost::default(),
        }
    }

    /// Overrides the Argon2 cost used for new passwords
    pub fn with_hash_cost(mut self, hash_cost: HashCost) -> Self {
        self.hash_cost = hash_cost;
        self
    }

    /// Registers a new account
    ///
    /// The email is normalized first; a duplicate fails with
    /// [`ServiceError::AlreadyExists`] and leaves the existing account alone.
    #[instrument(skip(self, username, password))]
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ServiceResult<AccountResponse> {
        let username = username.trim();
        let email = normalize_email(email);

        if username.is_empty() {
            return Err(ServiceError::Validation("Username must not be empty".to_string()));
        }
        if email.is_empty() {
            return Err(ServiceError::Validation("Email must not be empty".to_string()));
        }
        if password.is_empty() {
            return Err(ServiceError::Validation("Password must not be empty".to_string()));
        }

        if self.accounts.find_by_email(&email).await?.is_some() {
            warn!("Registration rejected: email already registered");
            return Err(ServiceError::AlreadyExists(format!(
                "Email already registered: {}",
                email
            )));
        }

        let password_hash = self.hash_cost.hash(password)?;

        // The store enforces uniqueness too, so a concurrent duplicate still
        // comes back as AlreadyExists
        let account = self
            .accounts
            .insert(NewAccount {
                username: username.to_string(),
                email,
                password_hash,
            })
            .await?;

        info!(account_id = %account.id, "Account registered");
        Ok(account.into())
    }

    /// Checks an email/password pair and returns the matching identity
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> ServiceResult<IdentityClaims> {
        let email = normalize_email(email);

        let Some(account) = self.accounts.find_by_email(&email).await? else {
            verify_dummy(password);
            warn!("Login failed: unknown email");
            return Err(ServiceError::InvalidCredentials);
        };

        if !verify_password(password, &account.password_hash)? {
            warn!(account_id = %account.id, "Login failed: wrong password");
            return Err(ServiceError::InvalidCredentials);
        }

        info!(account_id = %account.id, "Login succeeded");
        Ok(IdentityClaims {
            account_id: account.id,
            email: account.email,
            name: account.username,
        })
    }

    #[instrument(skip(self), fields(account_id = %id))]
    pub async fn get(&self, id: Uuid) -> ServiceResult<AccountResponse> {
        self.accounts
            .get(id)
            .await?
            .map(AccountResponse::from)
            .ok_or(ServiceError::AccountNotFound(id))
    }

    /// Lists every account; visible to everyone
    pub async fn list(&self) -> ServiceResult<Vec<AccountResponse>> {
        let accounts = self.accounts.list().await?;
        Ok(accounts.into_iter().map(AccountResponse::from).collect())
    }

    /// Deletes an account; only the account itself may do this
    ///
    /// Tasks assigned to the account are kept and become unassigned. Tasks it
    /// created keep their creator fields unchanged.
    #[instrument(skip(self, identity), fields(account_id = %id, caller = %identity.email))]
    pub async fn delete(&self, identity: &IdentityClaims, id: Uuid) -> ServiceResult<()> {
        let account = self
            .accounts
            .get(id)
            .await?
            .ok_or(ServiceError::AccountNotFound(id))?;

        require_owner(identity, &account.email, Action::DeleteAccount)?;

        let unassigned = self.tasks.unassign_account(id).await?;

        if !self.accounts.delete(id).await? {
            return Err(ServiceError::AccountNotFound(id));
        }

        info!(unassigned_tasks = unassigned, "Account deleted");
        Ok(())
    }

    /// Lists the tasks assigned to an account
    #[instrument(skip(self), fields(account_id = %id))]
    pub async fn tasks_for(&self, id: Uuid) -> ServiceResult<Vec<Task>> {
        if self.accounts.get(id).await?.is_none() {
            return Err(ServiceError::AccountNotFound(id));
        }

        Ok(self.tasks.list_by_assignee(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewTask, TaskStatus};
    use crate::store::memory::InMemoryStore;
    use chrono::Utc;

    fn cheap_cost() -> HashCost {
        HashCost {
            memory_kib: 8192,
            iterations: 1,
            lanes: 1,
        }
    }

    fn setup() -> (AccountService, InMemoryStore) {
        let store = InMemoryStore::new();
        let shared = Arc::new(store.clone());
        let service = AccountService::new(shared.clone(), shared).with_hash_cost(cheap_cost());
        (service, store)
    }

    async fn insert_task(store: &InMemoryStore, assignee: Uuid, creator_email: &str) -> Task {
        TaskStore::insert(
            store,
            NewTask {
                title: "T".to_string(),
                description: String::new(),
                status: TaskStatus::Pending,
                creator_name: "someone".to_string(),
                creator_email: creator_email.to_string(),
                created_at: Utc::now(),
                assigned_account_id: assignee,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_register_returns_account_without_hash() {
        let (service, store) = setup();

        let account = service.register("alice", "a@x.com", "pw").await.unwrap();
        assert_eq!(account.username, "alice");
        assert_eq!(account.email, "a@x.com");

        let stored = AccountStore::get(&store, account.id).await.unwrap().unwrap();
        assert!(stored.password_hash.starts_with("$argon2id$"));
        assert_ne!(stored.password_hash, "pw");
    }

    #[tokio::test]
    async fn test_register_duplicate_email_fails() {
        let (service, _) = setup();

        let first = service.register("alice", "a@x.com", "pw").await.unwrap();
        let err = service.register("mallory", "A@X.com ", "other").await.unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyExists(_)));

        let still = service.get(first.id).await.unwrap();
        assert_eq!(still.email, "a@x.com");
        assert_eq!(still.username, "alice");
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_register_rejects_blank_fields() {
        let (service, _) = setup();

        assert!(matches!(
            service.register("  ", "a@x.com", "pw").await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            service.register("alice", "", "pw").await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            service.register("alice", "a@x.com", "").await,
            Err(ServiceError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_authenticate() {
        let (service, _) = setup();
        let account = service.register("alice", "a@x.com", "pw").await.unwrap();

        let identity = service.authenticate("A@x.com", "pw").await.unwrap();
        assert_eq!(identity.account_id, account.id);
        assert_eq!(identity.email, "a@x.com");
        assert_eq!(identity.name, "alice");
    }

    #[tokio::test]
    async fn test_authenticate_failures_are_indistinguishable() {
        let (service, _) = setup();
        service.register("alice", "a@x.com", "pw").await.unwrap();

        let wrong_password = service.authenticate("a@x.com", "nope").await.unwrap_err();
        let unknown_email = service.authenticate("b@x.com", "pw").await.unwrap_err();

        assert!(matches!(wrong_password, ServiceError::InvalidCredentials));
        assert!(matches!(unknown_email, ServiceError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_get_missing_account() {
        let (service, _) = setup();
        let id = Uuid::new_v4();
        assert!(matches!(
            service.get(id).await,
            Err(ServiceError::AccountNotFound(missing)) if missing == id
        ));
    }

    #[tokio::test]
    async fn test_delete_self_only() {
        let (service, _) = setup();
        let alice = service.register("alice", "a@x.com", "pw").await.unwrap();
        service.register("bob", "b@x.com", "pw").await.unwrap();

        let bob = service.authenticate("b@x.com", "pw").await.unwrap();
        let err = service.delete(&bob, alice.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::AccessDenied(_)));
        assert!(service.get(alice.id).await.is_ok());

        let alice_identity = service.authenticate("a@x.com", "pw").await.unwrap();
        service.delete(&alice_identity, alice.id).await.unwrap();
        assert!(matches!(
            service.get(alice.id).await,
            Err(ServiceError::AccountNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_account() {
        let (service, _) = setup();
        service.register("alice", "a@x.com", "pw").await.unwrap();
        let alice = service.authenticate("a@x.com", "pw").await.unwrap();

        assert!(matches!(
            service.delete(&alice, Uuid::new_v4()).await,
            Err(ServiceError::AccountNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_keeps_tasks_and_unassigns_them() {
        let (service, store) = setup();
        let alice = service.register("alice", "a@x.com", "pw").await.unwrap();
        let bob = service.register("bob", "b@x.com", "pw").await.unwrap();

        let assigned_to_alice = insert_task(&store, alice.id, "b@x.com").await;
        let created_by_alice = insert_task(&store, bob.id, "a@x.com").await;

        let identity = service.authenticate("a@x.com", "pw").await.unwrap();
        service.delete(&identity, alice.id).await.unwrap();

        let remaining = TaskStore::list(&store).await.unwrap();
        assert_eq!(remaining.len(), 2);

        let orphan = TaskStore::get(&store, assigned_to_alice.id).await.unwrap().unwrap();
        assert_eq!(orphan.assigned_account_id, None);
        assert_eq!(orphan.creator_email, "b@x.com");

        let authored = TaskStore::get(&store, created_by_alice.id).await.unwrap().unwrap();
        assert_eq!(authored.creator_email, "a@x.com");
        assert_eq!(authored.assigned_account_id, Some(bob.id));
    }

    #[tokio::test]
    async fn test_tasks_for() {
        let (service, store) = setup();
        let alice = service.register("alice", "a@x.com", "pw").await.unwrap();
        let bob = service.register("bob", "b@x.com", "pw").await.unwrap();

        insert_task(&store, alice.id, "b@x.com").await;
        insert_task(&store, alice.id, "a@x.com").await;
        insert_task(&store, bob.id, "a@x.com").await;

        assert_eq!(service.tasks_for(alice.id).await.unwrap().len(), 2);
        assert_eq!(service.tasks_for(bob.id).await.unwrap().len(), 1);
        assert!(matches!(
            service.tasks_for(Uuid::new_v4()).await,
            Err(ServiceError::AccountNotFound(_))
        ));
    }
}
