/// Ownership guard
///
/// Taskboard has one authorization rule: a resource may only be mutated by the
/// identity that owns it, and ownership is decided by email.
///
/// - A task is owned by its `creator_email`.
/// - An account is owned by itself (its own `email`).
///
/// Both services call [`require_owner`]; everyone else gets read-only access.
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::authorization::{require_owner, Action};
/// use taskboard_shared::auth::identity::IdentityClaims;
/// use uuid::Uuid;
///
/// let caller = IdentityClaims {
///     account_id: Uuid::new_v4(),
///     email: "a@x.com".to_string(),
///     name: "alice".to_string(),
/// };
///
/// assert!(require_owner(&caller, "a@x.com", Action::UpdateTask).is_ok());
/// assert!(require_owner(&caller, "b@x.com", Action::DeleteTask).is_err());
/// ```

use std::fmt;

use super::identity::IdentityClaims;

/// Owner-only operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    UpdateTask,
    DeleteTask,
    DeleteAccount,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Action::UpdateTask => "update tasks created by you",
            Action::DeleteTask => "delete tasks created by you",
            Action::DeleteAccount => "delete your own account",
        };
        f.write_str(text)
    }
}

/// Error type for authorization checks
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthzError {
    /// Caller does not own the resource
    #[error("You can only {0}")]
    NotOwner(Action),
}

/// Fails with [`AuthzError::NotOwner`] unless `identity.email == owner_email`
pub fn require_owner(
    identity: &IdentityClaims,
    owner_email: &str,
    action: Action,
) -> Result<(), AuthzError> {
    if identity.email != owner_email {
        tracing::warn!(
            caller = %identity.email,
            action = ?action,
            "Ownership check failed"
        );
        return Err(AuthzError::NotOwner(action));
    }

    Ok(())
}
