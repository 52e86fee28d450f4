/// Bearer-token authentication layer
///
/// Wraps the mutating routes. A request without a valid
/// `Authorization: Bearer <token>` header is rejected with 401 before the
/// handler runs; otherwise the caller's [`IdentityClaims`] are inserted into
/// the request extensions for the handler to pick up with
/// `Extension<IdentityClaims>`.
///
/// The token alone is not enough: the account it was issued to must still
/// exist with the same email, so a deleted account's tokens stop working
/// immediately.

use crate::{app::AppState, error::ApiError};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use taskboard_shared::{
    auth::identity::{authenticate_headers, IdentityClaims},
    services::ServiceError,
};

/// Validates the bearer token and attaches the identity to the request
pub async fn require_identity(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity: IdentityClaims = authenticate_headers(req.headers(), state.jwt_secret())
        .map_err(|err| {
            tracing::debug!(error = %err, "Rejected unauthenticated request");
            err
        })?;

    match state.accounts.get(identity.account_id).await {
        Ok(account) if account.email == identity.email => {}
        Ok(_) | Err(ServiceError::AccountNotFound(_)) => {
            tracing::debug!(account_id = %identity.account_id, "Rejected token for unknown account");
            return Err(ApiError::Unauthorized(
                "Token does not belong to an existing account".to_string(),
            ));
        }
        Err(err) => return Err(err.into()),
    }

    tracing::debug!(account_id = %identity.account_id, "Authenticated request");
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
