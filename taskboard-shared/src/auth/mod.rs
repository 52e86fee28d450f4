/// Authentication and authorization
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: HS256 token issuance and validation
/// - [`identity`]: The authenticated caller and bearer-token extraction
/// - [`authorization`]: The shared ownership guard
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::password::{hash_password, verify_password};
/// use taskboard_shared::auth::jwt::{create_token, validate_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("pw")?;
/// assert!(verify_password("pw", &hash)?);
///
/// let claims = Claims::new(Uuid::new_v4(), "a@x.com", "alice");
/// let token = create_token(&claims, "a-secret-of-at-least-thirty-two-bytes")?;
/// assert_eq!(validate_token(&token, "a-secret-of-at-least-thirty-two-bytes")?.email, "a@x.com");
/// # Ok(())
/// # }
/// ```

pub mod authorization;
pub mod identity;
pub mod jwt;
pub mod password;
