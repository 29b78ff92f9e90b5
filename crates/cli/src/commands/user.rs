//! User management commands.
//!
//! The HTTP surface has no user endpoints; accounts are provisioned here.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};

use greenbasket_api::db::{self, RepositoryError, users::UserRepository};
use greenbasket_core::Email;

use super::CommandError;

/// Create a new user with an argon2-hashed password.
///
/// # Errors
///
/// Returns an error if the email is invalid, the email is already
/// registered, or a database operation fails.
pub async fn create(email: &str, password: &str) -> Result<(), CommandError> {
    let email = Email::parse(email)?;
    let password_hash = hash_password(password)?;

    let database_url = super::database_url()?;
    let pool = db::create_pool(&database_url).await?;

    let users = UserRepository::new(&pool);
    if users.get_by_email(&email).await?.is_some() {
        return Err(CommandError::UserExists(email.to_string()));
    }

    // A concurrent create can still slip past the pre-check.
    let user = users
        .create(&email, &password_hash)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => CommandError::UserExists(email.to_string()),
            other => CommandError::Repository(other),
        })?;

    tracing::info!(id = %user.id, email = %user.email, "user created");
    Ok(())
}

/// Hash a password with argon2 and a random salt.
fn hash_password(password: &str) -> Result<String, CommandError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| CommandError::PasswordHash)?;
    Ok(hash.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    #[test]
    fn test_hash_password_verifies() {
        let hash = hash_password("correct horse battery staple").unwrap();
        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"correct horse battery staple", &parsed)
                .is_ok()
        );
        assert!(
            Argon2::default()
                .verify_password(b"wrong password", &parsed)
                .is_err()
        );
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();
        assert_ne!(a, b);
    }
}
