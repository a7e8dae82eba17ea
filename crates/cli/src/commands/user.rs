//! Storefront account commands.
//!
//! The storefront has no sign-up page; accounts are created here.
//!
//! # Usage
//!
//! ```bash
//! livestock-cli user create -e buyer@example.com -p 'correct horse battery'
//! livestock-cli user reset-password -e buyer@example.com -p 'new long password'
//! ```

use livestock_storefront::services::AuthService;

use super::{CommandError, database_url};

/// Create an account with a password.
///
/// # Errors
///
/// Returns an error if the email is invalid or taken, the password is too
/// weak, or the database is unreachable.
pub async fn create(email: &str, password: &str) -> Result<(), CommandError> {
    let pool = livestock_storefront::db::create_pool(&database_url()?).await?;

    let user = AuthService::new(&pool)
        .register_with_password(email, password)
        .await?;

    tracing::info!(user_id = %user.id, email = %user.email, "Account created");
    Ok(())
}

/// Replace an account's password.
///
/// # Errors
///
/// Returns an error if no account has this email, the password is too weak,
/// or the database is unreachable.
pub async fn reset_password(email: &str, password: &str) -> Result<(), CommandError> {
    let pool = livestock_storefront::db::create_pool(&database_url()?).await?;

    AuthService::new(&pool).reset_password(email, password).await?;

    tracing::info!(email = %email, "Password updated");
    Ok(())
}
