use anyhow::Context;
use argon2::{password_hash::{rand_core::OsRng, SaltString}, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use secrecy::{ExposeSecret, SecretString};

use crate::telemetry::spawn_blocking_with_tracing;

// Argon2 is cpu bound, both functions run on the blocking pool
#[tracing::instrument(
    "Computing password hash",
    skip_all
)]
pub async fn compute_password_hash(password: SecretString) -> Result<SecretString, anyhow::Error>{
    spawn_blocking_with_tracing(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.expose_secret().as_bytes(), &salt)
            .map(|hash| SecretString::from(hash.to_string()))
            .map_err(|_| anyhow::anyhow!("Failed to compute password hash"))
    })
    .await
    .context("Failed due to threadpool error")?
}

#[tracing::instrument(
    "Verifying password against stored hash",
    skip_all
)]
pub async fn verify_password(password: SecretString, hashed_password: String) -> Result<bool, anyhow::Error>{
    spawn_blocking_with_tracing(move || {
        let hashed_password = PasswordHash::new(&hashed_password)
            .map_err(|_| anyhow::anyhow!("Failed to parse PasswordHash \
                    from stored hashed password"))?;

        Ok(Argon2::default()
            .verify_password(password.expose_secret().as_bytes(), &hashed_password)
            .is_ok())
    })
    .await
    .context("Failed due to threadpool error")?
}
