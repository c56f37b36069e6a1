//! Account list (`users`) and the `currentUser` session marker.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use validator::Validate;

use crate::error::AppError;
use crate::models::{SessionMarker, SignUpRequest, UserAccount};
use crate::storage::{load_json, save_json, KeyValueStore, CURRENT_USER_KEY, USERS_KEY};

/// Hash a password using Argon2id, returning the PHC string.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Argon2 is CPU-bound, so both helpers run on the blocking pool.
async fn hash_password_blocking(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password)).await?
}

async fn verify_password_blocking(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await?
}

pub struct AccountStore {
    store: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl AccountStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Reads the account list. An unreadable list counts as empty.
    pub async fn accounts(&self) -> Result<Vec<UserAccount>, AppError> {
        match load_json::<Vec<UserAccount>>(self.store.as_ref(), USERS_KEY).await {
            Ok(users) => Ok(users.unwrap_or_default()),
            Err(AppError::Validation(reason)) => {
                warn!("Stored account list is unreadable, treating as empty: {}", reason);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Registers a new account.
    ///
    /// Password confirmation is checked before storage is read, then the
    /// fields are validated, then the email is checked for uniqueness.
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<UserAccount, AppError> {
        if request.password != request.confirm_password {
            return Err(AppError::PasswordMismatch);
        }
        request.validate()?;

        let _guard = self.write_lock.lock().await;
        let mut users = self.accounts().await?;

        if users.iter().any(|u| u.email == request.email) {
            return Err(AppError::DuplicateEmail);
        }

        let account = UserAccount {
            email: request.email,
            phone: request.phone,
            password_hash: hash_password_blocking(request.password).await?,
        };
        users.push(account.clone());
        save_json(self.store.as_ref(), USERS_KEY, &users).await?;

        info!(email = %account.email, "Account created");
        Ok(account)
    }

    /// Checks credentials and marks the account as the current user.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserAccount, AppError> {
        let users = self.accounts().await?;
        let account = users
            .into_iter()
            .find(|u| u.email == email)
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password_blocking(password.to_string(), account.password_hash.clone()).await? {
            return Err(AppError::InvalidCredentials);
        }

        let marker = SessionMarker {
            email: account.email.clone(),
        };
        save_json(self.store.as_ref(), CURRENT_USER_KEY, &marker).await?;

        info!(email = %account.email, "Logged in");
        Ok(account)
    }

    pub async fn logout(&self) -> Result<(), AppError> {
        self.store.remove(CURRENT_USER_KEY).await
    }

    /// Resolves the `currentUser` marker, if any.
    pub async fn current_user(&self) -> Result<Option<SessionMarker>, AppError> {
        match load_json::<SessionMarker>(self.store.as_ref(), CURRENT_USER_KEY).await {
            Ok(marker) => Ok(marker),
            Err(AppError::Validation(reason)) => {
                warn!("Session marker is unreadable, treating as logged out: {}", reason);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
