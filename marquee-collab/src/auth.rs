use argon2::{
    password_hash::{Encoding, SaltString},
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
};
use chrono::Utc;
use log::{info, warn};
use rand::rngs::OsRng;
use std::{sync::Arc, time::Duration};
use thiserror::Error;
use tokio::task;

use crate::{Account, AccountId, FormValue, Storage, StorageError, StorageExt, User};

/// Manages local accounts and the single active session
pub struct Auth<S> {
    storage: Arc<S>,
    argon: Argon2<'static>,
    config: AuthConfig,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Minimum length of a trimmed username
    pub min_username_length: usize,
    pub min_password_length: usize,
    /// Awaited before signing up or in, to imitate a round trip to a server
    pub simulated_latency: Duration,
    /// Cost parameters of the password hash
    pub hash_params: Params,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Username and password are required")]
    MissingCredentials,
    #[error("Username and password must be valid strings")]
    InvalidType,
    #[error("Username must be at least {0} characters long")]
    UsernameTooShort(usize),
    #[error("Password must be at least {0} characters long")]
    PasswordTooShort(usize),
    #[error("Username already exists")]
    UsernameTaken,
    /// Username or password is incorrect
    #[error("Invalid username or password")]
    InvalidCredentials,
    /// The storage refused to save the change
    #[error("Failed to save user data: {0}")]
    PersistenceFailure(StorageError),
    #[error("HashError: {0}")]
    HashError(String),
}

impl<S> Auth<S>
where
    S: Storage,
{
    pub const USERS_KEY: &'static str = "marquee_users";
    pub const CURRENT_USER_KEY: &'static str = "marquee_current_user";

    pub fn new(storage: &Arc<S>) -> Self {
        Self::with_config(storage, AuthConfig::default())
    }

    pub fn with_config(storage: &Arc<S>, config: AuthConfig) -> Self {
        let argon = Argon2::new(
            Algorithm::Argon2id,
            Version::V0x13,
            config.hash_params.clone(),
        );

        Self {
            storage: storage.clone(),
            argon,
            config,
        }
    }

    /// Returns true if `username` is non-empty text and no account has it, ignoring case.
    /// If the registry can't be read, no username is available.
    pub fn is_username_available(&self, username: impl Into<FormValue>) -> bool {
        match username.into() {
            FormValue::Text(username) if !username.is_empty() => self
                .accounts()
                .map_or(false, |accounts| !is_taken(&accounts, &username)),
            _ => false,
        }
    }

    /// Registers a new account without signing in.
    ///
    /// Availability is checked before the password is hashed and the account written,
    /// with no lock in between. Concurrent sign ups for the same username must be
    /// serialized by the caller, otherwise both may succeed.
    pub async fn sign_up(
        &self,
        username: impl Into<FormValue>,
        password: impl Into<FormValue>,
    ) -> Result<User, AuthError> {
        self.simulate_latency().await;

        let (username, password) = text_credentials(username.into(), password.into())?;
        let username = username.trim();

        if username.chars().count() < self.config.min_username_length {
            return Err(AuthError::UsernameTooShort(
                self.config.min_username_length,
            ));
        }

        if password.chars().count() < self.config.min_password_length {
            return Err(AuthError::PasswordTooShort(
                self.config.min_password_length,
            ));
        }

        if is_taken(&self.accounts()?, username) {
            return Err(AuthError::UsernameTaken);
        }

        let password_hash = hash_password(&self.argon, password).await?;

        let account = Account {
            id: AccountId::generate(),
            username: username.to_string(),
            password_hash,
            created_at: Utc::now(),
        };

        let mut accounts = self.accounts()?;
        accounts.push(account.clone());

        self.storage
            .set_json(Self::USERS_KEY, &accounts)
            .map_err(AuthError::PersistenceFailure)?;

        info!("Created account #{} ({})", account.id, account.username);

        Ok(account.user())
    }

    /// Signs in, replacing any previous session
    pub async fn sign_in(
        &self,
        username: impl Into<FormValue>,
        password: impl Into<FormValue>,
    ) -> Result<User, AuthError> {
        self.simulate_latency().await;

        let (username, password) = text_credentials(username.into(), password.into())?;
        let username = username.trim();

        let candidates: Vec<_> = self
            .accounts()?
            .into_iter()
            .filter(|a| a.is_named(username))
            .collect();

        for account in candidates {
            if !verify_password(&self.argon, &account.password_hash, &password).await? {
                continue;
            }

            let user = account.user();

            self.storage
                .set_json(Self::CURRENT_USER_KEY, &user)
                .map_err(AuthError::PersistenceFailure)?;

            info!("Signed in as #{} ({})", user.id, user.username);

            return Ok(user);
        }

        Err(AuthError::InvalidCredentials)
    }

    /// Returns the signed in user, if any.
    /// A corrupt session is removed and treated as no session.
    pub fn current_user(&self) -> Option<User> {
        match self.storage.get_json::<User>(Self::CURRENT_USER_KEY) {
            Ok(user) => user,
            Err(StorageError::Corrupt { reason, .. }) => {
                warn!("Discarding corrupt session: {}", reason);

                if let Err(e) = self.storage.remove(Self::CURRENT_USER_KEY) {
                    warn!("Could not remove corrupt session: {}", e);
                }

                None
            }
            Err(e) => {
                warn!("Could not read session: {}", e);
                None
            }
        }
    }

    /// Clears the session, if there is one
    pub fn sign_out(&self) -> Result<(), AuthError> {
        self.storage
            .remove(Self::CURRENT_USER_KEY)
            .map_err(AuthError::PersistenceFailure)?;

        info!("Signed out");
        Ok(())
    }

    /// Returns every registered account. A corrupt registry counts as empty,
    /// any other read failure is reported.
    fn accounts(&self) -> Result<Vec<Account>, AuthError> {
        match self.storage.get_json::<Vec<Account>>(Self::USERS_KEY) {
            Ok(accounts) => Ok(accounts.unwrap_or_default()),
            Err(StorageError::Corrupt { reason, .. }) => {
                warn!("Ignoring corrupt account registry: {}", reason);
                Ok(vec![])
            }
            Err(e) => Err(AuthError::PersistenceFailure(e)),
        }
    }

    async fn simulate_latency(&self) {
        if !self.config.simulated_latency.is_zero() {
            tokio::time::sleep(self.config.simulated_latency).await;
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            min_username_length: 3,
            min_password_length: 6,
            simulated_latency: Duration::ZERO,
            hash_params: Params::default(),
        }
    }
}

fn is_taken(accounts: &[Account], username: &str) -> bool {
    accounts.iter().any(|a| a.is_named(username))
}

/// Checks that both fields are present, then that both are text
fn text_credentials(
    username: FormValue,
    password: FormValue,
) -> Result<(String, String), AuthError> {
    if username.is_missing() || password.is_missing() {
        return Err(AuthError::MissingCredentials);
    }

    match (username, password) {
        (FormValue::Text(username), FormValue::Text(password)) => Ok((username, password)),
        _ => Err(AuthError::InvalidType),
    }
}

// Hashing is deliberately slow, so it runs off the async threads
async fn hash_password(argon: &Argon2<'static>, password: String) -> Result<String, AuthError> {
    let argon = argon.clone();

    task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);

        argon
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::HashError(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::HashError(e.to_string()))?
}

async fn verify_password(
    argon: &Argon2<'static>,
    hash: &str,
    password: &str,
) -> Result<bool, AuthError> {
    let argon = argon.clone();
    let hash = hash.to_string();
    let password = password.to_string();

    task::spawn_blocking(move || match PasswordHash::parse(&hash, Encoding::default()) {
        Ok(stored) => argon.verify_password(password.as_bytes(), &stored).is_ok(),
        Err(e) => {
            warn!("Stored password hash is unreadable: {}", e);
            false
        }
    })
    .await
    .map_err(|e| AuthError::HashError(e.to_string()))
}
