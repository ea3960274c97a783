//! Identity and session persistence.
//!
//! A [`SessionStore`] is created once at startup and shared through `Rc` with
//! every component that needs to know who is signed in. Nothing about the
//! current user lives in global state.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use uuid::Uuid;

use quill_model::{User, UserId};
use quill_persistence::{PersistenceError, Storage, load_json, save_json};
use quill_validate::{LoginForm, RegisterForm, validate_login, validate_register};

use crate::error::{SessionError, SessionResult};

/// Storage key of the active session.
pub const SESSION_KEY: &str = "session";

/// Storage key of registered accounts.
pub const ACCOUNTS_KEY: &str = "accounts";

pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "demo123";
const DEMO_USER_ID: &str = "1";
const DEMO_NAME: &str = "Demo User";

/// A signed-in user and the token issued at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: User,
    pub token: String,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Account {
    user: User,
    password_digest: String,
}

fn digest_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn demo_user() -> SessionResult<User> {
    Ok(User {
        id: UserId::new(DEMO_USER_ID)?,
        email: DEMO_EMAIL.to_string(),
        name: DEMO_NAME.to_string(),
    })
}

/// Owns the current identity and its durable copy.
pub struct SessionStore {
    storage: Rc<dyn Storage>,
    current: RefCell<Option<Session>>,
}

impl SessionStore {
    /// Create a signed-out store. Call [`restore`](Self::restore) to pick up
    /// a session saved by an earlier run.
    pub fn new(storage: Rc<dyn Storage>) -> Self {
        Self {
            storage,
            current: RefCell::new(None),
        }
    }

    /// Re-hydrate the identity saved by an earlier run.
    ///
    /// A saved session that cannot be decoded is removed and treated as
    /// signed out.
    pub fn restore(&self) -> SessionResult<Option<User>> {
        let restored = match load_json::<Session, _>(self.storage.as_ref(), SESSION_KEY) {
            Ok(session) => session,
            Err(err @ PersistenceError::Deserialization { .. }) => {
                warn!(error = %err, "Discarding unreadable session");
                self.storage.remove(SESSION_KEY)?;
                None
            }
            Err(err) => return Err(err.into()),
        };

        let user = restored.as_ref().map(|s| s.user.clone());
        if let Some(user) = &user {
            info!(user_id = %user.id, "Restored session");
        }
        *self.current.borrow_mut() = restored;
        Ok(user)
    }

    pub fn login(&self, form: &LoginForm) -> SessionResult<User> {
        let errors = validate_login(form);
        if !errors.is_empty() {
            return Err(SessionError::InvalidForm(errors));
        }

        let email = normalize_email(&form.email);
        let user = if email == DEMO_EMAIL && form.password == DEMO_PASSWORD {
            demo_user()?
        } else {
            let digest = digest_password(&form.password);
            self.load_accounts()?
                .into_iter()
                .find(|a| normalize_email(&a.user.email) == email && a.password_digest == digest)
                .map(|a| a.user)
                .ok_or(SessionError::InvalidCredentials)?
        };

        self.start(user)
    }

    /// Create an account and sign it in.
    pub fn register(&self, form: &RegisterForm) -> SessionResult<User> {
        let errors = validate_register(form);
        if !errors.is_empty() {
            return Err(SessionError::InvalidForm(errors));
        }

        let email = normalize_email(&form.email);
        let mut accounts = self.load_accounts()?;
        if email == DEMO_EMAIL || accounts.iter().any(|a| normalize_email(&a.user.email) == email)
        {
            return Err(SessionError::EmailTaken(email));
        }

        let user = User {
            id: UserId::new(Uuid::new_v4().to_string())?,
            email,
            name: form.name.trim().to_string(),
        };
        accounts.push(Account {
            user: user.clone(),
            password_digest: digest_password(&form.password),
        });
        save_json(self.storage.as_ref(), ACCOUNTS_KEY, &accounts)?;
        info!(user_id = %user.id, "Registered account");

        self.start(user)
    }

    /// Forget the current identity, here and in storage.
    pub fn logout(&self) -> SessionResult<()> {
        self.storage.remove(SESSION_KEY)?;
        if let Some(session) = self.current.borrow_mut().take() {
            info!(user_id = %session.user.id, "Signed out");
        }
        Ok(())
    }

    pub fn current(&self) -> Option<User> {
        self.current.borrow().as_ref().map(|s| s.user.clone())
    }

    pub fn session(&self) -> Option<Session> {
        self.current.borrow().clone()
    }

    pub fn current_user_id(&self) -> Option<UserId> {
        self.current.borrow().as_ref().map(|s| s.user.id.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.borrow().is_some()
    }

    fn start(&self, user: User) -> SessionResult<User> {
        let session = Session {
            user: user.clone(),
            token: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
        };
        save_json(self.storage.as_ref(), SESSION_KEY, &session)?;
        info!(user_id = %user.id, "Signed in");
        *self.current.borrow_mut() = Some(session);
        Ok(user)
    }

    fn load_accounts(&self) -> SessionResult<Vec<Account>> {
        Ok(load_json(self.storage.as_ref(), ACCOUNTS_KEY)?.unwrap_or_default())
    }
}
