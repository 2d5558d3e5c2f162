//! Session controller: single owner of the authenticated session.
//!
//! Every read and write of the token and user snapshot goes through one
//! [`SessionController`]. It keeps the session in memory behind a mutex,
//! mirrors it to a [`KeyValueStore`], and bumps a version counter on every
//! change so callers can tell whether the session moved under them.
//!
//! Token and user are always written and cleared in one backend batch, and
//! the in-memory copy is only replaced after the backend accepted the write.
//! A failed persist therefore leaves both copies untouched.
//!
//! Read-modify-write updates (the profile merge) run entirely under the lock;
//! no lock is held across a network call.

use crate::domain::error::{JobBoardError, Result};
use crate::domain::session::{ProfilePatch, Session, SessionUser};
use crate::storage::{KeyValueStore, TOKEN_KEY, USER_KEY};
use std::sync::{Mutex, MutexGuard};

/// Point-in-time copy of the session with the version it was read at.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub version: u64,
    pub session: Session,
}

struct Inner {
    store: Box<dyn KeyValueStore>,
    session: Session,
    version: u64,
}

/// Owner of the session token and user snapshot.
///
/// Shared across actions and views via `Arc<SessionController>`.
///
/// # Examples
///
/// ```
/// use jobboard::domain::SessionUser;
/// use jobboard::session::SessionController;
/// use jobboard::storage::MemoryStore;
///
/// let controller = SessionController::open(Box::new(MemoryStore::new()))?;
/// assert!(controller.token().is_none());
///
/// controller.sign_in("tok".to_string(), SessionUser::new("u1", "Ada", "user"))?;
/// assert_eq!(controller.token().as_deref(), Some("tok"));
/// assert_eq!(controller.version(), 1);
/// # Ok::<(), jobboard::JobBoardError>(())
/// ```
pub struct SessionController {
    inner: Mutex<Inner>,
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("SessionController")
            .field("version", &snapshot.version)
            .field("authenticated", &snapshot.session.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl SessionController {
    /// Loads any persisted session from `store`.
    ///
    /// Entries that fail to decode are logged and ignored, leaving the
    /// session signed out; a half-present pair (token without user or the
    /// reverse) is treated the same way.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn open(store: Box<dyn KeyValueStore>) -> Result<Self> {
        let token = decode_entry::<String>(store.get(TOKEN_KEY)?, TOKEN_KEY);
        let user = decode_entry::<SessionUser>(store.get(USER_KEY)?, USER_KEY);

        let session = match (token, user) {
            (Some(token), Some(user)) => {
                tracing::debug!(user_id = %user.id, "restored persisted session");
                Session {
                    token: Some(token),
                    user: Some(user),
                }
            }
            (None, None) => Session::default(),
            (token, user) => {
                tracing::warn!(
                    has_token = token.is_some(),
                    has_user = user.is_some(),
                    "ignoring incomplete persisted session"
                );
                Session::default()
            }
        };

        Ok(Self {
            inner: Mutex::new(Inner {
                store,
                session,
                version: 0,
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // The guarded data is only replaced after a successful persist, so a
        // poisoned lock still holds a consistent session.
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let inner = self.lock();
        SessionSnapshot {
            version: inner.version,
            session: inner.session.clone(),
        }
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.lock().version
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.lock().session.token.clone()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<SessionUser> {
        self.lock().session.user.clone()
    }

    /// Stores token and user together.
    ///
    /// # Errors
    ///
    /// Returns a storage error if either value cannot be encoded or the
    /// backend rejects the batch; the session is unchanged in that case.
    pub fn sign_in(&self, token: String, user: SessionUser) -> Result<u64> {
        let encoded_token = encode_entry(&token)?;
        let encoded_user = encode_entry(&user)?;

        let mut inner = self.lock();
        inner
            .store
            .set_many(&[(TOKEN_KEY, encoded_token), (USER_KEY, encoded_user)])?;

        tracing::debug!(user_id = %user.id, "session signed in");
        inner.session = Session {
            token: Some(token),
            user: Some(user),
        };
        inner.version += 1;
        Ok(inner.version)
    }

    /// Clears token and user together.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend rejects the removal.
    pub fn sign_out(&self) -> Result<u64> {
        let mut inner = self.lock();
        inner.store.remove_many(&[TOKEN_KEY, USER_KEY])?;

        tracing::debug!("session cleared");
        inner.session = Session::default();
        inner.version += 1;
        Ok(inner.version)
    }

    /// Shallow-merges `patch` into the stored user if it is `user_id`.
    ///
    /// Returns `Ok(None)` without writing when nobody is signed in or a
    /// different user is.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the merged user cannot be persisted.
    pub fn merge_profile(&self, user_id: &str, patch: &ProfilePatch) -> Result<Option<u64>> {
        let mut inner = self.lock();

        let Some(current) = inner.session.user.as_ref() else {
            tracing::debug!(user_id = %user_id, "no signed-in user, skipping profile merge");
            return Ok(None);
        };
        if current.id != user_id {
            tracing::debug!(
                user_id = %user_id,
                signed_in = %current.id,
                "profile belongs to another user, skipping merge"
            );
            return Ok(None);
        }

        let mut merged = current.clone();
        merged.merge_profile(patch);
        inner.store.set_many(&[(USER_KEY, encode_entry(&merged)?)])?;

        inner.session.user = Some(merged);
        inner.version += 1;
        tracing::debug!(user_id = %user_id, version = inner.version, "profile merged into session");
        Ok(Some(inner.version))
    }
}

fn encode_entry<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|e| JobBoardError::Storage(format!("failed to encode session entry: {e}")))
}

fn decode_entry<T: serde::de::DeserializeOwned>(raw: Option<String>, key: &str) -> Option<T> {
    let raw = raw?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key = key, error = %e, "discarding undecodable session entry");
            None
        }
    }
}
