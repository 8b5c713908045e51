//! In-memory storage for lesson sessions.
//!
//! Each session holds one [`LessonPlayer`], keyed by the id in the session
//! cookie. Sessions expire after a period of inactivity. Nothing is
//! persisted; a restart starts every learner over.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::config;
use crate::player::LessonPlayer;

/// Session entry with last access time for expiration
struct SessionEntry {
  player: LessonPlayer,
  last_access: DateTime<Utc>,
}

/// Error returned when the session store lock cannot be acquired
#[derive(Debug)]
pub struct SessionLockError;

impl std::fmt::Display for SessionLockError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "Session store lock poisoned")
  }
}

impl std::error::Error for SessionLockError {}

/// Shared session store, cloned into every handler through `AppState`.
#[derive(Clone)]
pub struct SessionStore {
  sessions: Arc<Mutex<HashMap<String, SessionEntry>>>,
  expiry: Duration,
}

impl SessionStore {
  pub fn new(expiry_minutes: i64) -> Self {
    Self {
      sessions: Arc::new(Mutex::new(HashMap::new())),
      expiry: Duration::minutes(expiry_minutes),
    }
  }

  /// Inactivity window, also used as the cookie lifetime.
  pub fn expiry_minutes(&self) -> i64 {
    self.expiry.num_minutes()
  }

  /// Store a player under a fresh id and return the id.
  pub fn create(&self, player: LessonPlayer) -> Result<String, SessionLockError> {
    let mut sessions = self.sessions.lock().map_err(|_| SessionLockError)?;

    // Clean up expired sessions occasionally (~10% chance)
    if rand::random::<u8>() < config::SESSION_CLEANUP_THRESHOLD {
      self.cleanup_expired(&mut sessions);
    }

    let session_id = generate_session_id();
    sessions.insert(
      session_id.clone(),
      SessionEntry {
        player,
        last_access: Utc::now(),
      },
    );
    Ok(session_id)
  }

  /// Run `f` against the session's player.
  ///
  /// Returns `Ok(None)` when the session is unknown or expired. The lock is
  /// held only for the duration of `f`.
  pub fn with_player<T>(
    &self,
    session_id: &str,
    f: impl FnOnce(&mut LessonPlayer) -> T,
  ) -> Result<Option<T>, SessionLockError> {
    let mut sessions = self.sessions.lock().map_err(|_| SessionLockError)?;
    let now = Utc::now();

    let expired = match sessions.get(session_id) {
      Some(entry) => entry.last_access < now - self.expiry,
      None => return Ok(None),
    };
    if expired {
      tracing::debug!("Session {} expired", session_id);
      sessions.remove(session_id);
      return Ok(None);
    }

    Ok(sessions.get_mut(session_id).map(|entry| {
      entry.last_access = now;
      f(&mut entry.player)
    }))
  }

  pub fn remove(&self, session_id: &str) -> Result<(), SessionLockError> {
    let mut sessions = self.sessions.lock().map_err(|_| SessionLockError)?;
    sessions.remove(session_id);
    Ok(())
  }

  pub fn len(&self) -> Result<usize, SessionLockError> {
    let sessions = self.sessions.lock().map_err(|_| SessionLockError)?;
    Ok(sessions.len())
  }

  pub fn is_empty(&self) -> Result<bool, SessionLockError> {
    Ok(self.len()? == 0)
  }

  /// Clean up expired sessions
  fn cleanup_expired(&self, sessions: &mut HashMap<String, SessionEntry>) {
    let cutoff = Utc::now() - self.expiry;
    let before = sessions.len();
    sessions.retain(|_, entry| entry.last_access > cutoff);
    if sessions.len() < before {
      tracing::debug!("Removed {} expired sessions", before - sessions.len());
    }
  }

  #[cfg(test)]
  fn backdate(&self, session_id: &str, by: Duration) {
    if let Ok(mut sessions) = self.sessions.lock()
      && let Some(entry) = sessions.get_mut(session_id)
    {
      entry.last_access = entry.last_access - by;
    }
  }
}

/// Generate a new session ID
pub fn generate_session_id() -> String {
  use rand::Rng;
  let mut rng = rand::rng();
  (0..32)
    .map(|_| {
      let idx = rng.random_range(0..36u8);
      if idx < 10 {
        (b'0' + idx) as char
      } else {
        (b'a' + idx - 10) as char
      }
    })
    .collect()
}
