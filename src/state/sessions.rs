//! In-memory registry mapping session tokens to the users that logged in with them.

use std::time::{Duration, Instant, SystemTime};

use dashmap::{DashMap, mapref::entry::Entry};
use rand::RngCore;

use crate::dao::models::UserEntity;

/// Number of random bytes behind a session token (hex encoded to twice as many characters).
pub const TOKEN_BYTES: usize = 30;

/// Identity attached to a session. The password hash never leaves the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    /// Primary key of the user.
    pub id: i32,
    /// Given name.
    pub firstname: String,
    /// Family name.
    pub lastname: String,
    /// Login email.
    pub email: String,
}

impl From<&UserEntity> for SessionUser {
    fn from(user: &UserEntity) -> Self {
        Self {
            id: user.id,
            firstname: user.firstname.clone(),
            lastname: user.lastname.clone(),
            email: user.email.clone(),
        }
    }
}

/// Session entry kept for every issued token.
#[derive(Debug, Clone)]
pub struct Session {
    /// Who logged in.
    pub user: SessionUser,
    /// Monotonic login time, used for expiry.
    pub issued_at: Instant,
    /// Wall-clock login time, reported to clients.
    pub issued_at_wall: SystemTime,
}

impl Session {
    fn is_expired(&self, ttl: Option<Duration>, now: Instant) -> bool {
        ttl.is_some_and(|ttl| now.duration_since(self.issued_at) >= ttl)
    }
}

/// Token to user map shared by every request handler.
pub struct SessionRegistry {
    sessions: DashMap<String, Session>,
    ttl: Option<Duration>,
}

impl SessionRegistry {
    /// Create an empty registry. Without `ttl` sessions live until revoked.
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    /// Configured session lifetime.
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Register a new session for `user` and return its freshly generated token.
    pub fn issue(&self, user: SessionUser) -> String {
        let session = Session {
            user,
            issued_at: Instant::now(),
            issued_at_wall: SystemTime::now(),
        };

        loop {
            let token = generate_token();
            if let Entry::Vacant(slot) = self.sessions.entry(token.clone()) {
                slot.insert(session);
                return token;
            }
        }
    }

    /// Look up the session behind `token`, dropping it when it has expired.
    pub fn resolve(&self, token: &str) -> Option<Session> {
        let now = Instant::now();
        let session = self.sessions.get(token)?.clone();
        if session.is_expired(self.ttl, now) {
            self.sessions
                .remove_if(token, |_, stored| stored.is_expired(self.ttl, now));
            return None;
        }
        Some(session)
    }

    /// Forget `token`. Returns whether a session was removed.
    pub fn revoke(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    /// Drop every expired session and return how many were removed.
    pub fn purge_expired(&self) -> usize {
        if self.ttl.is_none() {
            return 0;
        }

        let now = Instant::now();
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| !session.is_expired(self.ttl, now));
        before.saturating_sub(self.sessions.len())
    }

    /// Number of live (not yet purged) sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no session is registered.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Generate an unguessable session token: [`TOKEN_BYTES`] random bytes, lowercase hex.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
