//! Admin entry gate
//!
//! A shared-secret string compare with a remembered "authenticated" flag.
//! This is not a security boundary: the secret lives in local configuration
//! and anyone who can write the data directory can set the flag. Replace it
//! with real authentication before exposing the admin commands to others.

use crate::store::Storage;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub const SESSION_KEY: &str = "admin_authenticated";

/// Password the original site shipped with, used when none is configured
pub const DEFAULT_PASSWORD: &str = "sagit123";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminSession {
    pub authenticated: bool,
    pub since: DateTime<Utc>,
}

pub struct AdminGate {
    password: String,
}

impl AdminGate {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }

    /// Compare `attempt` with the configured password; on success remember
    /// the session in `storage` when `remember` is set
    pub fn login<S: Storage>(&self, storage: &mut S, attempt: &str, remember: bool) -> Result<bool> {
        if attempt != self.password {
            warn!("Rejected admin login");
            return Ok(false);
        }

        if remember {
            let session = AdminSession {
                authenticated: true,
                since: Utc::now(),
            };
            let json = serde_json::to_string(&session).context("Failed to serialize session")?;
            storage
                .save(SESSION_KEY, &json)
                .context("Failed to remember admin session")?;
        }

        info!("Admin logged in");
        Ok(true)
    }

    pub fn logout<S: Storage>(&self, storage: &mut S) -> Result<()> {
        storage
            .remove(SESSION_KEY)
            .context("Failed to clear admin session")?;
        info!("Admin logged out");
        Ok(())
    }

    /// Whether an earlier login was remembered. Unreadable flags count as
    /// logged out.
    pub fn is_authenticated<S: Storage>(&self, storage: &S) -> bool {
        match storage.load(SESSION_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<AdminSession>(&raw)
                .map(|s| s.authenticated)
                .unwrap_or(false),
            Ok(None) => false,
            Err(e) => {
                warn!("Could not read admin session: {:#}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;

    #[test]
    fn wrong_password_is_rejected_and_not_remembered() {
        let gate = AdminGate::new("secret");
        let mut storage = MemoryStorage::new();

        assert!(!gate.login(&mut storage, "guess", true).unwrap());
        assert!(!gate.is_authenticated(&storage));
        assert_eq!(storage.writes(), 0);
    }

    #[test]
    fn remembered_login_persists_until_logout() {
        let gate = AdminGate::new("secret");
        let mut storage = MemoryStorage::new();

        assert!(gate.login(&mut storage, "secret", true).unwrap());
        assert!(gate.is_authenticated(&storage));

        gate.logout(&mut storage).unwrap();
        assert!(!gate.is_authenticated(&storage));
    }

    #[test]
    fn login_without_remember_leaves_no_flag() {
        let gate = AdminGate::new("secret");
        let mut storage = MemoryStorage::new();

        assert!(gate.login(&mut storage, "secret", false).unwrap());
        assert!(!gate.is_authenticated(&storage));
    }

    #[test]
    fn garbage_flag_counts_as_logged_out() {
        let gate = AdminGate::new(DEFAULT_PASSWORD);
        let storage = MemoryStorage::with_entries([(SESSION_KEY, "true")]);
        assert!(!gate.is_authenticated(&storage));
    }
}
