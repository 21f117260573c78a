//! Admin gate: one shared credential guarding every mutating operation.
//!
//! Successful logins hand out opaque session tokens that live in memory for
//! the lifetime of the process. There is no expiry, lockout or rate limit.

use std::collections::HashSet;
use std::sync::Mutex;

use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

/// Shown to anyone who submits a wrong username or password.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "invalid username or password";

/// Decides whether a username/password pair grants admin access.
///
/// Swap the implementation to plug in a real authentication backend; the
/// gate and every route stay unchanged.
pub trait CredentialVerifier: Send + Sync + 'static {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// A single configured credential pair.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("{}", INVALID_CREDENTIALS_MESSAGE)]
    InvalidCredentials,
}

pub struct AdminGate {
    verifier: Box<dyn CredentialVerifier>,
    sessions: Mutex<HashSet<String>>,
}

impl std::fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.sessions.lock().map(|s| s.len()).unwrap_or(0);
        write!(f, "AdminGate({count} sessions)")
    }
}

impl AdminGate {
    pub fn new(verifier: impl CredentialVerifier) -> Self {
        Self {
            verifier: Box::new(verifier),
            sessions: Mutex::new(HashSet::new()),
        }
    }

    /// Check the credentials and open a session on success.
    pub fn login(&self, username: &str, password: &str) -> Result<String, GateError> {
        if !self.verifier.verify(username, password) {
            warn!(username, "admin login rejected");
            return Err(GateError::InvalidCredentials);
        }

        let token = Uuid::new_v4().to_string();
        if let Ok(mut sessions) = self.sessions.lock() {
            sessions.insert(token.clone());
        }
        info!(username, "admin session opened");
        Ok(token)
    }

    pub fn is_authenticated(&self, token: &str) -> bool {
        self.sessions
            .lock()
            .map(|s| s.contains(token))
            .unwrap_or(false)
    }

    /// Forget a session. Returns `true` if it existed.
    pub fn logout(&self, token: &str) -> bool {
        match self.sessions.lock() {
            Ok(mut sessions) => sessions.remove(token),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn gate() -> AdminGate {
        AdminGate::new(StaticCredentials::new("admin", "admin"))
    }

    #[test]
    fn correct_pair_authenticates() {
        let gate = gate();
        let token = gate.login("admin", "admin").expect("login");
        assert!(gate.is_authenticated(&token));
    }

    #[test]
    fn wrong_pair_leaves_gate_closed() {
        let gate = gate();
        for (user, pass) in [("admin", "nope"), ("root", "admin"), ("", ""), ("Admin", "admin")] {
            let err = gate.login(user, pass).unwrap_err();
            assert_eq!(err, GateError::InvalidCredentials);
            assert_eq!(err.to_string(), INVALID_CREDENTIALS_MESSAGE);
        }
        assert!(!gate.is_authenticated(""));
        assert_eq!(gate.sessions.lock().unwrap().len(), 0);
    }

    #[test]
    fn logout_ends_the_session() {
        let gate = gate();
        let token = gate.login("admin", "admin").unwrap();
        assert!(gate.logout(&token));
        assert!(!gate.is_authenticated(&token));
        assert!(!gate.logout(&token));
    }

    struct DenyAll;

    impl CredentialVerifier for DenyAll {
        fn verify(&self, _: &str, _: &str) -> bool {
            false
        }
    }

    #[test]
    fn verifier_is_pluggable() {
        let gate = AdminGate::new(DenyAll);
        assert!(gate.login("admin", "admin").is_err());
    }
}
