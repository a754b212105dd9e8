//! Authenticated-session handle.
//!
//! Token issuance lives in the external auth service; this is only
//! the client-side holder the store's fetch guard consults. Cloning
//! shares the underlying session, so a login is visible to every
//! component holding a handle.

use std::sync::{Arc, RwLock};

/// Shared handle to the current session's bearer token.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    /// A session with nobody logged in.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session already holding a bearer token.
    pub fn authenticated(token: impl Into<String>) -> Self {
        let session = Self::default();
        session.login(token);
        session
    }

    /// Install a bearer token after a successful login.
    pub fn login(&self, token: impl Into<String>) {
        let mut slot = self.token.write().expect("session lock poisoned");
        *slot = Some(token.into());
    }

    /// Drop the token on logout.
    pub fn logout(&self) {
        let mut slot = self.token.write().expect("session lock poisoned");
        *slot = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().expect("session lock poisoned").is_some()
    }

    /// Current bearer token, if logged in.
    pub fn token(&self) -> Option<String> {
        self.token.read().expect("session lock poisoned").clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_is_shared_across_clones() {
        let session = Session::anonymous();
        let clone = session.clone();
        assert!(!clone.is_authenticated());

        session.login("jwt-abc");
        assert!(clone.is_authenticated());
        assert_eq!(clone.token().as_deref(), Some("jwt-abc"));

        clone.logout();
        assert!(!session.is_authenticated());
    }
}
