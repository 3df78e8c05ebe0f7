use std::sync::Arc;

use parking_lot::RwLock;

/// Injectable holder of the bearer credential backing all authenticated calls.
///
/// Cloning is cheap and every clone observes the same credential, so a login
/// flow can refresh the token out of band while requests are in flight; the
/// client reads it fresh on every call. Distinct `Session` values are fully
/// independent, which keeps concurrent sessions testable.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.refresh(token);
        session
    }

    /// Current bearer token, read at call time.
    pub fn bearer(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    /// Replaces the credential (the login flow writes through this).
    pub fn refresh(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    pub fn clear(&self) {
        *self.token.write() = None;
    }
}
