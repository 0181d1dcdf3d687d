//! Account session: login, registration, token keeping.
//!
//! The token lives in memory only; a new process starts logged out.

use crate::api::{ApiClient, Result};

pub struct Session {
    api: ApiClient,
    token: Option<String>,
}

impl Session {
    pub fn new(api: ApiClient) -> Self {
        Self { api, token: None }
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// The bearer token of the active session, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Exchange credentials for a token and keep it.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<()> {
        let token = self.api.login(email, password).await?;
        self.token = Some(token);
        tracing::debug!("session opened");
        Ok(())
    }

    /// Create an account, then log straight into it.
    pub async fn register(&mut self, email: &str, password: &str, username: &str) -> Result<()> {
        self.api.register(email, password, username).await?;
        self.login(email, password).await
    }

    pub fn logout(&mut self) {
        self.token = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    fn session() -> Session {
        let config = ClientConfig {
            base_url: "http://backend.test/api".to_owned(),
            ..ClientConfig::default()
        };
        Session::new(ApiClient::new(&config).unwrap())
    }

    #[test]
    fn test_token_lifecycle() {
        let mut session = session();
        assert!(!session.is_logged_in());
        assert_eq!(session.token(), None);

        session.token = Some("abc".to_owned());
        assert!(session.is_logged_in());
        assert_eq!(session.token(), Some("abc"));

        session.logout();
        assert!(!session.is_logged_in());
        assert_eq!(session.token(), None);
    }
}
