//! User Model
//!
//! Users are created by an external auth system; this crate only resolves
//! session tokens to users and attaches the payment-platform customer
//! reference on first billing-portal use.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{CoreError, Result};

/// An authenticated user
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthUser {
    /// Numeric id issued by the auth system
    pub id: i64,

    /// Email, used as the payment-platform customer key
    pub email: String,

    /// Optional display name
    pub name: Option<String>,

    /// Payment-platform customer id, attached lazily once
    pub customer_ref: Option<String>,
}

impl AuthUser {
    pub fn new(id: i64, email: impl Into<String>, name: Option<String>) -> Self {
        Self {
            id,
            email: email.into(),
            name,
            customer_ref: None,
        }
    }

    /// Display name with the fallback used in outbound email
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Customer")
    }
}

/// User storage trait
pub trait UserStore: Send + Sync {
    /// Resolve a session token to a user
    fn get_by_token(&self, token: &str) -> Result<Option<AuthUser>>;

    /// Get a user by id
    fn get(&self, id: i64) -> Result<Option<AuthUser>>;

    /// Attach the payment-platform customer reference. The first write wins;
    /// later calls with a different reference are ignored.
    fn attach_customer_ref(&self, user_id: i64, customer_ref: &str) -> Result<()>;
}

/// In-memory user store (for development)
pub struct MemoryUserStore {
    users: RwLock<HashMap<i64, AuthUser>>,
    by_token: RwLock<HashMap<String, i64>>,
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            by_token: RwLock::new(HashMap::new()),
        }
    }

    /// A store pre-loaded with development users
    pub fn seeded() -> Self {
        let store = Self::new();
        store.insert(
            AuthUser::new(1, "demo@automationhub.dev", Some("Demo User".into())),
            "dev-token-demo",
        );
        store.insert(AuthUser::new(2, "solo@automationhub.dev", None), "dev-token-solo");
        store
    }

    /// Register a user under a session token
    pub fn insert(&self, user: AuthUser, token: &str) {
        let mut users = self.users.write().unwrap();
        let mut by_token = self.by_token.write().unwrap();

        by_token.insert(token.to_string(), user.id);
        users.insert(user.id, user);
    }
}

impl UserStore for MemoryUserStore {
    fn get_by_token(&self, token: &str) -> Result<Option<AuthUser>> {
        let by_token = self.by_token.read().unwrap();
        let users = self.users.read().unwrap();

        Ok(by_token.get(token).and_then(|id| users.get(id).cloned()))
    }

    fn get(&self, id: i64) -> Result<Option<AuthUser>> {
        let users = self.users.read().unwrap();
        Ok(users.get(&id).cloned())
    }

    fn attach_customer_ref(&self, user_id: i64, customer_ref: &str) -> Result<()> {
        let mut users = self.users.write().unwrap();

        let user = users
            .get_mut(&user_id)
            .ok_or(CoreError::UserNotFound(user_id))?;

        if user.customer_ref.is_none() {
            user.customer_ref = Some(customer_ref.to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_resolution() {
        let store = MemoryUserStore::seeded();
        let user = store.get_by_token("dev-token-demo").unwrap().unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.email, "demo@automationhub.dev");
        assert!(store.get_by_token("nope").unwrap().is_none());
    }

    #[test]
    fn test_customer_ref_attaches_once() {
        let store = MemoryUserStore::seeded();

        store.attach_customer_ref(1, "cus_first").unwrap();
        store.attach_customer_ref(1, "cus_second").unwrap();

        let user = store.get(1).unwrap().unwrap();
        assert_eq!(user.customer_ref.as_deref(), Some("cus_first"));
    }

    #[test]
    fn test_attach_to_unknown_user_fails() {
        let store = MemoryUserStore::new();
        assert!(store.attach_customer_ref(99, "cus_x").is_err());
    }

    #[test]
    fn test_display_name_fallback() {
        let user = AuthUser::new(2, "solo@automationhub.dev", None);
        assert_eq!(user.display_name(), "Customer");
    }
}
