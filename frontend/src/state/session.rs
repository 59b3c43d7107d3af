use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::{
    api::Role,
    utils::{
        jwt,
        storage::{BrowserStorage, KeyValueStore, MemoryStorage},
    },
};

pub const TOKEN_KEY: &str = "token";
pub const ROLE_KEY: &str = "role";
pub const NAME_KEY: &str = "name";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub role: Role,
    pub display_name: String,
}

/// Persisted login session: the bearer token plus the role and name shown in the chrome.
#[derive(Clone)]
pub struct SessionStore {
    storage: Rc<dyn KeyValueStore>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("has_token", &self.token().is_some())
            .finish()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::browser()
    }
}

impl SessionStore {
    pub fn browser() -> Self {
        Self::with_storage(Rc::new(BrowserStorage))
    }

    pub fn in_memory() -> Self {
        Self::with_storage(Rc::new(MemoryStorage::new()))
    }

    pub fn with_storage(storage: Rc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    pub fn token(&self) -> Option<String> {
        self.storage
            .get_item(TOKEN_KEY)
            .filter(|token| !token.trim().is_empty())
    }

    pub fn stored_role(&self) -> Option<Role> {
        self.storage.get_item(ROLE_KEY).as_deref().and_then(Role::parse)
    }

    pub fn display_name(&self) -> Option<String> {
        self.storage.get_item(NAME_KEY)
    }

    pub fn save(&self, session: &Session) -> Result<(), String> {
        self.storage.set_item(TOKEN_KEY, &session.token)?;
        self.storage.set_item(ROLE_KEY, session.role.as_str())?;
        self.storage.set_item(NAME_KEY, &session.display_name)?;
        Ok(())
    }

    pub fn clear(&self) {
        self.storage.remove_item(TOKEN_KEY);
        self.storage.remove_item(ROLE_KEY);
        self.storage.remove_item(NAME_KEY);
    }

    /// The stored session if its token is readable and unexpired; anything else clears storage.
    ///
    /// The role comes from the token itself, falling back to the stored role only when the
    /// token carries none.
    pub fn load(&self, now: DateTime<Utc>) -> Option<Session> {
        let token = self.token()?;
        let session = match jwt::decode_claims(&token) {
            Ok(claims) if !jwt::is_token_expired(&token, now) => claims
                .role
                .or_else(|| self.stored_role())
                .map(|role| Session {
                    display_name: self
                        .display_name()
                        .or(claims.sub)
                        .unwrap_or_else(|| role.label().to_string()),
                    token: token.clone(),
                    role,
                }),
            Ok(_) => {
                log::info!("stored session token has expired");
                None
            }
            Err(err) => {
                log::warn!("discarding unreadable session token: {}", err);
                None
            }
        };
        if session.is_none() {
            self.clear();
        }
        session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::encode_test_token;
    use chrono::Duration;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn token(role: &str, exp_offset: i64) -> String {
        encode_test_token(&json!({
            "sub": "priya",
            "role": role,
            "exp": (now() + Duration::seconds(exp_offset)).timestamp()
        }))
    }

    #[test]
    fn save_then_load_uses_token_role() {
        let store = SessionStore::in_memory();
        store
            .save(&Session {
                token: token("ROLE_MANAGER", 600),
                role: Role::Employee,
                display_name: "Priya".into(),
            })
            .unwrap();
        let restored = store.load(now()).unwrap();
        assert_eq!(restored.role, Role::Manager);
        assert_eq!(restored.display_name, "Priya");
    }

    #[test]
    fn expired_token_clears_storage() {
        let memory = MemoryStorage::new();
        let store = SessionStore::with_storage(Rc::new(memory.clone()));
        store
            .save(&Session {
                token: token("ADMIN", -1),
                role: Role::Admin,
                display_name: "Root".into(),
            })
            .unwrap();
        assert!(store.load(now()).is_none());
        assert!(memory.is_empty());
    }

    #[test]
    fn garbage_token_clears_storage() {
        let memory = MemoryStorage::new();
        memory.set_item(TOKEN_KEY, "not-a-token").unwrap();
        memory.set_item(ROLE_KEY, "ADMIN").unwrap();
        let store = SessionStore::with_storage(Rc::new(memory.clone()));
        assert!(store.load(now()).is_none());
        assert!(memory.is_empty());
    }

    #[test]
    fn token_without_role_falls_back_to_stored_role() {
        let memory = MemoryStorage::new();
        let raw = encode_test_token(&json!({ "sub": "ravi", "exp": now().timestamp() + 60 }));
        memory.set_item(TOKEN_KEY, &raw).unwrap();
        memory.set_item(ROLE_KEY, "HR").unwrap();
        let store = SessionStore::with_storage(Rc::new(memory));
        let restored = store.load(now()).unwrap();
        assert_eq!(restored.role, Role::Hr);
        assert_eq!(restored.display_name, "ravi");
    }
}
