use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::json;

use super::storage::{Storage, TOKEN_KEY, USER_INFO_KEY};
use crate::api::{AdminApi, LoginParams, PermissionGroup, UserInfo};
use crate::error::{RequestError, SessionError};
use crate::router::PermissionSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub token: String,
    pub user_info: UserInfo,
    /// Empty until the permission group has been fetched
    pub perms: Vec<String>,
}

/// Owns the credentials and the granted permission strings
pub struct AuthSession {
    api: Arc<dyn AdminApi>,
    storage: Arc<dyn Storage>,
    state: RwLock<AuthState>,
    authenticating: AtomicBool,
    /// Bumped on every reset, only while holding the state write lock
    generation: AtomicU64,
}

impl AuthSession {
    /// Restore token and profile from persisted storage
    pub fn new(api: Arc<dyn AdminApi>, storage: Arc<dyn Storage>) -> Self {
        let state = Self::restore(storage.as_ref());
        Self {
            api,
            storage,
            state: RwLock::new(state),
            authenticating: AtomicBool::new(false),
            generation: AtomicU64::new(0),
        }
    }

    fn restore(storage: &dyn Storage) -> AuthState {
        let token = storage
            .get(TOKEN_KEY)
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        let user_info = storage
            .get(USER_INFO_KEY)
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();
        AuthState {
            token,
            user_info,
            perms: Vec::new(),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, AuthState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, AuthState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_login(&self) -> bool {
        !self.read().token.is_empty()
    }

    pub fn is_authenticating(&self) -> bool {
        self.authenticating.load(Ordering::SeqCst)
    }

    pub fn token(&self) -> String {
        self.read().token.clone()
    }

    pub fn user_info(&self) -> UserInfo {
        self.read().user_info.clone()
    }

    pub fn perms(&self) -> Vec<String> {
        self.read().perms.clone()
    }

    pub fn snapshot(&self) -> AuthState {
        self.read().clone()
    }

    pub fn permissions(&self) -> PermissionSet {
        PermissionSet::new(self.read().perms.iter().cloned())
    }

    pub fn has_permission<S: AsRef<str>>(&self, required: &[S]) -> bool {
        self.permissions().has_any(required)
    }

    /// Submit credentials; on success the token and profile are persisted
    pub async fn login(&self, params: &LoginParams) -> Result<(), SessionError> {
        self.authenticating.store(true, Ordering::SeqCst);
        let result = self.api.login(params).await;
        self.authenticating.store(false, Ordering::SeqCst);

        let data = result?;
        let token = data
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(RequestError::no_token)?;

        self.storage.set(TOKEN_KEY, json!(token))?;
        self.write().token = token;
        self.set_user_info(data.user.unwrap_or_default())?;

        tracing::info!("logged in as {}", params.email);
        Ok(())
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Fetch the permission group and keep its permission strings. A reset
    /// while the fetch is in flight discards the result.
    pub async fn after_login(&self) -> Result<PermissionGroup, SessionError> {
        let generation = self.generation();
        let group = self.api.permission_group().await?;
        {
            let mut state = self.write();
            if self.generation() != generation {
                tracing::debug!("session reset during permission fetch, discarding");
                return Err(SessionError::Superseded);
            }
            state.perms = group.permission.clone();
        }
        tracing::debug!(
            "permission group: {} menus, {} permissions",
            group.menus.len(),
            group.permission.len()
        );
        Ok(group)
    }

    pub fn set_user_info(&self, info: UserInfo) -> Result<(), SessionError> {
        let value = serde_json::to_value(&info).map_err(|e| SessionError::Storage(e.to_string()))?;
        self.storage.set(USER_INFO_KEY, value)?;
        self.write().user_info = info;
        Ok(())
    }

    /// Drop persisted credentials and return to the initial state
    pub fn reset(&self) {
        for key in [TOKEN_KEY, USER_INFO_KEY] {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!("failed to clear '{}': {}", key, e);
            }
        }
        let mut state = self.write();
        self.generation.fetch_add(1, Ordering::SeqCst);
        *state = AuthState::default();
        drop(state);
        tracing::info!("auth session reset");
    }
}
