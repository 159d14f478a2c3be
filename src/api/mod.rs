// Admin REST API: transport, error notices, endpoint table and typed calls

pub mod client;
pub mod modules;
pub mod msg;
pub mod routes;
pub mod types;

pub use client::{ApiClient, ContentType, Method, RequestOptions};
pub use msg::ErrorNotifier;
pub use types::*;

use async_trait::async_trait;

use crate::error::RequestError;

/// Backend calls the session layer depends on
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn login(&self, params: &LoginParams) -> Result<LoginResult, RequestError>;

    async fn permission_group(&self) -> Result<PermissionGroup, RequestError>;
}

#[async_trait]
impl AdminApi for ApiClient {
    async fn login(&self, params: &LoginParams) -> Result<LoginResult, RequestError> {
        modules::auth::login(self, params).await
    }

    async fn permission_group(&self) -> Result<PermissionGroup, RequestError> {
        modules::menu::admin_permission_group(self).await
    }
}
