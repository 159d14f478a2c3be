use serde_json::Value;

use crate::api::client::{payload, ApiClient};
use crate::api::routes;
use crate::api::types::{LoginParams, LoginResult};
use crate::error::RequestError;

/// Log in
pub async fn login(client: &ApiClient, params: &LoginParams) -> Result<LoginResult, RequestError> {
    client.post(routes::ADMIN_LOGIN, payload(params)?).await
}

/// Public console configuration, readable before login
pub async fn common_config(client: &ApiClient) -> Result<Value, RequestError> {
    client.get(routes::COMMON_CONFIG, None).await
}
