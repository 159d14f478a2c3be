use serde_json::{json, Value};

use crate::api::client::{payload, ApiClient};
use crate::api::routes;
use crate::api::types::{ListPage, MenuParams, PermissionGroup};
use crate::error::RequestError;
use crate::router::RawRouteRecord;

/// All menu records
pub async fn menu_list(client: &ApiClient) -> Result<ListPage<Vec<RawRouteRecord>>, RequestError> {
    client.get(routes::RBAC_MENU_LIST, None).await
}

pub async fn create_menu(client: &ApiClient, params: &MenuParams) -> Result<Value, RequestError> {
    client.post(routes::RBAC_MENU_ADD, payload(params)?).await
}

pub async fn update_menu(client: &ApiClient, params: &MenuParams) -> Result<Value, RequestError> {
    client.post(routes::RBAC_MENU_EDIT, payload(params)?).await
}

pub async fn delete_menu(client: &ApiClient, id: i64) -> Result<Value, RequestError> {
    client.post(routes::RBAC_MENU_REMOVE, json!({ "id": id })).await
}

/// Replace the menu assignment of a permission group. The body is passed
/// through untouched; its shape is owned by the backend.
pub async fn update_group_menu(client: &ApiClient, data: Value) -> Result<Value, RequestError> {
    client.post(routes::RBAC_GROUP_ADD, data).await
}

/// Menu ids assigned to a permission group
pub async fn admin_group_menu_list(client: &ApiClient, group_id: i64) -> Result<Value, RequestError> {
    client.get(routes::RBAC_GROUP_MENU, Some(json!({ "group_id": group_id }))).await
}

/// Menus and permission strings for the logged-in administrator
pub async fn admin_permission_group(client: &ApiClient) -> Result<PermissionGroup, RequestError> {
    client.get(routes::RBAC_ADMIN_GROUP, None).await
}
