use serde::{Deserialize, Serialize};

use crate::router::RawRouteRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginParams {
    pub email: String,
    pub password: String,
    pub ty: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResult {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserInfo>,
}

/// Logged-in administrator profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_at: Option<String>,
}

/// Menus plus the permission strings granted to the caller's group
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PermissionGroup {
    #[serde(default)]
    pub menus: Vec<RawRouteRecord>,
    #[serde(default)]
    pub permission: Vec<String>,
}

/// Paged list payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPage<T> {
    #[serde(default)]
    pub count: Option<i64>,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub pagesize: Option<i64>,
    pub list: T,
}

/// Body for creating or editing a menu record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub ty: u8,
    pub pid: i64,
    pub name: String,
    pub router: String,
    pub is_show: i64,
    pub keepalive: i64,
    pub icon: String,
    pub perms: String,
    pub sort: i64,
}
