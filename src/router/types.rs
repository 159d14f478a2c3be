use serde::{Deserialize, Deserializer, Serialize};

/// Backend menu record type (`ty`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum RouteKind {
    Directory,
    Menu,
    /// Permission marker attached to a menu; never navigable on its own
    Permission,
    /// Type this client does not know; the record is skipped
    Other(u8),
}

impl RouteKind {
    pub fn is_known(self) -> bool {
        !matches!(self, RouteKind::Other(_))
    }
}

impl From<u8> for RouteKind {
    fn from(value: u8) -> Self {
        match value {
            0 => RouteKind::Directory,
            1 => RouteKind::Menu,
            2 => RouteKind::Permission,
            other => RouteKind::Other(other),
        }
    }
}

impl From<RouteKind> for u8 {
    fn from(kind: RouteKind) -> Self {
        match kind {
            RouteKind::Directory => 0,
            RouteKind::Menu => 1,
            RouteKind::Permission => 2,
            RouteKind::Other(other) => other,
        }
    }
}

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Flat menu/permission record as delivered by the permission-group endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRouteRecord {
    pub id: i64,
    #[serde(default)]
    pub pid: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub router: String,
    /// Comma separated permission strings
    #[serde(default)]
    pub perms: Option<String>,
    pub ty: RouteKind,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keepalive: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_show: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sort: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang_code: Option<String>,
}

impl RawRouteRecord {
    /// Visible, non-cached record with no icon or permissions
    pub fn new(id: i64, pid: i64, ty: RouteKind, name: impl Into<String>, router: impl Into<String>) -> Self {
        Self {
            id,
            pid: Some(pid),
            name: name.into(),
            router: router.into(),
            perms: None,
            ty,
            icon: None,
            keepalive: 0,
            is_show: 1,
            sort: 0,
            lang_code: None,
        }
    }

    /// Root records carry `pid = 0` or none at all
    pub fn parent_id(&self) -> i64 {
        self.pid.unwrap_or(0)
    }

    pub fn with_perms(mut self, perms: impl Into<String>) -> Self {
        self.perms = Some(perms.into());
        self
    }

    pub fn with_sort(mut self, sort: i64) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_keepalive(mut self, keepalive: bool) -> Self {
        self.keepalive = keepalive as i64;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.is_show = visible as i64;
        self
    }
}

/// How a route node renders
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteComponent {
    /// A page of its own
    #[default]
    #[serde(rename = "self")]
    Page,
    /// Top-level directory layout
    Basic,
    /// Nested directory that is not a real page; flattened when compiled
    Multi,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub order: i64,
    pub title: String,
    pub permissions: Vec<String>,
    pub icon: String,
    pub hide: bool,
    pub keep_alive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub i18n_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_path: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub single_layout: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub multi: bool,
}

/// Hierarchical, annotated route node derived from the backend records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthRoute {
    pub name: String,
    pub path: String,
    pub component: RouteComponent,
    pub meta: RouteMeta,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AuthRoute>,
}

impl AuthRoute {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Same node with `children` swapped out
    pub fn with_children(&self, children: Vec<AuthRoute>) -> Self {
        Self {
            name: self.name.clone(),
            path: self.path.clone(),
            component: self.component,
            meta: self.meta.clone(),
            children,
        }
    }
}

/// Navigable route record in the shape the client router consumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VueRoute {
    pub name: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    pub component: RouteComponent,
    pub meta: RouteMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<VueRoute>>,
}

impl VueRoute {
    pub fn has_children(&self) -> bool {
        self.children.as_ref().is_some_and(|c| !c.is_empty())
    }
}

/// Display menu entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub key: String,
    pub label: String,
    pub icon: String,
    #[serde(rename = "i18nTitle", default, skip_serializing_if = "Option::is_none")]
    pub i18n_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MenuItem>>,
}
