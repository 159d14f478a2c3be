use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::router::RawRouteRecord;

/// True when `path` is an absolute web address rather than an in-app route.
pub fn is_url(path: &str) -> bool {
    if path.starts_with("www.") {
        return true;
    }
    match Url::parse(path) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

/// Collapse runs of `/` into one, leaving a `scheme://` separator intact.
pub fn unique_slash(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let chars: Vec<char> = path.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] != '/' {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && chars[i] == '/' {
            i += 1;
        }
        let run = i - start;
        let after_colon = start > 0 && chars[start - 1] == ':';
        if after_colon && run > 1 {
            // the first slash stays, the remainder collapses on its own
            out.push_str("//");
        } else {
            out.push('/');
        }
    }
    out
}

/// Random alphanumeric request id
pub fn random_string(length: usize) -> String {
    let mut out = String::with_capacity(length);
    while out.len() < length {
        out.push_str(&Uuid::new_v4().simple().to_string());
    }
    out.truncate(length);
    out
}

/// One node of the menu administration tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuTreeNode {
    #[serde(flatten)]
    pub record: RawRouteRecord,
    pub level: usize,
    #[serde(rename = "keyPath")]
    pub key_path: Vec<i64>,
    pub label: String,
    pub key: i64,
    pub value: i64,
    pub children: Option<Vec<MenuTreeNode>>,
}

/// Nest a flat menu list under `parent_id` (`None` for the roots), recording
/// each node's depth and the chain of ancestor ids leading to it.
pub fn format_menu_tree(
    menus: &[RawRouteRecord],
    parent_id: Option<i64>,
    key_path: &[i64],
    level: usize,
) -> Vec<MenuTreeNode> {
    let pid = parent_id.unwrap_or(0);
    menus
        .iter()
        .filter(|item| item.parent_id() == pid)
        .map(|item| {
            let mut path = key_path.to_vec();
            if pid != 0 {
                path.push(pid);
            }
            let children = format_menu_tree(menus, Some(item.id), &path, level + 1);
            MenuTreeNode {
                record: item.clone(),
                level,
                key_path: path,
                label: item.name.clone(),
                key: item.id,
                value: item.id,
                children: if children.is_empty() { None } else { Some(children) },
            }
        })
        .collect()
}
