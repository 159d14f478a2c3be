#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use admin_console::api::{ApiClient, ErrorNotifier};
use admin_console::config::AppConfig;
use admin_console::session::{AppContext, MemoryStorage, Storage};
use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde_json::{json, Value};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "secret";
pub const ADMIN_TOKEN: &str = "tok-123";

/// Knobs and counters shared with the mock admin backend
#[derive(Default)]
pub struct MockState {
    pub group_calls: AtomicUsize,
    pub group_delay_ms: AtomicU64,
    pub group_fail: AtomicBool,
    pub menus: Mutex<Vec<Value>>,
    pub permission: Mutex<Vec<String>>,
}

pub struct MockBackend {
    pub base_url: String,
    pub state: Arc<MockState>,
}

impl MockBackend {
    pub async fn spawn() -> Result<Self> {
        let state = Arc::new(MockState {
            menus: Mutex::new(sample_menus()),
            permission: Mutex::new(vec!["member-list".to_string(), "rbac-menu-list".to_string()]),
            ..Default::default()
        });

        let app = Router::new()
            .route("/admin/login", post(login))
            .route("/admin/rbac-admin-group", get(admin_group))
            .route("/admin/rbac-menu-list", get(menu_list))
            .route("/admin/member-list", get(echo).post(echo_form))
            .route("/admin/common-config", get(broken))
            .route("/admin/sdp", get(sdp))
            .with_state(Arc::clone(&state));

        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind mock backend")?;
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}", port),
            state,
        })
    }

    pub fn config(&self) -> AppConfig {
        let mut config = AppConfig::development();
        config.api.base_url = self.base_url.clone();
        config.api.prefix = "/admin".to_string();
        config.api.timeout_secs = 5;
        config
    }

    pub fn group_calls(&self) -> usize {
        self.state.group_calls.load(Ordering::SeqCst)
    }
}

/// Context, client and storage wired against the mock backend
pub struct Harness {
    pub backend: MockBackend,
    pub storage: Arc<MemoryStorage>,
    pub client: Arc<ApiClient>,
    pub ctx: AppContext,
}

pub async fn harness() -> Result<Harness> {
    let backend = MockBackend::spawn().await?;
    let config = backend.config();
    let storage = Arc::new(MemoryStorage::new());
    let client = Arc::new(ApiClient::new(
        &config.api,
        Arc::clone(&storage) as Arc<dyn Storage>,
        Arc::new(ErrorNotifier::with_window(Duration::from_secs(3))),
    )?);
    let ctx = AppContext::new(
        config,
        Arc::clone(&storage) as Arc<dyn Storage>,
        Arc::clone(&client) as Arc<dyn admin_console::api::AdminApi>,
    );
    Ok(Harness {
        backend,
        storage,
        client,
        ctx,
    })
}

/// Two directories, three pages, one permission leaf per page
pub fn sample_menus() -> Vec<Value> {
    vec![
        json!({ "id": 1, "pid": 0, "ty": 0, "name": "Member", "router": "member", "sort": 2, "is_show": 1 }),
        json!({ "id": 2, "pid": 1, "ty": 1, "name": "Member List", "router": "list", "sort": 1, "is_show": 1, "keepalive": 1 }),
        json!({ "id": 3, "pid": 2, "ty": 2, "name": "View", "router": "", "perms": "member-list" }),
        json!({ "id": 4, "pid": 0, "ty": 0, "name": "System", "router": "system", "sort": 1, "is_show": 1 }),
        json!({ "id": 5, "pid": 4, "ty": 1, "name": "Menus", "router": "menu", "sort": 1, "is_show": 1 }),
        json!({ "id": 6, "pid": 4, "ty": 1, "name": "Admins", "router": "admin", "sort": 2, "is_show": 1 }),
        json!({ "id": 7, "pid": 5, "ty": 2, "name": "View", "router": "", "perms": "rbac-menu-list" }),
        json!({ "id": 8, "pid": 6, "ty": 2, "name": "View", "router": "", "perms": "admin-u" }),
    ]
}

fn ok(data: Value) -> Json<Value> {
    Json(json!({ "code": 1, "msg": "success", "data": data }))
}

async fn login(Form(form): Form<HashMap<String, String>>) -> Json<Value> {
    let email = form.get("email").map(String::as_str).unwrap_or_default();
    let password = form.get("password").map(String::as_str).unwrap_or_default();

    match (email, password) {
        (ADMIN_EMAIL, ADMIN_PASSWORD) => ok(json!({
            "token": ADMIN_TOKEN,
            "user": { "id": 1, "group_id": 1, "email": ADMIN_EMAIL, "username": "admin" }
        })),
        ("tokenless@example.com", _) => ok(json!({ "user": { "id": 2 } })),
        _ => Json(json!({ "code": 1002, "msg": "Invalid credentials" })),
    }
}

async fn admin_group(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Json<Value> {
    if headers.get("token").and_then(|v| v.to_str().ok()) != Some(ADMIN_TOKEN) {
        return Json(json!({ "code": 401, "msg": "Login expired" }));
    }
    state.group_calls.fetch_add(1, Ordering::SeqCst);

    let delay = state.group_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
    if state.group_fail.load(Ordering::SeqCst) {
        return Json(json!({ "code": 5000, "msg": "Group lookup failed" }));
    }

    let menus = state.menus.lock().map(|m| m.clone()).unwrap_or_default();
    let permission = state.permission.lock().map(|p| p.clone()).unwrap_or_default();
    ok(json!({ "menus": menus, "permission": permission }))
}

async fn menu_list(State(state): State<Arc<MockState>>) -> Json<Value> {
    let menus = state.menus.lock().map(|m| m.clone()).unwrap_or_default();
    ok(json!({ "count": menus.len(), "page": 1, "pagesize": 100, "list": menus }))
}

/// Returns the query and the interesting headers
async fn echo(headers: HeaderMap, Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    ok(json!({ "query": query, "headers": header_echo(&headers) }))
}

async fn echo_form(headers: HeaderMap, Form(form): Form<HashMap<String, String>>) -> Json<Value> {
    ok(json!({ "form": form, "headers": header_echo(&headers) }))
}

fn header_echo(headers: &HeaderMap) -> Value {
    let get = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).unwrap_or_default().to_string();
    json!({ "token": get("token"), "nation": get("nation"), "content-type": get("content-type") })
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::BAD_GATEWAY, "upstream down")
}

async fn sdp() -> Json<Value> {
    Json(json!({ "sdp": "v=0", "type": "answer" }))
}
