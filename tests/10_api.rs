mod common;

use std::sync::Arc;
use std::time::Duration;

use admin_console::api::modules::{auth, menu};
use admin_console::api::{ApiClient, ErrorNotifier, LoginParams, RequestOptions, Method};
use admin_console::error::{ErrorCode, ErrorKind};
use admin_console::session::storage::TOKEN_KEY;
use admin_console::session::{MemoryStorage, Storage};
use anyhow::Result;
use serde_json::{json, Value};

#[tokio::test]
async fn get_sends_query_rid_and_headers() -> Result<()> {
    let h = common::harness().await?;
    h.storage.set(TOKEN_KEY, json!("tok-abc"))?;

    let data: Value = h.client.get("member-list", Some(json!({ "page": 2 }))).await?;

    assert_eq!(data["query"]["page"], "2");
    assert_eq!(data["query"]["_rid"].as_str().map(str::len), Some(24));
    assert_eq!(data["headers"]["token"], "tok-abc");
    assert_eq!(data["headers"]["nation"], "en");
    Ok(())
}

#[tokio::test]
async fn post_is_form_encoded_by_default() -> Result<()> {
    let h = common::harness().await?;

    let data: Value = h
        .client
        .post("member-list", json!({ "name": "alice", "ids": [1, 2], "skip": null }))
        .await?;

    assert_eq!(data["form"]["name"], "alice");
    assert_eq!(data["form"]["ids"], "[1,2]");
    assert!(data["form"].get("skip").is_none());
    assert!(data["headers"]["content-type"]
        .as_str()
        .unwrap_or_default()
        .starts_with("application/x-www-form-urlencoded"));
    Ok(())
}

#[tokio::test]
async fn backend_code_becomes_backend_error() -> Result<()> {
    let h = common::harness().await?;
    let params = LoginParams {
        email: common::ADMIN_EMAIL.to_string(),
        password: "wrong".to_string(),
        ty: 1,
    };

    let err = auth::login(&h.client, &params).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Backend);
    assert_eq!(err.code, ErrorCode::Number(1002));
    assert_eq!(err.msg, "Invalid credentials");
    Ok(())
}

#[tokio::test]
async fn http_status_becomes_http_error() -> Result<()> {
    let h = common::harness().await?;

    let err = auth::common_config(&h.client).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Http);
    assert_eq!(err.code, ErrorCode::Number(502));
    Ok(())
}

#[tokio::test]
async fn sdp_body_passes_through_whole() -> Result<()> {
    let h = common::harness().await?;

    let body: Value = h
        .client
        .request(Method::Get, "sdp", None, &RequestOptions::default())
        .await?;
    assert_eq!(body, json!({ "sdp": "v=0", "type": "answer" }));
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_is_network_error() -> Result<()> {
    let port = portpicker::pick_unused_port().expect("free port");
    let mut config = admin_console::config::AppConfig::development();
    config.api.base_url = format!("http://127.0.0.1:{}", port);
    config.api.timeout_secs = 2;

    let client = ApiClient::new(
        &config.api,
        Arc::new(MemoryStorage::new()),
        Arc::new(ErrorNotifier::with_window(Duration::from_secs(3))),
    )?;
    let err = client.get::<Value>("member-list", None).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Fetch);
    assert_eq!(err.code, ErrorCode::Text("NETWORK_ERROR".to_string()));
    Ok(())
}

#[tokio::test]
async fn menu_list_decodes_records() -> Result<()> {
    let h = common::harness().await?;

    let page = menu::menu_list(&h.client).await?;
    assert_eq!(page.count, Some(8));
    assert_eq!(page.list.len(), 8);
    assert_eq!(page.list[1].name, "Member List");
    assert_eq!(page.list[1].keepalive, 1);
    Ok(())
}
