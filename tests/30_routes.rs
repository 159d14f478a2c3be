mod common;

use admin_console::api::LoginParams;
use admin_console::error::SessionError;
use admin_console::session::storage::TOKEN_KEY;
use admin_console::session::{SessionPhase, Storage};
use anyhow::Result;
use std::sync::atomic::Ordering;

async fn logged_in() -> Result<common::Harness> {
    let h = common::harness().await?;
    h.ctx
        .auth
        .login(&LoginParams {
            email: common::ADMIN_EMAIL.to_string(),
            password: common::ADMIN_PASSWORD.to_string(),
            ty: 1,
        })
        .await?;
    Ok(h)
}

#[tokio::test]
async fn init_builds_menu_routes_and_cache() -> Result<()> {
    let h = logged_in().await?;
    h.ctx.route.init_auth_route().await?;

    assert_eq!(h.ctx.phase(), SessionPhase::RoutesReady);

    // home is synthesised and sorts first, then System (sort 1), Member (sort 2)
    let menus = h.ctx.route.menus();
    let labels: Vec<&str> = menus.iter().map(|m| m.label.as_str()).collect();
    assert_eq!(labels, vec!["首页", "System", "Member"]);
    assert_eq!(menus[0].to.as_deref(), Some("/"));

    let system = menus[1].children.as_ref().expect("system children");
    assert_eq!(system.len(), 1, "Admins needs admin-u, which is not granted");
    assert_eq!(system[0].label, "Menus");
    assert_eq!(system[0].to.as_deref(), Some("/system/menu"));

    let routes = h.ctx.route.routes();
    let member = routes.iter().find(|r| r.path == "/member").expect("member route");
    assert_eq!(member.redirect.as_deref(), Some("/member/list"));
    assert_eq!(member.children.as_ref().map(Vec::len), Some(1));

    assert_eq!(h.ctx.route.cache_routes(), vec!["AppMemberList"]);
    Ok(())
}

#[tokio::test]
async fn init_runs_the_pipeline_once() -> Result<()> {
    let h = logged_in().await?;

    h.ctx.route.init_auth_route().await?;
    h.ctx.route.init_auth_route().await?;

    assert_eq!(h.backend.group_calls(), 1);
    assert_eq!(h.ctx.route.init_runs(), 1);
    Ok(())
}

#[tokio::test]
async fn init_requires_login() -> Result<()> {
    let h = common::harness().await?;

    let err = h.ctx.route.init_auth_route().await.unwrap_err();
    assert_eq!(err, SessionError::NotAuthenticated);
    assert_eq!(h.backend.group_calls(), 0);
    Ok(())
}

#[tokio::test]
async fn failed_init_resets_the_session() -> Result<()> {
    let h = logged_in().await?;
    h.backend.state.group_fail.store(true, Ordering::SeqCst);

    let err = h.ctx.route.init_auth_route().await.unwrap_err();
    assert!(matches!(err, SessionError::Request(_)));

    assert_eq!(h.ctx.phase(), SessionPhase::Anonymous);
    assert!(h.storage.get(TOKEN_KEY).is_none());
    assert!(h.ctx.route.menus().is_empty());
    Ok(())
}

#[tokio::test]
async fn denied_pages_leave_their_directory_childless() -> Result<()> {
    let h = logged_in().await?;
    if let Ok(mut permission) = h.backend.state.permission.lock() {
        permission.clear();
    }

    h.ctx.route.init_auth_route().await?;

    let menus = h.ctx.route.menus();
    let system = menus.iter().find(|m| m.label == "System").expect("system menu");
    assert!(system.children.is_none());
    assert_eq!(system.to.as_deref(), Some("/system"));
    assert!(h.ctx.route.cache_routes().is_empty());
    Ok(())
}

#[tokio::test]
async fn cache_routes_can_be_adjusted() -> Result<()> {
    let h = logged_in().await?;
    h.ctx.route.init_auth_route().await?;

    h.ctx.route.add_cache_route("AppSystemMenu");
    h.ctx.route.add_cache_route("AppSystemMenu");
    assert_eq!(h.ctx.route.cache_routes(), vec!["AppMemberList", "AppSystemMenu"]);

    h.ctx.route.remove_cache_route("AppMemberList");
    assert_eq!(h.ctx.route.cache_routes(), vec!["AppSystemMenu"]);
    Ok(())
}
