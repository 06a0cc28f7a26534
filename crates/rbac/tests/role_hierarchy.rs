//! End-to-end role queries against a fixture org.
//!
//! Current role inheritance tree:
//!
//! ```text
//!           Everyone     Admin
//!         /          \  /
//! alice@test.com    bob@test.com
//! ```
//!
//! The same hierarchy is served once from the in-memory directory and once
//! from a mocked Okta API, so both clients are held to the same answers.

use std::sync::Arc;

use directory::{InMemoryDirectory, OktaClient, UserStatus};
use rbac::{DirectoryRoleManager, RoleManager};
use serde_json::json;
use shared::{DirectoryConfig, RoleError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn test_role(rm: &dyn RoleManager, name1: &str, name2: &str, res: bool) {
    let my_res = rm.has_link(name1, name2, None).await.unwrap();
    assert_eq!(my_res, res, "{} < {}: {}, supposed to be {}", name1, name2, my_res, res);
}

async fn test_print_roles(rm: &dyn RoleManager, name: &str, res: &[&str]) {
    let my_res = rm.get_roles(name, None).await.unwrap();
    assert_eq!(my_res, res, "{}: {:?}, supposed to be {:?}", name, my_res, res);
}

async fn test_print_users(rm: &dyn RoleManager, name: &str, res: &[&str]) {
    let my_res = rm.get_users(name, None).await.unwrap();
    assert_eq!(my_res, res, "{}: {:?}, supposed to be {:?}", name, my_res, res);
}

async fn check_hierarchy(rm: &dyn RoleManager) {
    test_role(rm, "alice@test.com", "Everyone", true).await;
    test_role(rm, "bob@test.com", "Everyone", true).await;
    test_role(rm, "alice@test.com", "Admin", false).await;
    test_role(rm, "bob@test.com", "Admin", true).await;

    test_print_roles(rm, "alice@test.com", &["Everyone"]).await;
    test_print_roles(rm, "bob@test.com", &["Everyone", "Admin"]).await;

    test_print_users(rm, "Everyone", &["alice@test.com", "bob@test.com"]).await;
    test_print_users(rm, "Admin", &["bob@test.com"]).await;

    assert!(matches!(
        rm.add_link("alice@test.com", "Admin", None).await,
        Err(RoleError::NotImplemented(_))
    ));
    test_role(rm, "alice@test.com", "Admin", false).await;
}

#[tokio::test]
async fn test_role_in_memory() {
    let directory = InMemoryDirectory::new();
    directory
        .add_user("00u1", "alice@test.com", UserStatus::Active)
        .add_user("00u2", "bob@test.com", UserStatus::Active)
        .add_group("00g1", "Everyone")
        .add_group("00g2", "Admin")
        .add_member("00g1", "00u1")
        .add_member("00g1", "00u2")
        .add_member("00g2", "00u2");

    let rm = DirectoryRoleManager::new(Arc::new(directory));
    check_hierarchy(&rm).await;
}

fn user(id: &str, login: &str, status: &str) -> serde_json::Value {
    json!({ "id": id, "status": status, "profile": { "login": login, "email": login } })
}

fn group(id: &str, name: &str) -> serde_json::Value {
    json!({ "id": id, "type": "OKTA_GROUP", "profile": { "name": name, "description": null } })
}

async fn mount_get(server: &MockServer, route: &str, search: Option<&str>, body: serde_json::Value) {
    let mock = Mock::given(method("GET")).and(path(route));
    let mock = match search {
        Some(search) => mock.and(query_param("search", search)),
        None => mock,
    };
    mock.respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_role_okta() {
    let server = MockServer::start().await;

    let alice = user("00u1", "alice@test.com", "ACTIVE");
    let bob = user("00u2", "bob@test.com", "ACTIVE");
    let carol = user("00u3", "carol@test.com", "DEPROVISIONED");
    let everyone = group("00g1", "Everyone");
    let admin = group("00g2", "Admin");

    mount_get(&server, "/api/v1/users", Some("profile.login eq \"alice@test.com\""), json!([alice])).await;
    mount_get(&server, "/api/v1/users", Some("profile.login eq \"bob@test.com\""), json!([bob])).await;
    mount_get(&server, "/api/v1/groups", Some("profile.name eq \"Everyone\""), json!([everyone])).await;
    mount_get(&server, "/api/v1/groups", Some("profile.name eq \"Admin\""), json!([admin])).await;
    mount_get(&server, "/api/v1/users/00u1/groups", None, json!([everyone])).await;
    mount_get(&server, "/api/v1/users/00u2/groups", None, json!([everyone, admin])).await;
    mount_get(&server, "/api/v1/groups/00g1/users", None, json!([alice, bob, carol])).await;
    mount_get(&server, "/api/v1/groups/00g2/users", None, json!([bob])).await;

    let config = DirectoryConfig {
        base_url: Some(server.uri()),
        api_token: "your_api_token".to_string(),
        ..Default::default()
    };
    let rm = DirectoryRoleManager::new(Arc::new(OktaClient::new(&config).unwrap()));
    check_hierarchy(&rm).await;
}

#[tokio::test]
async fn test_upstream_failure_is_not_masked() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = DirectoryConfig {
        base_url: Some(server.uri()),
        api_token: "your_api_token".to_string(),
        ..Default::default()
    };
    let rm = DirectoryRoleManager::from_config(&config).unwrap();

    assert!(matches!(
        rm.has_link("alice@test.com", "Everyone", None).await,
        Err(RoleError::Upstream(_))
    ));
}

#[tokio::test]
async fn test_prefix_matches_are_discarded() {
    let server = MockServer::start().await;

    // A search that also returns a longer name must not count as ambiguous.
    mount_get(
        &server,
        "/api/v1/groups",
        Some("profile.name eq \"Admin\""),
        json!([group("00g2", "Admin"), group("00g3", "Admins")]),
    )
    .await;
    mount_get(
        &server,
        "/api/v1/groups/00g2/users",
        None,
        json!([user("00u2", "bob@test.com", "ACTIVE"), user("00u4", "dan@test.com", "LOCKED_OUT")]),
    )
    .await;

    let config = DirectoryConfig {
        base_url: Some(server.uri()),
        api_token: "your_api_token".to_string(),
        ..Default::default()
    };
    let rm = DirectoryRoleManager::from_config(&config).unwrap();

    assert_eq!(rm.get_users("Admin", None).await.unwrap(), vec!["bob@test.com"]);
}
