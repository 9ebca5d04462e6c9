use crate::common::{self, ADMIN_EMAIL, EDITOR_EMAIL};
use actix_web::{http::StatusCode, test};
use seniorbydesign::utils::config::Config;
use serde_json::Value;

#[actix_web::test]
async fn test_list_users_when_admin_expect_users_without_hashes() {
    let (state, _db) = common::initialize_state(Config::default()).await;
    let app = common::initialize_app(&state).await;
    let cookie = common::login(&app, ADMIN_EMAIL).await;
    let req = test::TestRequest::get()
        .uri("/api/admin/users")
        .cookie(cookie)
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(StatusCode::OK, resp.status());
    let body: Value = test::read_body_json(resp).await;
    let users = body.as_array().unwrap();
    assert_eq!(2, users.len());
    for found in users {
        assert!(found.get("passwordHash").is_none());
        assert!(found.get("password_hash").is_none());
    }
    let emails: Vec<&str> = users
        .iter()
        .filter_map(|found| found["email"].as_str())
        .collect();
    assert!(emails.contains(&ADMIN_EMAIL));
    assert!(emails.contains(&EDITOR_EMAIL));
}

#[actix_web::test]
async fn test_list_users_when_not_admin_expect_unauthorized() {
    let (state, _db) = common::initialize_state(Config::default()).await;
    let app = common::initialize_app(&state).await;
    let cookie = common::login(&app, EDITOR_EMAIL).await;
    let req = test::TestRequest::get()
        .uri("/api/admin/users")
        .cookie(cookie)
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(StatusCode::UNAUTHORIZED, resp.status());
}
