use actix_http::Request;
use actix_service::Service;
use actix_web::{
    body::MessageBody,
    cookie::Cookie,
    dev::ServiceResponse,
    test::{self},
    Error,
};
use seniorbydesign::db::models::partner::{NewPartner, Partner};
use seniorbydesign::db::models::user;
use seniorbydesign::db::{init, DatabaseConnection, Db as _};
use seniorbydesign::partners;
use seniorbydesign::server::api::state::App as AppState;
use seniorbydesign::server::app::init_app;
use seniorbydesign::utils::config::Config;
use serde_json::json;
use tempfile::TempDir;

pub const ADMIN_EMAIL: &str = "admin@seniorbydesign.com";
pub const EDITOR_EMAIL: &str = "editor@seniorbydesign.com";
pub const PASSWORD: &str = "temp_password_123";

/// A migrated SQLite database living in a temporary directory.
/// The directory, and the database with it, is removed on drop.
pub struct TestDb {
    pub db: DatabaseConnection,
    _dir: TempDir,
}

pub async fn initialize_db() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let db_url = format!("sqlite://{}?mode=rwc", dir.path().join("sbd.sqlite3").display());
    let db = DatabaseConnection::connect(&db_url, 10).await.unwrap();
    init::migrate(&db).await.unwrap();
    TestDb { db, _dir: dir }
}

/// App state over a fresh database with one admin and one regular user.
pub async fn initialize_state(config: Config) -> (AppState, TestDb) {
    let test_db = initialize_db().await;
    // Lowest bcrypt cost keeps test setup fast. Login verifies any cost.
    let password_hash = bcrypt::hash(PASSWORD, 4).unwrap();
    user::Manager::create_if_missing(&test_db.db, ADMIN_EMAIL, &password_hash, "admin")
        .await
        .unwrap();
    user::Manager::create_if_missing(&test_db.db, EDITOR_EMAIL, &password_hash, "user")
        .await
        .unwrap();
    let state = AppState {
        db: test_db.db.clone(),
        config,
    };
    (state, test_db)
}

pub async fn initialize_app(
    state: &AppState,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    test::init_service(init_app(state)).await
}

/// Log in through the API and return the session cookie.
pub async fn login(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error>,
    email: &str,
) -> Cookie<'static> {
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": email, "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert!(resp.status().is_success(), "login failed for {email}");
    resp.response()
        .cookies()
        .find(|cookie| cookie.name() == Config::default().session.cookie_name)
        .map(Cookie::into_owned)
        .expect("login response sets the session cookie")
}

pub fn new_partner(name: &str) -> NewPartner {
    NewPartner {
        name: name.to_owned(),
        logo: format!("/images/partners/{}.png", name.to_lowercase()),
        ..NewPartner::default()
    }
}

/// Insert partners named `names` at orders `first_order..`, in order.
pub async fn seed_partners(db: &DatabaseConnection, names: &[&str], first_order: i64) -> Vec<Partner> {
    let mut created = Vec::new();
    for name in names {
        created.push(
            partners::insert(db, &new_partner(name), None, first_order)
                .await
                .unwrap(),
        );
    }
    created
}

/// `(name, order)` of every partner, in display order.
pub async fn names_and_orders(db: &DatabaseConnection) -> Vec<(String, i64)> {
    partners::list(db)
        .await
        .unwrap()
        .into_iter()
        .map(|partner| (partner.name, partner.order))
        .collect()
}

/// Orders of the partners named `names`, looked up by name.
pub async fn orders_of(db: &DatabaseConnection, names: &[&str]) -> Vec<i64> {
    let all = names_and_orders(db).await;
    names
        .iter()
        .map(|name| {
            all.iter()
                .find(|(found, _)| found == name)
                .map(|&(_, order)| order)
                .unwrap()
        })
        .collect()
}
