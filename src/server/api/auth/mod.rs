//! Login, logout and session introspection.
use actix_web::{
    cookie::{time::Duration, Cookie, SameSite},
    web, HttpRequest, HttpResponse,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use crate::db::models::{format_timestamp, session, user};
use crate::server::auth::Session;
use crate::server::errors::HTTPError;
use crate::utils::config::SessionConfig;
use crate::utils::password::verify_password;

use super::state::{App as AppState, Global as _};

/// Module that maps the HTTP web request body to structs.
pub mod request;

/// Who is logged in.
#[derive(Serialize, Debug)]
pub struct SessionUser {
    /// Login email.
    pub email: String,
    /// Role of the user.
    pub role: String,
}

/// `POST /api/auth/login`
///
/// Checks the credentials, stores a new session and sets the session cookie.
#[tracing::instrument(skip(data, body), fields(email = %body.email))]
pub async fn login(
    data: web::Data<AppState>,
    body: web::Json<request::Login>,
) -> Result<HttpResponse, HTTPError> {
    let credentials = body.into_inner();
    let found = user::Manager::find_by_email(data.db(), &credentials.email)
        .await
        .map_err(|err| {
            tracing::error!("Error fetching user: {err:?}");
            HTTPError::InternalServerError("Failed to log in".to_owned())
        })?;
    let Some(found_user) =
        found.filter(|usr| verify_password(&credentials.password, &usr.password_hash))
    else {
        tracing::warn!("Rejected login");
        return Err(HTTPError::Unauthorized);
    };

    let config = data.session();
    let token = uuid::Uuid::new_v4().simple().to_string();
    let expires_at = format_timestamp(Utc::now() + chrono::Duration::hours(config.ttl_hours));
    session::Manager::create(data.db(), &token, found_user.id, &expires_at)
        .await
        .map_err(|err| {
            tracing::error!("Error creating session: {err:?}");
            HTTPError::InternalServerError("Failed to log in".to_owned())
        })?;
    tracing::info!("User logged in");

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(config, token))
        .json(SessionUser {
            email: found_user.email,
            role: found_user.role,
        }))
}

/// `POST /api/auth/logout`
///
/// Always succeeds. Deletes the session if there is one and expires the cookie.
#[tracing::instrument(skip(req, data))]
pub async fn logout(req: HttpRequest, data: web::Data<AppState>) -> HttpResponse {
    let config = data.session();
    if let Some(cookie) = req.cookie(&config.cookie_name) {
        if let Err(err) = session::Manager::delete_by_token(data.db(), cookie.value()).await {
            tracing::warn!("Error deleting session: {err:?}");
        }
    }
    let mut removal = session_cookie(config, String::new());
    removal.make_removal();
    HttpResponse::Ok()
        .cookie(removal)
        .json(json!({ "success": true }))
}

/// `GET /api/auth/session`
#[tracing::instrument(skip(session))]
pub async fn current(session: Session) -> HttpResponse {
    HttpResponse::Ok().json(SessionUser {
        email: session.user.email,
        role: session.user.role,
    })
}

/// Session cookie carrying `token`.
fn session_cookie(config: &SessionConfig, token: String) -> Cookie<'static> {
    Cookie::build(config.cookie_name.clone(), token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookie)
        .max_age(Duration::hours(config.ttl_hours))
        .finish()
}
