//! User management, admin role only.
use actix_web::{web, HttpResponse};

use crate::db::models::user;
use crate::server::auth::Session;
use crate::server::errors::HTTPError;

use super::state::{App as AppState, Global as _};

/// `GET /api/admin/users`
///
/// Password hashes are never serialized.
#[tracing::instrument(skip(data, session), fields(user = %session.user.email))]
pub async fn list(
    data: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, HTTPError> {
    session.require_admin()?;
    let users = user::Manager::find_all(data.db()).await.map_err(|err| {
        tracing::error!("Error fetching users: {err:?}");
        HTTPError::InternalServerError("Failed to fetch users".to_owned())
    })?;
    Ok(HttpResponse::Ok().json(users))
}
