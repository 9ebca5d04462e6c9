//! Session authentication for admin routes.
//!
//! Handlers that take a [`Session`] argument only run for requests carrying a
//! valid, unexpired session cookie. Every other request is answered with 401
//! before the handler is called.
use std::future::Future;
use std::pin::Pin;

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use chrono::Utc;

use crate::db::models::{
    session::{self, ActiveSession},
    user::User,
};
use crate::server::api::state::{App as AppState, Global as _};
use crate::server::errors::HTTPError;

/// The logged-in user of the current request.
#[derive(Debug, Clone)]
pub struct Session {
    /// Session token from the cookie.
    pub token: String,
    /// Owner of the session.
    pub user: User,
}

impl Session {
    /// Fail with 401 unless the user has the admin role.
    ///
    /// # Errors
    /// Errors with [`HTTPError::Unauthorized`] for non-admin users.
    pub fn require_admin(&self) -> Result<(), HTTPError> {
        if self.user.is_admin() {
            Ok(())
        } else {
            tracing::warn!(email = %self.user.email, "Non-admin user denied");
            Err(HTTPError::Unauthorized)
        }
    }
}

impl FromRequest for Session {
    type Error = HTTPError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = state.as_ref().and_then(|data| {
            req.cookie(&data.session().cookie_name)
                .map(|cookie| cookie.value().to_owned())
        });
        Box::pin(async move {
            let (Some(data), Some(token)) = (state, token) else {
                return Err(HTTPError::Unauthorized);
            };
            lookup(data.db(), &token)
                .await
                .map(|active| Self {
                    token: active.token,
                    user: active.user,
                })
                .ok_or(HTTPError::Unauthorized)
        })
    }
}

/// Find the unexpired session for `token`.
/// Expired sessions are deleted on the way. Store failures count as no session.
async fn lookup(db: &crate::db::DatabaseConnection, token: &str) -> Option<ActiveSession> {
    let found = match session::Manager::find_by_token(db, token).await {
        Ok(found) => found,
        Err(err) => {
            tracing::error!("Error looking up session: {err:?}");
            return None;
        }
    };
    let active = found?;
    if active.is_expired(Utc::now()) {
        tracing::debug!(email = %active.user.email, "Session expired");
        if let Err(err) = session::Manager::delete_by_token(db, token).await {
            tracing::warn!("Error deleting expired session: {err:?}");
        }
        return None;
    }
    Some(active)
}
