//! Handlers for the partner strip.
//!
//! The admin handlers are thin: they parse the body, call into
//! [`crate::partners`] and translate its errors. All ordering rules live there.
use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::partners::{self, PartnerError};
use crate::server::auth::Session;
use crate::server::errors::HTTPError;

use super::state::{App as AppState, Global as _};

/// Module that maps the HTTP web request body to structs.
pub mod request;

/// Public list of partners in display order, as rendered on the homepage.
#[tracing::instrument(skip(data))]
pub async fn public_list(data: web::Data<AppState>) -> Result<HttpResponse, HTTPError> {
    let found = partners::list(data.db())
        .await
        .map_err(|err| partner_error(&err, "fetch"))?;
    Ok(HttpResponse::Ok().json(found))
}

/// `GET /api/admin/partners`, the public list behind a session.
#[tracing::instrument(skip(data, session), fields(user = %session.user.email))]
pub async fn list(
    data: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, HTTPError> {
    public_list(data).await
}

/// `GET /api/admin/partners/{id}`
#[tracing::instrument(skip(data, session), fields(user = %session.user.email))]
pub async fn get(
    data: web::Data<AppState>,
    session: Session,
    id: web::Path<i64>,
) -> Result<HttpResponse, HTTPError> {
    let found = partners::get(data.db(), id.into_inner())
        .await
        .map_err(|err| partner_error(&err, "fetch"))?;
    Ok(HttpResponse::Ok().json(found))
}

/// `POST /api/admin/partners`
#[tracing::instrument(skip(data, session, body), fields(user = %session.user.email))]
pub async fn create(
    data: web::Data<AppState>,
    session: Session,
    body: web::Json<request::CreatePartner>,
) -> Result<HttpResponse, HTTPError> {
    let body = body.into_inner();
    let created = partners::insert(data.db(), &(&body).into(), body.order, data.first_order())
        .await
        .map_err(|err| partner_error(&err, "create"))?;
    Ok(HttpResponse::Ok().json(created))
}

/// `PUT /api/admin/partners/{id}`
#[tracing::instrument(skip(data, session, body), fields(user = %session.user.email))]
pub async fn update(
    data: web::Data<AppState>,
    session: Session,
    id: web::Path<i64>,
    body: web::Json<request::UpdatePartner>,
) -> Result<HttpResponse, HTTPError> {
    partners::reposition(
        data.db(),
        id.into_inner(),
        body.into_inner().into(),
        data.first_order(),
    )
    .await
    .map_err(|err| partner_error(&err, "update"))?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/// `DELETE /api/admin/partners/{id}`
#[tracing::instrument(skip(data, session), fields(user = %session.user.email))]
pub async fn delete(
    data: web::Data<AppState>,
    session: Session,
    id: web::Path<i64>,
) -> Result<HttpResponse, HTTPError> {
    partners::delete(data.db(), id.into_inner())
        .await
        .map_err(|err| partner_error(&err, "delete"))?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/// A centralised place to match internal errors to safe user-facing error responses.
/// Store failures are logged in full and answered with a generic message.
fn partner_error(error: &anyhow::Error, action: &str) -> HTTPError {
    match error.downcast_ref::<PartnerError>() {
        Some(&PartnerError::NotFound(_)) => HTTPError::NotFound("Partner not found".to_owned()),
        Some(
            partner_err @ (&PartnerError::OrderOutOfRange { .. } | &PartnerError::NoRoom(_)),
        ) => HTTPError::BadRequest(partner_err.to_string()),
        None => {
            tracing::error!("Error trying to {action} partner: {error:?}");
            HTTPError::InternalServerError(format!("Failed to {action} partner"))
        }
    }
}
