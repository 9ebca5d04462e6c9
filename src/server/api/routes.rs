//! A central place to register App routes.
use actix_service::ServiceFactory;
use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    web, App, Error,
};

use crate::server::errors::HTTPError;

use super::state::App as AppState;
use super::{auth, partners, users};

#[expect(
    clippy::literal_string_with_formatting_args,
    reason = "Actix Web resource path uses `{param}` syntax which is not formatting but route pattern matching"
)]
/// Central place to register all the App routing.
///
/// Public routes live under `/api`, everything under `/api/admin` requires a session.
#[tracing::instrument(skip(app, state))]
pub fn register_app<
    U: MessageBody,
    V: ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<U>,
        Config = (),
        InitError = (),
        Error = Error,
    >,
>(
    app: App<V>,
    state: &AppState,
) -> App<V> {
    app.app_data(web::Data::new(state.clone()))
        .app_data(json_config())
        .service(
            web::scope("/api")
                .service(
                    web::scope("/auth")
                        .route("/login", web::post().to(auth::login))
                        .route("/logout", web::post().to(auth::logout))
                        .route("/session", web::get().to(auth::current)),
                )
                .route("/partners", web::get().to(partners::public_list))
                .service(
                    web::scope("/admin")
                        .service(
                            web::resource("/partners")
                                .route(web::get().to(partners::list))
                                .route(web::post().to(partners::create)),
                        )
                        .service(
                            web::resource("/partners/{id}")
                                .route(web::get().to(partners::get))
                                .route(web::put().to(partners::update))
                                .route(web::delete().to(partners::delete)),
                        )
                        .route("/users", web::get().to(users::list)),
                ),
        )
}

/// Malformed JSON bodies are answered with the same error shape as every other failure.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        tracing::debug!("Rejected request body: {err}");
        HTTPError::BadRequest(err.to_string()).into()
    })
}
