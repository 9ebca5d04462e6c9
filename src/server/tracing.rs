//! Tracing/logging for HTTP servers

use std::time::Instant;

use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    HttpMessage,
};
use tracing_actix_web::{DefaultRootSpanBuilder, RootSpanBuilder};

/// The length of time in milliseconds after which an admin request is considered slow.
/// Reorders wait on the partner table lock, so a burst of edits shows up here first.
const SLOW_REQUEST_MS: u128 = 2 * 1000;

/// `DefaultRootSpanBuilder` plus request timings.
pub struct SbdRootSpanBuilder;

/// Stored in the request extensions when the request arrives.
struct RequestStart(Instant);

impl RootSpanBuilder for SbdRootSpanBuilder {
    fn on_request_start(request: &ServiceRequest) -> tracing::Span {
        // `root_span!` borrows `request` again, so the extensions borrow must end first.
        {
            let mut request_extensions = request.extensions_mut();
            request_extensions.insert(RequestStart(Instant::now()));
        }

        // Every log line of the request carries this span: method, path, user agent and
        // `request_id`. The duration fields are declared empty here and filled in once the
        // response is ready, so the access log line and the slow request warning agree.
        tracing_actix_web::root_span!(
            request,
            duration_ms = tracing::field::Empty,
            duration_ns = tracing::field::Empty,
        )
    }

    fn on_request_end<B: MessageBody>(
        span: tracing::Span,
        outcome: &Result<ServiceResponse<B>, actix_web::Error>,
    ) {
        if let Ok(response) = outcome.as_ref() {
            if let Some(req_start) = response.request().extensions().get::<RequestStart>() {
                let elapsed = req_start.0.elapsed();
                let millis = elapsed.as_millis();
                span.record("duration_ms", millis);
                span.record("duration_ns", elapsed.as_nanos());
                if millis > SLOW_REQUEST_MS {
                    tracing::warn!(
                        duration_ms = millis,
                        path = response.request().path(),
                        "Slow HTTP request"
                    );
                } else {
                    tracing::trace!("HTTP Request");
                }
            }
        }
        // Status code and error fields of the default root span.
        DefaultRootSpanBuilder::on_request_end(span, outcome);
    }
}
