//! Locale redirect middleware.
//! Sends root-path visitors from the configured locale to the localized page.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::observability::metrics;
use crate::routing::{InboundRequest, LocaleRouter, RoutingDecision};

pub async fn locale_redirect_middleware(
    State(router): State<Arc<LocaleRouter>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let decision = router.decide(&InboundRequest::from_request(&req, router.country_header()));

    match decision {
        RoutingDecision::PassThrough => next.run(req).await,
        RoutingDecision::RedirectTo(target) => {
            tracing::debug!(target = %target, "Locale redirect");
            metrics::record_redirect();
            Redirect::temporary(&target).into_response()
        }
    }
}
