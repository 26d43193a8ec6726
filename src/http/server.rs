//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit, locale redirect)
//! - Serve the prebuilt pages behind the locale middleware
//! - Seed the waitlist count once at startup
//! - Bind server to listener and drain on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::LandingConfig;
use crate::http::middleware::locale_redirect_middleware;
use crate::http::newsletter::{self, InFlight};
use crate::http::pricing::get_pricing;
use crate::http::request::{make_request_span, propagate_request_id_layer, set_request_id_layer};
use crate::lifecycle::shutdown::wait_for_shutdown;
use crate::pricing::PricingEngine;
use crate::routing::LocaleRouter;
use crate::signup::{ContactStore, PostgrestStore, SignupSubmitter, StoreError, WaitlistCount};

/// Errors building the server from configuration.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("contact store: {0}")]
    Store(#[from] StoreError),

    #[error("pricing app URL: {0}")]
    Pricing(#[from] url::ParseError),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub submitter: SignupSubmitter,
    pub waitlist: Arc<WaitlistCount>,
    pub in_flight: InFlight,
    pub pricing: Arc<PricingEngine>,
}

/// HTTP server for the landing site.
pub struct HttpServer {
    router: Router,
    config: LandingConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a server talking to the configured PostgREST store.
    pub fn new(config: LandingConfig) -> Result<Self, ServerError> {
        let store = Arc::new(PostgrestStore::new(&config.store)?);
        Self::with_store(config, store)
    }

    /// Create a server on top of an existing contact store.
    pub fn with_store(config: LandingConfig, store: Arc<dyn ContactStore>) -> Result<Self, ServerError> {
        let submitter = SignupSubmitter::new(
            store,
            config.store.source.clone(),
            config.newsletter.clone(),
        );

        let state = AppState {
            submitter,
            waitlist: Arc::new(WaitlistCount::new()),
            in_flight: InFlight::default(),
            pricing: Arc::new(PricingEngine::from_config(&config.pricing)?),
        };

        let router = Self::build_router(&config, state.clone());
        Ok(Self {
            router,
            config,
            state,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &LandingConfig, state: AppState) -> Router {
        let api = Router::new()
            .route("/healthz", get(|| async { StatusCode::OK }))
            .route("/api/newsletter", post(newsletter::subscribe))
            .route("/api/newsletter/count", get(newsletter::count))
            .route("/api/pricing", get(get_pricing))
            .with_state(state)
            .fallback_service(ServeDir::new(&config.site.static_dir));

        let api = if config.locale.enabled {
            let locale = Arc::new(LocaleRouter::from_config(&config.locale));
            api.layer(middleware::from_fn_with_state(locale, locale_redirect_middleware))
        } else {
            api
        };

        api.layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<axum::body::Body>))
            .layer(set_request_id_layer())
    }

    /// Run the server, accepting connections until Ctrl+C or `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            static_dir = %self.config.site.static_dir,
            locale_redirect = self.config.locale.enabled,
            "HTTP server starting"
        );

        // Seed the displayed count; never blocks startup.
        let state = self.state.clone();
        tokio::spawn(async move {
            state.waitlist.refresh(&state.submitter).await;
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The router, for serving without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}
