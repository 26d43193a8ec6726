//! Locale detection for root-path traffic.
//!
//! # Responsibilities
//! - Classify a request as belonging to the localized audience
//! - Decide between passing the request through and redirecting it
//!
//! # Design Decisions
//! - Pure function of path, query and two headers; no state between calls
//! - Path equality with the root is the first guard, even for direct calls
//! - The Accept-Language rule is a broad substring match (`fr-` anywhere),
//!   not a weighted tag parser: `en-US,fr-FR;q=0.5` counts as French

use std::borrow::Cow;

use axum::http::{HeaderName, HeaderValue, Request, header};

use crate::config::LocaleConfig;

/// The site root. Only this path is ever redirected.
pub const ROOT_PATH: &str = "/";

/// Read-only view of the request fields the router consults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundRequest<'a> {
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub country: Option<Cow<'a, str>>,
    pub accept_language: Option<Cow<'a, str>>,
}

impl<'a> InboundRequest<'a> {
    /// Build a view over an HTTP request, reading the geo hint from `country_header`.
    ///
    /// Non-ASCII bytes are decoded lossily; the value is never dropped.
    pub fn from_request<B>(req: &'a Request<B>, country_header: &HeaderName) -> Self {
        let headers = req.headers();
        Self {
            path: req.uri().path(),
            query: req.uri().query(),
            country: headers.get(country_header).map(header_text),
            accept_language: headers.get(header::ACCEPT_LANGUAGE).map(header_text),
        }
    }
}

fn header_text(value: &HeaderValue) -> Cow<'_, str> {
    String::from_utf8_lossy(value.as_bytes())
}

/// Outcome of the routing decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingDecision {
    /// Continue to the originally requested resource.
    PassThrough,
    /// Redirect to this path (query string already appended).
    RedirectTo(String),
}

/// Root-path locale router.
#[derive(Debug, Clone)]
pub struct LocaleRouter {
    country_header: HeaderName,
    country_code: String,
    language: String,
    region_marker: String,
    redirect_path: String,
}

impl LocaleRouter {
    /// Build a router from configuration.
    pub fn from_config(config: &LocaleConfig) -> Self {
        let language = config.language.to_lowercase();
        Self {
            country_header: HeaderName::from_bytes(config.country_header.as_bytes())
                .unwrap_or_else(|_| HeaderName::from_static("x-vercel-ip-country")),
            country_code: config.country_code.clone(),
            region_marker: format!("{language}-"),
            language,
            redirect_path: config.redirect_path.clone(),
        }
    }

    /// Header carrying the edge-supplied country code.
    pub fn country_header(&self) -> &HeaderName {
        &self.country_header
    }

    /// Returns true if the request should see the localized page.
    pub fn is_localized_request(&self, req: &InboundRequest<'_>) -> bool {
        if let Some(country) = req.country.as_deref() {
            if country.eq_ignore_ascii_case(&self.country_code) {
                return true;
            }
        }

        let accept_language = req.accept_language.as_deref().unwrap_or_default().to_lowercase();
        accept_language.starts_with(&self.language) || accept_language.contains(&self.region_marker)
    }

    /// Decide what to do with a request.
    pub fn decide(&self, req: &InboundRequest<'_>) -> RoutingDecision {
        if req.path != ROOT_PATH {
            return RoutingDecision::PassThrough;
        }

        if !self.is_localized_request(req) {
            return RoutingDecision::PassThrough;
        }

        let target = match req.query {
            Some(q) => format!("{}?{}", self.redirect_path, q),
            None => self.redirect_path.clone(),
        };
        RoutingDecision::RedirectTo(target)
    }
}

impl Default for LocaleRouter {
    fn default() -> Self {
        Self::from_config(&LocaleConfig::default())
    }
}

/// Classify a request as French with the default rule set.
pub fn is_french_request(req: &InboundRequest<'_>) -> bool {
    LocaleRouter::default().is_localized_request(req)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn root<'a>(country: Option<&'a str>, accept_language: Option<&'a str>) -> InboundRequest<'a> {
        InboundRequest {
            path: ROOT_PATH,
            query: None,
            country: country.map(Cow::Borrowed),
            accept_language: accept_language.map(Cow::Borrowed),
        }
    }

    fn redirect() -> RoutingDecision {
        RoutingDecision::RedirectTo("/fr".to_string())
    }

    #[test]
    fn test_non_root_always_passes_through() {
        let router = LocaleRouter::default();
        for path in ["/fr", "/pricing", "/index.html", "", "//"] {
            let req = InboundRequest {
                path,
                query: None,
                country: Some("FR".into()),
                accept_language: Some("fr-FR".into()),
            };
            assert_eq!(router.decide(&req), RoutingDecision::PassThrough, "path {path:?}");
        }
    }

    #[test]
    fn test_country_header_any_case() {
        let router = LocaleRouter::default();
        for country in ["FR", "fr", "Fr"] {
            assert_eq!(router.decide(&root(Some(country), None)), redirect());
        }
        assert_eq!(
            router.decide(&root(Some("fr"), Some("en-US,en;q=0.9"))),
            redirect()
        );
    }

    #[test]
    fn test_accept_language_prefix() {
        let router = LocaleRouter::default();
        for al in ["fr", "fr-CA", "FR-fr,en;q=0.8", "Fr"] {
            assert_eq!(router.decide(&root(None, Some(al))), redirect(), "header {al:?}");
        }
        // A non-matching country does not block the language rule.
        assert_eq!(router.decide(&root(Some("BE"), Some("fr-BE"))), redirect());
    }

    #[test]
    fn test_accept_language_substring_anywhere() {
        let router = LocaleRouter::default();
        assert_eq!(
            router.decide(&root(None, Some("en-US,fr-FR;q=0.5"))),
            redirect()
        );
    }

    #[test]
    fn test_english_or_missing_passes_through() {
        let router = LocaleRouter::default();
        assert_eq!(
            router.decide(&root(None, Some("en-US,en;q=0.9"))),
            RoutingDecision::PassThrough
        );
        assert_eq!(router.decide(&root(None, None)), RoutingDecision::PassThrough);
        assert_eq!(
            router.decide(&root(Some("US"), Some("de-DE"))),
            RoutingDecision::PassThrough
        );
        // "fr" later in the list without a region subtag is not matched.
        assert_eq!(
            router.decide(&root(None, Some("en-US,fr;q=0.5"))),
            RoutingDecision::PassThrough
        );
    }

    #[test]
    fn test_query_string_preserved() {
        let router = LocaleRouter::default();
        let req = InboundRequest {
            path: ROOT_PATH,
            query: Some("utm_source=ads&ref=1"),
            country: Some("FR".into()),
            accept_language: None,
        };
        assert_eq!(
            router.decide(&req),
            RoutingDecision::RedirectTo("/fr?utm_source=ads&ref=1".to_string())
        );
    }

    #[test]
    fn test_is_french_request_helper() {
        assert!(is_french_request(&root(Some("FR"), None)));
        assert!(!is_french_request(&root(None, Some("es-ES"))));
    }

    #[test]
    fn test_from_request_reads_headers() {
        let req = Request::builder()
            .uri("http://example.com/?a=b")
            .header("X-Vercel-IP-Country", "fr")
            .header("Accept-Language", "en-GB")
            .body(Body::default())
            .unwrap();
        let router = LocaleRouter::default();
        let view = InboundRequest::from_request(&req, router.country_header());

        assert_eq!(view.path, "/");
        assert_eq!(view.query, Some("a=b"));
        assert_eq!(view.country.as_deref(), Some("fr"));
        assert_eq!(view.accept_language.as_deref(), Some("en-GB"));
        assert_eq!(
            router.decide(&view),
            RoutingDecision::RedirectTo("/fr?a=b".to_string())
        );
    }

    #[test]
    fn test_non_ascii_header_is_still_read() {
        let value = HeaderValue::from_bytes(b"fr-FR,\xe9;q=0.1").unwrap();
        assert!(value.to_str().is_err());
        let req = Request::builder()
            .uri("/")
            .header(header::ACCEPT_LANGUAGE, value)
            .body(Body::default())
            .unwrap();
        let router = LocaleRouter::default();
        let view = InboundRequest::from_request(&req, router.country_header());

        assert!(view.accept_language.as_deref().unwrap().starts_with("fr-FR,"));
        assert_eq!(router.decide(&view), redirect());
    }

    #[test]
    fn test_custom_locale_config() {
        let router = LocaleRouter::from_config(&LocaleConfig {
            enabled: true,
            country_header: "cf-ipcountry".into(),
            country_code: "DE".into(),
            language: "de".into(),
            redirect_path: "/de".into(),
        });
        assert_eq!(
            router.decide(&root(None, Some("en,de-AT;q=0.7"))),
            RoutingDecision::RedirectTo("/de".to_string())
        );
        assert_eq!(router.decide(&root(Some("FR"), None)), RoutingDecision::PassThrough);
    }
}
