//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the landing
//! service. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the landing service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LandingConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Prebuilt pages served behind the middleware.
    pub site: SiteConfig,

    /// Locale redirect settings.
    pub locale: LocaleConfig,

    /// Remote contact store (PostgREST endpoint).
    pub store: StoreConfig,

    /// Newsletter form messages.
    pub newsletter: NewsletterConfig,

    /// Plans, billing multipliers and call-to-action links.
    pub pricing: PricingConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    #[serde(default)]
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Static site configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory holding `index.html`, `fr/index.html` and assets.
    pub static_dir: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            static_dir: "public".to_string(),
        }
    }
}

/// Locale redirect configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Enable the root-path redirect.
    pub enabled: bool,

    /// Header carrying the edge-supplied country code.
    pub country_header: String,

    /// Country code that triggers the redirect (compared case-insensitively).
    pub country_code: String,

    /// Language tag matched against Accept-Language.
    pub language: String,

    /// Localized path to redirect root traffic to.
    pub redirect_path: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            country_header: "x-vercel-ip-country".to_string(),
            country_code: "FR".to_string(),
            language: "fr".to_string(),
            redirect_path: "/fr".to_string(),
        }
    }
}

/// Contact store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Project base URL (e.g., "https://xyz.supabase.co").
    pub base_url: String,

    /// Anonymous API key. Left empty to read it from `api_key_env`.
    pub api_key: String,

    /// Environment variable consulted when `api_key` is empty.
    pub api_key_env: String,

    /// Table receiving signups.
    pub table: String,

    /// Provenance tag written alongside every email.
    pub source: String,

    /// HTTP client timeout in seconds (0 disables it).
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:54321".to_string(),
            api_key: String::new(),
            api_key_env: "SUPABASE_ANON_KEY".to_string(),
            table: "beta_waitlist".to_string(),
            source: "get-vvault-newsletter".to_string(),
            timeout_secs: 0,
        }
    }
}

/// User-facing newsletter messages.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NewsletterConfig {
    /// Shown after a fresh registration.
    pub success_message: String,

    /// Shown when the email was already registered.
    pub duplicate_message: String,

    /// Shown on any other store failure.
    pub failure_message: String,
}

impl Default for NewsletterConfig {
    fn default() -> Self {
        Self {
            success_message: "Inscrit·e ✅ Tu recevras les updates et ressources.".to_string(),
            duplicate_message: "Déjà inscrit·e ✅".to_string(),
            failure_message: "Erreur. Réessaie dans un instant.".to_string(),
        }
    }
}

/// A single plan's list price.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct PlanConfig {
    /// Plan identifier used in signup links (e.g., "pro").
    pub id: String,

    /// Display name.
    pub name: String,

    /// Monthly price in euro cents. Zero marks a free plan.
    pub monthly_cents: u64,
}

/// Pricing and call-to-action configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Plans in display order.
    pub plans: Vec<PlanConfig>,

    /// Months charged for a year of annual billing.
    pub annual_months: u64,

    /// Months charged for lifetime access.
    pub lifetime_months: u64,

    /// Base URL of the product application.
    pub app_base_url: String,

    pub utm_source: String,
    pub utm_medium: String,
    pub utm_campaign: String,

    /// Trial tag appended to every app link.
    pub trial: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            plans: vec![
                PlanConfig {
                    id: "free".to_string(),
                    name: "Free".to_string(),
                    monthly_cents: 0,
                },
                PlanConfig {
                    id: "pro".to_string(),
                    name: "Pro".to_string(),
                    monthly_cents: 899,
                },
                PlanConfig {
                    id: "ultra".to_string(),
                    name: "Ultra".to_string(),
                    monthly_cents: 2499,
                },
            ],
            annual_months: 10,
            lifetime_months: 36,
            app_base_url: "https://vvault.app".to_string(),
            utm_source: "get.vvault.app".to_string(),
            utm_medium: "landing".to_string(),
            utm_campaign: "default".to_string(),
            trial: "pro7".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human-readable format.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 16 * 1024,
        }
    }
}
