//! Server configuration, loaded from environment variables at startup.

use std::time::Duration;

use convgate_core::batch::{DEFAULT_MAX_FILES, DEFAULT_MAX_TOTAL_BYTES};
use convgate_core::currency::{DEFAULT_RATES_URL, DEFAULT_TIMEOUT};
use convgate_core::resize::DEFAULT_MAX_DIMENSION;
use convgate_core::ConversionLimits;

/// Room for multipart boundaries and part headers on top of the payload cap.
const MULTIPART_SLACK_BYTES: u64 = 1024 * 1024;

/// Runtime configuration for convgate-server.
///
/// Every field has a sensible default so the server works out-of-the-box
/// without any environment variables set.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:8000"`).
    pub bind_address: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Maximum number of files in one batch conversion.
    pub max_files: usize,

    /// Maximum summed size of the files in one upload, in bytes.
    pub max_total_bytes: u64,

    /// Largest accepted width or height for resize.
    pub max_resize_dimension: u32,

    /// Base URL of the exchange-rate service; the currency code is appended.
    pub rates_url: String,

    /// Timeout for one rate lookup.
    pub rates_timeout: Duration,

    /// Comma-separated list of allowed CORS origins. `None` allows any origin.
    pub cors_allowed_origins: Option<String>,

    /// Serve Swagger UI and the OpenAPI document.
    pub enable_swagger: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());
        let max_total_mb: u64 =
            parse_or(lookup("CONVGATE_MAX_TOTAL_MB"), DEFAULT_MAX_TOTAL_BYTES / (1024 * 1024));

        Self {
            bind_address: env_or("CONVGATE_BIND", "0.0.0.0:8000"),
            log_level: env_or("CONVGATE_LOG", "info"),
            log_json: lookup("CONVGATE_LOG_JSON").map(|v| is_truthy(&v)).unwrap_or(false),
            max_files: parse_or(lookup("CONVGATE_MAX_FILES"), DEFAULT_MAX_FILES),
            max_total_bytes: max_total_mb.saturating_mul(1024 * 1024),
            max_resize_dimension: parse_or(
                lookup("CONVGATE_MAX_RESIZE_DIMENSION"),
                DEFAULT_MAX_DIMENSION,
            ),
            rates_url: env_or("CONVGATE_RATES_URL", DEFAULT_RATES_URL),
            rates_timeout: Duration::from_secs(parse_or(
                lookup("CONVGATE_RATES_TIMEOUT_SECS"),
                DEFAULT_TIMEOUT.as_secs(),
            )),
            cors_allowed_origins: lookup("CONVGATE_CORS_ORIGINS").filter(|s| !s.trim().is_empty()),
            enable_swagger: lookup("CONVGATE_ENABLE_SWAGGER").map(|v| is_truthy(&v)).unwrap_or(true),
        }
    }

    pub fn limits(&self) -> ConversionLimits {
        ConversionLimits { max_files: self.max_files, max_total_bytes: self.max_total_bytes }
    }

    /// Request body cap handed to axum's `DefaultBodyLimit`.
    pub fn body_limit(&self) -> usize {
        usize::try_from(self.max_total_bytes.saturating_add(MULTIPART_SLACK_BYTES))
            .unwrap_or(usize::MAX)
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn is_truthy(v: &str) -> bool {
    v == "1" || v.eq_ignore_ascii_case("true")
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}
