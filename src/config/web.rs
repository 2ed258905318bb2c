//! # HTTP and CORS Configuration
//!
//! Listener address, request body limit, and the cross-origin policy used
//! by [`build_cors`](crate::web::cors::build_cors).
//!
//! # Examples
//! ```rust
//! use varsityhub_api::config::web::{CorsConfig, HttpConfig};
//!
//! let http = HttpConfig::from_provider(|_| None);
//! assert_eq!(http.port, 4000);
//!
//! let cors = CorsConfig::from_provider(|_| Some("https://app.example, *".into()));
//! assert!(cors.allows_any_origin());
//! ```

use crate::config::env::{read_list_from, read_string_or_from, read_u32_from};

/// HTTP listener configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
    pub max_body_bytes: usize,
}

impl HttpConfig {
    /// Reads `HOST`, `PORT`, `HTTP_MAX_BODY_BYTES` and `HTTP_MAX_BODY_MB`.
    ///
    /// `HTTP_MAX_BODY_BYTES` wins over `HTTP_MAX_BODY_MB` (default 5 MB).
    pub fn from_provider<F>(provider: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = read_string_or_from(&provider, "HOST", "0.0.0.0");
        let port = provider("PORT")
            .and_then(|s| s.trim().parse::<u16>().ok())
            .unwrap_or(4000);
        let max_body_bytes = provider("HTTP_MAX_BODY_BYTES")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or_else(|| {
                (read_u32_from(&provider, "HTTP_MAX_BODY_MB", 5) as usize).saturating_mul(1024 * 1024)
            });

        Self {
            host,
            port,
            max_body_bytes,
        }
    }

    /// `host:port`, suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Cross-Origin Resource Sharing policy. Credentialed requests are never
/// allowed; clients authenticate with the `Authorization` header.
#[derive(Clone, Debug, PartialEq)]
pub struct CorsConfig {
    /// Allowed origins. Empty, or containing `*`, means any origin.
    pub origins: Vec<String>,
}

impl CorsConfig {
    /// Reads `ALLOWED_ORIGINS`.
    pub fn from_provider<F>(provider: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            origins: read_list_from(&provider, "ALLOWED_ORIGINS"),
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.origins.is_empty() || self.origins.iter().any(|o| o == "*")
    }
}
