//! Endpoint configuration for the interpretation service.

use std::time::Duration;

/// Default base URL: the functions path of a local Netlify dev server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8888/.netlify/functions";

/// Where and how to reach the interpretation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleConfig {
    /// Endpoint for the concise interpretation.
    pub concise_url: String,
    /// Endpoint for the detailed advice.
    pub detailed_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self::from_base(DEFAULT_BASE_URL)
    }
}

impl OracleConfig {
    /// Derive both endpoints from a base URL.
    pub fn from_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            concise_url: format!("{base}/getConciseInterpretation"),
            detailed_url: format!("{base}/getDetailedAdvice"),
            timeout: Duration::from_secs(60),
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the concise endpoint.
    pub fn with_concise_url(mut self, url: impl Into<String>) -> Self {
        self.concise_url = url.into();
        self
    }

    /// Override the detailed endpoint.
    pub fn with_detailed_url(mut self, url: impl Into<String>) -> Self {
        self.detailed_url = url.into();
        self
    }
}
