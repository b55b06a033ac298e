//! Origin allow-list check applied before any handler runs.

use piopio_types::error::RelayError;

/// Parsed allow-list of browser origins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    /// `*` was configured: every origin passes.
    Any,
    /// Exact-match list, in configuration order.
    List(Vec<String>),
}

/// Decides whether a request's declared origin may reach the handlers.
///
/// - no `Origin` header (non-browser caller) -> allowed
/// - wildcard configured -> allowed
/// - exact string match -> allowed
/// - anything else -> [`RelayError::CorsRejected`]
#[derive(Debug, Clone)]
pub struct OriginGuard {
    allowed: AllowedOrigins,
}

impl OriginGuard {
    pub fn new(allowed: AllowedOrigins) -> Self {
        Self { allowed }
    }

    pub fn allow_any() -> Self {
        Self::new(AllowedOrigins::Any)
    }

    /// Parse a comma-separated list such as `https://a.app, https://b.app`.
    ///
    /// Entries are trimmed and blanks dropped. Any `*` entry turns the
    /// guard into a wildcard. A list with no entries admits only callers
    /// that send no origin at all.
    pub fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if origins.iter().any(|o| o == "*") {
            Self::allow_any()
        } else {
            Self::new(AllowedOrigins::List(origins))
        }
    }

    pub fn allowed(&self) -> &AllowedOrigins {
        &self.allowed
    }

    pub fn is_allowed(&self, origin: Option<&str>) -> bool {
        let Some(origin) = origin else {
            return true;
        };
        match &self.allowed {
            AllowedOrigins::Any => true,
            AllowedOrigins::List(list) => list.iter().any(|o| o == origin),
        }
    }

    pub fn check(&self, origin: Option<&str>) -> Result<(), RelayError> {
        if self.is_allowed(origin) {
            Ok(())
        } else {
            Err(RelayError::CorsRejected(origin.unwrap_or_default().to_string()))
        }
    }
}
