//! Client configuration loaded from environment variables.
//!
//! Every setting has a default so the client runs against a local backend
//! with no configuration at all.

use presenty_shared::constants::{DEFAULT_API_URL, DEFAULT_DIVISIONS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every backend path is appended to, without trailing `/`.
    /// Env: `PRESENTY_API_URL`
    /// Default: `http://localhost:5000/api`
    pub api_base_url: String,

    /// Divisions a teacher can issue codes for and browse history of.
    /// Env: `PRESENTY_DIVISIONS` (comma separated)
    /// Default: `A,B`
    pub divisions: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            divisions: DEFAULT_DIVISIONS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("PRESENTY_API_URL") {
            let url = url.trim().trim_end_matches('/');
            if url.starts_with("http://") || url.starts_with("https://") {
                config.api_base_url = url.to_string();
            } else {
                tracing::warn!(value = %url, "Invalid PRESENTY_API_URL, using default");
            }
        }

        if let Some(raw) = lookup("PRESENTY_DIVISIONS") {
            let divisions = parse_divisions(&raw);
            if divisions.is_empty() {
                tracing::warn!(value = %raw, "Empty PRESENTY_DIVISIONS, using default");
            } else {
                config.divisions = divisions;
            }
        }

        config
    }

    pub fn allows_division(&self, division: &str) -> bool {
        self.divisions.iter().any(|d| d == division)
    }
}

fn parse_divisions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect()
}
