//! Startup configuration values shared by the server and the client.
//!
//! Both values are validated when the process starts so a bad value fails
//! fast with [`TendError::Configuration`] instead of on the first request.

use std::{fmt, path::PathBuf, str::FromStr};

use url::Url;

use crate::error::{Result, TendError};

/// Environment variable holding the storage connection string.
pub const DATABASE_URL_ENV: &str = "TEND_DATABASE_URL";
/// Environment variable holding the server bind address.
pub const BIND_ENV: &str = "TEND_BIND";
/// Environment variable holding the routine API base URL.
pub const API_URL_ENV: &str = "TEND_API_URL";
/// Bind address used when none is configured.
pub const DEFAULT_BIND: &str = "127.0.0.1:5001";

/// Storage connection string: `sqlite://<path>`, `sqlite:<path>` or a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseUrl {
    path: PathBuf,
}

impl DatabaseUrl {
    /// Path of the SQLite database file.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl FromStr for DatabaseUrl {
    type Err = TendError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let path = trimmed
            .strip_prefix("sqlite://")
            .or_else(|| trimmed.strip_prefix("sqlite:"))
            .unwrap_or(trimmed);

        if path.is_empty() {
            return Err(TendError::Configuration {
                message: format!("Storage connection string '{s}' names no database file"),
            });
        }
        if path == ":memory:" {
            return Err(TendError::Configuration {
                message: "In-memory databases are not supported; each request opens its own connection"
                    .to_string(),
            });
        }
        if trimmed.contains("://") && !trimmed.starts_with("sqlite://") {
            return Err(TendError::Configuration {
                message: format!("Unsupported storage scheme in '{s}', expected sqlite://"),
            });
        }

        Ok(Self {
            path: PathBuf::from(path),
        })
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sqlite://{}", self.path.display())
    }
}

/// Base URL of the routine API, always ending in `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiUrl(Url);

impl ApiUrl {
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    pub fn into_url(self) -> Url {
        self.0
    }
}

impl FromStr for ApiUrl {
    type Err = TendError;

    fn from_str(s: &str) -> Result<Self> {
        let mut url = Url::parse(s.trim()).map_err(|e| TendError::Configuration {
            message: format!("Invalid API base URL '{s}': {e}"),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(TendError::Configuration {
                message: format!("API base URL '{s}' must use http or https"),
            });
        }
        if url.cannot_be_a_base() {
            return Err(TendError::Configuration {
                message: format!("API base URL '{s}' cannot carry paths"),
            });
        }

        // Relative joins drop the last segment unless the path ends in '/'
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self(url))
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
