//! Store credentials loaded from environment variables.
//!
//! `SUPABASE_URL` and `SUPABASE_PUBLISHABLE_KEY` are required;
//! `SUPABASE_SCHEMA` defaults to `app`. Blank values count as missing.
//! The lookup is injectable so tests never touch the process environment.

use crate::errors::{Error, Result};
use std::fmt;

pub const URL_VAR: &str = "SUPABASE_URL";
pub const KEY_VAR: &str = "SUPABASE_PUBLISHABLE_KEY";
pub const SCHEMA_VAR: &str = "SUPABASE_SCHEMA";
pub const DEFAULT_SCHEMA: &str = "app";

/// Which backend the endpoint URL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    /// `http://` or `https://` REST endpoint
    Rest,
    /// `postgres://`, `postgresql://` or `sqlite:` database URL
    Sql,
}

#[derive(Clone, PartialEq, Eq)]
pub struct StoreCredentials {
    pub url: String,
    pub api_key: String,
    pub schema: String,
}

// The key stays out of logs.
impl fmt::Debug for StoreCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreCredentials")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .field("schema", &self.schema)
            .finish()
    }
}

impl StoreCredentials {
    /// Reads the credentials through `lookup`.
    ///
    /// # Errors
    /// Returns `Error::MissingCredential` naming the first missing variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required = |name: &str| {
            read(name).ok_or_else(|| Error::MissingCredential {
                name: name.to_string(),
            })
        };

        Ok(Self {
            url: required(URL_VAR)?,
            api_key: required(KEY_VAR)?,
            schema: read(SCHEMA_VAR).unwrap_or_else(|| DEFAULT_SCHEMA.to_string()),
        })
    }

    /// Reads the credentials from the process environment.
    ///
    /// # Errors
    /// Returns `Error::MissingCredential` naming the first missing variable.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Classifies the endpoint URL by scheme.
    ///
    /// # Errors
    /// Returns `Error::Config` for a scheme no backend understands.
    pub fn endpoint_kind(&self) -> Result<EndpointKind> {
        let url = self.url.trim().to_lowercase();
        if url.starts_with("https://") || url.starts_with("http://") {
            Ok(EndpointKind::Rest)
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("sqlite:")
        {
            Ok(EndpointKind::Sql)
        } else {
            Err(Error::Config {
                message: format!("{URL_VAR} has an unsupported scheme: {}", self.url),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_schema_defaults_to_app() {
        let creds = StoreCredentials::from_lookup(lookup(&[
            (URL_VAR, "https://demo.supabase.co"),
            (KEY_VAR, "pk"),
        ]))
        .unwrap();
        assert_eq!(creds.schema, "app");
        assert_eq!(creds.endpoint_kind().unwrap(), EndpointKind::Rest);
    }

    #[test]
    fn test_missing_url_is_named() {
        let err = StoreCredentials::from_lookup(lookup(&[(KEY_VAR, "pk")])).unwrap_err();
        assert!(matches!(err, Error::MissingCredential { name } if name == URL_VAR));
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let err = StoreCredentials::from_lookup(lookup(&[
            (URL_VAR, "https://demo.supabase.co"),
            (KEY_VAR, "  "),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::MissingCredential { name } if name == KEY_VAR));
    }

    #[test]
    fn test_database_urls_select_sql_backend() {
        for url in ["postgres://u:p@localhost/db", "sqlite::memory:"] {
            let creds = StoreCredentials::from_lookup(lookup(&[
                (URL_VAR, url),
                (KEY_VAR, "pk"),
                (SCHEMA_VAR, "retail"),
            ]))
            .unwrap();
            assert_eq!(creds.endpoint_kind().unwrap(), EndpointKind::Sql);
            assert_eq!(creds.schema, "retail");
        }
    }

    #[test]
    fn test_unknown_scheme_is_config_error() {
        let creds = StoreCredentials {
            url: "ftp://example.com".to_string(),
            api_key: "pk".to_string(),
            schema: DEFAULT_SCHEMA.to_string(),
        };
        assert!(matches!(creds.endpoint_kind(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_debug_redacts_key() {
        let creds = StoreCredentials {
            url: "https://demo.supabase.co".to_string(),
            api_key: "secret-key".to_string(),
            schema: DEFAULT_SCHEMA.to_string(),
        };
        assert!(!format!("{creds:?}").contains("secret-key"));
    }
}
