use log::debug;
use rspotify::model::Country;

use crate::clients::errors::{Error, Result};

/// Environment variable holding the application's client id
pub const CLIENT_ID_VAR: &str = "CLIENT_ID";
/// Environment variable holding the application's client secret
pub const CLIENT_SECRET_VAR: &str = "CLIENT_SECRET";

const DEFAULT_MARKET: &str = "US";
const DEFAULT_LEAST_COUNT: usize = 3;

/// Application credentials for the client-credentials grant
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

// Keep the secret out of logs
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

impl Credentials {
    /// Build credentials from an arbitrary key lookup.
    /// Missing, empty and whitespace-only values are all rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| {
                    Error::ConfigurationError(format!(
                        "{key} is not set. Define it in the environment or in a .env file."
                    ))
                })
        };
        let client_id = read(CLIENT_ID_VAR)?;
        let client_secret = read(CLIENT_SECRET_VAR)?;
        Ok(Credentials {
            client_id,
            client_secret,
        })
    }
}

/// Load a `.env` file from the working directory (or a parent) into the
/// process environment. A missing file is not an error; anything else is.
pub fn load_dotenv() -> Result<()> {
    dotenv_outcome(dotenvy::dotenv())
}

fn dotenv_outcome<T>(result: std::result::Result<T, dotenvy::Error>) -> Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => {
            debug!("No .env file found, using the process environment only");
            Ok(())
        }
        Err(e) => Err(Error::ConfigurationError(format!(
            "Failed to load .env file: {e}"
        ))),
    }
}

/// Lookup backed by the process environment; non-unicode values count as unset
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Parse an ISO 3166-1 alpha-2 market code such as `US` or `de`
pub fn parse_market(code: &str) -> Result<Country> {
    let normalized = code.trim().to_uppercase();
    serde_json::from_value(serde_json::Value::String(normalized.clone()))
        .map_err(|_| Error::ConfigurationError(format!("Unknown market code: {normalized:?}")))
}

/// Settings for a single report run
#[derive(Debug, Clone)]
pub struct Config {
    pub market: Country,
    pub least_count: usize,
    pub artist: Option<String>,
    pub json: bool,
}

pub struct ConfigBuilder {
    market: Option<String>,
    least_count: Option<usize>,
    artist: Option<String>,
    json: bool,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            market: None,
            least_count: None,
            artist: None,
            json: false,
        }
    }

    #[must_use]
    pub fn market(mut self, code: impl Into<String>) -> Self {
        self.market = Some(code.into());
        self
    }

    #[must_use]
    pub fn least_count(mut self, n: usize) -> Self {
        self.least_count = Some(n);
        self
    }

    /// Preset artist name; skips the interactive prompt
    #[must_use]
    pub fn artist(mut self, name: impl Into<String>) -> Self {
        self.artist = Some(name.into());
        self
    }

    /// Print the summary as JSON instead of text tables
    #[must_use]
    pub fn json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }

    pub fn build(self) -> Result<Config> {
        let market = parse_market(self.market.as_deref().unwrap_or(DEFAULT_MARKET))?;
        let config = Config {
            market,
            least_count: self.least_count.unwrap_or(DEFAULT_LEAST_COUNT),
            artist: self.artist,
            json: self.json,
        };
        debug!("Built config: {config:?}");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn loads_both_values() {
        let creds = Credentials::from_lookup(lookup_from(&[
            ("CLIENT_ID", "abc"),
            ("CLIENT_SECRET", " s3cret \n"),
        ]))
        .unwrap();
        assert_eq!(creds.client_id, "abc");
        assert_eq!(creds.client_secret, "s3cret");
    }

    #[test]
    fn missing_secret_is_configuration_error() {
        let err = Credentials::from_lookup(lookup_from(&[("CLIENT_ID", "abc")])).unwrap_err();
        match err {
            Error::ConfigurationError(msg) => assert!(msg.contains("CLIENT_SECRET")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_id_is_configuration_error() {
        let err = Credentials::from_lookup(lookup_from(&[
            ("CLIENT_ID", "   "),
            ("CLIENT_SECRET", "s3cret"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::ConfigurationError(msg) if msg.contains("CLIENT_ID")));
    }

    #[test]
    fn debug_output_hides_secret() {
        let creds = Credentials {
            client_id: "abc".into(),
            client_secret: "s3cret".into(),
        };
        let shown = format!("{creds:?}");
        assert!(shown.contains("abc"));
        assert!(!shown.contains("s3cret"));
    }

    #[test]
    fn missing_dotenv_file_is_ignored() {
        let missing = dotenvy::Error::Io(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(dotenv_outcome::<()>(Err(missing)).is_ok());
    }

    #[test]
    fn malformed_dotenv_file_is_configuration_error() {
        let parsed = dotenvy::from_read_iter("BAD LINE WITHOUT EQUALS\n".as_bytes())
            .collect::<std::result::Result<Vec<(String, String)>, dotenvy::Error>>();
        let err = dotenv_outcome(parsed).unwrap_err();
        assert!(matches!(err, Error::ConfigurationError(msg) if msg.contains(".env")));
    }

    #[test]
    fn unreadable_dotenv_file_is_configuration_error() {
        let denied = dotenvy::Error::Io(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        assert!(matches!(
            dotenv_outcome::<()>(Err(denied)),
            Err(Error::ConfigurationError(_))
        ));
    }

    #[test]
    fn builder_defaults() {
        let config = ConfigBuilder::new().build().unwrap();
        assert_eq!(config.market, Country::UnitedStates);
        assert_eq!(config.least_count, 3);
        assert!(config.artist.is_none());
        assert!(!config.json);
    }

    #[test]
    fn market_code_is_case_insensitive() {
        assert_eq!(parse_market("de").unwrap(), Country::Germany);
    }

    #[test]
    fn unknown_market_is_rejected() {
        let err = ConfigBuilder::new().market("XX").build().unwrap_err();
        assert!(matches!(err, Error::ConfigurationError(_)));
    }
}
