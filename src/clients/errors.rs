use rspotify::ClientError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    #[error("Catalog API error: {0}")]
    CatalogApiError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<ClientError> for Error {
    fn from(err: ClientError) -> Self {
        Error::CatalogApiError(err.to_string())
    }
}

impl From<rspotify::model::IdError> for Error {
    fn from(err: rspotify::model::IdError) -> Self {
        Error::CatalogApiError(format!("invalid catalog id: {err}"))
    }
}
