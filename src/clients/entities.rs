use crate::clients::errors::{Error, Result};

/// Highest popularity score the catalog assigns
pub const MAX_POPULARITY: u32 = 100;

/// Artist picked from a catalog search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistRef {
    pub id: String,
    pub name: String, // the query term, not the catalog's spelling
}

/// Track as returned by the catalog, validated but not yet summarized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTrack {
    pub name: String,
    pub popularity: u32,
    pub duration_ms: i64,
}

impl RawTrack {
    /// Check the fields the summary relies on before accepting a record
    pub fn validated(name: String, popularity: u32, duration_ms: i64) -> Result<Self> {
        if popularity > MAX_POPULARITY {
            return Err(Error::CatalogApiError(format!(
                "track {name:?} has popularity {popularity} outside 0-{MAX_POPULARITY}"
            )));
        }
        if duration_ms < 0 {
            return Err(Error::CatalogApiError(format!(
                "track {name:?} has negative duration {duration_ms}ms"
            )));
        }
        Ok(RawTrack {
            name,
            popularity,
            duration_ms,
        })
    }
}
