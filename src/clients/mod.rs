/// Data entities for artists and tracks
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// Spotify catalog client
pub mod spotify;

pub use spotify::{SpotifyCatalog, SpotifySession};

use crate::clients::{
    entities::{ArtistRef, RawTrack},
    errors::Result,
};
use crate::config::Credentials;

/// A remote music catalog that hands out authenticated sessions.
///
/// The driver only talks to the catalog through this trait, so tests can swap
/// in an in-memory catalog that records what was asked of it.
#[allow(async_fn_in_trait)]
pub trait Catalog {
    /// Session handle produced by a successful authentication
    type Session: CatalogSession;

    /// Exchange the application's credentials for a session.
    /// A single attempt is made; rejection is reported as an authentication error.
    async fn authenticate(&self, credentials: &Credentials) -> Result<Self::Session>;
}

/// Queries available once authenticated
#[allow(async_fn_in_trait)]
pub trait CatalogSession {
    /// Look up the best match for `name`. `Ok(None)` means nothing matched.
    async fn search_artist(&self, name: &str) -> Result<Option<ArtistRef>>;

    /// Fetch the artist's top tracks in the order the catalog returns them
    async fn fetch_top_tracks(&self, artist_id: &str) -> Result<Vec<RawTrack>>;
}
