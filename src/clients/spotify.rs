use log::debug;

use crate::clients::{
    Catalog, CatalogSession,
    entities::{ArtistRef, RawTrack},
    errors::{Error, Result},
};
use crate::config::Credentials;
use rspotify::{
    ClientCredsSpotify, Credentials as SpotifyCredentials,
    model::{ArtistId, Country, FullTrack, Market, SearchResult, SearchType},
    prelude::*,
};

impl TryFrom<FullTrack> for RawTrack {
    type Error = Error;

    fn try_from(t: FullTrack) -> Result<RawTrack> {
        let duration_ms = t.duration.num_milliseconds();
        RawTrack::validated(t.name, t.popularity, duration_ms)
    }
}

/// Spotify Web API catalog using the client-credentials grant
pub struct SpotifyCatalog {
    market: Country,
}

impl SpotifyCatalog {
    pub fn new(market: Country) -> Self {
        SpotifyCatalog { market }
    }
}

impl Catalog for SpotifyCatalog {
    type Session = SpotifySession;

    async fn authenticate(&self, credentials: &Credentials) -> Result<SpotifySession> {
        debug!("Requesting client-credentials token ...");
        let creds = SpotifyCredentials::new(&credentials.client_id, &credentials.client_secret);
        let spotify = ClientCredsSpotify::new(creds);
        spotify
            .request_token()
            .await
            .map_err(|e| Error::AuthenticationError(e.to_string()))?;
        debug!("Obtained Spotify access token");
        Ok(SpotifySession {
            spotify,
            market: self.market,
        })
    }
}

/// Authenticated Spotify client. The token is not refreshed; a run is far
/// shorter than its lifetime.
pub struct SpotifySession {
    spotify: ClientCredsSpotify,
    market: Country,
}

impl CatalogSession for SpotifySession {
    async fn search_artist(&self, name: &str) -> Result<Option<ArtistRef>> {
        let result = self
            .spotify
            .search(name, SearchType::Artist, None, None, Some(1), None)
            .await?;
        let page = match result {
            SearchResult::Artists(page) => page,
            other => {
                return Err(Error::CatalogApiError(format!(
                    "artist search returned unexpected result kind: {other:?}"
                )));
            }
        };
        debug!("Artist search for {name:?} returned {} items", page.items.len());
        Ok(page.items.into_iter().next().map(|artist| ArtistRef {
            id: artist.id.id().to_string(),
            name: name.to_string(),
        }))
    }

    async fn fetch_top_tracks(&self, artist_id: &str) -> Result<Vec<RawTrack>> {
        let id = ArtistId::from_id(artist_id)?;
        let tracks = self
            .spotify
            .artist_top_tracks(id, Some(Market::Country(self.market)))
            .await?;
        debug!("Fetched {} top tracks for artist {artist_id}", tracks.len());
        tracks.into_iter().map(RawTrack::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_track(popularity: i64, duration_ms: i64) -> FullTrack {
        let json = serde_json::json!({
            "album": {
                "album_type": "album",
                "artists": [],
                "available_markets": [],
                "external_urls": {},
                "href": null,
                "id": "4aawyAB9vmqN3uQ7FjRGTy",
                "images": [],
                "name": "Some Album",
                "release_date": "2020-01-01",
                "release_date_precision": "day"
            },
            "artists": [{
                "external_urls": {},
                "href": null,
                "id": "0TnOYISbd1XYRBk9myaseg",
                "name": "Some Artist"
            }],
            "available_markets": [],
            "disc_number": 1,
            "duration_ms": duration_ms,
            "explicit": false,
            "external_ids": {},
            "external_urls": {},
            "href": null,
            "id": "6rqhFgbbKwnb9MLmUQDhG6",
            "is_local": false,
            "name": "Some Track",
            "popularity": popularity,
            "preview_url": null,
            "track_number": 1,
            "type": "track"
        });
        serde_json::from_str(&json.to_string()).unwrap()
    }

    #[test]
    fn converts_catalog_track() {
        let raw = RawTrack::try_from(full_track(73, 185_500)).unwrap();
        assert_eq!(
            raw,
            RawTrack {
                name: "Some Track".into(),
                popularity: 73,
                duration_ms: 185_500,
            }
        );
    }

    #[test]
    fn rejects_catalog_track_with_bad_popularity() {
        let err = RawTrack::try_from(full_track(150, 185_500)).unwrap_err();
        assert!(matches!(err, Error::CatalogApiError(msg) if msg.contains("150")));
    }
}
