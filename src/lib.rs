//! Trackstat - summarize an artist's top tracks on Spotify
//!
//! Looks up an artist by name, fetches their top tracks and reports the least
//! popular ones along with how track length relates to popularity.

/// Client modules for interacting with the music catalog
pub mod clients;
/// Credentials and run settings
pub mod config;
/// Run driver and console rendering
pub mod report;
/// Track table and statistics
pub mod summary;
