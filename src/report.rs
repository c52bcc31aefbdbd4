use std::io::{BufRead, Write};

use log::{debug, info};

use crate::clients::{Catalog, CatalogSession, errors::Result};
use crate::config::{Config, Credentials};
use crate::summary::{self, Summary, Track};

const BANNER: &str = "=== ARTIST TOP TRACKS ===";
const PROMPT: &str = "Artist name: ";

/// How a successful run ended
#[derive(Debug)]
pub enum Outcome {
    /// Search returned no match (or the query was empty)
    ArtistNotFound,
    /// The artist exists but the catalog returned no tracks
    NoTracks,
    /// Full report printed
    Reported(Summary),
}

/// Drives one run: credentials, authentication, search, fetch, summary, report
pub struct Reporter<C: Catalog> {
    catalog: C,
    config: Config,
}

impl<C: Catalog> Reporter<C> {
    pub fn new(catalog: C, config: Config) -> Self {
        Reporter { catalog, config }
    }

    /// Run the whole flow. Credentials are resolved through `lookup` before the
    /// catalog is touched, so a configuration error never reaches the network.
    pub async fn run<F, R, W>(&self, lookup: F, input: &mut R, out: &mut W) -> Result<Outcome>
    where
        F: Fn(&str) -> Option<String>,
        R: BufRead,
        W: Write,
    {
        let credentials = Credentials::from_lookup(lookup)?;
        debug!("Loaded credentials for client {}", credentials.client_id);

        writeln!(out, "{BANNER}")?;

        info!("Authenticating with the catalog ...");
        let session = self.catalog.authenticate(&credentials).await?;

        let query = match &self.config.artist {
            Some(name) => name.trim().to_string(),
            None => prompt_artist(input, out)?,
        };
        if query.is_empty() {
            debug!("Empty artist query, nothing to search");
            writeln!(out, "Artist not found. Try another name.")?;
            return Ok(Outcome::ArtistNotFound);
        }

        info!("Searching for artist {query:?} ...");
        let Some(artist) = session.search_artist(&query).await? else {
            writeln!(out, "Artist not found. Try another name.")?;
            return Ok(Outcome::ArtistNotFound);
        };
        debug!("Resolved {:?} to artist id {}", artist.name, artist.id);

        writeln!(out, "Fetching top tracks for {}...", artist.name)?;
        let raw_tracks = session.fetch_top_tracks(&artist.id).await?;
        let tracks = summary::to_table(&raw_tracks);
        if tracks.is_empty() {
            writeln!(out, "No tracks could be retrieved.")?;
            return Ok(Outcome::NoTracks);
        }

        let summary = Summary::new(tracks, self.config.least_count);
        if self.config.json {
            serde_json::to_writer_pretty(&mut *out, &summary).map_err(std::io::Error::from)?;
            writeln!(out)?;
        } else {
            write_report(out, &summary)?;
        }
        info!("Report complete for {}", artist.name);
        Ok(Outcome::Reported(summary))
    }
}

fn prompt_artist<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> std::io::Result<String> {
    write!(out, "{PROMPT}")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Render the summary as plain text tables
pub fn write_report<W: Write>(out: &mut W, summary: &Summary) -> std::io::Result<()> {
    let all: Vec<(usize, &Track)> = summary.tracks.iter().enumerate().collect();
    writeln!(out, "Top {} tracks:", all.len())?;
    write_table(out, &all)?;

    let least: Vec<(usize, &Track)> = summary
        .least_popular
        .iter()
        .map(|&i| (i, &summary.tracks[i]))
        .collect();
    writeln!(out, "{} least popular:", least.len())?;
    write_table(out, &least)?;

    writeln!(out, "Quick analysis:")?;
    match summary.correlation {
        Some(corr) => {
            writeln!(out, "{}", summary.relation.describe())?;
            writeln!(out, "Correlation coefficient: {corr:.3}")?;
        }
        None => {
            writeln!(
                out,
                "No relation computable (not enough variation in the data)."
            )?;
            writeln!(out, "Correlation coefficient: n/a")?;
        }
    }
    Ok(())
}

fn write_table<W: Write>(out: &mut W, rows: &[(usize, &Track)]) -> std::io::Result<()> {
    let name_width = rows
        .iter()
        .map(|(_, t)| t.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("name".len());
    writeln!(
        out,
        "{:>3}  {:<name_width$}  {:>10}  {:>12}",
        "#", "name", "popularity", "duration_min"
    )?;
    for (index, track) in rows {
        writeln!(
            out,
            "{:>3}  {:<name_width$}  {:>10}  {:>12.2}",
            index, track.name, track.popularity, track.duration_minutes
        )?;
    }
    Ok(())
}
