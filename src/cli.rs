use std::io;

use clap::Parser;
use log::info;
use trackstat::clients::{SpotifyCatalog, errors::Result};
use trackstat::config::{ConfigBuilder, env_lookup};
use trackstat::report::{Outcome, Reporter};

#[derive(Parser)]
#[command(name = "trackstat")]
#[command(version, about = "Summarize an artist's top tracks on Spotify", long_about = None)]
struct Cli {
    /// Artist to look up; prompted for when omitted
    #[arg(short, long)]
    artist: Option<String>,

    /// Market (ISO 3166-1 alpha-2) used for the top tracks request
    #[arg(short, long, default_value = "US")]
    market: String,

    /// How many of the least popular tracks to list
    #[arg(short, long, default_value_t = 3)]
    least: usize,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut builder = ConfigBuilder::new()
        .market(cli.market)
        .least_count(cli.least)
        .json(cli.json);
    if let Some(artist) = cli.artist {
        builder = builder.artist(artist);
    }
    let config = builder.build()?;

    let reporter = Reporter::new(SpotifyCatalog::new(config.market), config);
    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let outcome = reporter
        .run(env_lookup, &mut stdin, &mut stdout)
        .await?;

    match outcome {
        Outcome::ArtistNotFound => info!("No matching artist, nothing to report"),
        Outcome::NoTracks => info!("Artist has no top tracks, nothing to report"),
        Outcome::Reported(summary) => info!("Summarized {} tracks", summary.tracks.len()),
    }
    Ok(())
}
