//! Turns raw catalog tracks into a small table and the statistics printed in the report.

use serde::Serialize;

use crate::clients::entities::RawTrack;

/// Number of tracks kept from the catalog response
pub const MAX_TRACKS: usize = 10;

/// Correlation magnitude above which a relation is reported
pub const RELATION_THRESHOLD: f64 = 0.2;

const MS_PER_MINUTE: f64 = 60_000.0;

/// One row of the summary table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    pub name: String,
    pub popularity: u32,
    pub duration_minutes: f64,
}

impl From<&RawTrack> for Track {
    fn from(raw: &RawTrack) -> Self {
        Track {
            name: raw.name.clone(),
            popularity: raw.popularity,
            duration_minutes: ms_to_minutes(raw.duration_ms),
        }
    }
}

/// Milliseconds to minutes, rounded to two decimals (ties away from zero)
#[allow(clippy::cast_precision_loss)]
pub fn ms_to_minutes(ms: i64) -> f64 {
    (ms as f64 / MS_PER_MINUTE * 100.0).round() / 100.0
}

/// Keep the first [`MAX_TRACKS`] records, in catalog order
pub fn to_table(raw_tracks: &[RawTrack]) -> Vec<Track> {
    raw_tracks.iter().take(MAX_TRACKS).map(Track::from).collect()
}

/// The `n` least popular tracks, ascending, ties kept in input order.
/// Each entry carries its position in `tracks`.
pub fn least_popular(tracks: &[Track], n: usize) -> Vec<(usize, &Track)> {
    let mut indexed: Vec<(usize, &Track)> = tracks.iter().enumerate().collect();
    // sort_by_key is stable
    indexed.sort_by_key(|(_, t)| t.popularity);
    indexed.truncate(n);
    indexed
}

/// Pearson correlation between duration and popularity.
///
/// Returns `None` when the coefficient is undefined: fewer than two tracks, or
/// either column has zero variance.
pub fn duration_popularity_correlation(tracks: &[Track]) -> Option<f64> {
    if tracks.len() < 2 {
        return None;
    }
    let xs: Vec<f64> = tracks.iter().map(|t| t.duration_minutes).collect();
    let ys: Vec<f64> = tracks.iter().map(|t| f64::from(t.popularity)).collect();
    pearson(&xs, &ys)
}

#[allow(clippy::cast_precision_loss)]
fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x <= f64::EPSILON || var_y <= f64::EPSILON {
        return None;
    }
    Some((cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0))
}

/// Qualitative reading of the duration/popularity correlation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Relation {
    LongerMorePopular,
    ShorterMorePopular,
    NoClearRelation,
}

impl Relation {
    pub fn describe(self) -> &'static str {
        match self {
            Relation::LongerMorePopular => "Longer tracks tend to be more popular.",
            Relation::ShorterMorePopular => "Shorter tracks tend to be more popular.",
            Relation::NoClearRelation => "No clear relation between duration and popularity.",
        }
    }
}

/// Strict thresholds: exactly +/-0.2 is not a relation. NaN falls through to none.
pub fn classify_relation(corr: f64) -> Relation {
    if corr > RELATION_THRESHOLD {
        Relation::LongerMorePopular
    } else if corr < -RELATION_THRESHOLD {
        Relation::ShorterMorePopular
    } else {
        Relation::NoClearRelation
    }
}

/// Everything the report prints, computed from one immutable track table
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub tracks: Vec<Track>,
    pub least_popular: Vec<usize>,
    pub correlation: Option<f64>,
    pub relation: Relation,
}

impl Summary {
    pub fn new(tracks: Vec<Track>, least_count: usize) -> Self {
        let least_popular = least_popular(&tracks, least_count)
            .into_iter()
            .map(|(i, _)| i)
            .collect();
        let correlation = duration_popularity_correlation(&tracks);
        let relation = correlation.map_or(Relation::NoClearRelation, classify_relation);
        Summary {
            tracks,
            least_popular,
            correlation,
            relation,
        }
    }
}
