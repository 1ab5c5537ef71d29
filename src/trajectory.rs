//! Data types and methods to store an event track, e.g. a tropical cyclone.

use chrono::NaiveDateTime;
use metfor::Knots;
use optional::Optioned;

/// Tag the data service embeds in the id of southern-hemisphere storm
/// records, which live in a separate (still developing) database from the
/// tropical-cyclone records.
pub const SOUTHERN_HEMISPHERE_TAG: &str = "SH_FILT";

/// One time-stamped sample along an event track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPoint {
    /// Observation time of this track sample.
    pub time: NaiveDateTime,
    /// Latitude and longitude in degrees.
    pub location: (f64, f64),
    /// Maximum sustained winds, when reported.
    pub wind: Optioned<Knots>,
}

/// A time-ordered sequence of an event's observed positions and intensity.
///
/// Immutable once fetched; the co-location walk only reads it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    id: String,
    name: Option<String>,
    year: Optioned<i32>,
    points: Vec<TrackPoint>,
}

impl Track {
    /// Create a new track with the service-assigned id and no points.
    #[inline]
    pub fn new<S>(id: S) -> Self
    where
        S: Into<String>,
    {
        Track {
            id: id.into(),
            ..Track::default()
        }
    }

    /// Builder method for the human storm name, all lower case for named
    /// tropical cyclones.
    #[inline]
    pub fn with_name<S>(mut self, name: S) -> Self
    where
        Option<String>: From<S>,
    {
        self.name = Option::from(name);
        self
    }

    /// Builder method for the storm season year.
    #[inline]
    pub fn with_year<T>(mut self, year: T) -> Self
    where
        Optioned<i32>: From<T>,
    {
        self.year = Optioned::from(year);
        self
    }

    /// Builder method for the track samples, in time order.
    #[inline]
    pub fn with_points(mut self, points: Vec<TrackPoint>) -> Self {
        self.points = points;
        self
    }

    /// The service-assigned track id.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The human storm name, if this is a named system.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The storm season year.
    #[inline]
    pub fn year(&self) -> Optioned<i32> {
        self.year
    }

    /// The track samples, in time order.
    #[inline]
    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    /// Number of track samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the track has no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether this record comes from the southern-hemisphere storm
    /// database rather than the tropical-cyclone one.
    #[inline]
    pub fn is_southern_storm(&self) -> bool {
        self.id.contains(SOUTHERN_HEMISPHERE_TAG)
    }
}

/// The tracks that carry a storm name, the way the service reports named
/// systems. Useful for listing candidate storms for an analysis.
pub fn named_storms(tracks: &[Track]) -> impl Iterator<Item = &Track> + '_ {
    tracks.iter().filter(|track| track.name().is_some())
}
