//! Find float profiles near an event track, split into before/after groups.
//!
//! For every point on a track a spatial box is centered on the event
//! position and two day windows are opened, one ending at the event date
//! and one starting at it. Profiles found in each window are grouped by
//! identifier so the same water column can be compared before and after
//! the event's passage.

use crate::{
    error::{AnalysisError, FetchError, Result},
    fetch::{ProfileFetcher, TrackFetcher},
    profile::{FloatProfile, ProfileId},
    trajectory::{Track, TrackPoint},
};
use chrono::{Duration, NaiveDate};
use metfor::Meters;
use std::collections::BTreeMap;

/// Numeric fill value the data service uses for invalid measurements.
pub const SERVICE_FILL_VALUE: f64 = -999.0;

/// All profiles found within one spatio-temporal window, keyed by id.
pub type ProfileGroup = BTreeMap<ProfileId, FloatProfile>;

/// Spatio-temporal search settings for the co-location walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColocationParams {
    /// Days of temporal tolerance on each side of an event time.
    pub delta_days: i64,
    /// Full width of the search box in degrees longitude.
    pub box_width: f64,
    /// Full height of the search box in degrees latitude.
    pub box_height: f64,
    /// Measurement depth range of interest.
    pub depth_range: (Meters, Meters),
}

impl Default for ColocationParams {
    /// The suggested settings for tropical cyclones: a 0.75 degree box,
    /// profiles up to a week away on either side, upper 100 m.
    fn default() -> Self {
        ColocationParams {
            delta_days: 7,
            box_width: 0.75,
            box_height: 0.75,
            depth_range: (Meters(0.0), Meters(100.0)),
        }
    }
}

/// Axis-aligned search box centered on an event position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    center: (f64, f64),
    width: f64,
    height: f64,
}

impl BoundingBox {
    /// Build a box of the given full `width` (degrees longitude) and full
    /// `height` (degrees latitude) centered at `(lat, lon)`.
    #[inline]
    pub fn centered_at(location: (f64, f64), width: f64, height: f64) -> Self {
        BoundingBox {
            center: location,
            width,
            height,
        }
    }

    /// The box as a closed polygon of (longitude, latitude) vertices, the
    /// shape the profile service queries expect. The first vertex is
    /// repeated as the last.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use argo_colocation::BoundingBox;
    ///
    /// let bbox = BoundingBox::centered_at((10.0, -40.0), 1.0, 0.5);
    /// let polygon = bbox.polygon();
    ///
    /// assert_eq!(polygon.len(), 5);
    /// assert_eq!(polygon[0], polygon[4]);
    /// assert_eq!(polygon[0], (-40.5, 9.75));
    /// ```
    pub fn polygon(&self) -> Vec<(f64, f64)> {
        let (lat, lon) = self.center;
        let (dx, dy) = (self.width / 2.0, self.height / 2.0);

        vec![
            (lon - dx, lat - dy),
            (lon - dx, lat + dy),
            (lon + dx, lat + dy),
            (lon + dx, lat - dy),
            (lon - dx, lat - dy),
        ]
    }

    /// Whether a (longitude, latitude) position falls inside the box,
    /// boundary included.
    pub fn contains(&self, longitude: f64, latitude: f64) -> bool {
        let (lat, lon) = self.center;

        (longitude - lon).abs() <= self.width / 2.0 && (latitude - lat).abs() <= self.height / 2.0
    }
}

/// Which side of the event a search window covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowSide {
    /// The window ending at the event date.
    Before,
    /// The window starting at the event date.
    After,
}

/// A fetch failure recovered during the co-location walk.
///
/// The walk degrades a failed window to an empty group and continues; these
/// records let a caller distinguish "no profiles there" from "the query
/// never succeeded".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowFailure {
    /// Index of the track point whose window failed.
    pub point_index: usize,
    /// Side of the event the failed window covered.
    pub side: WindowSide,
    /// What the fetcher reported.
    pub error: FetchError,
}

/// Paired before/after profile groups for one track point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowPair {
    /// Profiles observed in the window ending at the event time.
    pub before: ProfileGroup,
    /// Profiles observed in the window starting at the event time.
    pub after: ProfileGroup,
}

impl WindowPair {
    /// A pair supports a paired comparison only when profiles were found
    /// on both sides of the event.
    #[inline]
    pub fn is_usable(&self) -> bool {
        !self.before.is_empty() && !self.after.is_empty()
    }
}

/// Output of [`colocate`]: one [`WindowPair`] per track point, in track
/// order, plus the fetch failures recovered along the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Colocation {
    pairs: Vec<WindowPair>,
    failures: Vec<WindowFailure>,
}

impl Colocation {
    /// The before/after pairs, parallel to the track points.
    #[inline]
    pub fn pairs(&self) -> &[WindowPair] {
        &self.pairs
    }

    /// Number of pairs, always equal to the track length.
    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether there are no pairs at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The pairs with profiles on both sides of the event, with their track
    /// point indexes.
    pub fn usable_pairs(&self) -> impl Iterator<Item = (usize, &WindowPair)> + '_ {
        self.pairs
            .iter()
            .enumerate()
            .filter(|(_, pair)| pair.is_usable())
    }

    /// The fetch failures recovered during the walk, empty on a clean run.
    #[inline]
    pub fn failures(&self) -> &[WindowFailure] {
        &self.failures
    }
}

/// Deduplicate raw fetch results by profile id and scrub the service fill
/// value, producing a group ready for paired comparison.
///
/// The service can return repeated fragments for the same profile within a
/// window; the first occurrence wins. Running this over an already grouped
/// collection changes nothing.
pub fn group_by_id<I>(profiles: I) -> ProfileGroup
where
    I: IntoIterator<Item = FloatProfile>,
{
    let mut group = ProfileGroup::new();

    for profile in profiles {
        let id = profile.id();
        group
            .entry(id)
            .or_insert_with(|| profile.scrub_fill_value(SERVICE_FILL_VALUE));
    }

    group
}

/// Co-locate float profiles along an event track.
///
/// For each track point two queries are issued against `fetcher`: a
/// "before" window covering `delta_days` days up to the event date and an
/// "after" window covering `delta_days` days from it, both over an
/// identical box centered on the event position. Both windows are closed
/// and share the event date, so a profile observed on that date can appear
/// in both groups; this mirrors the service's day-granular query contract.
///
/// A fetch failure for one window yields an empty group for that side and
/// is recorded on the result (and logged); the walk always completes and
/// the result always has exactly one pair per track point.
pub fn colocate<F>(track: &Track, params: ColocationParams, fetcher: &F) -> Colocation
where
    F: ProfileFetcher + ?Sized,
{
    let mut pairs = Vec::with_capacity(track.len());
    let mut failures = Vec::new();

    for (point_index, point) in track.points().iter().enumerate() {
        let bbox = BoundingBox::centered_at(point.location, params.box_width, params.box_height);
        let polygon = bbox.polygon();

        let mut pair = WindowPair::default();
        for &side in &[WindowSide::Before, WindowSide::After] {
            let (start, end) = window_dates(point, params.delta_days, side);

            match fetcher.profiles_in_region(start, end, &polygon, params.depth_range) {
                Ok(raw) => {
                    let group = group_by_id(raw);
                    match side {
                        WindowSide::Before => pair.before = group,
                        WindowSide::After => pair.after = group,
                    }
                }
                Err(error) => {
                    log::warn!(
                        "profile fetch failed at track point {} ({:?} window): {}",
                        point_index,
                        side,
                        error
                    );
                    failures.push(WindowFailure {
                        point_index,
                        side,
                        error,
                    });
                }
            }
        }

        pairs.push(pair);
    }

    Colocation { pairs, failures }
}

// Day-granular window boundaries, the resolution the service queries at.
fn window_dates(point: &TrackPoint, delta_days: i64, side: WindowSide) -> (NaiveDate, NaiveDate) {
    match side {
        WindowSide::Before => (
            (point.time - Duration::days(delta_days)).date(),
            point.time.date(),
        ),
        WindowSide::After => (
            point.time.date(),
            (point.time + Duration::days(delta_days)).date(),
        ),
    }
}

/// Fetch the track for a named storm and co-locate profiles along it.
///
/// Unlike the per-window failures inside the walk, failing to obtain the
/// track itself leaves nothing to analyze and is returned as an error.
pub fn colocate_storm<T, F>(
    name: &str,
    year: i32,
    tracks: &T,
    profiles: &F,
    params: ColocationParams,
) -> Result<(Track, Colocation)>
where
    T: TrackFetcher + ?Sized,
    F: ProfileFetcher + ?Sized,
{
    let mut found = tracks.tracks_by_name_year(name, year)?;

    if found.is_empty() {
        return Err(AnalysisError::NoSuchStorm {
            name: name.to_owned(),
            year,
        });
    }
    let track = found.swap_remove(0);

    let colocation = colocate(&track, params, profiles);
    Ok((track, colocation))
}
