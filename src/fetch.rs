//! Abstract interfaces to the remote oceanographic data service.
//!
//! The core of the crate never builds URLs or parses JSON; it drives these
//! capabilities and treats any failure they report as "no data for this
//! query" (see [`colocate`](crate::colocate)). Implementations own the
//! endpoint layout, payload parsing, and a bounded per-request timeout,
//! surfacing any expiry as [`FetchError::Transport`].

use crate::{error::FetchError, profile::FloatProfile, trajectory::Track};
use chrono::NaiveDate;
use metfor::Meters;

/// One scattered sample of a gridded scalar field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSample {
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Field value at this point, e.g. sea-ice fraction in [0, 1].
    pub value: f64,
}

/// Access to event-track data.
pub trait TrackFetcher {
    /// Storm tracks matching a (lower case) name and season year.
    fn tracks_by_name_year(&self, name: &str, year: i32) -> Result<Vec<Track>, FetchError>;

    /// All tracks overlapping the closed date range.
    fn tracks_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Track>, FetchError>;
}

/// Access to float profile data.
pub trait ProfileFetcher {
    /// Profiles observed inside `polygon` during the closed date window.
    ///
    /// `polygon` is a closed sequence of (longitude, latitude) vertices
    /// with the first vertex repeated last. `depth_range` restricts which
    /// measurement levels are retrieved. An empty result is normal and not
    /// an error.
    fn profiles_in_region(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        polygon: &[(f64, f64)],
        depth_range: (Meters, Meters),
    ) -> Result<Vec<FloatProfile>, FetchError>;

    /// The full profile history of one platform.
    fn profiles_for_platform(&self, platform: u32) -> Result<Vec<FloatProfile>, FetchError>;
}

/// Access to gridded scalar-field products such as sea-ice fraction.
pub trait GriddedFieldFetcher {
    /// Samples of the named grid product inside a lat/lon window on `date`.
    fn gridded_window(
        &self,
        grid_name: &str,
        depth_level: Meters,
        lat_range: (f64, f64),
        lon_range: (f64, f64),
        date: NaiveDate,
    ) -> Result<Vec<GridSample>, FetchError>;
}
