//! Shared fixtures for the integration tests: in-memory fetchers standing
//! in for the remote data service.
#![allow(dead_code)]

use argo_colocation::{
    FetchError, FloatProfile, GridSample, GriddedFieldFetcher, PositionQc, ProfileFetcher,
    ProfileId, Track, TrackFetcher, TrackPoint,
};
use chrono::{NaiveDate, NaiveDateTime};
use metfor::{Celsius, Knots, Meters};
use optional::some;
use std::cell::RefCell;

/// Midnight on the given day of September 2019.
pub fn day(d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd(2019, 9, d).and_hms(0, 0, 0)
}

/// A complete test profile at a position and time.
pub fn profile(platform: u32, cycle: u32, time: NaiveDateTime, lat: f64, lon: f64) -> FloatProfile {
    FloatProfile::new(ProfileId::new(platform, cycle))
        .with_time(time)
        .with_lat_lon((lat, lon))
        .with_position_qc(PositionQc::Good)
        .with_depth_profile(vec![
            some(Meters(10.0)),
            some(Meters(20.0)),
            some(Meters(30.0)),
        ])
        .with_temperature_profile(vec![
            some(Celsius(20.0)),
            some(Celsius(18.0)),
            some(Celsius(15.0)),
        ])
        .with_salinity_profile(vec![some(34.0), some(34.3), some(34.6)])
}

/// A track point at a position and time, with nominal hurricane winds.
pub fn track_point(time: NaiveDateTime, lat: f64, lon: f64) -> TrackPoint {
    TrackPoint {
        time,
        location: (lat, lon),
        wind: some(Knots(75.0)),
    }
}

/// One recorded region query.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub polygon: Vec<(f64, f64)>,
}

/// In-memory profile store answering region queries by bounding-box
/// membership and closed date-window membership, recording every query it
/// is asked.
pub struct TestProfileFetcher {
    profiles: Vec<FloatProfile>,
    pub queries: RefCell<Vec<RegionQuery>>,
}

impl TestProfileFetcher {
    pub fn new(profiles: Vec<FloatProfile>) -> Self {
        TestProfileFetcher {
            profiles,
            queries: RefCell::new(Vec::new()),
        }
    }
}

impl ProfileFetcher for TestProfileFetcher {
    fn profiles_in_region(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        polygon: &[(f64, f64)],
        _depth_range: (Meters, Meters),
    ) -> Result<Vec<FloatProfile>, FetchError> {
        self.queries.borrow_mut().push(RegionQuery {
            start,
            end,
            polygon: polygon.to_vec(),
        });

        Ok(self
            .profiles
            .iter()
            .filter(|p| {
                let (lat, lon) = p.location().expect("test profiles are always placed");
                let date = p.time().expect("test profiles are always timed").date();
                inside(polygon, lon, lat) && start <= date && date <= end
            })
            .cloned()
            .collect())
    }

    fn profiles_for_platform(&self, platform: u32) -> Result<Vec<FloatProfile>, FetchError> {
        Ok(self
            .profiles
            .iter()
            .filter(|p| p.id().platform() == platform)
            .cloned()
            .collect())
    }
}

// Axis-aligned membership test; the polygons the crate builds are boxes.
fn inside(polygon: &[(f64, f64)], lon: f64, lat: f64) -> bool {
    let min_lon = polygon.iter().map(|v| v.0).fold(f64::MAX, f64::min);
    let max_lon = polygon.iter().map(|v| v.0).fold(f64::MIN, f64::max);
    let min_lat = polygon.iter().map(|v| v.1).fold(f64::MAX, f64::min);
    let max_lat = polygon.iter().map(|v| v.1).fold(f64::MIN, f64::max);

    min_lon <= lon && lon <= max_lon && min_lat <= lat && lat <= max_lat
}

/// A fetcher for which every request fails with a server error.
pub struct FailingFetcher;

impl ProfileFetcher for FailingFetcher {
    fn profiles_in_region(
        &self,
        _start: NaiveDate,
        _end: NaiveDate,
        _polygon: &[(f64, f64)],
        _depth_range: (Meters, Meters),
    ) -> Result<Vec<FloatProfile>, FetchError> {
        Err(FetchError::Status(500))
    }

    fn profiles_for_platform(&self, _platform: u32) -> Result<Vec<FloatProfile>, FetchError> {
        Err(FetchError::Status(500))
    }
}

impl GriddedFieldFetcher for FailingFetcher {
    fn gridded_window(
        &self,
        _grid_name: &str,
        _depth_level: Meters,
        _lat_range: (f64, f64),
        _lon_range: (f64, f64),
        _date: NaiveDate,
    ) -> Result<Vec<GridSample>, FetchError> {
        Err(FetchError::Transport("connection reset".to_owned()))
    }
}

/// Track fetcher over a fixed list of tracks.
pub struct TestTrackFetcher {
    pub tracks: Vec<Track>,
}

impl TrackFetcher for TestTrackFetcher {
    fn tracks_by_name_year(&self, name: &str, year: i32) -> Result<Vec<Track>, FetchError> {
        Ok(self
            .tracks
            .iter()
            .filter(|t| t.name() == Some(name) && t.year().into_option() == Some(year))
            .cloned()
            .collect())
    }

    fn tracks_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Track>, FetchError> {
        Ok(self
            .tracks
            .iter()
            .filter(|t| {
                t.points()
                    .iter()
                    .any(|p| start <= p.time.date() && p.time.date() <= end)
            })
            .cloned()
            .collect())
    }
}

/// Gridded-field fetcher serving fixed samples filtered by window.
pub struct TestIceFetcher {
    pub samples: Vec<GridSample>,
}

impl GriddedFieldFetcher for TestIceFetcher {
    fn gridded_window(
        &self,
        _grid_name: &str,
        _depth_level: Meters,
        lat_range: (f64, f64),
        lon_range: (f64, f64),
        _date: NaiveDate,
    ) -> Result<Vec<GridSample>, FetchError> {
        Ok(self
            .samples
            .iter()
            .filter(|s| {
                lat_range.0 <= s.latitude
                    && s.latitude <= lat_range.1
                    && lon_range.0 <= s.longitude
                    && s.longitude <= lon_range.1
            })
            .cloned()
            .collect())
    }
}
