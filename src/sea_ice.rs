//! Co-locate float profiles with a gridded sea-ice concentration field.
//!
//! The sea-ice product is served as scattered (lon, lat, value) samples on
//! a non-uniform grid, queried one lat/lon window at a time because the
//! service caps how much can be pulled per request. Two uses are covered:
//! surveying a whole region around a date, and reading the ice fraction at
//! each position a float surfaced (or failed to surface) at.

use crate::{
    colocation::{group_by_id, BoundingBox, ProfileGroup},
    fetch::{GriddedFieldFetcher, GridSample, ProfileFetcher},
    profile::FloatProfile,
};
use chrono::{Duration, NaiveDate};
use metfor::Meters;
use optional::Optioned;
use std::cmp::Ordering;

/// Grid product name for the daily sea-ice area fraction.
pub const SEA_ICE_GRID: &str = "sose_si_area_1_day_sparse";

/// Half-width in degrees of the sampling box opened around a float
/// position, matched to the grid resolution of 1/6 degree.
pub const SAMPLING_HALF_WIDTH: f64 = 1.0 / 6.0;

// The ice product has a single level at the surface.
const SURFACE: Meters = Meters(0.0);

/// The field value at (longitude, latitude) estimated from scattered
/// samples: the nearest sample wins. Missing when there are no samples.
pub fn sample_field_at(samples: &[GridSample], longitude: f64, latitude: f64) -> Optioned<f64> {
    let value_opt = samples
        .iter()
        .map(|sample| {
            let dx = sample.longitude - longitude;
            let dy = sample.latitude - latitude;
            (dx * dx + dy * dy, sample.value)
        })
        .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal))
        .map(|(_, value)| value);

    Optioned::from(value_opt)
}

/// Sea-ice fraction co-located with each profile, in profile order.
///
/// For every profile the field is fetched in a box of
/// [`SAMPLING_HALF_WIDTH`] degrees around the reported position on the
/// profile date, then sampled at the position. A profile without a
/// position or timestamp, a failed fetch, or an empty sample window all
/// yield a missing value; zero always means open water was observed.
pub fn ice_fraction_history<G>(profiles: &[FloatProfile], fetcher: &G) -> Vec<Optioned<f64>>
where
    G: GriddedFieldFetcher + ?Sized,
{
    profiles
        .iter()
        .map(|profile| {
            let (lat, lon) = match profile.location() {
                Some(location) => location,
                None => return Optioned::default(),
            };
            let date = match profile.time() {
                Some(time) => time.date(),
                None => return Optioned::default(),
            };

            let lat_range = (lat - SAMPLING_HALF_WIDTH, lat + SAMPLING_HALF_WIDTH);
            let lon_range = (lon - SAMPLING_HALF_WIDTH, lon + SAMPLING_HALF_WIDTH);

            match fetcher.gridded_window(SEA_ICE_GRID, SURFACE, lat_range, lon_range, date) {
                Ok(samples) => sample_field_at(&samples, lon, lat),
                Err(error) => {
                    log::warn!("sea-ice fetch failed for profile {}: {}", profile.id(), error);
                    Optioned::default()
                }
            }
        })
        .collect()
}

/// Field samples and co-located profiles for one region and date.
#[derive(Debug, Clone, Default)]
pub struct IceSurvey {
    samples: Vec<GridSample>,
    profiles: ProfileGroup,
}

impl IceSurvey {
    /// All field samples gathered across the surveyed tiles.
    #[inline]
    pub fn samples(&self) -> &[GridSample] {
        &self.samples
    }

    /// The profiles found in the surveyed region, deduplicated by id.
    #[inline]
    pub fn profiles(&self) -> &ProfileGroup {
        &self.profiles
    }

    /// The profiles whose position was estimated rather than measured
    /// (position QC 8), the usual signature of a float trapped under ice.
    pub fn under_ice_profiles(&self) -> impl Iterator<Item = &FloatProfile> + '_ {
        self.profiles
            .values()
            .filter(|profile| profile.position_qc().is_estimated())
    }
}

/// Survey a region one tile at a time: sea-ice samples on `date`, float
/// profiles within `delta_days` of it.
///
/// `lon_edges` and `lat_edges` are ascending tile boundaries; each pair of
/// adjacent edges forms a tile, since the service limits how much data one
/// query may cover. A tile whose ice fetch fails contributes no samples
/// and a tile whose profile fetch fails contributes no profiles; either
/// way the survey continues (and the failure is logged). Profiles seen
/// from more than one tile are counted once.
pub fn survey_sea_ice<G, P>(
    date: NaiveDate,
    delta_days: i64,
    lon_edges: &[f64],
    lat_edges: &[f64],
    depth_range: (Meters, Meters),
    ice: &G,
    floats: &P,
) -> IceSurvey
where
    G: GriddedFieldFetcher + ?Sized,
    P: ProfileFetcher + ?Sized,
{
    let start = date - Duration::days(delta_days);
    let end = date + Duration::days(delta_days);

    let mut survey = IceSurvey::default();

    for lons in lon_edges.windows(2) {
        for lats in lat_edges.windows(2) {
            match ice.gridded_window(SEA_ICE_GRID, SURFACE, (lats[0], lats[1]), (lons[0], lons[1]), date)
            {
                Ok(mut samples) => survey.samples.append(&mut samples),
                Err(error) => log::warn!(
                    "sea-ice tile lon [{}, {}] lat [{}, {}] failed: {}",
                    lons[0],
                    lons[1],
                    lats[0],
                    lats[1],
                    error
                ),
            }

            let center = ((lats[0] + lats[1]) / 2.0, (lons[0] + lons[1]) / 2.0);
            let tile = BoundingBox::centered_at(center, lons[1] - lons[0], lats[1] - lats[0]);

            match floats.profiles_in_region(start, end, &tile.polygon(), depth_range) {
                Ok(raw) => {
                    for (id, profile) in group_by_id(raw) {
                        survey.profiles.entry(id).or_insert(profile);
                    }
                }
                Err(error) => log::warn!(
                    "profile tile lon [{}, {}] lat [{}, {}] failed: {}",
                    lons[0],
                    lons[1],
                    lats[0],
                    lats[1],
                    error
                ),
            }
        }
    }

    survey
}
