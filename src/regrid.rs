//! Convert one platform's irregular profile history into a dense,
//! gap-aware depth-time field.
//!
//! Floats report measurements at whatever depths the sensor sampled, at
//! whatever times the float surfaced. Rendering a history as a 2-D
//! depth-time field needs both axes regularized: [`regrid`] interpolates
//! every profile onto a fixed [`DepthGrid`], and [`insert_gaps`] breaks up
//! long silent intervals so a contour renderer cannot smear data across
//! weeks nothing was observed.

use crate::{
    error::{AnalysisError, Result},
    fetch::ProfileFetcher,
    interpolation::linear_interpolate,
    profile::FloatProfile,
};
use chrono::{Duration, NaiveDateTime};
use itertools::izip;
use metfor::{Celsius, Meters, Quantity};
use optional::Optioned;
use std::ops::Sub;

/// A fixed, evenly spaced set of depth levels used to make irregular
/// profiles comparable.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthGrid {
    levels: Vec<Meters>,
}

impl DepthGrid {
    /// Build a grid from `shallowest` to at most `deepest` in steps of
    /// `step`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use argo_colocation::DepthGrid;
    /// use metfor::Meters;
    ///
    /// let grid = DepthGrid::new(Meters(5.0), Meters(500.0), Meters(5.0)).unwrap();
    /// assert_eq!(grid.len(), 100);
    /// assert_eq!(grid.levels()[0], Meters(5.0));
    /// assert_eq!(grid.levels()[99], Meters(500.0));
    ///
    /// assert!(DepthGrid::new(Meters(5.0), Meters(500.0), Meters(0.0)).is_err());
    /// ```
    pub fn new(shallowest: Meters, deepest: Meters, step: Meters) -> Result<Self> {
        if step.unpack() <= 0.0 {
            return Err(AnalysisError::InvalidDepthGrid("step must be positive"));
        }
        if deepest < shallowest {
            return Err(AnalysisError::InvalidDepthGrid(
                "deepest level is above the shallowest",
            ));
        }

        let count = ((deepest.unpack() - shallowest.unpack()) / step.unpack() + 1.0e-9) as usize;
        let levels = (0..=count)
            .map(|i| Meters(shallowest.unpack() + i as f64 * step.unpack()))
            .collect();

        Ok(DepthGrid { levels })
    }

    /// The 5 m to 500 m by 5 m grid commonly used for float histories.
    pub fn standard() -> Self {
        DepthGrid {
            levels: (1..=100).map(|i| Meters(f64::from(i) * 5.0)).collect(),
        }
    }

    /// The grid levels, shallowest first.
    #[inline]
    pub fn levels(&self) -> &[Meters] {
        &self.levels
    }

    /// Number of levels.
    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether the grid has no levels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// One slot on the regridded time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSlot {
    /// An actual observation time.
    Observed(NaiveDateTime),
    /// A synthetic slot breaking up a long unobserved interval. Every
    /// depth value at a gap slot is missing, for every variable.
    Gap(NaiveDateTime),
}

impl TimeSlot {
    /// The time this slot sits at on the axis.
    #[inline]
    pub fn time(self) -> NaiveDateTime {
        match self {
            TimeSlot::Observed(t) | TimeSlot::Gap(t) => t,
        }
    }

    /// Whether this is a synthetic gap slot.
    #[inline]
    pub fn is_gap(self) -> bool {
        match self {
            TimeSlot::Observed(_) => false,
            TimeSlot::Gap(_) => true,
        }
    }
}

/// Dense depth-time field for one platform, one column per time slot.
///
/// Invariant: the time axis is strictly increasing and its length always
/// equals the number of columns of every variable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepthTimeField {
    depths: Vec<Meters>,
    slots: Vec<TimeSlot>,
    temperature: Vec<Vec<Optioned<Celsius>>>,
    salinity: Vec<Vec<Optioned<f64>>>,
}

impl DepthTimeField {
    /// The depth levels the columns are sampled at.
    #[inline]
    pub fn depths(&self) -> &[Meters] {
        &self.depths
    }

    /// The time axis, one slot per column.
    #[inline]
    pub fn time_axis(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// Temperature columns in time order, each parallel to `depths()`.
    #[inline]
    pub fn temperature(&self) -> &[Vec<Optioned<Celsius>>] {
        &self.temperature
    }

    /// Salinity columns in time order, each parallel to `depths()`.
    #[inline]
    pub fn salinity(&self) -> &[Vec<Optioned<f64>>] {
        &self.salinity
    }

    /// Number of time slots (and of columns per variable).
    #[inline]
    pub fn num_slots(&self) -> usize {
        self.slots.len()
    }
}

/// Interpolate a platform's profiles onto `grid`, one dense column per
/// profile, in cycle order.
///
/// Cycle numbers increase over a platform's lifetime, so ordering by cycle
/// recovers time order regardless of fetch order. A variable wholly absent
/// from a profile becomes an all-missing column; a grid level outside a
/// profile's observed depth range gets a missing value, never an
/// extrapolated one. Profiles without a timestamp cannot occupy a time
/// slot and are skipped.
pub fn regrid(profiles: &[FloatProfile], grid: &DepthGrid) -> DepthTimeField {
    let mut ordered: Vec<&FloatProfile> = profiles.iter().collect();
    ordered.sort_by_key(|profile| profile.id().cycle());

    let mut slots = Vec::with_capacity(ordered.len());
    let mut temperature = Vec::with_capacity(ordered.len());
    let mut salinity = Vec::with_capacity(ordered.len());

    for profile in ordered {
        let time = match profile.time() {
            Some(time) => time,
            None => {
                log::warn!("skipping profile {} with no timestamp", profile.id());
                continue;
            }
        };

        slots.push(TimeSlot::Observed(time));
        temperature.push(regrid_column(
            profile.depth_profile(),
            profile.temperature_profile(),
            grid,
        ));
        salinity.push(regrid_column(
            profile.depth_profile(),
            profile.salinity_profile(),
            grid,
        ));
    }

    DepthTimeField {
        depths: grid.levels().to_vec(),
        slots,
        temperature,
        salinity,
    }
}

// One dense column for one variable of one profile.
fn regrid_column<Y>(
    depths: &[Optioned<Meters>],
    values: &[Optioned<Y>],
    grid: &DepthGrid,
) -> Vec<Optioned<Y>>
where
    Y: Quantity + optional::Noned + Sub<Y>,
    <Y as Sub<Y>>::Output: Quantity,
{
    if values.is_empty() {
        return vec![Optioned::default(); grid.len()];
    }

    grid.levels()
        .iter()
        .map(|&level| linear_interpolate(depths, values, level))
        .collect()
}

/// Fetch one platform's full profile history and regrid it.
///
/// Unlike the per-window failures of the co-location walk, a failed
/// history fetch leaves nothing to regrid and is returned as an error.
pub fn regrid_platform<F>(platform: u32, fetcher: &F, grid: &DepthGrid) -> Result<DepthTimeField>
where
    F: ProfileFetcher + ?Sized,
{
    let history = fetcher.profiles_for_platform(platform)?;
    Ok(regrid(&history, grid))
}

/// Break long silent intervals with synthetic all-missing slots.
///
/// Walks the time axis pairwise; whenever consecutive slots are more than
/// `max_gap_days` whole days apart, one [`TimeSlot::Gap`] dated one day
/// after the earlier slot is inserted, with every depth value missing for
/// every variable. Exactly one slot is inserted per gap no matter how long
/// the gap is; this is a rendering convention to break interpolation
/// across unobserved intervals, not a faithful resampling.
///
/// Expects a gap-free field as produced by [`regrid`]; the returned time
/// axis is strictly increasing and parallel to the columns.
pub fn insert_gaps(field: DepthTimeField, max_gap_days: i64) -> DepthTimeField {
    let DepthTimeField {
        depths,
        slots,
        temperature,
        salinity,
    } = field;

    let num_levels = depths.len();
    let mut new_slots = Vec::with_capacity(slots.len());
    let mut new_temperature = Vec::with_capacity(temperature.len());
    let mut new_salinity = Vec::with_capacity(salinity.len());

    let mut previous: Option<NaiveDateTime> = None;
    for (slot, t_col, s_col) in izip!(slots, temperature, salinity) {
        if let Some(previous) = previous {
            if (slot.time() - previous).num_days() > max_gap_days {
                new_slots.push(TimeSlot::Gap(previous + Duration::days(1)));
                new_temperature.push(vec![Optioned::default(); num_levels]);
                new_salinity.push(vec![Optioned::default(); num_levels]);
            }
        }
        previous = Some(slot.time());

        new_slots.push(slot);
        new_temperature.push(t_col);
        new_salinity.push(s_col);
    }

    DepthTimeField {
        depths,
        slots: new_slots,
        temperature: new_temperature,
        salinity: new_salinity,
    }
}
