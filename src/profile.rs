//! Data type and methods to store one ocean float profile.

use chrono::NaiveDateTime;
use metfor::{Celsius, Meters, Quantity};
use optional::Optioned;

pub use self::{position_qc::PositionQc, profile_id::ProfileId};

/// One vertical water-column measurement taken by a float at a point in
/// time and space.
///
/// The measurement variables are stored in parallel vectors ordered by
/// depth. If a profile lacks a certain variable, e.g. salinity, that whole
/// vector has length 0 instead of being full of missing values. Depth
/// values are whatever the float reported; nothing forces them onto a
/// fixed grid, see [`regrid`](crate::regrid()) for that.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatProfile {
    // Identity and sampling context.
    id: ProfileId,
    time: Option<NaiveDateTime>,
    location: Option<(f64, f64)>,
    position_qc: PositionQc,
    // Whether the service reported extended biogeochemical variables.
    contains_bgc: bool,

    // Measurement columns.
    depth: Vec<Optioned<Meters>>,
    temperature: Vec<Optioned<Celsius>>,
    salinity: Vec<Optioned<f64>>,
}

impl FloatProfile {
    /// Create a new, empty profile for the given id.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use argo_colocation::{FloatProfile, ProfileId};
    ///
    /// let profile = FloatProfile::new(ProfileId::new(5904912, 239));
    /// assert!(profile.depth_profile().is_empty());
    /// ```
    #[inline]
    pub fn new(id: ProfileId) -> Self {
        FloatProfile {
            id,
            time: None,
            location: None,
            position_qc: PositionQc::default(),
            contains_bgc: false,
            depth: Vec::new(),
            temperature: Vec::new(),
            salinity: Vec::new(),
        }
    }

    /// The profile identifier.
    #[inline]
    pub fn id(&self) -> ProfileId {
        self.id
    }

    /// Builder method for the observation time.
    #[inline]
    pub fn with_time<T>(mut self, time: T) -> Self
    where
        Option<NaiveDateTime>: From<T>,
    {
        self.time = Option::from(time);
        self
    }

    /// The observation time, if the service reported one.
    #[inline]
    pub fn time(&self) -> Option<NaiveDateTime> {
        self.time
    }

    /// Builder method for the reported position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use argo_colocation::{FloatProfile, ProfileId};
    ///
    /// let profile = FloatProfile::new(ProfileId::new(5904912, 239))
    ///     .with_lat_lon((-60.5, -44.25));
    /// assert_eq!(profile.location().unwrap(), (-60.5, -44.25));
    /// ```
    #[inline]
    pub fn with_lat_lon<T>(mut self, coords: T) -> Self
    where
        Option<(f64, f64)>: From<T>,
    {
        self.location = Option::from(coords);
        self
    }

    /// Latitude and longitude in degrees.
    #[inline]
    pub fn location(&self) -> Option<(f64, f64)> {
        self.location
    }

    /// Builder method for the position QC flag.
    #[inline]
    pub fn with_position_qc(mut self, qc: PositionQc) -> Self {
        self.position_qc = qc;
        self
    }

    /// The position QC flag.
    #[inline]
    pub fn position_qc(&self) -> PositionQc {
        self.position_qc
    }

    /// Builder method for the extended-variables marker.
    #[inline]
    pub fn with_contains_bgc(mut self, contains_bgc: bool) -> Self {
        self.contains_bgc = contains_bgc;
        self
    }

    /// Whether the service reported extended biogeochemical variables for
    /// this profile.
    #[inline]
    pub fn contains_bgc(&self) -> bool {
        self.contains_bgc
    }

    /// Builder method for the depth column, in meters below the surface.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use argo_colocation::{FloatProfile, ProfileId};
    /// use metfor::Meters;
    /// use optional::{some, Optioned};
    ///
    /// let data = vec![5.0, 10.0, 20.0, 50.0, 100.0];
    /// let depth_data: Vec<Optioned<Meters>> = data.into_iter()
    ///     .map(Meters)
    ///     .map(some)
    ///     .collect();
    ///
    /// let _profile = FloatProfile::new(ProfileId::new(5904912, 239))
    ///     .with_depth_profile(depth_data);
    /// ```
    #[inline]
    pub fn with_depth_profile(self, profile: Vec<Optioned<Meters>>) -> Self {
        Self {
            depth: profile,
            ..self
        }
    }

    /// Get the depth column.
    #[inline]
    pub fn depth_profile(&self) -> &[Optioned<Meters>] {
        &self.depth
    }

    /// Builder method for the temperature column.
    ///
    /// See `with_depth_profile` for an example of usage, keeping in mind
    /// the units type may be different.
    #[inline]
    pub fn with_temperature_profile(self, profile: Vec<Optioned<Celsius>>) -> Self {
        Self {
            temperature: profile,
            ..self
        }
    }

    /// Get the temperature column.
    #[inline]
    pub fn temperature_profile(&self) -> &[Optioned<Celsius>] {
        &self.temperature
    }

    /// Builder method for the salinity column, in practical salinity units.
    #[inline]
    pub fn with_salinity_profile(self, profile: Vec<Optioned<f64>>) -> Self {
        Self {
            salinity: profile,
            ..self
        }
    }

    /// Get the salinity column, in practical salinity units.
    #[inline]
    pub fn salinity_profile(&self) -> &[Optioned<f64>] {
        &self.salinity
    }

    /// Number of reported depth levels.
    #[inline]
    pub fn num_levels(&self) -> usize {
        self.depth.len()
    }

    /// Replace every occurrence of `fill_value` in the measurement columns
    /// with an explicit missing value.
    ///
    /// The service encodes invalid measurements with a numeric fill value
    /// (see [`SERVICE_FILL_VALUE`](crate::SERVICE_FILL_VALUE)); a fill
    /// value left in place would interpolate like a real measurement.
    pub fn scrub_fill_value(self, fill_value: f64) -> Self {
        fn scrub<T>(column: Vec<Optioned<T>>, fill_value: f64) -> Vec<Optioned<T>>
        where
            T: Quantity + optional::Noned,
        {
            column
                .into_iter()
                .map(|val_opt| match val_opt.into_option() {
                    Some(val) if (val.unpack() - fill_value).abs() < std::f64::EPSILON => {
                        Optioned::default()
                    }
                    _ => val_opt,
                })
                .collect()
        }

        let FloatProfile {
            id,
            time,
            location,
            position_qc,
            contains_bgc,
            depth,
            temperature,
            salinity,
        } = self;

        FloatProfile {
            id,
            time,
            location,
            position_qc,
            contains_bgc,
            depth: scrub(depth, fill_value),
            temperature: scrub(temperature, fill_value),
            salinity: scrub(salinity, fill_value),
        }
    }
}


mod position_qc;
mod profile_id;
