//! Data used in tests.

use crate::profile::{FloatProfile, ProfileId};
use chrono::{NaiveDate, NaiveDateTime};
use metfor::{Celsius, Meters};
use optional::some;

/// Midnight on the given day of August 2019.
pub fn test_time(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd(2019, 8, day).and_hms(0, 0, 0)
}

/// A small but complete profile: four depth levels of temperature and
/// salinity, good position QC.
pub fn profile_at(
    platform: u32,
    cycle: u32,
    time: NaiveDateTime,
    location: (f64, f64),
) -> FloatProfile {
    FloatProfile::new(ProfileId::new(platform, cycle))
        .with_time(time)
        .with_lat_lon(location)
        .with_position_qc(crate::profile::PositionQc::Good)
        .with_depth_profile(vec![
            some(Meters(5.0)),
            some(Meters(10.0)),
            some(Meters(20.0)),
            some(Meters(50.0)),
        ])
        .with_temperature_profile(vec![
            some(Celsius(18.0)),
            some(Celsius(17.5)),
            some(Celsius(16.0)),
            some(Celsius(12.0)),
        ])
        .with_salinity_profile(vec![
            some(34.1),
            some(34.2),
            some(34.5),
            some(34.9),
        ])
}
