use std::{convert::From, fmt::Display};
use strum_macros::EnumIter;

/// Position quality-control flag for a float profile.
///
/// Values correspond to the Argo reference table for position QC codes. A
/// value of 8 means the position was estimated rather than measured, which
/// at high latitudes usually means the float could not surface because it
/// was trapped under sea ice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PositionQc {
    /// No quality control performed.
    NoQc = 0,
    /// Good data.
    Good = 1,
    /// Probably good data.
    ProbablyGood = 2,
    /// Probably bad data.
    ProbablyBad = 3,
    /// Bad data.
    Bad = 4,
    /// Value changed during quality control.
    Changed = 5,
    /// Position estimated, not directly measured.
    Estimated = 8,
    /// Missing value.
    Missing = 9,

    // Catch all, also covers the service's empty fill value.
    /// Unrecognized or absent flag.
    Unknown = 100,
}

impl PositionQc {
    /// Whether the position was estimated rather than measured (code 8).
    #[inline]
    pub fn is_estimated(self) -> bool {
        self == PositionQc::Estimated
    }
}

impl From<u8> for PositionQc {
    fn from(val: u8) -> Self {
        use PositionQc::*;

        match val {
            0 => NoQc,
            1 => Good,
            2 => ProbablyGood,
            3 => ProbablyBad,
            4 => Bad,
            5 => Changed,
            8 => Estimated,
            9 => Missing,
            _ => Unknown,
        }
    }
}

impl Default for PositionQc {
    fn default() -> Self {
        PositionQc::Unknown
    }
}

impl Display for PositionQc {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(formatter, "{} => {:?}", *self as u8, self)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_round_trip_all_codes() {
        for variant in PositionQc::iter() {
            assert_eq!(PositionQc::from(variant as u8), variant);
        }
    }

    #[test]
    fn test_unlisted_codes_are_unknown() {
        for code in &[6u8, 7, 10, 42, 255] {
            assert_eq!(PositionQc::from(*code), PositionQc::Unknown);
        }
    }
}
