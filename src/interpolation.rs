//! Missing-value-aware 1-D linear interpolation along a profile.

use itertools::{izip, Itertools};
use metfor::Quantity;
use optional::Optioned;
use std::ops::Sub;

/// Interpolate values given two parallel vectors of data and a target value.
///
/// Assumes that `xs` is monotonic, which for a float profile means ordered
/// by depth. Levels where either member of a pair is missing are skipped,
/// so an isolated missing value does not break the column; the points on
/// either side of it bracket the target instead. A target outside the
/// observed range yields a missing value, never an extrapolated number, and
/// a target coinciding with a sample returns that sample exactly.
#[inline]
pub fn linear_interpolate<X, Y>(xs: &[Optioned<X>], ys: &[Optioned<Y>], target_x: X) -> Optioned<Y>
where
    X: Quantity + optional::Noned + PartialOrd + Sub<X>,
    <X as Sub<X>>::Output: Quantity + optional::Noned,
    Y: Quantity + optional::Noned + Sub<Y>,
    <Y as Sub<Y>>::Output: Quantity,
{
    debug_assert_eq!(xs.len(), ys.len());

    enum BracketType<X, Y> {
        Bracket((X, Y), (X, Y)),
        EndEqual((X, Y)),
    }

    let make_bracket = |pnt_0, pnt_1| -> Option<BracketType<X, Y>> {
        let (x0, _) = pnt_0;
        let (x1, _) = pnt_1;

        if (x0 < target_x && x1 > target_x) || (x0 > target_x && x1 < target_x) {
            Some(BracketType::Bracket(pnt_0, pnt_1))
        } else if (x0 - target_x).unpack().abs() < std::f64::EPSILON {
            Some(BracketType::EndEqual(pnt_0))
        } else if (x1 - target_x).unpack().abs() < std::f64::EPSILON {
            Some(BracketType::EndEqual(pnt_1))
        } else {
            None
        }
    };

    let value_opt = izip!(xs, ys)
        // Filter out levels where one of the values is missing, this allows us to skip over
        // a point with a missing value and use the points on either side of it for the
        // interpolation.
        .filter(|(x, y)| x.is_some() && y.is_some())
        // Unpack the values from the `Optioned` type
        .map(|(x, y)| (x.unpack(), y.unpack()))
        // Look at them in pairs.
        .tuple_windows::<(_, _)>()
        // Make a bracket and filter out all levels that don't create a bracket.
        .filter_map(|(pnt_0, pnt_1)| make_bracket(pnt_0, pnt_1))
        // Get the first (and only) one that brackets the target value
        .nth(0) // This is an Option<BracketType>
        // Map from the bracket type to the interpolated value
        .map(|val| match val {
            BracketType::Bracket(pnt_0, pnt_1) => {
                let (x0, y0) = pnt_0;
                let (x1, y1) = pnt_1;
                linear_interp(target_x, x0, x1, y0, y1)
            }
            BracketType::EndEqual(pnt) => pnt.1,
        });

    Optioned::from(value_opt)
}

#[inline]
pub(crate) fn linear_interp<X, Y>(x_val: X, x1: X, x2: X, y1: Y, y2: Y) -> Y
where
    X: Sub<X> + Copy + std::fmt::Debug + std::cmp::PartialEq,
    <X as Sub<X>>::Output: Quantity,
    Y: Quantity + Sub<Y>,
    <Y as Sub<Y>>::Output: Quantity,
{
    debug_assert_ne!(x1, x2);

    let run = (x2 - x1).unpack();
    let rise = (y2 - y1).unpack();
    let dx = (x_val - x1).unpack();

    Y::pack(y1.unpack() + dx * (rise / run))
}

#[cfg(test)]
mod test {
    use super::*;
    use metfor::{Celsius, Meters};
    use optional::{none, some};

    #[test]
    fn test_interpolates_between_samples() {
        let depths = vec![some(Meters(10.0)), some(Meters(20.0))];
        let temps = vec![some(Celsius(10.0)), some(Celsius(20.0))];

        let t = linear_interpolate(&depths, &temps, Meters(15.0));
        assert_eq!(t, some(Celsius(15.0)));
    }

    #[test]
    fn test_exact_match_is_identity() {
        let depths = vec![some(Meters(10.0)), some(Meters(20.0)), some(Meters(30.0))];
        let temps = vec![some(Celsius(8.25)), some(Celsius(6.5)), some(Celsius(5.0))];

        assert_eq!(
            linear_interpolate(&depths, &temps, Meters(20.0)),
            some(Celsius(6.5))
        );
    }

    #[test]
    fn test_no_extrapolation() {
        let depths = vec![some(Meters(10.0)), some(Meters(20.0))];
        let temps = vec![some(Celsius(10.0)), some(Celsius(20.0))];

        assert!(linear_interpolate(&depths, &temps, Meters(5.0)).is_none());
        assert!(linear_interpolate(&depths, &temps, Meters(25.0)).is_none());
    }

    #[test]
    fn test_skips_missing_levels() {
        let depths = vec![some(Meters(10.0)), some(Meters(20.0)), some(Meters(30.0))];
        let temps = vec![some(Celsius(10.0)), none(), some(Celsius(30.0))];

        // The missing middle sample is skipped and its neighbors bracket
        // the target.
        let t = linear_interpolate(&depths, &temps, Meters(20.0));
        assert_eq!(t, some(Celsius(20.0)));
    }

    #[test]
    fn test_plain_f64_columns() {
        let depths = vec![some(Meters(0.0)), some(Meters(100.0))];
        let psal = vec![some(33.0), some(35.0)];

        assert_eq!(linear_interpolate(&depths, &psal, Meters(50.0)), some(34.0));
    }
}
