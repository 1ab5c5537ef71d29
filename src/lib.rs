#![warn(missing_docs)]
//! Functions and data types for co-locating ocean float profiles with
//! event datasets fetched from a remote oceanographic data service, and
//! for regridding a float's profile history into a dense depth-time field.
//!
//! Two procedures form the core of the crate:
//!
//! * [`colocate`] walks an event track (e.g. a tropical cyclone) and
//!   collects the float profiles observed inside a moving space-time box
//!   around each track point, split into before/after groups keyed by
//!   profile id for paired comparison.
//! * [`regrid`] and [`insert_gaps`] turn one platform's irregularly
//!   sampled history into a dense field over a fixed [`DepthGrid`], with
//!   synthetic gap slots so a renderer cannot interpolate across long
//!   unobserved intervals.
//!
//! All remote access goes through the capability traits in [`fetch`]; the
//! crate itself never talks to the network, and a failed query always
//! degrades to "no data" rather than aborting an analysis (failures are
//! recorded on the results and logged through the `log` facade).

//
// API
//
pub use crate::{
    colocation::{
        colocate, colocate_storm, group_by_id, BoundingBox, Colocation, ColocationParams,
        ProfileGroup, WindowFailure, WindowPair, WindowSide, SERVICE_FILL_VALUE,
    },
    error::{AnalysisError, FetchError, Result},
    fetch::{GriddedFieldFetcher, GridSample, ProfileFetcher, TrackFetcher},
    interpolation::linear_interpolate,
    profile::{FloatProfile, PositionQc, ProfileId},
    regrid::{insert_gaps, regrid, regrid_platform, DepthGrid, DepthTimeField, TimeSlot},
    sea_ice::{
        ice_fraction_history, sample_field_at, survey_sea_ice, IceSurvey, SAMPLING_HALF_WIDTH,
        SEA_ICE_GRID,
    },
    trajectory::{named_storms, Track, TrackPoint, SOUTHERN_HEMISPHERE_TAG},
};

//
// Modules
//
pub mod colocation;
mod error;
pub mod fetch;
mod interpolation;
pub mod profile;
pub mod regrid;
pub mod sea_ice;
pub mod trajectory;

#[cfg(test)]
mod test_data;
