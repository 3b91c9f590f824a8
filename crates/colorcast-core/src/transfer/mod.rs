//! Transfer stages: reconciliation, matching, statistics, curves, regions,
//! blending, and the dispatcher that composes them.

pub mod blend;
pub mod dispatch;
pub mod histogram;
pub mod method;
pub mod reconcile;
pub mod region;
pub mod statistics;
pub mod tone_curve;
