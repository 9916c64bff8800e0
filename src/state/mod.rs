//! View state and the derivations rendered from it.
//!
//! DESIGN
//! ======
//! Each workflow's lifecycle is an explicit enum (`StatsState`,
//! `PredictionState`) so a pending flag and an error can never be set at the
//! same time. `scope` holds the shared cell in-flight requests write into.

pub mod prediction;
pub mod scope;
pub mod stats;
