//! The two dashboard workflows. Each owns its own request lifecycle and
//! shares nothing with the other.

pub mod prediction_view;
pub mod stats_view;

pub use prediction_view::PredictionView;
pub use stats_view::StatsView;
