#[cfg(test)]
#[path = "stats_test.rs"]
mod stats_test;

use crate::net::types::{FeatureStats, StatisticsSnapshot};
use crate::util::format::{one_decimal, percent};

pub const STATS_FAILED_PREFIX: &str = "Failed to load statistics";

/// Lifecycle of the statistics overview. Terminal once resolved.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum StatsState {
    #[default]
    Loading,
    Loaded(StatisticsSnapshot),
    Failed(String),
}

impl StatsState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<&StatisticsSnapshot> {
        match self {
            Self::Loaded(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// One bar in a chart.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesPoint {
    pub label: &'static str,
    pub value: f64,
}

/// A single-series bar chart ready for rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct BarChart {
    pub title: &'static str,
    pub series_name: &'static str,
    pub points: Vec<SeriesPoint>,
}

/// The four headline metrics, already formatted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsSummary {
    pub total_students: String,
    pub average_grade: String,
    pub dropout_rate: String,
    pub average_behavior_incidents: String,
}

/// One formatted row of the per-feature detail table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureRow {
    pub feature: &'static str,
    pub min: String,
    pub max: String,
    pub mean: String,
    pub median: String,
}

#[must_use]
pub fn summarize(snapshot: &StatisticsSnapshot) -> StatsSummary {
    StatsSummary {
        total_students: snapshot.total_students.unwrap_or(0).to_string(),
        average_grade: one_decimal(snapshot.average_grade.unwrap_or(0.0)),
        dropout_rate: percent(snapshot.dropout_rate.unwrap_or(0.0)),
        average_behavior_incidents: one_decimal(snapshot.average_behavior_incidents.unwrap_or(0.0)),
    }
}

/// "No dropout" then "Dropout", missing classes count as 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn distribution_chart(snapshot: &StatisticsSnapshot) -> BarChart {
    BarChart {
        title: "Dropout distribution",
        series_name: "Students",
        points: vec![
            SeriesPoint { label: "No dropout", value: snapshot.distribution_count(0) as f64 },
            SeriesPoint { label: "Dropout", value: snapshot.distribution_count(1) as f64 },
        ],
    }
}

#[must_use]
pub fn attendance_chart(snapshot: &StatisticsSnapshot) -> BarChart {
    BarChart {
        title: "Average attendance",
        series_name: "Percentage",
        points: vec![SeriesPoint { label: "Attendance", value: snapshot.average_attendance.unwrap_or(0.0) }],
    }
}

/// Detail rows for whichever feature blocks the service included.
#[must_use]
pub fn feature_rows(snapshot: &StatisticsSnapshot) -> Vec<FeatureRow> {
    [
        ("Grades", snapshot.grade_stats),
        ("Attendance", snapshot.attendance_stats),
        ("Behavior incidents", snapshot.incident_stats),
    ]
    .into_iter()
    .filter_map(|(feature, stats)| stats.map(|stats| feature_row(feature, &stats)))
    .collect()
}

fn feature_row(feature: &'static str, stats: &FeatureStats) -> FeatureRow {
    FeatureRow {
        feature,
        min: one_decimal(stats.min.unwrap_or(0.0)),
        max: one_decimal(stats.max.unwrap_or(0.0)),
        mean: one_decimal(stats.mean.unwrap_or(0.0)),
        median: one_decimal(stats.median.unwrap_or(0.0)),
    }
}
