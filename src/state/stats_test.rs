use super::*;
use crate::net::test_helpers::sample_snapshot;

// =============================================================
// StatsState
// =============================================================

#[test]
fn stats_state_default_is_loading() {
    let state = StatsState::default();
    assert!(state.is_loading());
    assert!(state.snapshot().is_none());
    assert!(state.error().is_none());
}

#[test]
fn stats_state_failed_exposes_only_error() {
    let state = StatsState::Failed("boom".into());
    assert!(!state.is_loading());
    assert!(state.snapshot().is_none());
    assert_eq!(state.error(), Some("boom"));
}

// =============================================================
// Derivations
// =============================================================

#[test]
fn summary_formats_sample_snapshot() {
    let summary = summarize(&sample_snapshot());
    assert_eq!(summary.total_students, "120");
    assert_eq!(summary.average_grade, "78.5");
    assert_eq!(summary.dropout_rate, "23.5%");
    assert_eq!(summary.average_behavior_incidents, "2.3");
}

#[test]
fn summary_falls_back_to_zero_for_missing_fields() {
    let summary = summarize(&StatisticsSnapshot::default());
    assert_eq!(summary.total_students, "0");
    assert_eq!(summary.average_grade, "0.0");
    assert_eq!(summary.dropout_rate, "0.0%");
    assert_eq!(summary.average_behavior_incidents, "0.0");
}

#[test]
fn distribution_chart_orders_no_dropout_first() {
    let chart = distribution_chart(&sample_snapshot());
    let values: Vec<f64> = chart.points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![90.0, 30.0]);
    assert_eq!(chart.points[0].label, "No dropout");
    assert_eq!(chart.points[1].label, "Dropout");
}

#[test]
fn distribution_chart_defaults_missing_classes() {
    let mut snapshot = sample_snapshot();
    snapshot.dropout_distribution = Some([("1".to_owned(), Some(7))].into_iter().collect());
    let values: Vec<f64> = distribution_chart(&snapshot).points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![0.0, 7.0]);

    snapshot.dropout_distribution = None;
    let values: Vec<f64> = distribution_chart(&snapshot).points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![0.0, 0.0]);
}

#[test]
fn attendance_chart_has_single_point() {
    let chart = attendance_chart(&sample_snapshot());
    assert_eq!(chart.points, vec![SeriesPoint { label: "Attendance", value: 88.1 }]);

    let empty = attendance_chart(&StatisticsSnapshot::default());
    assert_eq!(empty.points[0].value, 0.0);
}

#[test]
fn feature_rows_skip_absent_blocks() {
    assert!(feature_rows(&sample_snapshot()).is_empty());

    let mut snapshot = sample_snapshot();
    snapshot.incident_stats = Some(FeatureStats { min: Some(0.0), max: Some(10.0), mean: Some(2.34), median: Some(2.0) });
    let rows = feature_rows(&snapshot);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].feature, "Behavior incidents");
    assert_eq!(rows[0].mean, "2.3");
    assert_eq!(rows[0].max, "10.0");
}

#[test]
fn feature_rows_render_null_values_as_zero() {
    let mut snapshot = sample_snapshot();
    snapshot.grade_stats = Some(FeatureStats { min: None, max: Some(99.5), mean: Some(70.2), median: None });
    let rows = feature_rows(&snapshot);
    assert_eq!(rows[0].feature, "Grades");
    assert_eq!(rows[0].min, "0.0");
    assert_eq!(rows[0].max, "99.5");
    assert_eq!(rows[0].median, "0.0");
}

#[test]
fn distribution_chart_null_count_defaults_to_zero() {
    let mut snapshot = sample_snapshot();
    snapshot.dropout_distribution = Some([("0".to_owned(), None), ("1".to_owned(), Some(30))].into_iter().collect());
    let values: Vec<f64> = distribution_chart(&snapshot).points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![0.0, 30.0]);
}
