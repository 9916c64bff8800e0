//! Terminal rendering of the dashboard views.
//!
//! Pure functions from view state to text so output can be asserted in
//! tests. Color is opt-in via [`Palette`].

use std::fmt::Write;

use crate::net::types::HealthStatus;
use crate::state::prediction::{PredictionState, RiskStyle, probability_percent, risk_style};
use crate::state::stats::{BarChart, StatsState, attendance_chart, distribution_chart, feature_rows, summarize};
use crate::util::format::one_decimal;

const BAR_WIDTH: usize = 40;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Palette {
    #[default]
    Plain,
    Ansi,
}

impl Palette {
    fn paint(self, style: RiskStyle, text: &str) -> String {
        match self {
            Self::Plain => text.to_owned(),
            Self::Ansi => format!("\x1b[{}m{text}\x1b[0m", style.ansi_code()),
        }
    }
}

// =============================================================================
// STATISTICS
// =============================================================================

#[must_use]
pub fn render_stats(state: &StatsState) -> String {
    let snapshot = match state {
        StatsState::Loading => return "Loading statistics...\n".to_owned(),
        StatsState::Failed(message) => return format!("Error: {message}\n"),
        StatsState::Loaded(snapshot) => snapshot,
    };

    let summary = summarize(snapshot);
    let mut out = String::new();
    let _ = writeln!(out, "Total students:              {}", summary.total_students);
    let _ = writeln!(out, "Average grade:               {}", summary.average_grade);
    let _ = writeln!(out, "Dropout rate:                {}", summary.dropout_rate);
    let _ = writeln!(out, "Average behavior incidents:  {}", summary.average_behavior_incidents);

    for chart in [distribution_chart(snapshot), attendance_chart(snapshot)] {
        let _ = writeln!(out);
        out.push_str(&render_bar_chart(&chart));
    }

    let rows = feature_rows(snapshot);
    if !rows.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{:<20} {:>8} {:>8} {:>8} {:>8}", "Feature", "Min", "Max", "Mean", "Median");
        for row in rows {
            let _ = writeln!(
                out,
                "{:<20} {:>8} {:>8} {:>8} {:>8}",
                row.feature, row.min, row.max, row.mean, row.median
            );
        }
    }
    out
}

/// Horizontal bars scaled to the largest value in the chart.
#[must_use]
pub fn render_bar_chart(chart: &BarChart) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", chart.title, chart.series_name);

    let label_width = chart.points.iter().map(|p| p.label.len()).max().unwrap_or(0);
    let max = chart.points.iter().map(|p| p.value).fold(0.0_f64, f64::max);
    for point in &chart.points {
        let bar = "#".repeat(bar_len(point.value, max));
        let _ = writeln!(out, "  {:<label_width$} | {bar} {}", point.label, format_value(point.value));
    }
    out
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn bar_len(value: f64, max: f64) -> usize {
    if max <= 0.0 || !value.is_finite() || value <= 0.0 {
        return 0;
    }
    ((value / max) * BAR_WIDTH as f64).round() as usize
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 { format!("{value:.0}") } else { one_decimal(value) }
}

// =============================================================================
// PREDICTION
// =============================================================================

#[must_use]
pub fn render_prediction(state: &PredictionState, palette: Palette) -> String {
    match state {
        PredictionState::Idle => String::new(),
        PredictionState::Submitting => "Processing...\n".to_owned(),
        PredictionState::Failed(message) => format!("{message}\n"),
        PredictionState::Succeeded(result) => {
            let style = risk_style(&result.risk_level);
            let mut out = String::new();
            let _ = writeln!(out, "Prediction result");
            let _ = writeln!(out, "  Dropout probability: {}", probability_percent(result));
            let _ = writeln!(out, "  Risk level:          {}", palette.paint(style, result.risk_level.label()));
            if let Some(timestamp) = &result.timestamp {
                let _ = writeln!(out, "  Predicted at:        {timestamp}");
            }
            out
        }
    }
}

// =============================================================================
// HEALTH
// =============================================================================

#[must_use]
pub fn render_health(health: &HealthStatus) -> String {
    match &health.timestamp {
        Some(timestamp) => format!("{} ({timestamp})\n", health.status),
        None => format!("{}\n", health.status),
    }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;
