//! Number formatting for rendered metrics.
//!
//! Formats the exact binary value of an `f64`, the way the browser
//! dashboard's `toFixed(1)` did. Values that look like ties in decimal
//! (`1.45`) are stored slightly below or above the tie and round by that.
//! Only exact binary ties (`0.25`, `78.75`) round half away from zero, where
//! `{:.1}` alone would round half to even.

/// Format `value` with exactly one decimal digit. Non-finite values render as `0.0`.
#[must_use]
pub fn one_decimal(value: f64) -> String {
    if !value.is_finite() {
        return "0.0".to_owned();
    }
    let formatted = if is_exact_tie(value) {
        // value * 10 is exact for quarter values, so this rounds the true tie.
        format!("{:.1}", (value * 10.0).round() / 10.0)
    } else {
        format!("{value:.1}")
    };
    // Avoid "-0.0" for tiny negatives.
    if formatted == "-0.0" { "0.0".to_owned() } else { formatted }
}

/// True when `value` lies exactly halfway between two one-decimal numbers.
///
/// Only odd multiples of a quarter (`.25`, `.75`) are representable ties.
fn is_exact_tie(value: f64) -> bool {
    let quarters = value * 4.0;
    quarters.fract() == 0.0 && (quarters % 2.0).abs() == 1.0
}

/// Format a proportion in `[0, 1]` as a percentage with one decimal, e.g. `0.235` → `23.5%`.
#[must_use]
pub fn percent(proportion: f64) -> String {
    format!("{}%", one_decimal(proportion * 100.0))
}

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;
