#[cfg(test)]
#[path = "prediction_test.rs"]
mod prediction_test;

use crate::net::types::{PredictionRequest, PredictionResult, RiskLevel};
use crate::util::format::percent;

/// Shown for every network, status or decode failure. Details go to the log.
pub const PREDICTION_FAILED_MESSAGE: &str = "Prediction failed. Please try again.";

/// Lifecycle of the prediction form.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum PredictionState {
    #[default]
    Idle,
    Submitting,
    Succeeded(PredictionResult),
    Failed(String),
}

impl PredictionState {
    /// Whether the submit control should be disabled.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    #[must_use]
    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            Self::Succeeded(result) => Some(result),
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

// =============================================================================
// FORM INPUT
// =============================================================================

/// Input bounds declared for the form. Callers enforce them; shaping does not.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldConstraint {
    pub field: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
}

impl FieldConstraint {
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

pub const GRADES: FieldConstraint =
    FieldConstraint { field: "grades", label: "Average grade (0-100)", min: 0.0, max: 100.0 };
pub const ATTENDANCE: FieldConstraint =
    FieldConstraint { field: "attendance", label: "Attendance percentage (0-100)", min: 0.0, max: 100.0 };
pub const BEHAVIOR_INCIDENTS: FieldConstraint =
    FieldConstraint { field: "behavior_incidents", label: "Behavior incidents (0-10)", min: 0.0, max: 10.0 };

/// Errors from coercing raw form values to numbers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be a number (got '{raw}')")]
    NotNumeric { field: &'static str, raw: String },
}

/// A value outside its declared [`FieldConstraint`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{field} must be between {min} and {max} (got {value})")]
pub struct ConstraintViolation {
    pub field: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

/// Raw values as the user typed them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PredictionForm {
    pub grades: String,
    pub attendance: String,
    pub behavior_incidents: String,
}

impl PredictionForm {
    pub fn new(grades: impl Into<String>, attendance: impl Into<String>, behavior_incidents: impl Into<String>) -> Self {
        Self { grades: grades.into(), attendance: attendance.into(), behavior_incidents: behavior_incidents.into() }
    }

    /// Coerce all three fields to numbers.
    ///
    /// # Errors
    ///
    /// Returns the first field that is empty or not a finite number.
    pub fn shape(&self) -> Result<PredictionRequest, ShapeError> {
        Ok(PredictionRequest {
            grades: shape_field(GRADES.field, &self.grades)?,
            attendance: shape_field(ATTENDANCE.field, &self.attendance)?,
            behavior_incidents: shape_field(BEHAVIOR_INCIDENTS.field, &self.behavior_incidents)?,
        })
    }
}

fn shape_field(field: &'static str, raw: &str) -> Result<f64, ShapeError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ShapeError::Missing { field });
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ShapeError::NotNumeric { field, raw: raw.to_owned() }),
    }
}

/// Check a shaped request against the declared bounds.
///
/// # Errors
///
/// Returns the first out-of-range field.
pub fn check_constraints(request: &PredictionRequest) -> Result<(), ConstraintViolation> {
    for (constraint, value) in [
        (GRADES, request.grades),
        (ATTENDANCE, request.attendance),
        (BEHAVIOR_INCIDENTS, request.behavior_incidents),
    ] {
        if !constraint.contains(value) {
            return Err(ConstraintViolation {
                field: constraint.field,
                value,
                min: constraint.min,
                max: constraint.max,
            });
        }
    }
    Ok(())
}

// =============================================================================
// RESULT PRESENTATION
// =============================================================================

/// Color treatment for a risk badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiskStyle {
    Red,
    Yellow,
    Green,
    Neutral,
}

impl RiskStyle {
    /// Utility classes used by the web dashboard.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Red => "text-red-600 bg-red-50",
            Self::Yellow => "text-yellow-600 bg-yellow-50",
            Self::Green => "text-green-600 bg-green-50",
            Self::Neutral => "text-gray-600 bg-gray-50",
        }
    }

    /// ANSI SGR foreground code for terminal output.
    #[must_use]
    pub fn ansi_code(self) -> &'static str {
        match self {
            Self::Red => "31",
            Self::Yellow => "33",
            Self::Green => "32",
            Self::Neutral => "90",
        }
    }
}

#[must_use]
pub fn risk_style(level: &RiskLevel) -> RiskStyle {
    match level {
        RiskLevel::High => RiskStyle::Red,
        RiskLevel::Medium => RiskStyle::Yellow,
        RiskLevel::Low => RiskStyle::Green,
        RiskLevel::Other(_) => RiskStyle::Neutral,
    }
}

/// Probability as a percentage, e.g. `0.823` → `82.3%`.
#[must_use]
pub fn probability_percent(result: &PredictionResult) -> String {
    percent(result.dropout_probability)
}
