//! Wire types for the dropout prediction service.
//!
//! The service speaks Spanish field names; these structs expose English
//! names and map them with `#[serde(rename)]`.
//!
//! DESIGN
//! ======
//! Snapshot numeric fields are `Option` so a structurally incomplete body
//! still decodes. Rendering treats absent values as 0. A body that is not a
//! JSON object at all is a parse failure.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by dashboard API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout).
    #[error("request failed: {0}")]
    Transport(String),

    /// The service answered with a non-success HTTP status.
    #[error("service responded with status {status}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

impl ApiError {
    /// True for failures where no response arrived.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

// =============================================================================
// STATISTICS
// =============================================================================

/// Aggregate statistics returned by `GET /stats`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct StatisticsSnapshot {
    #[serde(rename = "total_estudiantes", default)]
    pub total_students: Option<u64>,

    #[serde(rename = "promedio_calificaciones", default)]
    pub average_grade: Option<f64>,

    /// Proportion in `[0, 1]`, not a percentage.
    #[serde(rename = "tasa_desercion", default)]
    pub dropout_rate: Option<f64>,

    #[serde(rename = "promedio_incidentes_comportamiento", default)]
    pub average_behavior_incidents: Option<f64>,

    /// Student counts keyed by outcome class, `"0"` (stayed) and `"1"` (dropped out).
    #[serde(rename = "distribucion_desercion", default)]
    pub dropout_distribution: Option<BTreeMap<String, Option<u64>>>,

    #[serde(rename = "promedio_asistencia", default)]
    pub average_attendance: Option<f64>,

    #[serde(rename = "estadisticas_calificaciones", default)]
    pub grade_stats: Option<FeatureStats>,

    #[serde(rename = "estadisticas_asistencia", default)]
    pub attendance_stats: Option<FeatureStats>,

    #[serde(rename = "estadisticas_incidentes_comportamiento", default)]
    pub incident_stats: Option<FeatureStats>,
}

impl StatisticsSnapshot {
    /// Count of students in outcome class `class` (`0` or `1`), 0 when absent.
    #[must_use]
    pub fn distribution_count(&self, class: u8) -> u64 {
        self.dropout_distribution
            .as_ref()
            .and_then(|dist| dist.get(&class.to_string()).copied().flatten())
            .unwrap_or(0)
    }
}

/// Descriptive statistics for one input feature. Missing or null values render as 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct FeatureStats {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(rename = "promedio", default)]
    pub mean: Option<f64>,
    #[serde(rename = "mediana", default)]
    pub median: Option<f64>,
}

// =============================================================================
// PREDICTION
// =============================================================================

/// Body of `POST /predict`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PredictionRequest {
    #[serde(rename = "calificaciones", serialize_with = "serialize_js_number")]
    pub grades: f64,

    #[serde(rename = "asistencia", serialize_with = "serialize_js_number")]
    pub attendance: f64,

    #[serde(rename = "incidentes_comportamiento", serialize_with = "serialize_js_number")]
    pub behavior_incidents: f64,
}

/// Whole values go out as JSON integers (`85`, not `85.0`).
#[allow(clippy::trivially_copy_pass_by_ref, clippy::cast_possible_truncation)]
fn serialize_js_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        return serializer.serialize_i64(*value as i64);
    }
    serializer.serialize_f64(*value)
}

/// Response of `POST /predict`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PredictionResult {
    /// Probability in `[0, 1]`.
    #[serde(rename = "probabilidad_desercion")]
    pub dropout_probability: f64,

    #[serde(rename = "riesgo")]
    pub risk_level: RiskLevel,

    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Risk classification label produced by the service.
///
/// Unknown labels are kept verbatim rather than rejected.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Other(String),
}

impl From<String> for RiskLevel {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Bajo" => Self::Low,
            "Medio" => Self::Medium,
            "Alto" => Self::High,
            _ => Self::Other(label),
        }
    }
}

impl From<&str> for RiskLevel {
    fn from(label: &str) -> Self {
        Self::from(label.to_owned())
    }
}

impl RiskLevel {
    /// The label as the service spells it.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Low => "Bajo",
            Self::Medium => "Medio",
            Self::High => "Alto",
            Self::Other(label) => label,
        }
    }
}

// =============================================================================
// HEALTH / ERRORS
// =============================================================================

/// Response of `GET /health`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HealthStatus {
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Error envelope the service returns alongside 4xx/5xx statuses.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(rename = "mensaje", default)]
    pub message: Option<String>,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
