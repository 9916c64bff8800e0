//! Scripted [`DashboardApi`] double for view tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::oneshot;

use super::api::DashboardApi;
use super::types::{ApiError, HealthStatus, PredictionRequest, PredictionResult, RiskLevel, StatisticsSnapshot};

/// One scripted reply. A gated reply waits for its sender before resolving.
struct Scripted<T> {
    gate: Option<oneshot::Receiver<()>>,
    outcome: Result<T, ApiError>,
}

impl<T> Scripted<T> {
    async fn resolve(self) -> Result<T, ApiError> {
        if let Some(gate) = self.gate {
            let _ = gate.await;
        }
        self.outcome
    }
}

#[derive(Default)]
pub(crate) struct MockApi {
    stats: Mutex<VecDeque<Scripted<StatisticsSnapshot>>>,
    predictions: Mutex<VecDeque<Scripted<PredictionResult>>>,
    requests: Mutex<Vec<PredictionRequest>>,
    stats_calls: AtomicUsize,
}

impl MockApi {
    pub(crate) fn push_stats(&self, outcome: Result<StatisticsSnapshot, ApiError>) {
        self.stats.lock().unwrap().push_back(Scripted { gate: None, outcome });
    }

    pub(crate) fn push_gated_stats(&self, outcome: Result<StatisticsSnapshot, ApiError>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.stats.lock().unwrap().push_back(Scripted { gate: Some(rx), outcome });
        tx
    }

    pub(crate) fn push_prediction(&self, outcome: Result<PredictionResult, ApiError>) {
        self.predictions.lock().unwrap().push_back(Scripted { gate: None, outcome });
    }

    pub(crate) fn push_gated_prediction(&self, outcome: Result<PredictionResult, ApiError>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.predictions.lock().unwrap().push_back(Scripted { gate: Some(rx), outcome });
        tx
    }

    pub(crate) fn stats_calls(&self) -> usize {
        self.stats_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn requests(&self) -> Vec<PredictionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DashboardApi for MockApi {
    async fn fetch_stats(&self) -> Result<StatisticsSnapshot, ApiError> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.stats.lock().unwrap().pop_front();
        match next {
            Some(scripted) => scripted.resolve().await,
            None => Err(ApiError::Transport("no scripted stats reply".into())),
        }
    }

    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, ApiError> {
        self.requests.lock().unwrap().push(*request);
        let next = self.predictions.lock().unwrap().pop_front();
        match next {
            Some(scripted) => scripted.resolve().await,
            None => Err(ApiError::Transport("no scripted prediction reply".into())),
        }
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        Ok(HealthStatus { status: "healthy".into(), timestamp: None })
    }
}

/// The snapshot used in the dashboard walkthrough: 120 students, 30 dropouts.
pub(crate) fn sample_snapshot() -> StatisticsSnapshot {
    serde_json::from_value(serde_json::json!({
        "total_estudiantes": 120,
        "promedio_calificaciones": 78.456,
        "tasa_desercion": 0.235,
        "promedio_incidentes_comportamiento": 2.3,
        "distribucion_desercion": { "0": 90, "1": 30 },
        "promedio_asistencia": 88.1
    }))
    .unwrap()
}

pub(crate) fn prediction(label: &str, probability: f64) -> PredictionResult {
    PredictionResult { dropout_probability: probability, risk_level: RiskLevel::from(label), timestamp: None }
}
