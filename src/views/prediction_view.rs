//! Prediction form: shape inputs, POST them, show the classification.
//!
//! LIFECYCLE
//! =========
//! Every submission begins a new scope generation (`Submitting`) and always
//! resolves to `Succeeded` or `Failed`. A slower earlier submission never
//! overwrites a newer one, and nothing is applied after `unmount`.
//!
//! ERROR HANDLING
//! ==============
//! Input shaping errors are shown as-is since they describe the user's own
//! input. Service failures of any kind collapse to one generic message; the
//! underlying error is only logged.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::net::api::DashboardApi;
use crate::net::types::PredictionRequest;
use crate::state::prediction::{PREDICTION_FAILED_MESSAGE, PredictionForm, PredictionState, ShapeError};
use crate::state::scope::ViewScope;

pub struct PredictionView {
    api: Arc<dyn DashboardApi>,
    scope: Arc<ViewScope<PredictionState>>,
}

impl PredictionView {
    pub fn new(api: Arc<dyn DashboardApi>) -> Self {
        Self { api, scope: Arc::new(ViewScope::new(PredictionState::Idle)) }
    }

    #[must_use]
    pub fn state(&self) -> PredictionState {
        self.scope.snapshot()
    }

    /// Courtesy flag for disabling the submit control; not a lock.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.state().is_submitting()
    }

    /// Submit `form` and wait for it to resolve.
    ///
    /// Returns the view state afterwards, which belongs to a newer
    /// submission if one started in the meantime.
    pub async fn submit(&self, form: &PredictionForm) -> PredictionState {
        run_submission(self.api.as_ref(), &self.scope, form.shape()).await;
        self.state()
    }

    /// Submit a request the caller already shaped (and possibly range-checked).
    pub async fn submit_request(&self, request: PredictionRequest) -> PredictionState {
        run_submission(self.api.as_ref(), &self.scope, Ok(request)).await;
        self.state()
    }

    /// Submit on a background task, e.g. from an input event handler.
    pub fn spawn_submit(&self, form: PredictionForm) -> JoinHandle<PredictionState> {
        let api = Arc::clone(&self.api);
        let scope = Arc::clone(&self.scope);
        tokio::spawn(async move {
            run_submission(api.as_ref(), &scope, form.shape()).await;
            scope.snapshot()
        })
    }

    /// Tear the view down. In-flight submissions finish but are not applied.
    pub fn unmount(&self) {
        self.scope.teardown();
    }
}

impl Drop for PredictionView {
    fn drop(&mut self) {
        self.unmount();
    }
}

async fn run_submission(
    api: &dyn DashboardApi,
    scope: &ViewScope<PredictionState>,
    shaped: Result<PredictionRequest, ShapeError>,
) {
    let Some(ticket) = scope.begin(PredictionState::Submitting) else {
        debug!("submit after unmount ignored");
        return;
    };

    let next = predict(api, shaped).await;
    if !scope.resolve(ticket, next) {
        debug!("prediction superseded or view unmounted; discarded");
    }
}

async fn predict(api: &dyn DashboardApi, shaped: Result<PredictionRequest, ShapeError>) -> PredictionState {
    let request = match shaped {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "prediction input rejected");
            return PredictionState::Failed(e.to_string());
        }
    };

    match api.predict(&request).await {
        Ok(result) => {
            info!(
                probability = result.dropout_probability,
                risk = result.risk_level.label(),
                "prediction received"
            );
            PredictionState::Succeeded(result)
        }
        Err(e) => {
            warn!(error = %e, "prediction request failed");
            PredictionState::Failed(PREDICTION_FAILED_MESSAGE.to_owned())
        }
    }
}

#[cfg(test)]
#[path = "prediction_view_test.rs"]
mod prediction_view_test;
