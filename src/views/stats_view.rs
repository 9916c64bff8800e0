//! Statistics overview: one fetch per mount, then a terminal state.
//!
//! LIFECYCLE
//! =========
//! `mount` spawns the fetch on the current tokio runtime and returns
//! immediately in `Loading`. `unmount` (or drop) tears the scope down and
//! aborts the task, so a response that arrives afterwards is discarded.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::net::api::DashboardApi;
use crate::state::scope::{Ticket, ViewScope};
use crate::state::stats::{STATS_FAILED_PREFIX, StatsState};

pub struct StatsView {
    scope: Arc<ViewScope<StatsState>>,
    ticket: Ticket,
    task: Option<JoinHandle<()>>,
}

impl StatsView {
    /// Start loading statistics. Must be called from within a tokio runtime.
    pub fn mount(api: Arc<dyn DashboardApi>) -> Self {
        let (scope, ticket) = ViewScope::started(StatsState::Loading);
        let scope = Arc::new(scope);

        let task_scope = Arc::clone(&scope);
        let task = tokio::spawn(async move {
            let next = load(api.as_ref()).await;
            if !task_scope.resolve(ticket, next) {
                debug!("statistics arrived after unmount; discarded");
            }
        });

        Self { scope, ticket, task: Some(task) }
    }

    #[must_use]
    pub fn state(&self) -> StatsState {
        self.scope.snapshot()
    }

    /// Wait for the fetch to finish and return the resolved state.
    pub async fn settled(&mut self) -> StatsState {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                error!(error = %e, "statistics task did not complete");
                self.scope.resolve(self.ticket, StatsState::Failed(format!("{STATS_FAILED_PREFIX}: {e}")));
            }
        }
        self.state()
    }

    /// Tear the view down. Any in-flight result is dropped.
    pub fn unmount(&mut self) {
        self.scope.teardown();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        !self.scope.is_torn_down()
    }
}

impl Drop for StatsView {
    fn drop(&mut self) {
        self.unmount();
    }
}

async fn load(api: &dyn DashboardApi) -> StatsState {
    match api.fetch_stats().await {
        Ok(snapshot) => {
            info!(total_students = ?snapshot.total_students, "statistics loaded");
            StatsState::Loaded(snapshot)
        }
        Err(e) => {
            error!(error = %e, "statistics fetch failed");
            StatsState::Failed(format!("{STATS_FAILED_PREFIX}: {e}"))
        }
    }
}

#[cfg(test)]
#[path = "stats_view_test.rs"]
mod stats_view_test;
