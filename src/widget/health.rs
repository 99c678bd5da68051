//! Health probing and the periodic monitor task.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use super::status::{StatusUpdate, classify_health};
use super::view::ChatView;
use crate::api::ChatBackend;

/// Probe the backend once and push the result to the indicator.
///
/// Never fails: transport and decode errors become a connection-error status.
pub async fn probe_health<B, V>(backend: &B, view: &V) -> StatusUpdate
where
    B: ChatBackend + ?Sized,
    V: ChatView + ?Sized,
{
    let update = match backend.health().await {
        Ok(report) => classify_health(&report),
        Err(e) => {
            warn!(name: "health.probe.failed", error = %e, "Health check failed");
            StatusUpdate::connection_error()
        }
    };

    debug!(
        name: "health.status",
        status = ?update.status,
        label = %update.label,
        "Connectivity status updated"
    );
    view.set_connectivity_status(&update);
    update
}

/// Background task re-probing health on a fixed interval.
///
/// Runs independently of chat submissions and only touches the status
/// indicator. The task stops when the handle is dropped.
#[derive(Debug)]
pub struct HealthMonitor {
    handle: JoinHandle<()>,
}

impl HealthMonitor {
    /// Start probing every `interval`. The first probe happens one interval
    /// from now; the widget probes once itself on start-up.
    pub fn spawn<B, V>(backend: Arc<B>, view: Arc<V>, interval: Duration) -> Self
    where
        B: ChatBackend + ?Sized + 'static,
        V: ChatView + ?Sized + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // interval() fires immediately once
            ticker.tick().await;
            loop {
                ticker.tick().await;
                probe_health(&*backend, &*view).await;
            }
        });
        Self { handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stop the task.
    pub fn shutdown(self) {
        drop(self);
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
