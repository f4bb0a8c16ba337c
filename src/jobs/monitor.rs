//! Background poller for running maintenance jobs.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::models::MaintenanceStatus;
use crate::api::ApiClient;

/// Poll cadence while a maintenance job is running.
pub const POLL_INTERVAL: Duration = Duration::from_millis(3000);

/// Handle to a background maintenance poller for one repository.
///
/// The poll task fetches the running-jobs snapshot, publishes it to every
/// subscriber, and keeps going on a fixed cadence only while a job is
/// reported active. A fetch failure reads as "nothing running" and ends the
/// poll - retries stay off at this layer. Dropping the handle aborts the
/// task.
///
/// # Usage
///
/// ```rust,ignore
/// use borgdeck::api::ApiClient;
/// use borgdeck::jobs::JobMonitor;
///
/// let client = ApiClient::new("http://127.0.0.1:8200")?;
/// let monitor = JobMonitor::spawn(client, 1);
/// let status = monitor.wait_idle().await;
/// assert!(!status.is_active());
/// ```
pub struct JobMonitor {
    receiver: watch::Receiver<MaintenanceStatus>,
    task: JoinHandle<()>,
}

impl JobMonitor {
    /// Spawn a poller for one repository at the standard cadence.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(client: ApiClient, repository_id: i64) -> Self {
        Self::with_interval(client, repository_id, POLL_INTERVAL)
    }

    /// Spawn a poller with an explicit cadence.
    pub fn with_interval(client: ApiClient, repository_id: i64, interval: Duration) -> Self {
        let (sender, receiver) = watch::channel(MaintenanceStatus::default());

        let task = tokio::spawn(async move {
            loop {
                // A failed fetch reads as "nothing running"; no retry.
                let status = match client.running_jobs(repository_id).await {
                    Ok(status) => status,
                    Err(err) => {
                        tracing::debug!(
                            repository_id,
                            "running-jobs fetch failed, treating as idle: {err}"
                        );
                        MaintenanceStatus::default()
                    },
                };

                if sender.send(status).is_err() {
                    // Every receiver is gone; nobody is watching.
                    break;
                }
                if !status.is_active() {
                    break;
                }

                tokio::time::sleep(interval).await;
            }
        });

        Self { receiver, task }
    }

    /// Latest observed snapshot.
    pub fn status(&self) -> MaintenanceStatus {
        *self.receiver.borrow()
    }

    /// Subscribe to snapshot updates.
    pub fn subscribe(&self) -> watch::Receiver<MaintenanceStatus> {
        self.receiver.clone()
    }

    /// True while the poll task is still running.
    pub fn is_polling(&self) -> bool {
        !self.task.is_finished()
    }

    /// Consume the handle and wait until the backend reports no running
    /// jobs, returning the final snapshot.
    pub async fn wait_idle(mut self) -> MaintenanceStatus {
        while self.receiver.changed().await.is_ok() {
            if !self.receiver.borrow().is_active() {
                break;
            }
        }
        let status = *self.receiver.borrow();
        status
    }
}

impl Drop for JobMonitor {
    fn drop(&mut self) {
        // The poll dies with its owner.
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_backend_reads_as_idle() {
        // Nothing listens on port 1; the monitor must publish an idle
        // snapshot and terminate instead of erroring or retrying.
        let client =
            ApiClient::with_timeout("http://127.0.0.1:1", Duration::from_millis(500)).unwrap();
        let monitor = JobMonitor::with_interval(client, 1, Duration::from_millis(10));

        let status = monitor.wait_idle().await;
        assert!(!status.is_active());
    }

    #[tokio::test]
    async fn test_drop_aborts_task() {
        let client =
            ApiClient::with_timeout("http://127.0.0.1:1", Duration::from_millis(500)).unwrap();
        let monitor = JobMonitor::with_interval(client, 1, Duration::from_secs(3600));
        let mut receiver = monitor.subscribe();
        drop(monitor);

        // Sender side is gone once the task is aborted; changed() drains the
        // last published value (if any) and then errors.
        while receiver.changed().await.is_ok() {}
    }
}
