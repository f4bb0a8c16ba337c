//! Maintenance job polling.
//!
//! Tracks the `check`/`compact` jobs the backend may be running against a
//! repository. Polling continues only while a job is reported active and is
//! torn down when the owning handle drops, mirroring how the dashboard view
//! stops refreshing when it leaves the screen.

mod monitor;

pub use monitor::{JobMonitor, POLL_INTERVAL};

pub use crate::api::models::MaintenanceStatus;
