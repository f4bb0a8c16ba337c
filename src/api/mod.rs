//! Typed client for the backup manager REST API.
//!
//! The backend owns all execution (backups, schedules, restores, MQTT
//! publishing); this module is a thin, typed pass-through over its JSON
//! endpoints. Bodies are carried as-is - the client adds no retry layer and
//! no semantics of its own beyond status-code mapping into
//! [`BorgdeckError`](crate::error::BorgdeckError).

mod client;
pub mod models;

pub use client::ApiClient;
pub use models::{
    Archive, ArchiveInfo, AssignScriptRequest, MaintenanceStatus, MqttSettings, Repository,
    RepositoryInfo, RestoreJob, RestoreRequest, Script, ScriptAssignment, Settings,
};
