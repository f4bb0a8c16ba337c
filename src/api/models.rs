//! Wire types for the backend REST API.
//!
//! These mirror the backend's JSON bodies field-for-field. Optional fields
//! default rather than fail so older backends keep deserializing.

use serde::{Deserialize, Serialize};

/// Backup repository as reported by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    /// Backend-assigned identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Filesystem or remote path of the borg repository.
    pub path: String,
    /// Stored compression spec, if one is configured.
    #[serde(default)]
    pub compression: Option<String>,
    /// Number of archives, if the backend has it cached.
    #[serde(default)]
    pub archive_count: Option<u64>,
}

/// One archive inside a repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Archive {
    /// Archive name.
    pub name: String,
    /// Creation timestamp as borg reports it (ISO 8601, possibly zoneless).
    pub start: String,
    /// Completion timestamp, when known.
    #[serde(default)]
    pub end: Option<String>,
    /// Original size in bytes, when known.
    #[serde(default)]
    pub size: Option<u64>,
}

/// Detailed stats for one archive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveInfo {
    /// Archive name.
    pub name: String,
    /// Creation timestamp.
    pub start: String,
    /// Completion timestamp.
    #[serde(default)]
    pub end: Option<String>,
    /// Uncompressed size in bytes.
    #[serde(default)]
    pub original_size: u64,
    /// Compressed size in bytes.
    #[serde(default)]
    pub compressed_size: u64,
    /// Size after deduplication in bytes.
    #[serde(default)]
    pub deduplicated_size: u64,
    /// Number of files in the archive.
    #[serde(default)]
    pub nfiles: u64,
}

/// Repository-level stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryInfo {
    /// Repository path.
    pub path: String,
    /// Number of archives.
    #[serde(default)]
    pub archive_count: u64,
    /// Total uncompressed size across archives.
    #[serde(default)]
    pub original_size: u64,
    /// Total compressed size.
    #[serde(default)]
    pub compressed_size: u64,
    /// Unique deduplicated size on disk.
    #[serde(default)]
    pub deduplicated_size: u64,
}

/// Running maintenance jobs for one repository.
///
/// The backend runs at most one `check` and one `compact` job per
/// repository; this snapshot reports which are live right now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceStatus {
    /// A `borg check` job is running.
    #[serde(default)]
    pub check_running: bool,
    /// A `borg compact` job is running.
    #[serde(default)]
    pub compact_running: bool,
}

impl MaintenanceStatus {
    /// Any maintenance job currently live.
    pub fn is_active(&self) -> bool {
        self.check_running || self.compact_running
    }
}

/// System-wide settings document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Default compression spec applied to new repositories.
    #[serde(default)]
    pub default_compression: Option<String>,
    /// Whether backup-finished notifications are published.
    #[serde(default)]
    pub notifications_enabled: bool,
    /// MQTT connection parameters, if the integration is configured.
    #[serde(default)]
    pub mqtt: Option<MqttSettings>,
}

/// MQTT connection parameters stored by the backend.
///
/// Pass-through data only; the broker conversation happens server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MqttSettings {
    /// Broker hostname.
    pub host: String,
    /// Broker port.
    #[serde(default = "default_mqtt_port")]
    pub port: u16,
    /// Optional broker username.
    #[serde(default)]
    pub username: Option<String>,
    /// Optional broker password.
    #[serde(default)]
    pub password: Option<String>,
    /// Topic prefix for published events.
    #[serde(default)]
    pub topic_prefix: Option<String>,
    /// Whether publishing is enabled.
    #[serde(default)]
    pub enabled: bool,
}

fn default_mqtt_port() -> u16 {
    1883
}

/// Restore job as listed by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreJob {
    /// Backend-assigned identifier.
    pub id: i64,
    /// Repository the archive lives in.
    pub repository_id: i64,
    /// Archive being restored.
    pub archive_name: String,
    /// Destination path on the backend host.
    pub target_path: String,
    /// Backend status vocabulary, passed through verbatim.
    pub status: String,
    /// Start timestamp, when the job has begun.
    #[serde(default)]
    pub started_at: Option<String>,
    /// Completion timestamp, when the job has finished.
    #[serde(default)]
    pub finished_at: Option<String>,
}

/// Request body for creating a restore job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreRequest {
    /// Repository the archive lives in.
    pub repository_id: i64,
    /// Archive to restore from.
    pub archive_name: String,
    /// Destination path on the backend host.
    pub target_path: String,
    /// Subset of paths to restore; empty restores everything.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<String>,
}

/// User script known to the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    /// Backend-assigned identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Script attached to a repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptAssignment {
    /// Assignment identifier.
    pub id: i64,
    /// Script being attached.
    pub script_id: i64,
    /// Repository it is attached to.
    pub repository_id: i64,
    /// Hook point, backend vocabulary (e.g. `pre_backup`, `post_backup`).
    pub trigger: String,
    /// Whether the hook fires.
    #[serde(default)]
    pub enabled: bool,
}

/// Request body for attaching a script to a repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignScriptRequest {
    /// Script to attach.
    pub script_id: i64,
    /// Hook point, backend vocabulary.
    pub trigger: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maintenance_status_liveness() {
        assert!(!MaintenanceStatus::default().is_active());
        assert!(MaintenanceStatus {
            check_running: true,
            compact_running: false
        }
        .is_active());
        assert!(MaintenanceStatus {
            check_running: false,
            compact_running: true
        }
        .is_active());
    }

    #[test]
    fn test_maintenance_status_tolerates_sparse_body() {
        let status: MaintenanceStatus = serde_json::from_str("{}").unwrap();
        assert!(!status.is_active());

        let status: MaintenanceStatus =
            serde_json::from_str(r#"{"check_running":true}"#).unwrap();
        assert!(status.check_running);
        assert!(!status.compact_running);
    }

    #[test]
    fn test_mqtt_port_default() {
        let mqtt: MqttSettings = serde_json::from_str(r#"{"host":"broker.local"}"#).unwrap();
        assert_eq!(mqtt.port, 1883);
        assert!(!mqtt.enabled);
    }

    #[test]
    fn test_restore_request_omits_empty_paths() {
        let request = RestoreRequest {
            repository_id: 1,
            archive_name: "nightly-2026-08-01".to_string(),
            target_path: "/tmp/restore".to_string(),
            paths: Vec::new(),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("paths").is_none());
    }
}
