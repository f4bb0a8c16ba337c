//! # Borgdeck - Client Toolkit for a BorgBackup Management Backend
//!
//! Typed client library and CLI for a borg backup manager: compression spec
//! handling, archive list presentation, maintenance job polling, and a thin
//! pass-through over the backend's REST API.
//!
//! ## Features
//!
//! - **Compression spec codec**: lossless, total conversion between
//!   structured options and borg's flat `--compression` string
//! - **Archive grouping**: fixed age buckets and stable time sorting for
//!   archive lists
//! - **Maintenance polling**: self-terminating poller for `check`/`compact`
//!   job status
//! - **REST client**: settings, repositories, archives, restores, scripts
//! - **Command preview**: `borg create` invocation assembly for display
//!
//! ## Compression Spec Format
//!
//! The one wire format this crate owns end-to-end:
//!
//! ```text
//! [obfuscate,<N>,][auto,]<algorithm>[,<level>]
//! ```
//!
//! | Spec                     | Meaning                                  |
//! |--------------------------|------------------------------------------|
//! | `lz4`                    | LZ4, no level                            |
//! | `zstd,3`                 | Zstandard level 3                        |
//! | `auto,zstd,10`           | Compressibility probe, then zstd 10      |
//! | `auto,lz4`               | Pure auto-detect (fixed lz4 fallback)    |
//! | `obfuscate,110,zlib,6`   | Chunk-size obfuscation over zlib 6       |
//! | `none`                   | Store uncompressed                       |
//!
//! Both directions are total functions: malformed input never raises, and
//! unknown algorithm names pass through verbatim so the backend stays the
//! authority on what it accepts.
//!
//! ## Quick Start
//!
//! ### Compression Specs (Pure, Synchronous)
//!
//! ```rust,ignore
//! use borgdeck::compression::{build_compression_spec, parse_compression_spec};
//!
//! let mut options = parse_compression_spec("zstd,3");
//! options.auto_detect = true;
//! assert_eq!(build_compression_spec(&options), "auto,zstd,3");
//! ```
//!
//! ### Talking to the Backend
//!
//! ```rust,ignore
//! use borgdeck::api::ApiClient;
//! use borgdeck::jobs::JobMonitor;
//!
//! let client = ApiClient::new("http://127.0.0.1:8200")?;
//! for repo in client.repositories().await? {
//!     println!("{}: {}", repo.id, repo.name);
//! }
//!
//! // Poll check/compact status until the repository goes idle
//! let status = JobMonitor::spawn(client, 1).wait_idle().await;
//! assert!(!status.is_active());
//! ```
//!
//! ## Modules
//!
//! - [`compression`]: compression spec parser and builder
//! - [`archives`]: archive grouping and sorting
//! - [`jobs`]: maintenance job polling
//! - [`api`]: REST client and wire types
//! - [`command`]: borg command preview assembly
//! - [`config`]: configuration management
//! - [`error`]: error types and result alias

pub mod api;
pub mod archives;
pub mod command;
pub mod compression;
pub mod config;
pub mod error;
pub mod jobs;

// Re-exports for convenience
pub use api::{ApiClient, Archive, MaintenanceStatus, Repository, Settings};
pub use archives::{group_archives, sort_archives, GroupedArchives, SortOrder, TimeBucket};
pub use command::CreateCommand;
pub use compression::{
    build_compression_spec, parse_compression_spec, Algorithm, CompressionOptions,
};
pub use config::Config;
pub use error::{BorgdeckError, Result};
pub use jobs::JobMonitor;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
