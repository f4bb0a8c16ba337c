//! Borgdeck CLI binary.
//!
//! Client for a BorgBackup management backend.
//!
//! # Commands
//!
//! - `parse` / `build` - Work with compression spec strings
//! - `preview` - Assemble the borg create command line for a backup form
//! - `repos` / `archives` - Inspect repositories and their archives
//! - `watch` - Follow maintenance jobs until a repository goes idle
//! - `restores` / `scripts` / `settings` - Remaining backend surfaces

use anyhow::Context;
use borgdeck::{
    api::{ApiClient, AssignScriptRequest, RestoreRequest},
    archives::{group_archives, sort_archives, SortOrder, TimeBucket},
    command::CreateCommand,
    compression::{build_compression_spec, parse_compression_spec, Algorithm, CompressionOptions},
    config::Config,
    jobs::JobMonitor,
    VERSION,
};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "borgdeck")]
#[command(version = VERSION)]
#[command(about = "Borgdeck - client for a BorgBackup management backend", long_about = None)]
struct Cli {
    /// Backend base URL (overrides config file and BORGDECK_API_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a compression spec into its fields
    Parse {
        /// Spec string, e.g. "obfuscate,110,auto,zstd,3"
        spec: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build a compression spec from fields
    Build {
        /// Algorithm name (none, lz4, zstd, zlib, lzma, auto)
        #[arg(short, long, default_value = "lz4")]
        algorithm: String,

        /// Compression level (empty = engine default)
        #[arg(short, long, default_value = "")]
        level: String,

        /// Probe compressibility before compressing
        #[arg(long)]
        auto_detect: bool,

        /// Chunk-size obfuscation spec
        #[arg(long, default_value = "")]
        obfuscate: String,
    },

    /// List known compression algorithms and their level ranges
    Algorithms,

    /// Preview the borg create command for a backup form
    Preview {
        /// Repository path
        repository: String,

        /// Archive name template, e.g. "{hostname}-{now}"
        archive: String,

        /// Source path (repeatable)
        #[arg(short, long = "source", required = true)]
        sources: Vec<String>,

        /// Exclude pattern (repeatable)
        #[arg(short, long = "exclude")]
        excludes: Vec<String>,

        /// Compression spec
        #[arg(short, long, default_value = "lz4")]
        compression: String,

        /// Add --dry-run
        #[arg(long)]
        dry_run: bool,
    },

    /// List repositories
    Repos,

    /// List archives in a repository, grouped by age
    Archives {
        /// Repository id
        repository: i64,

        /// Print a flat time-sorted list instead of age groups
        #[arg(long)]
        flat: bool,

        /// Sort oldest first (flat mode)
        #[arg(long)]
        ascending: bool,
    },

    /// Watch maintenance jobs until the repository goes idle
    Watch {
        /// Repository id
        repository: i64,
    },

    /// Restore jobs
    Restores {
        #[command(subcommand)]
        action: Option<RestoresAction>,
    },

    /// Scripts and repository assignments
    Scripts {
        #[command(subcommand)]
        action: Option<ScriptsAction>,
    },

    /// Show the system-wide settings document
    Settings,
}

#[derive(Subcommand)]
enum RestoresAction {
    /// List restore jobs
    List,

    /// Create a restore job
    Create {
        /// Repository id
        repository: i64,

        /// Archive name
        archive: String,

        /// Destination path on the backend host
        target: String,

        /// Restore only this path (repeatable; default: whole archive)
        #[arg(short, long = "path")]
        paths: Vec<String>,
    },
}

#[derive(Subcommand)]
enum ScriptsAction {
    /// List all scripts
    List,

    /// List scripts attached to a repository
    Assigned {
        /// Repository id
        repository: i64,
    },

    /// Attach a script to a repository
    Assign {
        /// Repository id
        repository: i64,

        /// Script id
        script: i64,

        /// Hook point (e.g. pre_backup, post_backup)
        #[arg(short, long, default_value = "pre_backup")]
        trigger: String,
    },

    /// Detach a script assignment
    Unassign {
        /// Repository id
        repository: i64,

        /// Assignment id
        assignment: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(url) = cli.url {
        config.api.base_url = url;
    }

    match cli.command {
        Commands::Parse { spec, json } => cmd_parse(&spec, json),
        Commands::Build {
            algorithm,
            level,
            auto_detect,
            obfuscate,
        } => cmd_build(algorithm, level, auto_detect, obfuscate),
        Commands::Algorithms => cmd_algorithms(),
        Commands::Preview {
            repository,
            archive,
            sources,
            excludes,
            compression,
            dry_run,
        } => cmd_preview(repository, archive, sources, excludes, compression, dry_run),
        Commands::Repos => cmd_repos(&config).await,
        Commands::Archives {
            repository,
            flat,
            ascending,
        } => cmd_archives(&config, repository, flat, ascending).await,
        Commands::Watch { repository } => cmd_watch(&config, repository).await,
        Commands::Restores { action } => cmd_restores(&config, action).await,
        Commands::Scripts { action } => cmd_scripts(&config, action).await,
        Commands::Settings => cmd_settings(&config).await,
    }
}

fn client(config: &Config) -> anyhow::Result<ApiClient> {
    ApiClient::from_config(&config.api).context("Failed to create API client")
}

fn cmd_parse(spec: &str, json: bool) -> anyhow::Result<()> {
    let options = parse_compression_spec(spec);
    if json {
        println!("{}", serde_json::to_string_pretty(&options)?);
    } else {
        println!("algorithm:   {}", options.algorithm);
        println!("level:       {}", options.level);
        println!("auto_detect: {}", options.auto_detect);
        println!("obfuscate:   {}", options.obfuscate);
    }
    Ok(())
}

fn cmd_build(
    algorithm: String,
    level: String,
    auto_detect: bool,
    obfuscate: String,
) -> anyhow::Result<()> {
    match Algorithm::from_name(&algorithm) {
        Some(known) if !known.accepts_level(&level) => {
            tracing::warn!(
                "level {:?} is outside the accepted range for {} - emitting anyway",
                level,
                known
            );
        },
        None => {
            tracing::warn!("unknown algorithm {:?} - passing through verbatim", algorithm);
        },
        _ => {},
    }

    let options = CompressionOptions {
        algorithm,
        level,
        auto_detect,
        obfuscate,
    };
    println!("{}", build_compression_spec(&options));
    Ok(())
}

fn cmd_algorithms() -> anyhow::Result<()> {
    for algorithm in Algorithm::all() {
        match algorithm.level_range() {
            Some(range) => println!(
                "{:6} levels {}-{} (default {})",
                algorithm.name(),
                range.start(),
                range.end(),
                algorithm.default_level().unwrap_or(0),
            ),
            None => println!("{:6} no level", algorithm.name()),
        }
    }
    Ok(())
}

fn cmd_preview(
    repository: String,
    archive: String,
    sources: Vec<String>,
    excludes: Vec<String>,
    compression: String,
    dry_run: bool,
) -> anyhow::Result<()> {
    let mut command = CreateCommand::new(repository, archive)
        .compression(compression)
        .dry_run(dry_run);
    for source in sources {
        command = command.source(source);
    }
    for pattern in excludes {
        command = command.exclude(pattern);
    }
    println!("{}", command.render());
    Ok(())
}

async fn cmd_repos(config: &Config) -> anyhow::Result<()> {
    let repositories = client(config)?.repositories().await?;
    if repositories.is_empty() {
        println!("No repositories");
        return Ok(());
    }
    for repo in repositories {
        let compression = repo.compression.as_deref().unwrap_or("-");
        let archives = repo
            .archive_count
            .map(|n| n.to_string())
            .unwrap_or_else(|| "?".to_string());
        println!(
            "{:4}  {:20}  {:30}  compression={}  archives={}",
            repo.id, repo.name, repo.path, compression, archives
        );
    }
    Ok(())
}

async fn cmd_archives(
    config: &Config,
    repository: i64,
    flat: bool,
    ascending: bool,
) -> anyhow::Result<()> {
    let mut archives = client(config)?.archives(repository).await?;

    if flat {
        let order = if ascending {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        };
        sort_archives(&mut archives, order);
        for archive in archives {
            println!("{}  {}", archive.start, archive.name);
        }
        return Ok(());
    }

    let grouped = group_archives(archives, chrono::Utc::now());
    for bucket in TimeBucket::all() {
        let entries = grouped.bucket(*bucket);
        if entries.is_empty() {
            continue;
        }
        println!("{} ({})", bucket.label(), entries.len());
        for archive in entries {
            println!("  {}  {}", archive.start, archive.name);
        }
    }
    Ok(())
}

async fn cmd_watch(config: &Config, repository: i64) -> anyhow::Result<()> {
    let monitor = JobMonitor::with_interval(
        client(config)?,
        repository,
        config.polling.interval(),
    );
    let mut updates = monitor.subscribe();

    while updates.changed().await.is_ok() {
        let status = *updates.borrow();
        if status.is_active() {
            println!(
                "running: check={} compact={}",
                status.check_running, status.compact_running
            );
        }
    }

    println!("idle");
    Ok(())
}

async fn cmd_restores(config: &Config, action: Option<RestoresAction>) -> anyhow::Result<()> {
    let client = client(config)?;
    match action.unwrap_or(RestoresAction::List) {
        RestoresAction::List => {
            for job in client.restores().await? {
                println!(
                    "{:4}  repo={}  {}  -> {}  [{}]",
                    job.id, job.repository_id, job.archive_name, job.target_path, job.status
                );
            }
        },
        RestoresAction::Create {
            repository,
            archive,
            target,
            paths,
        } => {
            let job = client
                .create_restore(&RestoreRequest {
                    repository_id: repository,
                    archive_name: archive,
                    target_path: target,
                    paths,
                })
                .await?;
            println!("created restore job {} [{}]", job.id, job.status);
        },
    }
    Ok(())
}

async fn cmd_scripts(config: &Config, action: Option<ScriptsAction>) -> anyhow::Result<()> {
    let client = client(config)?;
    match action.unwrap_or(ScriptsAction::List) {
        ScriptsAction::List => {
            for script in client.scripts().await? {
                let description = script.description.as_deref().unwrap_or("");
                println!("{:4}  {:20}  {}", script.id, script.name, description);
            }
        },
        ScriptsAction::Assigned { repository } => {
            for assignment in client.repository_scripts(repository).await? {
                println!(
                    "{:4}  script={}  trigger={}  enabled={}",
                    assignment.id, assignment.script_id, assignment.trigger, assignment.enabled
                );
            }
        },
        ScriptsAction::Assign {
            repository,
            script,
            trigger,
        } => {
            let assignment = client
                .assign_script(
                    repository,
                    &AssignScriptRequest {
                        script_id: script,
                        trigger,
                    },
                )
                .await?;
            println!("assigned as {}", assignment.id);
        },
        ScriptsAction::Unassign {
            repository,
            assignment,
        } => {
            client.unassign_script(repository, assignment).await?;
            println!("unassigned");
        },
    }
    Ok(())
}

async fn cmd_settings(config: &Config) -> anyhow::Result<()> {
    let settings = client(config)?.settings().await?;
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}
