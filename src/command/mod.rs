//! Borg command preview assembly.
//!
//! Builds the flat `borg create` invocation shown to the user while they
//! edit a backup form. Preview only - the backend owns execution, and the
//! archive name template (`{hostname}-{now}` and friends) is expanded there,
//! not here.

/// Builder for a `borg create` preview line.
///
/// Flags render in a stable order: `--dry-run`, `--compression`,
/// `--exclude` repeats, then the `repository::archive` positional and the
/// source paths.
#[derive(Debug, Clone, Default)]
pub struct CreateCommand {
    repository: String,
    archive: String,
    sources: Vec<String>,
    excludes: Vec<String>,
    compression: String,
    dry_run: bool,
}

impl CreateCommand {
    /// Start a preview for `repository::archive`.
    pub fn new(repository: impl Into<String>, archive: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            archive: archive.into(),
            ..Self::default()
        }
    }

    /// Add a source path.
    pub fn source(mut self, path: impl Into<String>) -> Self {
        self.sources.push(path.into());
        self
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.excludes.push(pattern.into());
        self
    }

    /// Set the compression spec (the flat string form).
    pub fn compression(mut self, spec: impl Into<String>) -> Self {
        self.compression = spec.into();
        self
    }

    /// Toggle `--dry-run`.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Render the flat command string.
    pub fn render(&self) -> String {
        let mut parts = vec!["borg".to_string(), "create".to_string()];

        if self.dry_run {
            parts.push("--dry-run".to_string());
        }
        if !self.compression.is_empty() {
            parts.push("--compression".to_string());
            parts.push(self.compression.clone());
        }
        for pattern in &self.excludes {
            parts.push("--exclude".to_string());
            parts.push(quote(pattern));
        }

        parts.push(quote(&format!("{}::{}", self.repository, self.archive)));
        for source in &self.sources {
            parts.push(quote(source));
        }

        parts.join(" ")
    }
}

impl std::fmt::Display for CreateCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Single-quote an argument when it contains characters the shell would
/// split or expand; plain paths render unquoted to keep the preview clean.
fn quote(arg: &str) -> String {
    let needs_quoting = arg.is_empty()
        || arg
            .chars()
            .any(|c| {
                c.is_whitespace() || matches!(c, '\'' | '"' | '$' | '*' | '?' | '&' | ';' | '{' | '}')
            });
    if needs_quoting {
        format!("'{}'", arg.replace('\'', r"'\''"))
    } else {
        arg.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_minimal() {
        let command = CreateCommand::new("/backups/repo", "{hostname}-{now}").source("/home");
        assert_eq!(
            command.render(),
            "borg create '/backups/repo::{hostname}-{now}' /home"
        );
    }

    #[test]
    fn test_render_flag_order() {
        let command = CreateCommand::new("/backups/repo", "nightly")
            .source("/home")
            .source("/etc")
            .exclude("/home/*/.cache")
            .compression("obfuscate,110,auto,zstd,3")
            .dry_run(true);
        assert_eq!(
            command.render(),
            "borg create --dry-run --compression obfuscate,110,auto,zstd,3 \
             --exclude '/home/*/.cache' /backups/repo::nightly /home /etc"
        );
    }

    #[test]
    fn test_quote_spaces_and_single_quotes() {
        let command = CreateCommand::new("/backups/repo", "nightly").source("/home/my docs");
        assert!(command.render().ends_with("'/home/my docs'"));

        let command = CreateCommand::new("/backups/repo", "nightly").source("/home/o'brien");
        assert!(command.render().ends_with(r"'/home/o'\''brien'"));
    }

    #[test]
    fn test_empty_compression_omits_flag() {
        let command = CreateCommand::new("/backups/repo", "nightly").source("/home");
        assert!(!command.render().contains("--compression"));
    }
}
