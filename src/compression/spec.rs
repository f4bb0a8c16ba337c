//! Parser and builder for Borg compression spec strings.

use serde::{Deserialize, Serialize};

/// Codec the `auto` heuristic probes compressibility with. Fixed by borg;
/// `auto` in a spec always serializes as `auto,lz4`.
pub const AUTO_FALLBACK: &str = "lz4";

/// Structured form of a compression spec.
///
/// `level` and `obfuscate` are kept as strings so that "unset" (empty) stays
/// distinct from an explicit `0`, matching what a form field holds. The
/// algorithm is a plain string rather than [`Algorithm`](super::Algorithm):
/// a name the client does not know still round-trips to the backend, which
/// may accept it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionOptions {
    /// Algorithm name (`none`, `lz4`, `zstd`, `zlib`, `lzma`, `auto`, or
    /// anything else, passed through verbatim).
    pub algorithm: String,
    /// Compression level; empty means unset.
    pub level: String,
    /// Probe compressibility before applying the algorithm.
    pub auto_detect: bool,
    /// Chunk-size obfuscation spec; empty means off.
    pub obfuscate: String,
}

impl CompressionOptions {
    /// Options for a bare algorithm with no level.
    pub fn new(algorithm: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            ..Self::default()
        }
    }

    /// Set the compression level.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Enable the compressibility probe.
    pub fn with_auto_detect(mut self, auto_detect: bool) -> Self {
        self.auto_detect = auto_detect;
        self
    }

    /// Set the chunk-size obfuscation spec.
    pub fn with_obfuscate(mut self, obfuscate: impl Into<String>) -> Self {
        self.obfuscate = obfuscate.into();
        self
    }

    /// Parse a spec string. See [`parse_compression_spec`].
    pub fn parse(spec: &str) -> Self {
        parse_compression_spec(spec)
    }

    /// Serialize back to the flat spec string. See [`build_compression_spec`].
    pub fn to_spec(&self) -> String {
        build_compression_spec(self)
    }
}

impl std::fmt::Display for CompressionOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_spec())
    }
}

/// Parse a compression spec string into its structured form.
///
/// Tokens are consumed left to right: an optional `obfuscate,<N>` pair, an
/// optional `auto` marker, the algorithm, and (for everything but `auto`)
/// an optional level. The algorithm defaults to `lz4` only when the token
/// stream is exhausted; the empty input string yields an *empty* algorithm,
/// and callers wanting a guaranteed value must substitute their own default
/// before calling. Total over all inputs, never errors.
pub fn parse_compression_spec(spec: &str) -> CompressionOptions {
    let mut options = CompressionOptions::default();
    let mut tokens = spec.split(',');

    let mut next = tokens.next();
    if next == Some("obfuscate") {
        // A dangling `obfuscate` with no spec token just leaves it off.
        options.obfuscate = tokens.next().unwrap_or("").to_string();
        next = tokens.next();
    }
    if next == Some("auto") {
        options.auto_detect = true;
        next = tokens.next();
    }
    options.algorithm = match next {
        Some(token) => token.to_string(),
        None => AUTO_FALLBACK.to_string(),
    };
    if options.algorithm != "auto" {
        if let Some(level) = tokens.next() {
            options.level = level.to_string();
        }
    }

    options
}

/// Build the canonical spec string from structured options.
///
/// Invariants:
/// - `none` never carries a level, whatever was set;
/// - `auto` as the algorithm always folds to `auto,lz4` and suppresses the
///   `auto_detect` prefix so the token is never emitted twice;
/// - unknown algorithm names are emitted verbatim rather than dropped, so a
///   wrong-but-visible spec stays debuggable.
pub fn build_compression_spec(options: &CompressionOptions) -> String {
    let mut parts: Vec<&str> = Vec::new();

    if !options.obfuscate.is_empty() {
        parts.push("obfuscate");
        parts.push(&options.obfuscate);
    }
    if options.auto_detect && options.algorithm != "auto" {
        parts.push("auto");
    }
    match options.algorithm.as_str() {
        "none" => parts.push("none"),
        "auto" => {
            parts.push("auto");
            parts.push(AUTO_FALLBACK);
        },
        algorithm => {
            parts.push(algorithm);
            if !options.level.is_empty() {
                parts.push(&options.level);
            }
        },
    }

    parts.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_algorithm() {
        let options = parse_compression_spec("zstd");
        assert_eq!(options.algorithm, "zstd");
        assert_eq!(options.level, "");
        assert!(!options.auto_detect);
        assert_eq!(options.obfuscate, "");
    }

    #[test]
    fn test_parse_algorithm_with_level() {
        let options = parse_compression_spec("zlib,6");
        assert_eq!(options.algorithm, "zlib");
        assert_eq!(options.level, "6");
    }

    #[test]
    fn test_parse_auto_prefix() {
        let options = parse_compression_spec("auto,zstd,3");
        assert!(options.auto_detect);
        assert_eq!(options.algorithm, "zstd");
        assert_eq!(options.level, "3");
    }

    #[test]
    fn test_parse_obfuscate_prefix() {
        let options = parse_compression_spec("obfuscate,110,auto,zstd,3");
        assert_eq!(options.obfuscate, "110");
        assert!(options.auto_detect);
        assert_eq!(options.algorithm, "zstd");
        assert_eq!(options.level, "3");
    }

    #[test]
    fn test_parse_empty_string_keeps_algorithm_empty() {
        // The parser does not substitute a default for an explicit empty
        // token; callers supply their own fallback.
        let options = parse_compression_spec("");
        assert_eq!(options.algorithm, "");
    }

    #[test]
    fn test_parse_exhausted_stream_defaults_to_lz4() {
        let options = parse_compression_spec("obfuscate,110");
        assert_eq!(options.obfuscate, "110");
        assert_eq!(options.algorithm, "lz4");

        let options = parse_compression_spec("auto");
        assert!(options.auto_detect);
        assert_eq!(options.algorithm, "lz4");
    }

    #[test]
    fn test_parse_dangling_obfuscate() {
        let options = parse_compression_spec("obfuscate");
        assert_eq!(options.obfuscate, "");
        assert_eq!(options.algorithm, "lz4");
    }

    #[test]
    fn test_parse_trailing_comma_yields_empty_level() {
        let options = parse_compression_spec("lz4,");
        assert_eq!(options.algorithm, "lz4");
        assert_eq!(options.level, "");
    }

    #[test]
    fn test_build_none_drops_level() {
        let options = CompressionOptions::new("none").with_level("6");
        assert_eq!(build_compression_spec(&options), "none");
    }

    #[test]
    fn test_build_auto_folds_to_fixed_fallback() {
        let options = CompressionOptions::new("auto");
        assert_eq!(build_compression_spec(&options), "auto,lz4");

        // auto_detect on top of algorithm `auto` must not double the token
        let options = CompressionOptions::new("auto").with_auto_detect(true);
        assert_eq!(build_compression_spec(&options), "auto,lz4");
    }

    #[test]
    fn test_build_obfuscate_composition() {
        let options = CompressionOptions::new("zstd")
            .with_level("10")
            .with_auto_detect(true)
            .with_obfuscate("110");
        assert_eq!(build_compression_spec(&options), "obfuscate,110,auto,zstd,10");
    }

    #[test]
    fn test_build_unknown_algorithm_passes_through() {
        let options = CompressionOptions::new("zstdmax").with_level("99");
        assert_eq!(build_compression_spec(&options), "zstdmax,99");
    }

    #[test]
    fn test_display_matches_build() {
        let options = CompressionOptions::new("zstd").with_level("3");
        assert_eq!(options.to_string(), "zstd,3");
    }
}
