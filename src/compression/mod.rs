//! Borg compression spec codec.
//!
//! Bidirectional conversion between [`CompressionOptions`] and the flat
//! comma-separated spec string that `borg create --compression` consumes.
//!
//! # Spec Format
//!
//! ```text
//! [obfuscate,<N>,][auto,]<algorithm>[,<level>]
//! ```
//!
//! | Spec                        | Meaning                                      |
//! |-----------------------------|----------------------------------------------|
//! | `lz4`                       | LZ4, no level                                |
//! | `zstd,3`                    | Zstandard level 3                            |
//! | `auto,zstd,10`              | Test compressibility first, then zstd 10     |
//! | `auto,lz4`                  | Pure auto-detect (lz4 is the fixed fallback) |
//! | `obfuscate,110,zlib,6`      | Chunk-size obfuscation layered over zlib 6   |
//! | `none`                      | Store uncompressed (never carries a level)   |
//!
//! Both directions are total: the parser accepts every string without
//! erroring, and the builder passes unknown algorithm names through verbatim
//! so the backend stays the single authority on what it accepts.
//!
//! # Usage
//!
//! ```rust,ignore
//! use borgdeck::compression::{build_compression_spec, parse_compression_spec};
//!
//! let mut options = parse_compression_spec("obfuscate,110,auto,zstd,3");
//! assert!(options.auto_detect);
//!
//! options.level = "10".to_string();
//! assert_eq!(build_compression_spec(&options), "obfuscate,110,auto,zstd,10");
//! ```

mod algorithm;
mod spec;

pub use algorithm::Algorithm;
pub use spec::{
    build_compression_spec, parse_compression_spec, CompressionOptions, AUTO_FALLBACK,
};
