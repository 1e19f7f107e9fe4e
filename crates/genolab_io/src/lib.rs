//! # Genolab IO
//!
//! Reading and writing genolab genomes.
//!
//! This crate provides:
//! - Structured error handling with custom error types
//! - JSON, hex DNA and gzip encodings
//! - Format-detecting genome files with validation on load

/// Error types and result aliases for I/O operations
pub mod error;
/// Genome files and rkyv snapshots
pub mod persistence;
/// Validated serialization helpers for JSON, hex DNA and gzip
pub mod serialization;

pub use error::{IoError, Result};
pub use persistence::{load_genome, load_genomes, save_genome, save_genomes, GenomeFormat};
pub use serialization::{
    from_gzip_json, from_hex_dna, from_json, is_valid_hex_dna, read_json_file, to_gzip_json,
    to_hex_dna, to_json, to_json_pretty, write_json_file,
};
