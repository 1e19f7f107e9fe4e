//! Text and compressed encodings for genomes.
//!
//! Three interchange forms are supported: plain JSON, hex-encoded JSON
//! ("hex DNA", convenient for pasting a genome into a terminal) and
//! gzip-compressed JSON for large batches.

use crate::error::{IoError, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;

/// Serializes a value to compact JSON.
pub fn to_json<T>(data: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    serde_json::to_string(data)
        .map_err(|e| IoError::serialization(format!("JSON serialization failed: {}", e)))
}

/// Serializes a value to indented JSON.
pub fn to_json_pretty<T>(data: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    serde_json::to_string_pretty(data)
        .map_err(|e| IoError::serialization(format!("JSON serialization failed: {}", e)))
}

/// Parses JSON, rejecting blank input before handing it to serde.
pub fn from_json<T>(json: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    if json.trim().is_empty() {
        return Err(IoError::validation("Empty JSON string"));
    }

    serde_json::from_str(json)
        .map_err(|e| IoError::serialization(format!("JSON deserialization failed: {}", e)))
}

/// Encodes a value as hex DNA: the hex digits of its JSON bytes.
pub fn to_hex_dna<T>(data: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    let json = to_json(data)?;
    Ok(hex::encode(json.as_bytes()))
}

/// Decodes hex DNA. Surrounding whitespace is ignored.
pub fn from_hex_dna<T>(hex_str: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let trimmed = hex_str.trim();
    if trimmed.is_empty() {
        return Err(IoError::validation("Empty hex string"));
    }

    let bytes = hex::decode(trimmed)
        .map_err(|e| IoError::validation(format!("Invalid hex encoding: {}", e)))?;

    let json = String::from_utf8(bytes)
        .map_err(|e| IoError::validation(format!("Invalid UTF-8 in hex: {}", e)))?;

    from_json(&json)
}

/// Whether a string decodes as hex at all. Says nothing about its payload.
pub fn is_valid_hex_dna(hex_str: &str) -> bool {
    let trimmed = hex_str.trim();
    !trimmed.is_empty() && hex::decode(trimmed).is_ok()
}

/// Gzip-compresses the JSON encoding of a value.
pub fn to_gzip_json<T>(data: &T) -> Result<Vec<u8>>
where
    T: Serialize + ?Sized,
{
    let json = to_json(data)?;
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(json.as_bytes())
        .map_err(|e| IoError::compression(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| IoError::compression(e.to_string()))
}

/// Inflates gzip bytes and parses the JSON inside.
pub fn from_gzip_json<T>(bytes: &[u8]) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let mut json = String::new();
    GzDecoder::new(bytes)
        .read_to_string(&mut json)
        .map_err(|e| IoError::compression(e.to_string()))?;
    from_json(&json)
}

/// Writes pretty JSON to `path`.
pub fn write_json_file<T, P>(data: &T, path: P) -> Result<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let json = to_json_pretty(data)?;
    std::fs::write(&path, json).map_err(|e| {
        IoError::FileSystem(e).with_context(format!("writing JSON to {:?}", path.as_ref()))
    })?;
    Ok(())
}

/// Reads and parses a JSON file.
pub fn read_json_file<T, P>(path: P) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let json = std::fs::read_to_string(&path).map_err(|e| {
        IoError::FileSystem(e).with_context(format!("reading JSON from {:?}", path.as_ref()))
    })?;
    from_json(&json)
}
