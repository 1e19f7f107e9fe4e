//! Genome files on disk.
//!
//! The format is picked from the file name: `.json`, `.json.gz`, `.hex`
//! or `.rkyv`. Every load re-validates the genome against the active
//! [`GenomeConfig`] so a file edited by hand cannot smuggle out-of-range
//! values into breeding.

use crate::error::{IoError, Result};
use crate::serialization::{
    from_gzip_json, from_hex_dna, read_json_file, to_gzip_json, to_hex_dna, write_json_file,
};
use genolab_core::config::GenomeConfig;
use genolab_core::genome::GenomeLogic;
use genolab_data::Genome;
use rkyv::de::deserializers::SharedDeserializeMap;
use rkyv::ser::serializers::AllocSerializer;
use rkyv::ser::Serializer;
use rkyv::{Archive, Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// On-disk encodings of a genome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenomeFormat {
    Json,
    GzipJson,
    Hex,
    Rkyv,
}

impl GenomeFormat {
    /// Detects the format from a path's file name.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let name = path
            .as_ref()
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if name.ends_with(".json.gz") {
            Ok(Self::GzipJson)
        } else if name.ends_with(".json") {
            Ok(Self::Json)
        } else if name.ends_with(".hex") {
            Ok(Self::Hex)
        } else if name.ends_with(".rkyv") {
            Ok(Self::Rkyv)
        } else {
            Err(IoError::UnsupportedFormat(path.as_ref().display().to_string()))
        }
    }
}

pub fn save_rkyv<T, P>(data: &T, path: P) -> Result<()>
where
    T: Serialize<AllocSerializer<4096>>,
    T: Archive,
    P: AsRef<Path>,
{
    let mut serializer = AllocSerializer::<4096>::default();
    serializer
        .serialize_value(data)
        .map_err(|e| IoError::rkyv(format!("serialization failed: {:?}", e)))?;
    let bytes = serializer.into_serializer().into_inner();
    let mut file = File::create(path)?;
    file.write_all(&bytes)?;
    Ok(())
}

pub fn load_rkyv<T, P>(path: P) -> Result<T>
where
    T: Archive,
    T::Archived: Deserialize<T, SharedDeserializeMap>
        + for<'a> rkyv::CheckBytes<rkyv::validation::validators::DefaultValidator<'a>>,
    P: AsRef<Path>,
{
    let bytes = std::fs::read(path)?;
    let archived = rkyv::check_archived_root::<T>(&bytes)
        .map_err(|e| IoError::rkyv(format!("validation failed: {:?}", e)))?;
    let mut deserializer = SharedDeserializeMap::default();
    archived
        .deserialize(&mut deserializer)
        .map_err(|e| IoError::rkyv(format!("deserialization failed: {:?}", e)))
}

/// Writes `genomes` in the format implied by `path`.
pub fn save_genomes<P: AsRef<Path>>(genomes: &[Genome], path: P) -> Result<()> {
    let path = path.as_ref();
    match GenomeFormat::from_path(path)? {
        GenomeFormat::Json => write_json_file(genomes, path)?,
        GenomeFormat::GzipJson => std::fs::write(path, to_gzip_json(genomes)?)?,
        GenomeFormat::Hex => std::fs::write(path, to_hex_dna(genomes)?)?,
        GenomeFormat::Rkyv => save_rkyv(&genomes.to_vec(), path)?,
    }
    tracing::debug!(count = genomes.len(), path = %path.display(), "Saved genomes");
    Ok(())
}

/// Reads genomes from `path` and checks each one against `config`.
pub fn load_genomes<P: AsRef<Path>>(path: P, config: &GenomeConfig) -> Result<Vec<Genome>> {
    let path = path.as_ref();
    let genomes: Vec<Genome> = match GenomeFormat::from_path(path)? {
        GenomeFormat::Json => read_json_file(path)?,
        GenomeFormat::GzipJson => from_gzip_json(&std::fs::read(path)?)?,
        GenomeFormat::Hex => from_hex_dna(&std::fs::read_to_string(path)?)?,
        GenomeFormat::Rkyv => load_rkyv(path)?,
    };
    for genome in &genomes {
        genome
            .validate(config)
            .map_err(|e| IoError::from(e).with_context(format!("genome {}", genome.id)))?;
    }
    tracing::debug!(count = genomes.len(), path = %path.display(), "Loaded genomes");
    Ok(genomes)
}

/// Writes a single genome in the format implied by `path`.
pub fn save_genome<P: AsRef<Path>>(genome: &Genome, path: P) -> Result<()> {
    let path = path.as_ref();
    match GenomeFormat::from_path(path)? {
        GenomeFormat::Json => write_json_file(genome, path)?,
        GenomeFormat::GzipJson => std::fs::write(path, to_gzip_json(genome)?)?,
        GenomeFormat::Hex => std::fs::write(path, to_hex_dna(genome)?)?,
        GenomeFormat::Rkyv => save_rkyv(genome, path)?,
    }
    tracing::debug!(genome = %genome.id, path = %path.display(), "Saved genome");
    Ok(())
}

/// Reads one genome from `path` and checks it against `config`.
pub fn load_genome<P: AsRef<Path>>(path: P, config: &GenomeConfig) -> Result<Genome> {
    let path = path.as_ref();
    let genome: Genome = match GenomeFormat::from_path(path)? {
        GenomeFormat::Json => read_json_file(path)?,
        GenomeFormat::GzipJson => from_gzip_json(&std::fs::read(path)?)?,
        GenomeFormat::Hex => from_hex_dna(&std::fs::read_to_string(path)?)?,
        GenomeFormat::Rkyv => load_rkyv(path)?,
    };
    genome
        .validate(config)
        .map_err(|e| IoError::from(e).with_context(format!("loading {}", path.display())))?;
    Ok(genome)
}
