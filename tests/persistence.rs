mod common;
use common::{rng, GenomeBuilder};
use genolab_lib::model::config::AppConfig;
use genolab_lib::model::genome::{Genome, GenomeLogic};
use genolab_lib::model::persistence::{load_genome, load_genomes, save_genome, save_genomes};
use genolab_lib::model::persistence::{load_rkyv, save_rkyv};
use genolab_lib::model::serialization::{from_hex_dna, read_json_file, to_hex_dna};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_bred_genome_survives_every_format() {
    let dir = tempdir().unwrap();
    let config = AppConfig::default();
    let a = GenomeBuilder::new().with_seed(1).build();
    let b = GenomeBuilder::new().with_seed(2).build();
    let child = a.crossover_with_rng(&b, &config, &mut rng(3));

    for name in ["child.json", "child.json.gz", "child.hex", "child.rkyv"] {
        let path = dir.path().join(name);
        save_genome(&child, &path).unwrap();
        let loaded = load_genome(&path, &config.genome).unwrap();
        assert_eq!(loaded, child, "format {}", name);
        assert_eq!(loaded.parents, vec![a.id, b.id]);
    }
}

#[test]
fn test_population_snapshot_rkyv_roundtrip() {
    let dir = tempdir().unwrap();
    let config = AppConfig::default();
    let mut r = rng(5);
    let population: Vec<Genome> = (0..16)
        .map(|_| Genome::new_random_with_rng(&config.genome, &mut r).unwrap())
        .collect();

    let path = dir.path().join("population.rkyv");
    save_rkyv(&population, &path).expect("Failed to save rkyv snapshot");
    let loaded: Vec<Genome> = load_rkyv(&path).expect("Failed to load rkyv snapshot");
    assert_eq!(loaded, population);

    let gz = dir.path().join("population.json.gz");
    save_genomes(&population, &gz).unwrap();
    assert_eq!(load_genomes(&gz, &config.genome).unwrap(), population);
}

#[test]
fn test_hex_dna_is_plain_hex_of_json() {
    let genome = GenomeBuilder::new().build();
    let hex = to_hex_dna(&genome).unwrap();
    assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(hex, genome.to_hex());
    let back: Genome = from_hex_dna(&hex).unwrap();
    assert_eq!(back, genome);
}

#[test]
fn test_json_file_is_human_readable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("g.json");
    let genome = GenomeBuilder::new().build();
    save_genome(&genome, &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"behaviour\""));
    assert!(text.contains("behaviour.diet"));
    let value: serde_json::Value = read_json_file(&path).unwrap();
    assert_eq!(value["generation"], 0);
}

#[test]
fn test_tampered_file_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("g.json");
    let mut genome = GenomeBuilder::new().build();
    genome.body.pop();
    save_genome(&genome, &path).unwrap();
    assert!(load_genome(&path, &AppConfig::default().genome).is_err());
}

#[test]
fn test_config_file_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[genome]\nmax_eyes = 2\n\n[evolution]\nmutation_variance = 0.1\n",
    )
    .unwrap();

    let config = AppConfig::load_or_default(&path).unwrap();
    assert_eq!(config.genome.max_eyes, 2);
    assert!((config.evolution.mutation_variance - 0.1).abs() < 1e-6);
    assert_eq!(config.metabolism.max_energy, AppConfig::default().metabolism.max_energy);
    assert_ne!(config.fingerprint(), AppConfig::default().fingerprint());

    let genome = GenomeBuilder::new()
        .with_config(|c| c.genome.max_eyes = 2)
        .build();
    let saved = dir.path().join("g.hex");
    save_genome(&genome, &saved).unwrap();
    assert!(load_genome(&saved, &config.genome).is_ok());
    // eye count gene was laid out for two slots
    assert!(load_genome(&saved, &AppConfig::default().genome).is_err());
}

#[test]
fn test_out_of_range_body_weights_are_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("g.json.gz");
    let mut genome = GenomeBuilder::new().with_seed(4).build();
    genome.body[0].weights.weights[0] = -0.25;
    save_genome(&genome, &path).unwrap();
    assert!(load_genome(&path, &AppConfig::default().genome).is_err());
}

#[test]
fn test_missing_config_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let config = AppConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.fingerprint(), AppConfig::default().fingerprint());
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[genome]\nmin_speed = 10.0\nmax_speed = 1.0\n").unwrap();
    assert!(AppConfig::load_or_default(&path).is_err());
}
