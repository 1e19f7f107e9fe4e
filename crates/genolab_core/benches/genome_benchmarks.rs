use criterion::{black_box, criterion_group, criterion_main, Criterion};
use genolab_core::config::AppConfig;
use genolab_core::genome::GenomeLogic;
use genolab_core::phenotype::express;
use genolab_data::Genome;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Benchmark random genome creation.
fn bench_genome_creation(c: &mut Criterion) {
    let config = AppConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    c.bench_function("genome_creation", |b| {
        b.iter(|| {
            let genome = Genome::new_random_with_rng(&config.genome, &mut rng).unwrap();
            black_box(genome)
        })
    });
}

/// Benchmark full-genome mutation.
fn bench_genome_mutation(c: &mut Criterion) {
    let config = AppConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut genome = Genome::new_random_with_rng(&config.genome, &mut rng).unwrap();

    c.bench_function("genome_mutation", |b| {
        b.iter(|| {
            genome.mutate_with_config(&config, &mut rng);
            black_box(&genome);
        })
    });
}

/// Benchmark genome crossover.
fn bench_genome_crossover(c: &mut Criterion) {
    let config = AppConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let p1 = Genome::new_random_with_rng(&config.genome, &mut rng).unwrap();
    let p2 = Genome::new_random_with_rng(&config.genome, &mut rng).unwrap();

    c.bench_function("genome_crossover", |b| {
        b.iter(|| {
            let child = p1.crossover_with_rng(&p2, &config, &mut rng);
            black_box(child)
        })
    });
}

/// Benchmark genome similarity.
fn bench_genome_similarity(c: &mut Criterion) {
    let config = AppConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let p1 = Genome::new_random_with_rng(&config.genome, &mut rng).unwrap();
    let p2 = Genome::new_random_with_rng(&config.genome, &mut rng).unwrap();

    c.bench_function("genome_similarity", |b| {
        b.iter(|| black_box(p1.similarity(black_box(&p2))))
    });
}

/// Benchmark phenotype expression.
fn bench_express(c: &mut Criterion) {
    let config = AppConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let genome = Genome::new_random_with_rng(&config.genome, &mut rng).unwrap();

    c.bench_function("express", |b| {
        b.iter(|| black_box(express(black_box(&genome), &config)))
    });
}

criterion_group!(
    benches,
    bench_genome_creation,
    bench_genome_mutation,
    bench_genome_crossover,
    bench_genome_similarity,
    bench_express
);
criterion_main!(benches);
