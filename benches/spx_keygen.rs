use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::OsRng;
use rand::RngCore;
use sphincs_shake256s::{crypto_sign_seed_keypair, Seed};

fn keygen_benchmarks(c: &mut Criterion) {
    let alg_name = "keygen";
    let mut group = c.benchmark_group(format!("SPHINCS+-SHAKE-256s_{}", alg_name));
    group.sample_size(10);

    let mut seed_bytes = [0u8; Seed::BYTES];
    OsRng.fill_bytes(&mut seed_bytes);
    let seed = Seed::from(seed_bytes);

    group.bench_function(BenchmarkId::new(alg_name, "seed"), |b| {
        b.iter(|| {
            black_box(crypto_sign_seed_keypair(black_box(&seed)));
        });
    });

    group.finish();
}

criterion_group!(benches, keygen_benchmarks);
criterion_main!(benches);
