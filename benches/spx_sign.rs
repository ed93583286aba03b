use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sphincs_shake256s::{OptRand, SphincsPlus};

static ALG_NAME: &str = "sign";

fn sign_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("SPHINCS+-SHAKE-256s_{}", ALG_NAME));
    group.sample_size(10);

    let sphincs = SphincsPlus::new().unwrap();
    let deterministic = sphincs.clone().with_opt_rand(OptRand::Fixed([0u8; 32]));

    for message_len in [32_usize, 1 << 10, 1 << 16] {
        let message = vec![0x5a_u8; message_len];

        group.bench_function(BenchmarkId::new("random", message_len), |b| {
            b.iter(|| {
                black_box(sphincs.sign(black_box(&message)).unwrap());
            });
        });

        group.bench_function(BenchmarkId::new("fixed", message_len), |b| {
            b.iter(|| {
                black_box(deterministic.sign(black_box(&message)).unwrap());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, sign_benchmarks);
criterion_main!(benches);
