use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ftmint_hashes::{Hasher, HasherBase, Sha256d, hash160};

fn sha256d_benchmark(c: &mut Criterion) {
    let data = [0xa5u8; 256];
    c.bench_function("Sha256d::hash 256 bytes", |b| b.iter(|| Sha256d::hash(black_box(&data))));
    c.bench_function("Sha256d incremental 8x32 bytes", |b| {
        b.iter(|| {
            let mut hasher = Sha256d::new();
            for chunk in black_box(&data).chunks(32) {
                hasher.update(chunk);
            }
            hasher.finalize()
        })
    });
}

fn hash160_benchmark(c: &mut Criterion) {
    let pubkey = [0x02u8; 33];
    c.bench_function("hash160 compressed pubkey", |b| b.iter(|| hash160(black_box(&pubkey))));
}

criterion_group!(benches, sha256d_benchmark, hash160_benchmark);
criterion_main!(benches);
