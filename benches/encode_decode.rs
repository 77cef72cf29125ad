use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::{Rng, SeedableRng};
use ruhuff::decoding::decode_to_vec;
use ruhuff::encoding::encode_to_vec;

fn criterion_benchmark(c: &mut Criterion) {
    const DATA_SIZE: usize = 1024 * 1024;

    // text-like distribution: a handful of very common bytes and a long tail
    let mut rng = rand::rngs::SmallRng::seed_from_u64(0xDEADBEEF);
    let mut data = Vec::with_capacity(DATA_SIZE);
    for _ in 0..DATA_SIZE {
        let x: f64 = rng.gen();
        data.push((x * x * x * 256.0) as u8);
    }
    let encoded = encode_to_vec(&data).unwrap();

    let mut group = c.benchmark_group("huffman");
    group.throughput(Throughput::Bytes(DATA_SIZE as u64));
    group.bench_function("encode", |b| b.iter(|| encode_to_vec(black_box(&data)).unwrap()));
    group.bench_function("decode", |b| {
        b.iter(|| decode_to_vec(black_box(&encoded.packed.bytes), &encoded.frequency_file).unwrap())
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
