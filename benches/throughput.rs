//! Throughput benchmarks for batch signing.
//!
//! Run with: `cargo bench --bench throughput`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use rand::SeedableRng;

use dex_core::signing::{OrderBuilder, OrderInfo, TxOptions, TxSigner};

const PRIVATE_KEY: &str =
    "ed636277f3753b6c0275f7a28c2678a7f3a95655e09deaebec15179b50c5da7f903152e50f594f7b";

fn signer() -> TxSigner {
    match TxSigner::from_private_key(300, 65, 3, PRIVATE_KEY) {
        Ok(signer) => signer,
        Err(e) => panic!("benchmark signer must build: {}", e),
    }
}

/// Generate a batch of random limit orders.
fn generate_order_batch(count: usize) -> Vec<OrderInfo> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    (0..count)
        .filter_map(|i| {
            let builder = OrderBuilder::new()
                .market_index(rng.gen_range(0..64))
                .client_order_index(i as i64)
                .base_amount(rng.gen_range(1..1_000_000))
                .price(rng.gen_range(1..1_000_000));
            let builder = if rng.gen_bool(0.5) {
                builder.ask()
            } else {
                builder.bid()
            };
            builder.build().ok()
        })
        .collect()
}

/// Benchmark sequential order signing.
fn bench_sequential_signing(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential_signing");
    let signer = signer();

    for count in [10, 100].iter() {
        let orders = generate_order_batch(*count);

        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(
            BenchmarkId::new("create_order", count),
            &orders,
            |b, orders| {
                b.iter(|| {
                    let signed: Vec<_> = orders
                        .iter()
                        .enumerate()
                        .filter_map(|(nonce, order)| {
                            signer
                                .sign_create_order(order, TxOptions::new(nonce as i64))
                                .ok()
                        })
                        .collect();
                    black_box(signed)
                })
            },
        );
    }

    group.finish();
}

/// Benchmark parallel order signing using rayon over a shared signer.
fn bench_parallel_signing(c: &mut Criterion) {
    use rayon::prelude::*;

    let mut group = c.benchmark_group("parallel_signing");
    let signer = signer();

    for count in [10, 100, 1000].iter() {
        let orders = generate_order_batch(*count);

        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(
            BenchmarkId::new("create_order", count),
            &orders,
            |b, orders| {
                b.iter(|| {
                    let signed: Vec<_> = orders
                        .par_iter()
                        .enumerate()
                        .filter_map(|(nonce, order)| {
                            signer
                                .sign_create_order(order, TxOptions::new(nonce as i64))
                                .ok()
                        })
                        .collect();
                    black_box(signed)
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_sequential_signing, bench_parallel_signing);

criterion_main!(benches);
