//! # WriteX Codec Benchmarks
//!
//! Dashboard load cost is dominated by decoding `getBlogs()` and zipping
//! the two sequences:
//!
//! | Path | Target |
//! |------|--------|
//! | `(string[], string[])` decode, 1k records | < 1ms |
//! | assemble 1k records | < 100µs |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use wx_02_ledger_client::abi::{self, Token};
use wx_03_dashboard::assemble;

fn sequences(n: usize) -> (Vec<String>, Vec<String>) {
    let titles = (0..n).map(|i| format!("Post number {i}")).collect();
    let pointers = (0..n)
        .map(|i| format!("Qm{:044}", i))
        .collect();
    (titles, pointers)
}

fn bench_get_blogs_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_blogs_decode");
    for n in [10usize, 100, 1000] {
        let (titles, pointers) = sequences(n);
        let payload = abi::encode(&[Token::StringArray(titles), Token::StringArray(pointers)]);
        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &payload, |b, payload| {
            b.iter(|| abi::decode_string_array_pair(black_box(payload)))
        });
    }
    group.finish();
}

fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble");
    for n in [10usize, 100, 1000] {
        let (titles, pointers) = sequences(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &(titles, pointers), |b, (t, p)| {
            b.iter(|| assemble(black_box(t.clone()), black_box(p.clone())))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_get_blogs_decode, bench_assemble);
criterion_main!(benches);
