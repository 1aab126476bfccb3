use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hp_core::{Chunk, ChunkIndex, ContainerMetadata, GlobalMetadata, Mode, Symbol};
use std::collections::BTreeMap;

fn sample_metadata(symbols: usize, chunks: usize) -> (ContainerMetadata, u64) {
    let freq: BTreeMap<Symbol, u64> = (0..symbols).map(|i| (Symbol::from(format!("w{i}")), 10)).collect();
    let total = symbols as u64 * 10;
    let per_chunk = total / chunks as u64;
    let list: Vec<Chunk> = (0..chunks)
        .map(|i| Chunk {
            index: i,
            offset: i as u64 * 64,
            length: 64,
            padding: 3,
            token_count: if i + 1 == chunks { total - per_chunk * (chunks as u64 - 1) } else { per_chunk },
        })
        .collect();
    let index = ChunkIndex::new(Mode::Word, 64, list);
    let payload = index.payload_bytes;
    (ContainerMetadata::new(GlobalMetadata::new(Mode::Word, freq, total), index), payload)
}

fn bench_validate(c: &mut Criterion) {
    let (meta, payload) = sample_metadata(5_000, 1_000);
    c.bench_function("validate_5k_symbols_1k_chunks", |b| {
        b.iter(|| black_box(meta.validate(black_box(payload)).unwrap()))
    });
}

fn bench_serde(c: &mut Criterion) {
    let (meta, _) = sample_metadata(5_000, 1_000);
    let global = serde_json::to_string(&meta.global).unwrap();
    let index = serde_json::to_string(&meta.index).unwrap();
    c.bench_function("serialize_global_5k", |b| b.iter(|| black_box(serde_json::to_string(&meta.global).unwrap())));
    c.bench_function("parse_global_5k", |b| {
        b.iter(|| black_box(serde_json::from_str::<GlobalMetadata>(black_box(&global)).unwrap()))
    });
    c.bench_function("parse_index_1k", |b| {
        b.iter(|| black_box(serde_json::from_str::<ChunkIndex>(black_box(&index)).unwrap()))
    });
}

criterion_group!(benches, bench_validate, bench_serde);
criterion_main!(benches);
