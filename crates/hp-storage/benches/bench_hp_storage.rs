use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hp_core::{HuffpageConfig, Mode};
use hp_storage::{compress_file, decompress_file, read_container};
use rand::Rng;
use std::fs;
use tempfile::TempDir;

fn generate_document(words: usize) -> String {
    const VOCAB: &[&str] = &["alpha", "beta", "gamma", "delta", "page", "chunk", "tree", "code"];
    const SEP: &[&str] = &[" ", " ", " ", ". ", "!\n", ", "];
    let mut rng = rand::thread_rng();
    let mut text = String::with_capacity(words * 8);
    for _ in 0..words {
        text.push_str(VOCAB[rng.gen_range(0..VOCAB.len())]);
        text.push_str(SEP[rng.gen_range(0..SEP.len())]);
    }
    text
}

fn bench_file_roundtrip(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("doc.txt");
    fs::write(&input, generate_document(20_000)).unwrap();

    for mode in [Mode::Char, Mode::Word] {
        let config = HuffpageConfig::new(mode, 16 * 1024);
        let out = dir.path().join(format!("doc_{mode}"));
        c.bench_function(&format!("compress_file_{mode}_20k_words"), |b| {
            b.iter(|| black_box(compress_file(&input, &out, &config).unwrap()))
        });

        let report = compress_file(&input, &out, &config).unwrap();
        let restored = dir.path().join(format!("restored_{mode}.txt"));
        c.bench_function(&format!("decompress_file_{mode}_20k_words"), |b| {
            b.iter(|| black_box(decompress_file(&report.paths.payload, &restored).unwrap()))
        });
        c.bench_function(&format!("read_container_{mode}_20k_words"), |b| {
            b.iter(|| black_box(read_container(&report.paths.payload).unwrap()))
        });
    }
}

criterion_group!(benches, bench_file_roundtrip);
criterion_main!(benches);
