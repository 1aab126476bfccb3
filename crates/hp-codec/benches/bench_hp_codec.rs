use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hp_codec::{compress, decompress, tokenize, CodeBook, FrequencyTable};
use hp_core::Mode;

fn generate_text(size_kb: usize) -> String {
    let base = "The quick brown fox jumps over the lazy dog. Pages are decoded on demand!\nEach chunk is aligned to a byte boundary, and sentences end with a period? Yes. ";
    let mut text = String::with_capacity(size_kb * 1024);
    while text.len() < size_kb * 1024 {
        text.push_str(base);
    }
    text.truncate(size_kb * 1024);
    text
}

fn bench_tokenize(c: &mut Criterion) {
    let text = generate_text(100);
    c.bench_function("tokenize_char_100kb", |b| b.iter(|| black_box(tokenize(black_box(&text), Mode::Char))));
    c.bench_function("tokenize_word_100kb", |b| b.iter(|| black_box(tokenize(black_box(&text), Mode::Word))));
}

fn bench_build_codebook(c: &mut Criterion) {
    let text = generate_text(100);
    let table = FrequencyTable::build(&text, Mode::Word, 64 * 1024).unwrap();
    c.bench_function("codebook_word_100kb", |b| b.iter(|| black_box(CodeBook::build(black_box(&table)).unwrap())));
}

fn bench_compress(c: &mut Criterion) {
    let text_10k = generate_text(10);
    let text_100k = generate_text(100);
    for mode in [Mode::Char, Mode::Word] {
        c.bench_function(&format!("compress_{mode}_10kb"), |b| {
            b.iter(|| black_box(compress(black_box(&text_10k), mode, 4096).unwrap()))
        });
        c.bench_function(&format!("compress_{mode}_100kb"), |b| {
            b.iter(|| black_box(compress(black_box(&text_100k), mode, 4096).unwrap()))
        });
    }
}

fn bench_decompress(c: &mut Criterion) {
    let text = generate_text(100);
    for mode in [Mode::Char, Mode::Word] {
        let container = compress(&text, mode, 4096).unwrap();
        c.bench_function(&format!("decompress_{mode}_100kb"), |b| {
            b.iter(|| black_box(decompress(black_box(&container)).unwrap()))
        });
    }
}

criterion_group!(benches, bench_tokenize, bench_build_codebook, bench_compress, bench_decompress);
criterion_main!(benches);
