use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hp_codec::compress;
use hp_core::{HuffpageConfig, Mode};
use hp_pager::open_for_paging_with;
use rand::Rng;

fn generate_text(size_kb: usize) -> String {
    let base = "It was a bright cold day in April. The clocks were striking thirteen!\nWho could say? Nobody. ";
    let mut text = String::with_capacity(size_kb * 1024);
    while text.len() < size_kb * 1024 {
        text.push_str(base);
    }
    text
}

fn bench_pages(c: &mut Criterion) {
    let text = generate_text(200);
    let container = compress(&text, Mode::Word, 4096).unwrap();

    c.bench_function("page_cold_word_200kb", |b| {
        b.iter(|| {
            let mut h = open_for_paging_with(container.clone(), &HuffpageConfig::default()).unwrap();
            let last = h.page_count() - 1;
            black_box(h.page(last / 2).unwrap())
        })
    });

    let mut warm = open_for_paging_with(container.clone(), &HuffpageConfig::default()).unwrap();
    let pages = warm.page_count();
    for i in 0..pages {
        warm.page(i).unwrap();
    }
    let mut rng = rand::thread_rng();
    c.bench_function("page_warm_random_word_200kb", |b| {
        b.iter(|| black_box(warm.page(rng.gen_range(0..pages)).unwrap()))
    });

    let config = HuffpageConfig::default().with_cache_capacity(Some(2));
    let mut lru = open_for_paging_with(container, &config).unwrap();
    c.bench_function("page_lru2_random_word_200kb", |b| {
        b.iter(|| black_box(lru.page(rng.gen_range(0..pages)).unwrap()))
    });
}

criterion_group!(benches, bench_pages);
criterion_main!(benches);
