//! Paging over containers loaded from disk

use hp_core::{HuffpageConfig, Mode};
use hp_pager::{open_for_paging_with, PageCursor};
use hp_storage::{compress_file, read_container};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use tempfile::TempDir;

fn book(seed: u64, sentences: usize) -> String {
    const WORDS: &[&str] = &["the", "reader", "turned", "a", "page", "and", "found", "another", "chapter"];
    const ENDS: &[&str] = &[". ", "! ", "?\n", ".\n"];
    let mut rng = StdRng::seed_from_u64(seed);
    let mut text = String::new();
    for _ in 0..sentences {
        let len = rng.gen_range(3..15);
        for i in 0..len {
            if i > 0 {
                text.push(' ');
            }
            text.push_str(WORDS[rng.gen_range(0..WORDS.len())]);
        }
        text.push_str(ENDS[rng.gen_range(0..ENDS.len())]);
    }
    text
}

#[test]
fn test_page_through_book_from_disk() {
    let dir = TempDir::new().unwrap();
    let text = book(5, 2_000);
    let input = dir.path().join("book.txt");
    fs::write(&input, &text).unwrap();

    let config = HuffpageConfig::new(Mode::Word, 256).with_page_size(250).with_cache_capacity(Some(4));
    let report = compress_file(&input, dir.path().join("book"), &config).unwrap();
    let container = read_container(&report.paths.payload).unwrap();
    let handle = open_for_paging_with(container, &config).unwrap();
    assert_eq!(handle.total_tokens(), report.total_tokens);

    let mut cursor = PageCursor::new(handle);
    let mut forward = vec![cursor.current().unwrap().text()];
    while !cursor.is_last() {
        forward.push(cursor.next().unwrap().text());
    }
    assert_eq!(forward.len(), cursor.page_count());
    assert_eq!(forward.concat(), text);

    let mut backward = vec![cursor.current().unwrap().text()];
    while !cursor.is_first() {
        backward.push(cursor.prev().unwrap().text());
    }
    backward.reverse();
    assert_eq!(backward, forward);
}

#[test]
fn test_random_access_matches_sequential() {
    let dir = TempDir::new().unwrap();
    let text = book(8, 600);
    let input = dir.path().join("book.txt");
    fs::write(&input, &text).unwrap();

    let config = HuffpageConfig::new(Mode::Char, 64).with_page_size(100);
    let report = compress_file(&input, dir.path().join("book"), &config).unwrap();
    let mut handle = open_for_paging_with(read_container(&report.paths.payload).unwrap(), &config).unwrap();

    let sequential: Vec<String> = (0..handle.page_count()).map(|i| handle.page(i).unwrap().text()).collect();
    let mut rng = StdRng::seed_from_u64(21);
    for _ in 0..200 {
        let i = rng.gen_range(0..sequential.len());
        assert_eq!(handle.page(i).unwrap().text(), sequential[i]);
    }
    let stats = handle.cache_stats();
    assert_eq!(stats.misses, handle.chunk_count() as u64);
}
