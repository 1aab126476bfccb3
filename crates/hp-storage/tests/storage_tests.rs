//! File-level round trips for hp-storage

use hp_codec::decompress;
use hp_core::{HuffpageConfig, Mode};
use hp_storage::{compress_file, decompress_file, default_output_path, read_container, ContainerPaths};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use tempfile::TempDir;

const WORDS: &[&str] = &["lorem", "ipsum", "dolor", "sit", "amet", "ünïcode", "snake_case", "2024", "—"];
const PUNCT: &[&str] = &[" ", " ", " ", ", ", ". ", "!\n", "? ", "\n\n", "\t"];

fn random_document(seed: u64, words: usize) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut text = String::new();
    for _ in 0..words {
        text.push_str(WORDS[rng.gen_range(0..WORDS.len())]);
        text.push_str(PUNCT[rng.gen_range(0..PUNCT.len())]);
    }
    text
}

#[test]
fn test_large_document_roundtrip() {
    let dir = TempDir::new().unwrap();
    let text = random_document(42, 20_000);
    let input = dir.path().join("doc.txt");
    fs::write(&input, &text).unwrap();

    for mode in [Mode::Char, Mode::Word] {
        let config = HuffpageConfig::new(mode, 512).with_read_buffer(333);
        let report = compress_file(&input, dir.path().join(format!("doc_{mode}.txt")), &config).unwrap();
        assert!(report.chunk_count > 10);
        assert!(report.compressed_bytes < text.len() as u64);

        let output = default_output_path(&report.paths.payload);
        decompress_file(&report.paths.payload, &output).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), text);

        let container = read_container(&report.paths.payload).unwrap();
        assert_eq!(decompress(&container).unwrap(), text);
    }
}

#[test]
fn test_recompress_overwrites_container() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("doc.txt");
    let out = dir.path().join("doc");

    fs::write(&input, random_document(1, 500)).unwrap();
    compress_file(&input, &out, &HuffpageConfig::new(Mode::Word, 64)).unwrap();

    let second = random_document(2, 800);
    fs::write(&input, &second).unwrap();
    let report = compress_file(&input, &out, &HuffpageConfig::new(Mode::Char, 32)).unwrap();
    assert_eq!(report.paths, ContainerPaths::new(&out));

    let container = read_container(&out).unwrap();
    assert_eq!(container.mode(), Mode::Char);
    assert_eq!(decompress(&container).unwrap(), second);
}

#[test]
fn test_config_from_file_drives_compression() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("huffpage.json");
    fs::write(&config_path, r#"{"mode": "word", "target_chunk_bytes": 128, "write_code_report": true}"#).unwrap();
    let config = HuffpageConfig::from_file(&config_path).unwrap();

    let input = dir.path().join("doc.txt");
    let text = random_document(9, 2_000);
    fs::write(&input, &text).unwrap();
    let report = compress_file(&input, dir.path().join("doc"), &config).unwrap();
    assert_eq!(report.mode, Mode::Word);
    assert!(report.paths.codes.exists());

    let container = read_container(&report.paths.payload).unwrap();
    assert_eq!(container.metadata().index.target_chunk_bytes, 128);
    assert_eq!(decompress(&container).unwrap(), text);
}
