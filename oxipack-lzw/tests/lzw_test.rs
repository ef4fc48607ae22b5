//! Comprehensive LZW integration tests.

use oxipack_core::bitstream::BitReader;
use oxipack_lzw::{LzwConfig, LzwDecoder, LzwEncoder, OxiPackError, compress, decompress};
use std::io::Cursor;

fn roundtrip(original: &[u8], config: LzwConfig) -> Vec<u8> {
    let compressed = compress(original, config).expect("compression failed");
    decompress(&compressed, config).expect("decompression failed")
}

fn codewords(data: &[u8], config: LzwConfig) -> Vec<u32> {
    let mut reader = BitReader::new(Cursor::new(data)).expect("reader");
    let mut codes = Vec::new();
    loop {
        let code = reader.read_bits(config.code_width).expect("codeword");
        codes.push(code);
        if code == config.end_of_stream() {
            return codes;
        }
    }
}

#[test]
fn test_lzw_roundtrip_simple() {
    let original = b"TOBEORNOTTOBEORTOBEORNOT";
    assert_eq!(roundtrip(original, LzwConfig::DEFAULT), original);
}

#[test]
fn test_lzw_roundtrip_310_bytes() {
    let original = b"This is a test of compression! ".repeat(10);
    assert_eq!(original.len(), 310);

    let decompressed = roundtrip(&original, LzwConfig::DEFAULT);
    assert_eq!(decompressed.len(), 310);
    assert_eq!(decompressed, original);
}

#[test]
fn test_lzw_aaaa_codewords() {
    let compressed = compress(b"AAAA", LzwConfig::DEFAULT).expect("compression failed");

    // "A", then "AA" (257) used by the encoder one step after it was
    // defined, which the decoder resolves through the self-reference rule.
    assert_eq!(
        codewords(&compressed, LzwConfig::DEFAULT),
        vec![65, 257, 65, 256]
    );
    assert_eq!(
        decompress(&compressed, LzwConfig::DEFAULT).expect("decompression failed"),
        b"AAAA"
    );
}

#[test]
fn test_lzw_empty_input() {
    let compressed = compress(b"", LzwConfig::DEFAULT).expect("compression failed");
    assert_eq!(codewords(&compressed, LzwConfig::DEFAULT), vec![256]);
    assert!(
        decompress(&compressed, LzwConfig::DEFAULT)
            .expect("decompression failed")
            .is_empty()
    );
}

#[test]
fn test_lzw_all_same_byte() {
    let original = vec![b'X'; 1000];
    let compressed = compress(&original, LzwConfig::DEFAULT).expect("compression failed");

    assert!(
        compressed.len() < original.len() / 5,
        "Repeated byte should compress to less than 20% of original"
    );
    assert_eq!(
        decompress(&compressed, LzwConfig::DEFAULT).expect("decompression failed"),
        original
    );
}

#[test]
fn test_lzw_alternating_pattern() {
    let original = b"ABABABABABABABABABABABABABABABABABABAB";
    assert_eq!(roundtrip(original, LzwConfig::DEFAULT), original);
}

#[test]
fn test_lzw_random_like_data() {
    let mut seed: u64 = 0x1234_5678_9ABC_DEF0;
    let original: Vec<u8> = (0..20_000)
        .map(|_| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            (seed >> 32) as u8
        })
        .collect();

    assert_eq!(roundtrip(&original, LzwConfig::DEFAULT), original);
}

#[test]
fn test_lzw_fills_default_table() {
    // Long enough to exhaust all 4096 codes and keep going.
    let original = b"The quick brown fox jumps over the lazy dog. ".repeat(2_000);
    assert_eq!(roundtrip(&original, LzwConfig::DEFAULT), original);
}

#[test]
fn test_lzw_multiple_sizes() {
    for size in [1, 2, 3, 10, 255, 256, 257, 1000, 4095, 4096, 4097] {
        let original = vec![b'A'; size];
        assert_eq!(
            roundtrip(&original, LzwConfig::DEFAULT),
            original,
            "Data mismatch for size {}",
            size
        );
    }
}

#[test]
fn test_lzw_run_across_tiny_table() {
    // Table fills after 7 learned entries; the run keeps self-referencing
    // right up to the boundary.
    let config = LzwConfig::new(256, 264, 9).expect("config");
    for size in [20, 27, 28, 29, 36, 200] {
        let original = vec![b'z'; size];
        let compressed = compress(&original, config).expect("compression failed");

        let codes = codewords(&compressed, config);
        assert!(codes.iter().all(|&c| c <= config.max_code()));

        assert_eq!(
            decompress(&compressed, config).expect("decompression failed"),
            original,
            "size {size}"
        );
    }
}

#[test]
fn test_lzw_codes_never_ahead_of_dictionary() {
    let config = LzwConfig::DEFAULT;
    let original = b"abcdefghijabcdefghijabcdefghij".repeat(30);
    let compressed = compress(&original, config).expect("compression failed");

    // Before the n-th codeword at most n entries have been learned, so the
    // largest usable code is R + n (the self-reference case).
    let codes = codewords(&compressed, config);
    for (n, &code) in codes.iter().enumerate() {
        assert!(
            code <= config.end_of_stream() + n as u32,
            "code {code} at position {n} is ahead of the dictionary"
        );
    }
}

#[test]
fn test_lzw_seven_bit_parameters() {
    let config = LzwConfig::new(128, 256, 8).expect("config");
    let original = b"Supercalifragilisticexpialidocious, abcdefghijklmnopqrstuvwxyz, ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    assert_eq!(roundtrip(original, config), original);

    let compressed = compress(original, config).expect("compression failed");
    assert_eq!(*codewords(&compressed, config).last().expect("sentinel"), 128);
}

#[test]
fn test_lzw_parameter_grid() {
    let text = b"It was the best of times, it was the worst of times. ".repeat(40);
    for (r, l, w) in [(256, 257, 9), (256, 512, 9), (256, 1024, 16), (256, 65536, 16)] {
        let config = LzwConfig::new(r, l, w).expect("config");
        assert_eq!(roundtrip(&text, config), text, "R={r} L={l} W={w}");
    }
}

#[test]
fn test_lzw_mismatched_width_is_not_silent() {
    let original = b"some text that is long enough to learn a few codes".repeat(4);
    let compressed = compress(&original, LzwConfig::DEFAULT).expect("compression failed");

    let narrow = LzwConfig::new(256, 512, 9).expect("config");
    match decompress(&compressed, narrow) {
        Ok(data) => assert_ne!(data, original),
        Err(e) => assert!(matches!(e, OxiPackError::CorruptData { .. })),
    }
}

#[test]
fn test_encoder_decoder_reusable() {
    let encoder = LzwEncoder::new(LzwConfig::DEFAULT).expect("encoder");
    let decoder = LzwDecoder::new(LzwConfig::DEFAULT).expect("decoder");

    for input in [&b"first call"[..], b"second call shares nothing", b""] {
        let compressed = encoder.encode(input).expect("compression failed");
        assert_eq!(decoder.decode(&compressed).expect("decompression failed"), input);
    }
}
