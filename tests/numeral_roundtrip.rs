// Round-trip property over the numeral renderer and parser: any number
// rendered to Vietnamese words must parse back to itself.

use vinorm::numeral::parse_phrase;
use vinorm::render_vietnamese_number;

fn assert_roundtrip(n: i64) {
    let phrase = render_vietnamese_number(n);
    assert_eq!(
        parse_phrase(&phrase),
        Some(n),
        "round-trip failed for {n}: {phrase:?}"
    );
}

#[test]
fn test_roundtrip_small_numbers() {
    for n in 0..=2000 {
        assert_roundtrip(n);
    }
}

#[test]
fn test_roundtrip_boundary_values() {
    let cases = [
        0,
        5,
        10,
        15,
        21,
        24,
        25,
        99,
        100,
        101,
        105,
        110,
        999,
        1_000,
        1_001,
        1_005,
        10_000,
        100_000,
        999_999,
        1_000_000,
        1_000_005,
        1_000_000_000,
        1_000_000_005,
        999_999_999_999,
    ];
    for n in cases {
        assert_roundtrip(n);
    }
}

/// Deterministic pseudo-random sweep below 10^12
#[test]
fn test_roundtrip_pseudo_random() {
    let mut state: u64 = 0x243F_6A88_85A3_08D3;
    for _ in 0..2_000 {
        // xorshift64
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let n = (state % 1_000_000_000_000) as i64;
        assert_roundtrip(n);
    }
}

#[test]
fn test_spoken_variants_parse_to_same_value() {
    let variants = ["hai mươi mốt", "hai mươi một", "Hai Mươi Mốt"];
    for v in variants {
        assert_eq!(parse_phrase(v), Some(21), "variant {v:?}");
    }
    assert_eq!(parse_phrase("hai nghìn lẻ năm"), Some(2005));
    assert_eq!(parse_phrase("hai ngàn linh năm"), Some(2005));
}
