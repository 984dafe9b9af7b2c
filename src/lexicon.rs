// Static vocabularies shared by the numeral parser, entity detector and
// normalizers. Everything here is compiled into the binary; no runtime loading.

/// Digit words and their values. Includes the positional variants that only
/// appear after tens ("mốt", "tư", "lăm") so the parser accepts both readings.
pub const DIGIT_WORDS: &[(&str, i64)] = &[
    ("không", 0),
    ("một", 1),
    ("mốt", 1),
    ("hai", 2),
    ("ba", 3),
    ("bốn", 4),
    ("tư", 4),
    ("năm", 5),
    ("lăm", 5),
    ("sáu", 6),
    ("bảy", 7),
    ("tám", 8),
    ("chín", 9),
];

/// Scale words that flush the current 0-999 group into the running total.
pub const SCALE_WORDS: &[(&str, i64)] = &[
    ("nghìn", 1_000),
    ("ngàn", 1_000),
    ("triệu", 1_000_000),
    ("tỷ", 1_000_000_000),
];

/// Common ASR transcription typos, canonicalized before parsing.
pub const TYPO_MAP: &[(&str, &str)] = &[
    ("ninh", "linh"),
    ("nẻ", "lẻ"),
    ("mưoi", "mươi"),
    ("mưoii", "mươi"),
];

/// Every token the detector treats as part of a spoken number phrase.
/// The typo forms are listed so a misrecognized word does not split a run.
pub const NUMBER_WORDS: &[&str] = &[
    "không", "một", "mốt", "hai", "ba", "bốn", "tư", "năm", "lăm", "sáu",
    "bảy", "tám", "chín", "mười", "mươi", "trăm", "nghìn", "ngàn", "triệu",
    "tỷ", "linh", "lẻ", "phẩy", "ninh", "nẻ", "mưoi",
];

/// Plain digit words usable in phone/account readings. Unlike [`NUMBER_WORDS`]
/// this excludes tens/hundreds/scale words: phone numbers are read digit by digit.
pub const PHONE_DIGIT_WORDS: &[(&str, char)] = &[
    ("không", '0'),
    ("một", '1'),
    ("hai", '2'),
    ("ba", '3'),
    ("bốn", '4'),
    ("năm", '5'),
    ("sáu", '6'),
    ("bảy", '7'),
    ("tám", '8'),
    ("chín", '9'),
];

/// Single-token currency units. The two-token unit "đô la" is handled
/// separately by the detector and normalizer.
pub const CURRENCY_UNITS: &[&str] = &["đồng", "usd", "vnd"];

pub const MEASURE_UNITS: &[&str] = &["m", "km", "kg", "cm", "mm", "l", "lit"];

/// Fixed ordinal readings.
pub const ORDINAL_WORDS: &[(&str, i64)] = &[
    ("nhất", 1),
    ("nhì", 2),
    ("thứ nhất", 1),
    ("thứ nhì", 2),
    ("thứ ba", 3),
    ("thứ tư", 4),
];

/// Spoken separators rewritten to `/` in address notation.
pub const SLASH_KEYWORDS: &[&str] = &[
    "trên", "gạch chéo", "sẹc", "sạch", "xuyệt", "sạc", "xẹt", "sẹt", "xeạc",
];

/// Spoken separators rewritten to `-` in address notation.
pub const DASH_KEYWORDS: &[&str] = &["gạch ngang", "ngang"];

/// Connector tokens allowed in the gap between two entities that get merged
/// into one span.
pub const MERGE_CONNECTORS: &[&str] = &[
    "và", ",", "với", "mươi", "trăm", "nghìn", "triệu", "tỷ", "lẻ", "linh",
    "một", "hai", "ba", "bốn", "năm", "sáu", "bảy", "tám", "chín", "mốt",
    "lăm", "mười",
];

/// Replace a known transcription typo with its canonical form.
pub fn canonical_token(token: &str) -> &str {
    TYPO_MAP
        .iter()
        .find(|(wrong, _)| *wrong == token)
        .map(|(_, right)| *right)
        .unwrap_or(token)
}

pub fn digit_value(word: &str) -> Option<i64> {
    DIGIT_WORDS.iter().find(|(w, _)| *w == word).map(|(_, v)| *v)
}

pub fn scale_value(word: &str) -> Option<i64> {
    SCALE_WORDS.iter().find(|(w, _)| *w == word).map(|(_, v)| *v)
}

pub fn phone_digit(word: &str) -> Option<char> {
    PHONE_DIGIT_WORDS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, d)| *d)
}

pub fn ordinal_value(phrase: &str) -> Option<i64> {
    ORDINAL_WORDS
        .iter()
        .find(|(w, _)| *w == phrase)
        .map(|(_, v)| *v)
}

pub fn is_number_word(token: &str) -> bool {
    NUMBER_WORDS.contains(&token)
}

pub fn is_phone_word(token: &str) -> bool {
    phone_digit(token).is_some()
}

/// A run of ASCII digits with no separators ("545433").
pub fn is_digit_run(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// A digit token possibly using `.`/`,` group separators ("15.800", "1,200,000").
pub fn is_digit_seq(token: &str) -> bool {
    let bytes = token.as_bytes();
    if bytes.is_empty() || !bytes[0].is_ascii_digit() || !bytes[bytes.len() - 1].is_ascii_digit() {
        return false;
    }
    bytes.iter().all(|b| b.is_ascii_digit() || *b == b'.' || *b == b',')
}

/// Token that can appear inside a spoken number phrase: a digit sequence or
/// a Vietnamese number word.
pub fn is_number_like(token: &str) -> bool {
    is_digit_seq(token) || is_number_word(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typo_canonicalization() {
        assert_eq!(canonical_token("ninh"), "linh");
        assert_eq!(canonical_token("nẻ"), "lẻ");
        assert_eq!(canonical_token("mưoi"), "mươi");
        assert_eq!(canonical_token("triệu"), "triệu");
    }

    #[test]
    fn test_digit_words_both_readings() {
        assert_eq!(digit_value("một"), Some(1));
        assert_eq!(digit_value("mốt"), Some(1));
        assert_eq!(digit_value("tư"), Some(4));
        assert_eq!(digit_value("lăm"), Some(5));
        assert_eq!(digit_value("mươi"), None);
    }

    #[test]
    fn test_digit_seq_classification() {
        assert!(is_digit_run("545433"));
        assert!(!is_digit_run("15.800"));
        assert!(is_digit_seq("15.800"));
        assert!(is_digit_seq("1,200,000"));
        assert!(is_digit_seq("100"));
        assert!(!is_digit_seq(".100"));
        assert!(!is_digit_seq("100."));
        assert!(!is_digit_seq("ba"));
    }

    #[test]
    fn test_number_like_covers_words_and_digits() {
        assert!(is_number_like("phẩy"));
        assert!(is_number_like("tỷ"));
        assert!(is_number_like("42"));
        assert!(!is_number_like("giờ"));
        assert!(!is_number_like("đồng"));
    }
}
