// Vietnamese numeral parsing and rendering.
//
// The parser is a single left-to-right scan over lower-cased tokens keeping a
// committed total and a 0-999 group accumulator. Unrecognized tokens are
// skipped rather than aborting: ASR output routinely interleaves filler words
// with the numeral itself.

use crate::lexicon::{canonical_token, digit_value, scale_value};

/// Parse a sequence of lower-cased Vietnamese number tokens (and/or literal
/// digit runs) into an integer.
///
/// Zero policy: a result of 0 is returned only when every token is literally
/// "không"; any other phrase collapsing to zero yields `None`, since a zero
/// total almost always means the phrase was not a numeral at all.
///
/// All accumulation is checked: a phrase whose value would exceed `i64`
/// returns `None` instead of panicking.
pub fn parse_vietnamese_number<S: AsRef<str>>(tokens: &[S]) -> Option<i64> {
    if tokens.is_empty() {
        return None;
    }
    let toks: Vec<&str> = tokens
        .iter()
        .map(|t| canonical_token(t.as_ref()))
        .collect();

    let mut total: i64 = 0;
    let mut group: i64 = 0;
    let mut i = 0;

    while i < toks.len() {
        let t = toks[i];

        if let Some(d) = digit_value(t) {
            match toks.get(i + 1).copied() {
                Some("trăm") => {
                    group = group.checked_add(d * 100)?;
                    i += 2;
                }
                Some("mươi") => {
                    group = group.checked_add(d * 10)?;
                    i += 2;
                }
                _ => {
                    group = group.checked_add(d)?;
                    i += 1;
                }
            }
            continue;
        }

        match t {
            "trăm" => group = group.checked_add(100)?,
            "mươi" | "mười" => group = group.checked_add(10)?,
            // zero filler before units: "một trăm lẻ năm"
            "lẻ" | "linh" => {}
            _ => {
                if let Some(scale) = scale_value(t) {
                    let g = if group == 0 { 1 } else { group };
                    total = total.checked_add(g.checked_mul(scale)?)?;
                    group = 0;
                } else if let Ok(n) = t.parse::<i64>() {
                    group = group.checked_add(n)?;
                }
                // anything else is skipped
            }
        }
        i += 1;
    }

    let value = total.checked_add(group)?;
    if value == 0 {
        if toks.iter().all(|t| *t == "không") {
            Some(0)
        } else {
            None
        }
    } else {
        Some(value)
    }
}

/// Convenience wrapper: lower-case and whitespace-split a phrase, then parse.
pub fn parse_phrase(text: &str) -> Option<i64> {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = lowered.split_whitespace().collect();
    parse_vietnamese_number(&tokens)
}

const RENDER_UNITS: [&str; 10] = [
    "", "một", "hai", "ba", "bốn", "năm", "sáu", "bảy", "tám", "chín",
];

const RENDER_TENS: [&str; 10] = [
    "", "mười", "hai mươi", "ba mươi", "bốn mươi", "năm mươi", "sáu mươi",
    "bảy mươi", "tám mươi", "chín mươi",
];

const RENDER_SCALES: [&str; 4] = ["", "nghìn", "triệu", "tỷ"];

fn render_three_digits(num: i64, is_first_group: bool) -> String {
    let hundred = num / 100;
    let ten = (num % 100) / 10;
    let one = num % 10;
    let mut parts: Vec<&str> = Vec::new();

    if hundred > 0 {
        parts.push(RENDER_UNITS[hundred as usize]);
        parts.push("trăm");
    } else if !is_first_group && num != 0 {
        parts.push("không");
        parts.push("trăm");
    }

    if ten > 1 {
        parts.push(RENDER_TENS[ten as usize]);
    } else if ten == 1 {
        parts.push("mười");
    } else if one > 0 && (hundred > 0 || !is_first_group) {
        parts.push("lẻ");
    }

    if one > 0 {
        if ten <= 1 {
            if one == 5 && ten == 1 {
                parts.push("lăm");
            } else {
                parts.push(RENDER_UNITS[one as usize]);
            }
        } else {
            match one {
                1 => parts.push("mốt"),
                4 => parts.push("tư"),
                5 => parts.push("lăm"),
                _ => parts.push(RENDER_UNITS[one as usize]),
            }
        }
    }

    parts.join(" ")
}

/// Render an integer as a canonical Vietnamese numeral phrase.
///
/// Supports `0 <= n < 10^12`; within that range
/// `parse_vietnamese_number(render_vietnamese_number(n)) == n` holds.
/// All-zero middle groups are elided ("một triệu không trăm lẻ năm"), never
/// rendered as a bare scale word.
pub fn render_vietnamese_number(n: i64) -> String {
    debug_assert!((0..1_000_000_000_000).contains(&n));
    if n == 0 {
        return "không".to_string();
    }

    let mut groups: Vec<i64> = Vec::new();
    let mut rest = n;
    while rest > 0 {
        groups.insert(0, rest % 1000);
        rest /= 1000;
    }

    let group_len = groups.len();
    let mut words: Vec<String> = Vec::new();
    for (idx, g) in groups.iter().enumerate() {
        if *g == 0 {
            continue;
        }
        let rendered = render_three_digits(*g, idx == 0);
        if !rendered.is_empty() {
            words.push(rendered);
        }
        let scale = RENDER_SCALES[group_len - idx - 1];
        if !scale.is_empty() {
            words.push(scale.to_string());
        }
    }
    words.join(" ")
}
