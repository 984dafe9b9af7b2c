// Category-specific canonicalization of detected spans.
//
// Every function here is fail-soft: a span the rules cannot resolve is
// returned unchanged, so one bad span never corrupts the rest of the sentence.

use tracing::debug;

use crate::lexicon::{
    is_digit_run, is_digit_seq, ordinal_value, phone_digit, CURRENCY_UNITS,
};
use crate::numeral::parse_vietnamese_number;
use crate::tokens::strip_trailing_punct;

use super::Category;

/// Canonical rendering of `text` for `category`; the original span when the
/// rules cannot resolve it.
pub fn normalize_entity(text: &str, category: Category) -> String {
    let result = match category {
        Category::Decimal => normalize_decimal(text),
        Category::Date => normalize_date(text),
        Category::Time => normalize_time(text),
        Category::PhoneAccount => normalize_phone(text),
        Category::Currency => normalize_currency(text),
        Category::Percentage => normalize_percentage(text),
        Category::Measurement => normalize_measurement(text),
        Category::Fraction => normalize_fraction(text),
        Category::Ordinal => normalize_ordinal(text),
        Category::NumberSequence => normalize_number_sequence(text),
        Category::YearDuration => normalize_year_duration(text),
    };
    match result {
        Some(normalized) => normalized,
        None => {
            debug!(?category, span = %text, "span left unchanged");
            text.to_string()
        }
    }
}

fn lower_tokens(text: &str) -> Vec<String> {
    text.split_whitespace().map(|t| t.to_lowercase()).collect()
}

/// Parse one side of a numeric expression: a literal digit concatenation
/// ("1 5" → 15) or a Vietnamese numeral phrase.
fn parse_number_side(tokens: &[String]) -> Option<i64> {
    if tokens.is_empty() {
        return None;
    }
    if tokens.iter().all(|t| is_digit_run(t)) {
        tokens.concat().parse().ok()
    } else {
        parse_vietnamese_number(tokens)
    }
}

fn normalize_decimal(text: &str) -> Option<String> {
    let tokens = lower_tokens(text);
    let pos = tokens.iter().position(|t| t == "phẩy")?;
    let int_part = parse_number_side(&tokens[..pos])?;
    let frac_part = parse_number_side(&tokens[pos + 1..])?;
    Some(format!("{int_part}.{frac_part}"))
}

/// `ngày D tháng M [năm Y]` → `DD/MM[/Y]`. Month-year spans ("tháng M năm Y")
/// have no canonical rendering and pass through unchanged.
fn normalize_date(text: &str) -> Option<String> {
    let tokens = lower_tokens(text);
    if tokens.first().map(String::as_str) != Some("ngày") {
        return None;
    }
    let thang = tokens.iter().position(|t| t == "tháng")?;
    if thang <= 1 {
        return None;
    }
    let day = parse_vietnamese_number(&tokens[1..thang])?;
    let rest = &tokens[thang + 1..];

    if let Some((month_toks, year_toks)) = split_month_year(rest) {
        let month = parse_vietnamese_number(month_toks)?;
        let year = parse_vietnamese_number(year_toks)?;
        return Some(format!("{day:02}/{month:02}/{year}"));
    }
    let month = parse_vietnamese_number(rest)?;
    Some(format!("{day:02}/{month:02}"))
}

/// Split `M năm Y` at the first "năm" that still leaves a year behind it.
fn split_month_year(rest: &[String]) -> Option<(&[String], &[String])> {
    for m in 1..rest.len() {
        if rest[m] == "năm" && m + 1 < rest.len() {
            return Some((&rest[..m], &rest[m + 1..]));
        }
    }
    None
}

fn normalize_time(text: &str) -> Option<String> {
    let tokens = lower_tokens(text);
    let gio = tokens.iter().position(|t| t == "giờ")?;
    let hour = parse_vietnamese_number(&tokens[..gio])?;
    let rest = &tokens[gio + 1..];

    let phut = rest.iter().position(|t| t == "phút");
    let giay = rest.iter().position(|t| t == "giây");
    // an unreadable minute phrase degrades to :00 rather than failing the span
    let minute = phut
        .and_then(|p| parse_vietnamese_number(&rest[..p]))
        .unwrap_or(0);
    let second = giay.and_then(|g| {
        let from = phut.map(|p| p + 1).unwrap_or(0);
        parse_vietnamese_number(&rest[from..g])
    });

    let mut out = format!("{hour:02}:{minute:02}");
    if let Some(s) = second {
        out.push_str(&format!(":{s:02}"));
    }
    Some(out)
}

/// Map every token to bare digits and concatenate; grouping and spacing are
/// deliberately dropped.
fn normalize_phone(text: &str) -> Option<String> {
    let mut digits = String::new();
    for token in lower_tokens(text) {
        let core = strip_trailing_punct(&token).0;
        if is_digit_run(core) {
            digits.push_str(core);
        } else if let Some(d) = phone_digit(core) {
            digits.push(d);
        }
        // invalid tokens are skipped
    }
    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}

/// Scale factors accepted directly after a literal digit amount ("2 triệu").
fn quantity_scale(word: &str) -> Option<i64> {
    match word {
        "trăm" => Some(100),
        "nghìn" | "ngàn" => Some(1_000),
        "triệu" => Some(1_000_000),
        "tỷ" => Some(1_000_000_000),
        _ => None,
    }
}

/// Resolve a quantity phrase (the part of a currency/measurement span before
/// the unit): literal digits, digits + scale word, or a numeral phrase.
fn parse_quantity(tokens: &[String]) -> Option<i64> {
    if tokens.is_empty() {
        return None;
    }
    let joined: String = tokens
        .concat()
        .chars()
        .filter(|c| *c != '.' && *c != ',')
        .collect();
    if is_digit_run(&joined) {
        return joined.parse().ok();
    }
    if tokens.len() == 2 && is_digit_run(&tokens[0]) {
        if let Some(scale) = quantity_scale(&tokens[1]) {
            let n: i64 = tokens[0].parse().ok()?;
            // amounts past i64 leave the span unchanged rather than panicking
            return n.checked_mul(scale);
        }
    }
    match parse_vietnamese_number(tokens) {
        Some(0) | None => None,
        Some(n) => Some(n),
    }
}

fn normalize_currency(text: &str) -> Option<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() < 2 {
        return None;
    }
    // the unit keeps its original surface form ("USD" stays "USD")
    let last = words[words.len() - 1];
    let (unit, amount_words) = if words.len() >= 3
        && words[words.len() - 2].to_lowercase() == "đô"
        && last.to_lowercase() == "la"
    {
        (
            format!("{} {}", words[words.len() - 2], last),
            &words[..words.len() - 2],
        )
    } else if CURRENCY_UNITS.contains(&last.to_lowercase().as_str()) {
        (last.to_string(), &words[..words.len() - 1])
    } else {
        return None;
    };

    let tokens: Vec<String> = amount_words.iter().map(|t| t.to_lowercase()).collect();
    let amount = parse_quantity(&tokens)?;
    Some(format!("{amount} {unit}"))
}

fn normalize_measurement(text: &str) -> Option<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() < 2 {
        return None;
    }
    let unit = words[words.len() - 1];
    let tokens: Vec<String> = words[..words.len() - 1]
        .iter()
        .map(|t| t.to_lowercase())
        .collect();
    let amount = parse_quantity(&tokens)?;
    Some(format!("{amount} {unit}"))
}

fn normalize_percentage(text: &str) -> Option<String> {
    let mut tokens = lower_tokens(text);
    if tokens.last().map(String::as_str) == Some("%") {
        tokens.pop();
    } else if tokens.len() >= 2
        && tokens[tokens.len() - 2] == "phần"
        && tokens[tokens.len() - 1] == "trăm"
    {
        tokens.truncate(tokens.len() - 2);
    }
    let value = parse_vietnamese_number(&tokens)?;
    Some(format!("{value}%"))
}

fn normalize_fraction(text: &str) -> Option<String> {
    let tokens = lower_tokens(text);
    if tokens.first().map(String::as_str) == Some("phần") {
        return match parse_vietnamese_number(&tokens[1..]) {
            Some(d) if d != 0 => Some(format!("1/{d}")),
            _ => None,
        };
    }
    if tokens.last().map(String::as_str) == Some("phần") {
        return match parse_vietnamese_number(&tokens[..tokens.len() - 1]) {
            // numerator known, denominator unspecified in the source phrase
            Some(n) if n != 0 => Some(format!("{n}/?")),
            _ => None,
        };
    }
    None
}

fn normalize_ordinal(text: &str) -> Option<String> {
    let lowered = text.to_lowercase();
    let phrase = lowered.trim();
    if let Some(v) = ordinal_value(phrase) {
        return Some(v.to_string());
    }
    let tokens: Vec<&str> = phrase.split_whitespace().collect();
    let head = *tokens.first()?;
    if head != "thứ" && head != "hạng" {
        return None;
    }
    let rest = tokens[1..].join(" ");
    if let Some(v) = ordinal_value(&rest) {
        return Some(format!("{head} {v}"));
    }
    let v = parse_vietnamese_number(&tokens[1..])?;
    Some(format!("{head} {v}"))
}

fn normalize_number_sequence(text: &str) -> Option<String> {
    let tokens = lower_tokens(text);
    let cores: Vec<&str> = tokens.iter().map(|t| strip_trailing_punct(t).0).collect();
    if cores.iter().all(|t| is_digit_seq(t)) {
        let digits: String = cores
            .concat()
            .chars()
            .filter(|c| *c != '.' && *c != ',')
            .collect();
        return Some(digits);
    }
    parse_vietnamese_number(&cores).map(|n| n.to_string())
}

/// Rewrite only the numeral inside the fixed idiom, keeping the surrounding
/// words (and their casing) intact.
fn normalize_year_duration(text: &str) -> Option<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() < 4 {
        return None;
    }
    let last = words.len() - 1;
    if words[0].to_lowercase() != "cách"
        || words[1].to_lowercase() != "đây"
        || words[last].to_lowercase() != "năm"
    {
        return None;
    }
    let tokens: Vec<String> = words[2..last].iter().map(|t| t.to_lowercase()).collect();
    let n = parse_vietnamese_number(&tokens)?;
    Some(format!("{} {} {} {}", words[0], words[1], n, words[last]))
}
