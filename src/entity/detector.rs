// Priority-ordered entity detection over a token stream.
//
// Each category is matched by a hand-written token matcher rather than a regex
// alternation over the Vietnamese word lists; matchers are tried in fixed
// priority order against every unclaimed position, and a span claimed by a
// higher-priority category can never be reclaimed by a lower one. A fixed
// idiom pre-pass runs first since it anchors on exact multi-token wording.

use crate::lexicon::{
    is_digit_run, is_number_like, is_number_word, is_phone_word,
    CURRENCY_UNITS, MEASURE_UNITS, MERGE_CONNECTORS,
};
use crate::tokens::{split_words, strip_trailing_punct, Word};

use super::{Category, Entity};

type Matcher = fn(&[Word], usize) -> Option<usize>;

/// Generic patterns in detection priority order. The idiom pre-pass
/// (`match_year_duration`) runs before all of these.
const PATTERNS: &[(Category, Matcher)] = &[
    (Category::Decimal, match_decimal),
    (Category::Date, match_date_full),
    (Category::Date, match_date_day_month),
    (Category::Date, match_date_month_year),
    (Category::Time, match_time),
    (Category::PhoneAccount, match_phone),
    (Category::Currency, match_currency),
    (Category::Percentage, match_percentage),
    (Category::Measurement, match_measurement),
    (Category::Fraction, match_fraction_denominator),
    (Category::Fraction, match_fraction_numerator),
    (Category::NumberSequence, match_number_sequence),
];

/// Minimum number-like tokens for a NumberSequence or PhoneAccount entity to
/// survive the final filter. Shorter spans ("năm bảy") are casual mentions,
/// not numerals.
const MIN_TOKENS_FOR_NORMALIZE: usize = 3;

/// Scan `text` and return non-overlapping entities sorted by start offset.
pub fn detect(text: &str) -> Vec<Entity> {
    let words = split_words(text);
    if words.is_empty() {
        return Vec::new();
    }

    let mut claimed: Vec<(usize, usize)> = Vec::new();
    let mut entities: Vec<Entity> = Vec::new();

    let mut run_pass = |category: Category, matcher: Matcher,
                        claimed: &mut Vec<(usize, usize)>,
                        entities: &mut Vec<Entity>| {
        let mut i = 0;
        while i < words.len() {
            match matcher(&words, i) {
                Some(end_tok) => {
                    let start = words[i].start;
                    let end = words[end_tok - 1].core_end();
                    if !overlaps(claimed, start, end) {
                        claimed.push((start, end));
                        entities.push(Entity {
                            text: text[start..end].to_string(),
                            category,
                            start,
                            end,
                        });
                    }
                    // scanning resumes after the match even when the span was
                    // already claimed, mirroring leftmost non-overlapping search
                    i = end_tok;
                }
                None => i += 1,
            }
        }
    };

    run_pass(Category::YearDuration, match_year_duration, &mut claimed, &mut entities);
    for (category, matcher) in PATTERNS {
        run_pass(*category, *matcher, &mut claimed, &mut entities);
    }

    entities.sort_by_key(|e| e.start);
    let merged = merge_adjacent(entities, text);
    filter_short(merged)
}

fn overlaps(claimed: &[(usize, usize)], start: usize, end: usize) -> bool {
    claimed.iter().any(|&(a, b)| !(end <= a || start >= b))
}

/// Exclusive end of the maximal run of number-like tokens starting at `start`.
/// Trailing punctuation on a token terminates the run after that token.
fn number_run(words: &[Word], start: usize) -> usize {
    let mut j = start;
    while j < words.len() && is_number_like(words[j].core_lower()) {
        j += 1;
        if !words[j - 1].is_clean() {
            break;
        }
    }
    j
}

/// Keyword token in the middle of a match: must carry no trailing punctuation.
fn keyword_at(words: &[Word], idx: usize, kw: &str) -> bool {
    idx < words.len() && words[idx].core_lower() == kw && words[idx].is_clean()
}

/// Keyword token allowed to end a match, so trailing punctuation is fine.
fn final_keyword_at(words: &[Word], idx: usize, kw: &str) -> bool {
    idx < words.len() && words[idx].core_lower() == kw
}

/// `"cách đây <N> năm"` idiom.
fn match_year_duration(words: &[Word], i: usize) -> Option<usize> {
    if !keyword_at(words, i, "cách") || !keyword_at(words, i + 1, "đây") {
        return None;
    }
    let run_end = number_run(words, i + 2);
    if run_end == i + 2 {
        return None;
    }
    if final_keyword_at(words, run_end, "năm") {
        return Some(run_end + 1);
    }
    // the greedy run may have consumed the closing literal, since "năm" is
    // itself a number word ("cách đây hai năm")
    if run_end - 1 > i + 2 && words[run_end - 1].core_lower() == "năm" {
        return Some(run_end);
    }
    None
}

/// `<numerals> phẩy <numerals>`.
fn match_decimal(words: &[Word], i: usize) -> Option<usize> {
    let left_end = number_run_excluding(words, i, "phẩy");
    if left_end == i || !keyword_at(words, left_end, "phẩy") {
        return None;
    }
    if !words[left_end - 1].is_clean() {
        return None;
    }
    let right_end = number_run_excluding(words, left_end + 1, "phẩy");
    if right_end == left_end + 1 {
        return None;
    }
    Some(right_end)
}

fn number_run_excluding(words: &[Word], start: usize, excluded: &str) -> usize {
    let mut j = start;
    while j < words.len()
        && is_number_like(words[j].core_lower())
        && words[j].core_lower() != excluded
    {
        j += 1;
        if !words[j - 1].is_clean() {
            break;
        }
    }
    j
}

/// `ngày D tháng M năm Y`.
fn match_date_full(words: &[Word], i: usize) -> Option<usize> {
    if !keyword_at(words, i, "ngày") {
        return None;
    }
    let day_end = number_run(words, i + 1);
    if day_end == i + 1 || !words[day_end - 1].is_clean() {
        return None;
    }
    if !keyword_at(words, day_end, "tháng") {
        return None;
    }
    month_year_tail(words, day_end + 1)
}

/// `ngày D tháng M`. The month run stops before a non-leading "năm": that
/// reading ("tháng ba năm nay") starts the year phrase, not a composite month.
fn match_date_day_month(words: &[Word], i: usize) -> Option<usize> {
    if !keyword_at(words, i, "ngày") {
        return None;
    }
    let day_end = number_run(words, i + 1);
    if day_end == i + 1 || !words[day_end - 1].is_clean() {
        return None;
    }
    if !keyword_at(words, day_end, "tháng") {
        return None;
    }
    let start = day_end + 1;
    let mut j = start;
    while j < words.len() && is_number_like(words[j].core_lower()) {
        if j > start && words[j].core_lower() == "năm" {
            break;
        }
        j += 1;
        if !words[j - 1].is_clean() {
            break;
        }
    }
    if j == start {
        return None;
    }
    Some(j)
}

/// `tháng M năm Y`.
fn match_date_month_year(words: &[Word], i: usize) -> Option<usize> {
    if !keyword_at(words, i, "tháng") {
        return None;
    }
    month_year_tail(words, i + 1)
}

/// Match `M năm Y` starting at `k`: the shortest non-empty number run such
/// that the next token is the literal "năm" followed by at least one number
/// token. Required because "năm" doubles as the digit five, so a greedy month
/// would swallow the year keyword.
fn month_year_tail(words: &[Word], k: usize) -> Option<usize> {
    let mut m = 0;
    while k + m < words.len()
        && is_number_like(words[k + m].core_lower())
        && words[k + m].is_clean()
    {
        m += 1;
        let kw = k + m;
        if keyword_at(words, kw, "năm") && kw + 1 < words.len() {
            if is_number_like(words[kw + 1].core_lower()) {
                let year_end = number_run(words, kw + 1);
                if year_end > kw + 1 {
                    return Some(year_end);
                }
            }
        }
    }
    None
}

/// `H giờ [M phút] [S giây]`.
fn match_time(words: &[Word], i: usize) -> Option<usize> {
    let h_end = number_run(words, i);
    if h_end == i || !words[h_end - 1].is_clean() {
        return None;
    }
    if !final_keyword_at(words, h_end, "giờ") {
        return None;
    }
    let mut end = h_end + 1;
    if !words[h_end].is_clean() {
        return Some(end);
    }
    if let Some(m_end) = run_then_keyword(words, h_end + 1, "phút") {
        end = m_end;
        if words[m_end - 1].is_clean() {
            if let Some(s_end) = run_then_keyword(words, m_end, "giây") {
                end = s_end;
            }
        }
    } else if let Some(s_end) = run_then_keyword(words, h_end + 1, "giây") {
        end = s_end;
    }
    Some(end)
}

/// Non-empty number run immediately followed by `kw`; returns the token index
/// past the keyword.
fn run_then_keyword(words: &[Word], start: usize, kw: &str) -> Option<usize> {
    let run_end = number_run(words, start);
    if run_end == start || !words[run_end - 1].is_clean() {
        return None;
    }
    if final_keyword_at(words, run_end, kw) {
        Some(run_end + 1)
    } else {
        None
    }
}

/// Two or more consecutive plain digit words or digit runs.
fn match_phone(words: &[Word], i: usize) -> Option<usize> {
    let mut j = i;
    while j < words.len() {
        let core = words[j].core_lower();
        if !(is_digit_run(core) || is_phone_word(core)) {
            break;
        }
        j += 1;
        if !words[j - 1].is_clean() {
            break;
        }
    }
    if j >= i + 2 {
        Some(j)
    } else {
        None
    }
}

/// Number phrase followed by a currency unit ("đồng", "usd", "vnd", "đô la").
fn match_currency(words: &[Word], i: usize) -> Option<usize> {
    let run_end = number_run(words, i);
    if run_end == i || run_end >= words.len() || !words[run_end - 1].is_clean() {
        return None;
    }
    let unit = words[run_end].core_lower();
    if CURRENCY_UNITS.contains(&unit) {
        return Some(run_end + 1);
    }
    if unit == "đô" && words[run_end].is_clean() && final_keyword_at(words, run_end + 1, "la") {
        return Some(run_end + 2);
    }
    None
}

/// Number phrase followed by `phần trăm` or a literal `%` token.
fn match_percentage(words: &[Word], i: usize) -> Option<usize> {
    let run_end = number_run(words, i);
    if run_end == i || !words[run_end - 1].is_clean() {
        return None;
    }
    if keyword_at(words, run_end, "phần") && final_keyword_at(words, run_end + 1, "trăm") {
        return Some(run_end + 2);
    }
    if final_keyword_at(words, run_end, "%") {
        return Some(run_end + 1);
    }
    None
}

/// Number phrase followed by a measurement unit.
fn match_measurement(words: &[Word], i: usize) -> Option<usize> {
    let run_end = number_run(words, i);
    if run_end == i || run_end >= words.len() || !words[run_end - 1].is_clean() {
        return None;
    }
    if MEASURE_UNITS.contains(&words[run_end].core_lower()) {
        Some(run_end + 1)
    } else {
        None
    }
}

/// `phần N` → denominator-only fraction.
fn match_fraction_denominator(words: &[Word], i: usize) -> Option<usize> {
    if !keyword_at(words, i, "phần") {
        return None;
    }
    let run_end = number_run(words, i + 1);
    if run_end == i + 1 {
        return None;
    }
    Some(run_end)
}

/// `N phần` → numerator-only fraction.
fn match_fraction_numerator(words: &[Word], i: usize) -> Option<usize> {
    let run_end = number_run(words, i);
    if run_end == i || !words[run_end - 1].is_clean() {
        return None;
    }
    if final_keyword_at(words, run_end, "phần") {
        Some(run_end + 1)
    } else {
        None
    }
}

/// Two or more consecutive number-like tokens.
fn match_number_sequence(words: &[Word], i: usize) -> Option<usize> {
    let run_end = number_run(words, i);
    if run_end >= i + 2 {
        Some(run_end)
    } else {
        None
    }
}

/// Fold adjacent entities together: two NumberSequences always merge; any two
/// entities merge when the gap between them is empty or a single connector
/// token. This recovers numeral phrases the per-pattern scan split apart.
fn merge_adjacent(entities: Vec<Entity>, text: &str) -> Vec<Entity> {
    let mut iter = entities.into_iter();
    let Some(mut prev) = iter.next() else {
        return Vec::new();
    };
    let mut merged = Vec::new();

    for cur in iter {
        let gap = &text[prev.end..cur.start];
        let both_sequences = prev.category == Category::NumberSequence
            && cur.category == Category::NumberSequence;
        if both_sequences || is_connector_gap(gap) {
            prev = Entity {
                text: text[prev.start..cur.end].to_string(),
                category: prev.category,
                start: prev.start,
                end: cur.end,
            };
        } else {
            merged.push(prev);
            prev = cur;
        }
    }
    merged.push(prev);
    merged
}

fn is_connector_gap(gap: &str) -> bool {
    gap.split_whitespace().all(|t| {
        let lower = t.to_lowercase();
        MERGE_CONNECTORS.contains(&lower.as_str()) || is_digit_run(&lower)
    })
}

fn filter_short(entities: Vec<Entity>) -> Vec<Entity> {
    entities
        .into_iter()
        .filter(|e| match e.category {
            Category::NumberSequence | Category::PhoneAccount => {
                count_number_tokens(&e.text) >= MIN_TOKENS_FOR_NORMALIZE
            }
            _ => true,
        })
        .collect()
}

fn count_number_tokens(span: &str) -> usize {
    span.split_whitespace()
        .map(|w| strip_trailing_punct(w).0.to_lowercase())
        .filter(|t| is_digit_run(t) || is_number_word(t) || is_phone_word(t))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(text: &str) -> Vec<Category> {
        detect(text).into_iter().map(|e| e.category).collect()
    }

    #[test]
    fn test_full_date_claims_whole_phrase() {
        let ents = detect("ngày mười lăm tháng ba năm hai nghìn không trăm hai mươi ba");
        assert_eq!(ents.len(), 1);
        assert_eq!(ents[0].category, Category::Date);
        assert_eq!(ents[0].start, 0);
    }

    #[test]
    fn test_partial_date_day_month() {
        let ents = detect("hẹn gặp ngày hai tháng tư nhé");
        assert_eq!(ents.len(), 1);
        assert_eq!(ents[0].category, Category::Date);
        assert_eq!(ents[0].text, "ngày hai tháng tư");
    }

    #[test]
    fn test_month_year_date() {
        let ents = detect("tháng ba năm hai nghìn hai mươi");
        assert_eq!(ents.len(), 1);
        assert_eq!(ents[0].category, Category::Date);
    }

    #[test]
    fn test_time_with_minutes() {
        let ents = detect("lúc mười lăm giờ ba mươi phút");
        assert_eq!(ents.len(), 1);
        assert_eq!(ents[0].category, Category::Time);
        assert_eq!(ents[0].text, "mười lăm giờ ba mươi phút");
    }

    #[test]
    fn test_phone_sequence() {
        let ents = detect("gọi số không chín bảy bảy bốn không tám bốn hai không");
        assert_eq!(ents.len(), 1);
        assert_eq!(ents[0].category, Category::PhoneAccount);
    }

    #[test]
    fn test_currency_two_token_unit() {
        let ents = detect("giá hai trăm đô la");
        assert_eq!(ents.len(), 1);
        assert_eq!(ents[0].category, Category::Currency);
        assert_eq!(ents[0].text, "hai trăm đô la");
    }

    #[test]
    fn test_percentage_beats_fraction() {
        assert_eq!(categories("tăng năm mươi phần trăm"), vec![Category::Percentage]);
    }

    #[test]
    fn test_measurement() {
        let ents = detect("dài năm km");
        assert_eq!(ents.len(), 1);
        assert_eq!(ents[0].category, Category::Measurement);
    }

    #[test]
    fn test_year_duration_pre_pass() {
        let ents = detect("cách đây hai năm");
        assert_eq!(ents.len(), 1);
        assert_eq!(ents[0].category, Category::YearDuration);
        assert_eq!(ents[0].text, "cách đây hai năm");
    }

    #[test]
    fn test_short_number_sequence_suppressed() {
        assert!(detect("năm bảy").is_empty());
        assert!(detect("mười ba").is_empty());
    }

    #[test]
    fn test_adjacent_number_sequences_merge() {
        let ents = detect("hai trăm linh năm và ba trăm linh bảy");
        assert_eq!(ents.len(), 1);
        assert_eq!(ents[0].category, Category::NumberSequence);
        assert_eq!(ents[0].text, "hai trăm linh năm và ba trăm linh bảy");
    }

    #[test]
    fn test_spans_never_overlap() {
        let texts = [
            "ngày hai tháng ba năm hai nghìn lẻ năm lúc ba giờ chiều giá hai triệu đồng",
            "không chín bảy bảy bốn và hai trăm nghìn đồng",
            "ba phẩy năm phần trăm của hai trăm triệu",
        ];
        for text in texts {
            let ents = detect(text);
            for pair in ents.windows(2) {
                assert!(pair[0].end <= pair[1].start, "overlap in {text:?}: {pair:?}");
            }
            for e in &ents {
                assert_eq!(&text[e.start..e.end], e.text);
            }
        }
    }

    #[test]
    fn test_trailing_punctuation_excluded_from_span() {
        let ents = detect("giá hai nghìn đồng, rẻ lắm");
        assert_eq!(ents.len(), 1);
        assert_eq!(ents[0].text, "hai nghìn đồng");
    }

    #[test]
    fn test_decimal_priority_over_sequence() {
        let ents = detect("nhiệt độ ba mươi bảy phẩy năm độ");
        assert_eq!(ents.len(), 1);
        assert_eq!(ents[0].category, Category::Decimal);
    }
}
