// Diacritic placement per modern Vietnamese orthography. ASR output often
// carries the tone mark on the wrong vowel of a cluster ("hoà" for "hòa");
// this module strips the mark and re-applies it to the canonical position.

/// One row per base vowel: the bare form followed by its five toned forms
/// (huyền, sắc, hỏi, ngã, nặng).
const VOWEL_TABLE: [[char; 6]; 12] = [
    ['a', 'à', 'á', 'ả', 'ã', 'ạ'],
    ['ă', 'ằ', 'ắ', 'ẳ', 'ẵ', 'ặ'],
    ['â', 'ầ', 'ấ', 'ẩ', 'ẫ', 'ậ'],
    ['e', 'è', 'é', 'ẻ', 'ẽ', 'ẹ'],
    ['ê', 'ề', 'ế', 'ể', 'ễ', 'ệ'],
    ['i', 'ì', 'í', 'ỉ', 'ĩ', 'ị'],
    ['o', 'ò', 'ó', 'ỏ', 'õ', 'ọ'],
    ['ô', 'ồ', 'ố', 'ổ', 'ỗ', 'ộ'],
    ['ơ', 'ờ', 'ớ', 'ở', 'ỡ', 'ợ'],
    ['u', 'ù', 'ú', 'ủ', 'ũ', 'ụ'],
    ['ư', 'ừ', 'ứ', 'ử', 'ữ', 'ự'],
    ['y', 'ỳ', 'ý', 'ỷ', 'ỹ', 'ỵ'],
];

const ROW_E_CIRCUMFLEX: usize = 4;
const ROW_I: usize = 5;
const ROW_O_HORN: usize = 8;
const ROW_U: usize = 9;

/// (table row, tone index) for a vowel character, case-insensitive.
fn vowel_id(ch: char) -> Option<(usize, usize)> {
    let lower = ch.to_lowercase().next()?;
    for (row, forms) in VOWEL_TABLE.iter().enumerate() {
        for (tone, &form) in forms.iter().enumerate() {
            if form == lower {
                return Some((row, tone));
            }
        }
    }
    None
}

/// A word is eligible for retoning only when its vowels form one contiguous
/// run; anything else (acronyms, foreign words) is left alone.
fn is_valid_vietnamese_word(word: &str) -> bool {
    let mut last_idx: Option<usize> = None;
    for (idx, ch) in word.chars().enumerate() {
        if vowel_id(ch).is_none() {
            continue;
        }
        if let Some(prev) = last_idx {
            if idx - prev != 1 {
                return false;
            }
        }
        last_idx = Some(idx);
    }
    true
}

fn with_case(template: char, base: char) -> char {
    if template.is_uppercase() {
        base.to_uppercase().next().unwrap_or(base)
    } else {
        base
    }
}

fn apply_tone(chars: &mut [char], idx: usize, tone: usize) {
    if let Some((row, _)) = vowel_id(chars[idx]) {
        chars[idx] = with_case(chars[idx], VOWEL_TABLE[row][tone]);
    }
}

/// Re-place the tone mark of one word onto its canonical vowel.
///
/// The scan strips any existing mark and records it; `qu`/`gi` onsets do not
/// bear tone, so their `u`/`i` is reset to base form and excluded from
/// placement. The mark then lands on exactly one vowel: an `ê`/`ơ` if the
/// cluster has one, else the first vowel of a word-final two-vowel cluster,
/// else the last of a non-final one, else the middle of a three-vowel cluster.
pub fn retone(word: &str) -> String {
    if !is_valid_vietnamese_word(word) {
        return word.to_string();
    }

    let mut chars: Vec<char> = word.chars().collect();
    let mut tone = 0;
    let mut vowel_indices: Vec<usize> = Vec::new();
    let mut qu_or_gi = false;

    for idx in 0..chars.len() {
        let ch = chars[idx];
        let Some((row, col)) = vowel_id(ch) else {
            continue;
        };

        if row == ROW_U && idx > 0 && chars[idx - 1].to_ascii_lowercase() == 'q' {
            chars[idx] = with_case(ch, 'u');
            qu_or_gi = true;
        } else if row == ROW_I && idx > 0 && chars[idx - 1].to_ascii_lowercase() == 'g' {
            chars[idx] = with_case(ch, 'i');
            qu_or_gi = true;
        }

        if col != 0 {
            tone = col;
            chars[idx] = with_case(ch, VOWEL_TABLE[row][0]);
        }

        if !(qu_or_gi && idx == 1) {
            vowel_indices.push(idx);
        }
    }

    if vowel_indices.len() < 2 {
        if qu_or_gi {
            if chars.len() == 2 {
                apply_tone(&mut chars, 1, tone);
            } else if chars.get(2).copied().is_some_and(|c| vowel_id(c).is_some()) {
                apply_tone(&mut chars, 2, tone);
            } else {
                // "gìn"-style words: the onset vowel itself carries the tone
                let row = if chars[1].to_ascii_lowercase() == 'i' {
                    ROW_I
                } else {
                    ROW_U
                };
                chars[1] = with_case(chars[1], VOWEL_TABLE[row][tone]);
            }
            return chars.into_iter().collect();
        }
        return word.to_string();
    }

    for &idx in &vowel_indices {
        if let Some((row, _)) = vowel_id(chars[idx]) {
            if row == ROW_E_CIRCUMFLEX || row == ROW_O_HORN {
                apply_tone(&mut chars, idx, tone);
                return chars.into_iter().collect();
            }
        }
    }

    if vowel_indices.len() == 2 {
        let (first, last) = (vowel_indices[0], vowel_indices[1]);
        if last == chars.len() - 1 {
            apply_tone(&mut chars, first, tone);
        } else {
            apply_tone(&mut chars, last, tone);
        }
    } else {
        apply_tone(&mut chars, vowel_indices[1], tone);
    }

    chars.into_iter().collect()
}

/// Retone the leading alphabetic core of a token, keeping any trailing
/// punctuation or digits attached.
fn normalize_word(word: &str) -> String {
    let core_len: usize = word
        .chars()
        .take_while(|c| c.is_alphabetic())
        .map(|c| c.len_utf8())
        .sum();
    if core_len == 0 {
        return word.to_string();
    }
    let mut out = retone(&word[..core_len]);
    out.push_str(&word[core_len..]);
    out
}

/// Retone every word of a sentence. Runs of whitespace collapse to one space.
pub fn normalize_tone(sentence: &str) -> String {
    sentence
        .split_whitespace()
        .map(normalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}
