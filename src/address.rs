// Address-notation rewriting: spoken separators between house numbers become
// `/` or `-`. A keyword is only rewritten when flanked by eligible operands on
// both sides, so "Trên đường lớn" stays untouched while "15 Trên 6" becomes
// "15/6".

use crate::lexicon::{DASH_KEYWORDS, SLASH_KEYWORDS};
use crate::tokens::{split_words, Word};

/// Rewrite slash-style separators ("trên", "gạch chéo", "sẹc", ...) to `/`.
/// Operands are ASCII-alphanumeric tokens (house numbers, unit letters).
pub fn rewrite_slash(text: &str) -> String {
    rewrite(text, SLASH_KEYWORDS, "/", is_alnum_operand)
}

/// Rewrite dash-style separators ("gạch ngang", "ngang") to `-`.
/// Operands are digit-only tokens.
pub fn rewrite_dash(text: &str) -> String {
    rewrite(text, DASH_KEYWORDS, "-", is_digit_operand)
}

fn is_alnum_operand(core: &str) -> bool {
    !core.is_empty() && core.bytes().all(|b| b.is_ascii_alphanumeric())
}

fn is_digit_operand(core: &str) -> bool {
    !core.is_empty() && core.bytes().all(|b| b.is_ascii_digit())
}

/// Number of tokens the keyword phrase occupies at `idx`, if it matches.
/// Multi-word keywords ("gạch chéo") must appear as consecutive clean tokens.
fn keyword_len(words: &[Word], idx: usize, keywords: &[&str]) -> Option<usize> {
    for kw in keywords {
        let parts: Vec<&str> = kw.split_whitespace().collect();
        if idx + parts.len() > words.len() {
            continue;
        }
        let matches = parts
            .iter()
            .enumerate()
            .all(|(k, part)| words[idx + k].lower == *part);
        if matches {
            return Some(parts.len());
        }
    }
    None
}

fn rewrite(
    text: &str,
    keywords: &[&str],
    separator: &str,
    is_operand: fn(&str) -> bool,
) -> String {
    let words = split_words(text);
    let mut out = String::with_capacity(text.len());
    let mut last_byte = 0;
    let mut i = 0;

    while i < words.len() {
        if !is_operand(words[i].core_text()) {
            i += 1;
            continue;
        }
        // chain operands joined by keywords; every operand except the last
        // must be punctuation-free or the chain ends there
        let mut operands = vec![words[i].core_text()];
        let mut end_tok = i;
        let mut cursor = i;
        while words[cursor].is_clean() {
            let Some(klen) = keyword_len(&words, cursor + 1, keywords) else {
                break;
            };
            let next = cursor + 1 + klen;
            if next >= words.len() || !is_operand(words[next].core_text()) {
                break;
            }
            operands.push(words[next].core_text());
            end_tok = next;
            cursor = next;
        }

        if operands.len() >= 2 {
            let start = words[i].start;
            let end = words[end_tok].core_end();
            out.push_str(&text[last_byte..start]);
            out.push_str(&operands.join(separator));
            last_byte = end;
            i = end_tok + 1;
        } else {
            i += 1;
        }
    }

    out.push_str(&text[last_byte..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slash_basic_chain() {
        assert_eq!(
            rewrite_slash("15 Trên 6 Trên 89 Tô Ngọc Vân"),
            "15/6/89 Tô Ngọc Vân"
        );
    }

    #[test]
    fn test_slash_mixed_keywords() {
        assert_eq!(
            rewrite_slash("15 gạch chéo 6 sẹc 89 Quận 12"),
            "15/6/89 Quận 12"
        );
    }

    #[test]
    fn test_slash_keyword_outside_number_context_untouched() {
        assert_eq!(
            rewrite_slash("Nhà tôi nằm Trên đường lớn, số 15 Trên 6 Trên 89 Quận 12"),
            "Nhà tôi nằm Trên đường lớn, số 15/6/89 Quận 12"
        );
        assert_eq!(
            rewrite_slash("Không có chữ Trên trong số liệu này"),
            "Không có chữ Trên trong số liệu này"
        );
    }

    #[test]
    fn test_slash_multiple_chains() {
        assert_eq!(
            rewrite_slash("15 sẹc 6 trên 8 và 22 trên 11 gạch chéo 34 sẹc 5 Đường XYZ"),
            "15/6/8 và 22/11/34/5 Đường XYZ"
        );
    }

    #[test]
    fn test_slash_long_chain() {
        assert_eq!(
            rewrite_slash("5 Trên 3 Trên 2 Trên 1 Khu phố 9"),
            "5/3/2/1 Khu phố 9"
        );
    }

    #[test]
    fn test_dash_basic() {
        assert_eq!(
            rewrite_dash("số nhà 113 gạch ngang 115 đường Lê Văn Sỹ"),
            "số nhà 113-115 đường Lê Văn Sỹ"
        );
        assert_eq!(rewrite_dash("200 ngang 202 phường 5"), "200-202 phường 5");
    }

    #[test]
    fn test_dash_case_insensitive_keywords() {
        assert_eq!(
            rewrite_dash("123 GẠCH NGANG 125 Nguyễn Huệ"),
            "123-125 Nguyễn Huệ"
        );
    }

    #[test]
    fn test_dash_keyword_without_numbers_untouched() {
        assert_eq!(
            rewrite_dash("Không có gạch ngang ở đây"),
            "Không có gạch ngang ở đây"
        );
    }

    #[test]
    fn test_punctuation_breaks_chain() {
        assert_eq!(
            rewrite_slash("15, trên 6 trên 89"),
            "15, trên 6/89"
        );
    }
}
