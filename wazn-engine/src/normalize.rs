//! Arabic text normalization for colloquial poetry
//!
//! The light pass is always applied: trim, drop tatweel, drop diacritics,
//! unify letter variants, replace anything outside the Arabic block with a
//! space, collapse whitespace.
//!
//! The deep pass additionally folds a small standard/dialect lexicon onto its
//! dialect form. It changes meaning and is used only by the exact-match
//! fallback, never for fuzzy scoring.

use std::collections::HashSet;

/// Tatweel (elongation mark)
const TATWEEL: char = '\u{0640}';

/// Standard → dialect lexicon applied to whole tokens by the deep pass
const DIALECT_LEXICON: &[(&str, &str)] = &[
    ("هذا", "هاي"),
    ("هذه", "هاي"),
    ("ذلك", "ذاك"),
    ("الذي", "الي"),
    ("التي", "الي"),
    ("الذين", "الين"),
    ("كيف", "شلون"),
    ("ماذا", "شو"),
    ("لماذا", "ليش"),
];

/// Harakat, combining maddah and hamza (U+0653..U+0655), superscript alef
fn is_diacritic(c: char) -> bool {
    matches!(c, '\u{064B}'..='\u{0655}' | '\u{0670}')
}

fn is_arabic(c: char) -> bool {
    matches!(c, '\u{0600}'..='\u{06FF}')
}

/// Letter unification; `None` drops the character
fn unify_letter(c: char) -> Option<char> {
    match c {
        'أ' | 'إ' | 'آ' => Some('ا'),
        'ة' => Some('ه'),
        'ى' => Some('ي'),
        'ؤ' => Some('و'),
        'ئ' => Some('ي'),
        'ء' => None,
        'گ' | 'ڭ' => Some('ك'),
        'ڨ' => Some('ق'),
        'چ' => Some('ج'),
        'پ' => Some('ب'),
        other => Some(other),
    }
}

/// Dialect form of a token, if the lexicon knows it (either side)
fn dialect_form(token: &str) -> Option<&'static str> {
    DIALECT_LEXICON
        .iter()
        .find(|(standard, dialect)| token == *standard || token == *dialect)
        .map(|(_, dialect)| *dialect)
}

/// Normalize a line of text
///
/// `deep` enables the lossy dialect folding; see the module docs.
pub fn normalize(text: &str, deep: bool) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut t: String = trimmed
        .chars()
        .filter(|&c| c != TATWEEL && !is_diacritic(c))
        .filter_map(unify_letter)
        .collect();

    if deep {
        t = t
            .split_whitespace()
            .map(|token| {
                if token.chars().count() <= 2 {
                    return token;
                }
                dialect_form(token).unwrap_or(token)
            })
            .collect::<Vec<_>>()
            .join(" ");
    }

    let cleaned: String = t
        .chars()
        .map(|c| if c.is_whitespace() || is_arabic(c) { c } else { ' ' })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Light-normalized text with all whitespace removed
pub fn compact(text: &str, deep: bool) -> String {
    normalize(text, deep)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Light-normalize and split on whitespace
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text, false)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Contiguous character n-grams of the compact light-normalized text
///
/// Text shorter than `n` yields itself as the only gram; empty text yields
/// nothing.
pub fn char_ngrams(text: &str, n: usize) -> HashSet<String> {
    let chars: Vec<char> = compact(text, false).chars().collect();
    if chars.is_empty() {
        return HashSet::new();
    }
    if n == 0 || chars.len() < n {
        return HashSet::from([chars.into_iter().collect::<String>()]);
    }
    chars.windows(n).map(|w| w.iter().collect()).collect()
}

/// Contiguous word n-grams (joined by a single space)
///
/// Fewer than `n` tokens yields all tokens as the only gram; no tokens yields
/// nothing.
pub fn word_ngrams(text: &str, n: usize) -> HashSet<String> {
    let words = tokenize(text);
    if words.is_empty() {
        return HashSet::new();
    }
    if n == 0 || words.len() < n {
        return HashSet::from([words.join(" ")]);
    }
    words.windows(n).map(|w| w.join(" ")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_diacritics_and_tatweel() {
        assert_eq!(normalize("قَلْبِـــي", false), "قلبي");
        assert_eq!(normalize("  يا   ليلُ  ", false), "يا ليل");
    }

    #[test]
    fn unifies_letters() {
        assert_eq!(normalize("أحمد إلى آخر", false), "احمد الي اخر");
        assert_eq!(normalize("مدرسة مؤمن بئر", false), "مدرسه مومن بير");
        assert_eq!(normalize("سماء", false), "سما");
        assert_eq!(normalize("گلبي چان ڨلب پاب", false), "كلبي جان قلب باب");
    }

    #[test]
    fn decomposed_hamza_matches_precomposed() {
        // Base letter followed by combining hamza above/below or maddah
        assert_eq!(normalize("\u{0627}\u{0654}حمد", false), normalize("أحمد", false));
        assert_eq!(normalize("\u{0627}\u{0655}لى", false), "الي");
        assert_eq!(normalize("\u{0627}\u{0653}خر", false), "اخر");
        assert_eq!(normalize("مو\u{0654}من", false), normalize("مؤمن", false));
    }

    #[test]
    fn replaces_non_arabic_with_space() {
        assert_eq!(normalize("حبيبي, hello! 123 قلبي", false), "حبيبي قلبي");
        assert_eq!(normalize("abc", false), "");
        assert_eq!(normalize("", false), "");
        assert_eq!(normalize("   ", true), "");
    }

    #[test]
    fn deep_folds_whole_tokens_only() {
        assert_eq!(normalize("هذا الليل", true), "هاي الليل");
        assert_eq!(normalize("هاي الليل", true), "هاي الليل");
        assert_eq!(normalize("كيف حالك", true), "شلون حالك");
        // Substring of a longer token is left alone
        assert_eq!(normalize("هذاك", true), "هذاك");
        // The light pass never folds
        assert_eq!(normalize("هذا الليل", false), "هذا الليل");
    }

    #[test]
    fn deep_skips_short_tokens() {
        // "شو" is a lexicon entry but only two characters long
        assert_eq!(normalize("شو", true), "شو");
    }

    #[test]
    fn light_normalization_is_idempotent() {
        let samples = [
            "يا ليلُ الصَّبُّ متى غدُهُ",
            "گلبي  چان يحبك... والله!!",
            "ـــــ",
            "أإآ ة ى ؤ ئ ء",
            "mixed نص with latin",
            "",
        ];
        for s in samples {
            let once = normalize(s, false);
            assert_eq!(normalize(&once, false), once, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn tokenize_splits_normalized_text() {
        assert_eq!(tokenize("يا  ليلُ, الصبّ"), vec!["يا", "ليل", "الصب"]);
        assert!(tokenize("...").is_empty());
    }

    #[test]
    fn char_ngrams_edges() {
        assert!(char_ngrams("", 3).is_empty());
        assert_eq!(char_ngrams("يا", 3), HashSet::from(["يا".to_string()]));

        let grams = char_ngrams("يا ليل", 3);
        // compact form is "ياليل" → 3 windows
        assert_eq!(grams.len(), 3);
        assert!(grams.contains("يال"));
        assert!(grams.contains("ليل"));
    }

    #[test]
    fn word_ngrams_edges() {
        assert!(word_ngrams("", 2).is_empty());
        assert_eq!(word_ngrams("ليل", 2), HashSet::from(["ليل".to_string()]));
        let grams = word_ngrams("يا ليل يا عين", 2);
        assert_eq!(grams.len(), 3);
        assert!(grams.contains("ليل يا"));
    }
}
