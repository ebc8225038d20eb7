//! Kanji classification by Unicode codepoint range.
//!
//! Ranges from http://www.rikai.com/library/kanjitables/kanji_codes.unicode.shtml

use std::ops::RangeInclusive;

/// CJK Unified Ideographs, 一 (U+4E00) through 龥 (U+9FA5).
pub const COMMON_KANJI: RangeInclusive<char> = '\u{4E00}'..='\u{9FA5}';
/// CJK Unified Ideographs Extension A, 㐀 (U+3400) through 䶵 (U+4DB5).
pub const RARE_KANJI: RangeInclusive<char> = '\u{3400}'..='\u{4DB5}';

/// Returns true if the character is a kanji.
///
/// Both range bounds are inclusive, so the endpoint characters
/// 龥 and 䶵 count as kanji.
pub fn is_kanji(c: char) -> bool {
    COMMON_KANJI.contains(&c) || RARE_KANJI.contains(&c)
}

/// Iterates through the kanji in the text in order of appearance, repeats included.
pub fn kanji_in(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().filter(|c| is_kanji(*c))
}

/// Precomputed kanji membership table.
///
/// Holds a bit for every codepoint up to the end of the common range and
/// agrees with [`is_kanji`] for every input. Replaces the range checks
/// with a single bit lookup in hot loops; carries no other semantics.
pub struct KanjiTable {
    bits: Vec<u64>,
}

impl KanjiTable {
    pub fn new() -> Self {
        let last = *COMMON_KANJI.end() as usize;
        let mut bits = vec![0u64; last / 64 + 1];
        for range in [RARE_KANJI, COMMON_KANJI] {
            for c in range {
                let idx = c as usize;
                bits[idx / 64] |= 1u64 << (idx % 64);
            }
        }
        Self { bits }
    }

    pub fn contains(&self, c: char) -> bool {
        let idx = c as usize;
        self.bits
            .get(idx / 64)
            .map(|word| word & (1u64 << (idx % 64)) != 0)
            .unwrap_or(false)
    }
}

impl Default for KanjiTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn recognises_kanji() {
        assert!(is_kanji('一'));
        assert!(is_kanji('考'));
        assert!(is_kanji('㐀'));
        assert!(!is_kanji('k'));
        assert!(!is_kanji('A'));
        assert!(!is_kanji('え'));
        assert!(!is_kanji('ア'));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        // common range
        assert!(is_kanji('\u{4E00}'));
        assert!(is_kanji('\u{9FA5}'));
        assert!(!is_kanji('\u{9FA6}'));
        // rare range
        assert!(is_kanji('\u{3400}'));
        assert!(is_kanji('\u{4DB5}'));
        assert!(!is_kanji('\u{33FF}'));
        assert!(!is_kanji('\u{3399}'));
        // the gap between the rare and common ranges
        assert!(!is_kanji('\u{4DB6}'));
        assert!(!is_kanji('\u{4DFF}'));
    }

    #[test]
    fn classification_is_stable() {
        for _ in 0..3 {
            assert!(is_kanji('雨'));
            assert!(!is_kanji('a'));
        }
    }

    #[test]
    fn finds_kanji_in_text() {
        let kanji = kanji_in("私は猫が好きです。私も。").collect::<Vec<_>>();
        assert_eq!(kanji, vec!['私', '猫', '好', '私']);
    }

    #[test]
    fn finds_nothing_in_kana_text() {
        assert_eq!(kanji_in("ひらがなとカタカナ").count(), 0);
    }

    #[test]
    fn table_agrees_with_arithmetic_check() {
        let table = KanjiTable::new();
        for c in '\u{0}'..='\u{FFFF}' {
            assert_eq!(table.contains(c), is_kanji(c), "U+{:04X}", c as u32);
        }
        // outside the table entirely
        assert!(!table.contains('\u{20000}'));
        assert!(!is_kanji('\u{20000}'));
    }
}
