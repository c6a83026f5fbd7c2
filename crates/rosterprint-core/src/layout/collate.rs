//! Thai-aware string collation.
//!
//! Approximates the `th` locale ordering used for the printed rosters:
//!
//! - Leading vowels (เ แ โ ใ ไ) are written before the consonant they follow
//!   in speech, so they are weighed after that consonant.
//! - Tone marks and other above/below signs only matter once the base
//!   letters are equal.
//! - Case only matters once letters and marks are equal; lower case first.
//! - Whitespace and punctuation sort before digits, digits before Latin
//!   letters, Latin before Thai. Thai digits weigh the same as ASCII digits.

use std::cmp::Ordering;

/// Primary weight classes, in sort order.
const CLASS_SPACE_PUNCT: u8 = 0;
const CLASS_DIGIT: u8 = 1;
const CLASS_LATIN: u8 = 2;
const CLASS_THAI: u8 = 3;
const CLASS_OTHER: u8 = 4;

/// Precomputed sort key; comparing keys is equivalent to [`compare`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: Vec<(u8, u32)>,
    secondary: Vec<u32>,
    tertiary: Vec<bool>,
}

fn is_thai_consonant(c: char) -> bool {
    ('\u{0E01}'..='\u{0E2E}').contains(&c)
}

fn is_leading_vowel(c: char) -> bool {
    ('\u{0E40}'..='\u{0E44}').contains(&c)
}

/// Signs that ride on the previous letter: mai taikhu, the four tone marks,
/// thanthakhat and yamakkan.
fn is_thai_mark(c: char) -> bool {
    matches!(c, '\u{0E47}'..='\u{0E4C}' | '\u{0E4E}')
}

fn primary_weight(c: char) -> (u8, u32) {
    if c.is_whitespace() || c.is_ascii_punctuation() {
        (CLASS_SPACE_PUNCT, c as u32)
    } else if c.is_ascii_digit() {
        (CLASS_DIGIT, c as u32 - '0' as u32)
    } else if ('\u{0E50}'..='\u{0E59}').contains(&c) {
        (CLASS_DIGIT, c as u32 - 0x0E50)
    } else if c.is_ascii_alphabetic() {
        (CLASS_LATIN, c as u32)
    } else if ('\u{0E00}'..='\u{0E7F}').contains(&c) {
        (CLASS_THAI, c as u32)
    } else if c.is_alphabetic() {
        (CLASS_LATIN, c as u32)
    } else {
        (CLASS_OTHER, c as u32)
    }
}

fn push_base(key: &mut CollationKey, c: char) {
    let is_upper = c.is_uppercase();
    for lower in c.to_lowercase() {
        key.primary.push(primary_weight(lower));
        key.tertiary.push(is_upper);
    }
}

/// Build the collation key for `s`.
pub fn collation_key(s: &str) -> CollationKey {
    let chars: Vec<char> = s.chars().collect();
    let mut key = CollationKey {
        primary: Vec::with_capacity(chars.len()),
        secondary: Vec::new(),
        tertiary: Vec::with_capacity(chars.len()),
    };

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if is_leading_vowel(c) && chars.get(i + 1).is_some_and(|&next| is_thai_consonant(next)) {
            push_base(&mut key, chars[i + 1]);
            push_base(&mut key, c);
            i += 2;
            continue;
        }
        if is_thai_mark(c) {
            // Position keeps "ก่า" and "กา่" apart without outranking letters.
            key.secondary.push(((key.primary.len() as u32) << 16) | c as u32);
        } else {
            push_base(&mut key, c);
        }
        i += 1;
    }

    key
}

/// Compare two strings with Thai collation rules.
pub fn compare(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(&collation_key(b))
}
