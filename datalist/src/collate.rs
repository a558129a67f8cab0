//! String collation for `SortType::String` columns.
//!
//! Approximates a `ru`/`en` locale collator (variant sensitivity, `caseFirst: "upper"`) closely
//! enough for table sorting, without pulling in ICU data. Characters are canonically decomposed
//! first, so an accented letter is its base letter plus combining marks.
//!
//! 1. primary: whitespace, then punctuation and symbols in collation-table order, then digits,
//!    then letters case-folded: Cyrillic before Latin before other scripts. `й` is a letter of
//!    its own; `ё` is `е` with a mark.
//! 2. secondary: combining marks (`e < é`, `е < ё`).
//! 3. case: uppercase before lowercase.
//!
//! Strings equal on all three levels fall back to code point order so the result is a total
//! order.

use alloc::vec::Vec;
use core::cmp::Ordering;

use unicode_normalization::char::{decompose_canonical, is_combining_mark};

/// ASCII punctuation and symbols in root collation order.
const PUNCTUATION: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

const GROUP_SPACE: u8 = 0;
const GROUP_PUNCTUATION: u8 = 1;
const GROUP_DIGIT: u8 = 2;
const GROUP_CYRILLIC: u8 = 3;
const GROUP_LATIN: u8 = 4;
const GROUP_OTHER: u8 = 5;

#[derive(Clone, Copy)]
struct Element {
    primary: Option<(u8, u32)>,
    /// 0 for a base character, the mark itself for a combining mark.
    secondary: u32,
    /// 0 for uppercase, 1 otherwise; `None` for marks.
    case: Option<u8>,
}

fn primary(folded: char) -> (u8, u32) {
    let code = folded as u32;
    if folded.is_whitespace() {
        return (GROUP_SPACE, code);
    }
    if let Some(index) = PUNCTUATION.find(folded) {
        return (GROUP_PUNCTUATION, index as u32);
    }
    if !folded.is_alphanumeric() {
        return (GROUP_PUNCTUATION, PUNCTUATION.len() as u32 + code);
    }
    if folded.is_numeric() {
        return match folded.to_digit(10) {
            Some(digit) => (GROUP_DIGIT, digit),
            None => (GROUP_DIGIT, 10 + code),
        };
    }
    match code {
        0x0400..=0x052F => (GROUP_CYRILLIC, code),
        0x0000..=0x024F | 0x1E00..=0x1EFF => (GROUP_LATIN, code),
        _ => (GROUP_OTHER, code),
    }
}

fn base(c: char) -> Element {
    let folded = c.to_lowercase().next().unwrap_or(c);
    Element {
        primary: Some(primary(folded)),
        secondary: 0,
        case: Some(if c.is_uppercase() { 0 } else { 1 }),
    }
}

fn elements(s: &str) -> Vec<Element> {
    let mut out = Vec::with_capacity(s.len());
    for c in s.chars() {
        // Short i is its own letter in Cyrillic alphabets, not `и` with a breve.
        if matches!(c, 'й' | 'Й') {
            out.push(base(c));
            continue;
        }
        decompose_canonical(c, |d| {
            if is_combining_mark(d) {
                out.push(Element {
                    primary: None,
                    secondary: d as u32,
                    case: None,
                });
            } else {
                out.push(base(d));
            }
        });
    }
    out
}

/// Compares two strings with upper-case-first locale collation.
///
/// ```
/// use core::cmp::Ordering;
/// use datalist::compare_strings;
///
/// assert_eq!(compare_strings("A", "a"), Ordering::Less);
/// assert_eq!(compare_strings("a", "B"), Ordering::Less);
/// assert_eq!(compare_strings("é", "f"), Ordering::Less);
/// ```
pub fn compare_strings(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    let ea = elements(a);
    let eb = elements(b);
    ea.iter()
        .filter_map(|x| x.primary)
        .cmp(eb.iter().filter_map(|x| x.primary))
        .then_with(|| {
            ea.iter()
                .map(|x| x.secondary)
                .cmp(eb.iter().map(|x| x.secondary))
        })
        .then_with(|| {
            ea.iter()
                .filter_map(|x| x.case)
                .cmp(eb.iter().filter_map(|x| x.case))
        })
        .then_with(|| a.cmp(b))
}
