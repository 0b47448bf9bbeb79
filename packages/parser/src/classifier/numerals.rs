//! Chapter number words, schedule ordinals and lowercase roman numerals.

/// Chapter number words as they appear in headings.
const CHAPTER_WORDS: [&str; 18] = [
    "ONE",
    "TWO",
    "THREE",
    "FOUR",
    "FIVE",
    "SIX",
    "SEVEN",
    "EIGHT",
    "NINE",
    "TEN",
    "ELEVEN",
    "TWELVE",
    "THIRTEEN",
    "FOURTEEN",
    "FIFTEEN",
    "SIXTEEN",
    "SEVENTEEN",
    "EIGHTEEN",
];

/// Ordinal words used in schedule headings ("FIRST SCHEDULE").
const ORDINAL_WORDS: [&str; 10] = [
    "FIRST", "SECOND", "THIRD", "FOURTH", "FIFTH", "SIXTH", "SEVENTH", "EIGHTH", "NINTH", "TENTH",
];

/// Roman numeral symbols, largest first, including subtractive pairs.
const ROMAN_SYMBOLS: [(u32, &str); 9] = [
    (100, "c"),
    (90, "xc"),
    (50, "l"),
    (40, "xl"),
    (10, "x"),
    (9, "ix"),
    (5, "v"),
    (4, "iv"),
    (1, "i"),
];

/// Map a chapter number word (ONE..EIGHTEEN, any case) to its value.
///
/// # Examples
/// ```
/// use katiba_parser::classifier::chapter_word_value;
///
/// assert_eq!(chapter_word_value("four"), Some(4));
/// assert_eq!(chapter_word_value("XIX"), None);
/// ```
#[must_use]
pub fn chapter_word_value(word: &str) -> Option<u32> {
    CHAPTER_WORDS
        .iter()
        .position(|w| w.eq_ignore_ascii_case(word))
        .and_then(|i| u32::try_from(i + 1).ok())
}

/// Map an ordinal word (FIRST..TENTH, any case) to its value.
#[must_use]
pub fn ordinal_word_value(word: &str) -> Option<u32> {
    ORDINAL_WORDS
        .iter()
        .position(|w| w.eq_ignore_ascii_case(word))
        .and_then(|i| u32::try_from(i + 1).ok())
}

/// Resolve a chapter number: the word value, or `1 + closed_chapters`.
#[must_use]
pub fn resolve_chapter_number(token: &str, closed_chapters: usize) -> u32 {
    chapter_word_value(token)
        .unwrap_or_else(|| u32::try_from(closed_chapters + 1).unwrap_or(u32::MAX))
}

/// Value of a lowercase roman numeral written in canonical form.
///
/// Returns `None` for anything that is not a canonical numeral below 400
/// (e.g. `"iiii"`, `"vx"`, `"abc"`).
///
/// # Examples
/// ```
/// use katiba_parser::classifier::roman_value;
///
/// assert_eq!(roman_value("iv"), Some(4));
/// assert_eq!(roman_value("xii"), Some(12));
/// assert_eq!(roman_value("iiii"), None);
/// ```
#[must_use]
pub fn roman_value(numeral: &str) -> Option<u32> {
    if numeral.is_empty() {
        return None;
    }

    let mut total: u32 = 0;
    let mut prev: u32 = 0;
    for c in numeral.chars().rev() {
        let value = match c {
            'i' => 1,
            'v' => 5,
            'x' => 10,
            'l' => 50,
            'c' => 100,
            _ => return None,
        };
        if value < prev {
            total = total.checked_sub(value)?;
        } else {
            total += value;
            prev = value;
        }
    }

    // Reject non-canonical spellings that the additive parse accepts
    (to_roman(total) == numeral).then_some(total)
}

/// Render a value as a lowercase roman numeral.
fn to_roman(mut value: u32) -> String {
    let mut out = String::new();
    for (amount, symbol) in ROMAN_SYMBOLS {
        while value >= amount {
            out.push_str(symbol);
            value -= amount;
        }
    }
    out
}
