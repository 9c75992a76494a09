use lazy_static::lazy_static;
use regex::Regex;

pub const MAX_SCORE: u8 = 100;

/// Pull the match score out of generated prose.
///
/// Takes the first run of one to three ASCII digits directly followed by `%`
/// and caps it at 100. Digits from other scripts are not read as numbers. Later percentages are ignored even when they look more
/// relevant. Returns `None` when the text carries no percentage at all.
pub fn extract_match_percentage(text: &str) -> Option<u8> {
    lazy_static! {
        static ref PERCENT_RE: Regex = Regex::new(r"([0-9]{1,3})%").unwrap();
    }
    let digits = PERCENT_RE.captures(text)?.get(1)?.as_str();
    // At most three ASCII digits, so this always parses into u16.
    let value: u16 = digits.parse().ok()?;
    Some(value.min(MAX_SCORE as u16) as u8)
}
