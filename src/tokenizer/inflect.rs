//! Regular English inflection. Irregular forms are expected to come from the lexicon.

use crate::utils::match_first_case;

fn is_vowel(c: char) -> bool {
    "aeiou".contains(c.to_ascii_lowercase())
}

fn ends_with_consonant_y(word: &str) -> bool {
    let mut chars = word.chars().rev();
    matches!((chars.next(), chars.next()), (Some('y'), Some(c)) if !is_vowel(c))
}

/// The `-ing` form of a verb: `edit` -> `editing`, `update` -> `updating`, `see` -> `seeing`, `tie` -> `tying`.
pub fn gerund(verb: &str) -> String {
    let lower = verb.to_lowercase();

    if !verb.is_ascii() {
        format!("{}ing", verb)
    } else if lower.ends_with("ie") {
        format!("{}ying", &verb[..verb.len() - 2])
    } else if lower.ends_with("ee") || lower.ends_with("ye") || lower.ends_with("oe") {
        format!("{}ing", verb)
    } else if lower.ends_with('e') && lower.len() > 2 {
        format!("{}ing", &verb[..verb.len() - 1])
    } else {
        format!("{}ing", verb)
    }
}

/// The third person singular present of a verb given its base form: `plan` -> `plans`, `go` -> `goes`,
/// `try` -> `tries`, `have` -> `has`.
pub fn third_person_singular(base: &str) -> String {
    let lower = base.to_lowercase();

    match lower.as_str() {
        "be" => match_first_case(base, "is"),
        "have" => match_first_case(base, "has"),
        _ if !base.is_ascii() => format!("{}s", base),
        _ if ends_with_consonant_y(&lower) => format!("{}ies", &base[..base.len() - 1]),
        _ if ["s", "sh", "ch", "x", "z", "o"]
            .iter()
            .any(|suffix| lower.ends_with(suffix)) =>
        {
            format!("{}es", base)
        }
        _ => format!("{}s", base),
    }
}

/// Guesses the base form of a regular `-ing` form without lexicon entry: `sending` -> `send`,
/// `planning` -> `plan`, `making` -> `make`. Returns `None` if `word` is not an `-ing` form.
pub fn base_of_gerund(word: &str) -> Option<String> {
    let lower = word.to_lowercase();
    if !lower.ends_with("ing") || lower.chars().count() < 5 || !lower.is_ascii() {
        return None;
    }

    let stem = &lower[..lower.len() - 3];
    let bytes = stem.as_bytes();
    let n = bytes.len();
    let last = bytes[n - 1] as char;
    let prev = bytes[n - 2] as char;

    if last == prev && !"lsz".contains(last) && !is_vowel(last) {
        // doubled final consonant: planning, submitting
        Some(stem[..n - 1].to_string())
    } else if !is_vowel(last)
        && is_vowel(prev)
        && n >= 3
        && !is_vowel(bytes[n - 3] as char)
        && !is_vowel(bytes[0] as char)
        && !"wxy".contains(last)
        && n <= 4
    {
        // short consonant-vowel-consonant stems drop an "e": making, writing
        Some(format!("{}e", stem))
    } else {
        Some(stem.to_string())
    }
}
