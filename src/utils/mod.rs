use itertools::Itertools;
use lazy_static::lazy_static;
use onig::{Captures, Regex, RegexOptions, Syntax};

pub mod parallelism;

// see https://stackoverflow.com/questions/38406793/why-is-capitalizing-the-first-letter-of-a-string-so-convoluted-in-rust
pub fn apply_to_first<F>(string: &str, func: F) -> String
where
    F: Fn(char) -> String,
{
    let mut c = string.chars();
    match c.next() {
        None => String::new(),
        Some(first) => func(first) + c.as_str(),
    }
}

pub fn starts_uppercase(string: &str) -> bool {
    string.chars().next().map_or(false, char::is_uppercase)
}

/// Upper-cases the first char of `replacement` if `template` starts with an uppercase char.
pub fn match_first_case(template: &str, replacement: &str) -> String {
    if starts_uppercase(template) {
        apply_to_first(replacement, |c| c.to_uppercase().collect())
    } else {
        replacement.to_string()
    }
}

/// Removes whitespace immediately preceding `.`, `,`, `!`, `?`, `;` and `:`. Idempotent.
pub fn clean_spacing(text: &str) -> String {
    lazy_static! {
        static ref REGEX: Regex = Regex::new(r"\s+([.,!?;:])").unwrap();
    }

    REGEX.replace_all(text, |caps: &Captures| caps.at(1).unwrap_or("").to_string())
}

pub fn case_insensitive(pattern: &str) -> Result<Regex, onig::Error> {
    Regex::with_options(
        pattern,
        RegexOptions::REGEX_OPTION_IGNORECASE,
        Syntax::ruby(),
    )
}

/// Escapes all regex metacharacters so `text` is matched literally.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if r"\.+*?()|[]{}^$#&-~".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Joins tokens the way rules emit rewritten sentences: separated by single spaces.
pub fn join<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens.iter().map(|x| x.as_ref()).join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_is_removed_before_punctuation() {
        assert_eq!(clean_spacing("Hello , world !"), "Hello, world!");
        assert_eq!(clean_spacing("a ; b : c ?"), "a; b: c?");
        assert_eq!(clean_spacing("keep ( this )"), "keep ( this )");
        assert_eq!(clean_spacing("tabs\t\t."), "tabs.");
    }

    #[test]
    fn first_case_is_matched() {
        assert_eq!(match_first_case("Contract", "contract review"), "Contract review");
        assert_eq!(match_first_case("contract", "contract review"), "contract review");
        assert_eq!(match_first_case("", "x"), "x");
    }

    #[test]
    fn escaped_text_matches_literally() {
        let regex = case_insensitive(&escape("e.g. (1+1)")).unwrap();
        assert!(regex.find("see E.G. (1+1) here").is_some());
        assert!(regex.find("see eXg. (11) here").is_none());
    }
}
