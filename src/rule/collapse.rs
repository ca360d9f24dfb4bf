//! Rules collapsing redundant adjacent words into one.

use super::Transform;
use crate::tokenizer::tag::Tag;
use crate::types::*;
use crate::utils::{join, match_first_case};
use crate::Error;

const POLITENESS_MARKERS: &[&str] = &["kindly", "please"];

const REDUNDANT_PAIRS: &[(&str, &str)] = &[
    ("finalized", "approved"),
    ("confirmed", "approved"),
    ("confirmed", "checked"),
    ("verified", "checked"),
    ("fully", "complete"),
    ("completely", "finished"),
];

/// Scans non-overlapping adjacent pairs from the left and keeps the second token of every matching pair.
/// Returns `None` if no pair matched.
fn collapse_pairs<F>(tokens: &[Token], is_redundant: F) -> Option<Vec<&str>>
where
    F: Fn(&Token, &Token) -> bool,
{
    let mut output = Vec::with_capacity(tokens.len());
    let mut modified = false;
    let mut i = 0;

    while i < tokens.len() {
        match tokens.get(i + 1) {
            Some(next) if is_redundant(&tokens[i], next) => {
                output.push(next.as_str());
                modified = true;
                i += 2;
            }
            _ => {
                output.push(tokens[i].as_str());
                i += 1;
            }
        }
    }

    if modified {
        Some(output)
    } else {
        None
    }
}

/// Removes a word if it repeats the word before it, ignoring case: "the the file" -> "the file".
/// Operates on whitespace-separated words, the first occurrence is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveDuplicateWords;

impl Transform for RemoveDuplicateWords {
    fn name(&self) -> &str {
        "RemoveDuplicateWords"
    }

    fn apply(&self, sentence: &str, _tagger: &dyn Tag) -> Result<String, Error> {
        let mut words: Vec<&str> = Vec::new();
        let mut modified = false;

        for word in sentence.split_whitespace() {
            match words.last() {
                Some(prev) if prev.to_lowercase() == word.to_lowercase() => modified = true,
                _ => words.push(word),
            }
        }

        Ok(if modified {
            words.join(" ")
        } else {
            sentence.to_string()
        })
    }
}

/// Collapses politeness markers ("kindly", "please") into a single "please" at the position of the first
/// marker. The case of the first char of the first marker is kept. A comma right before a dropped marker
/// is dropped with it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimplifyPoliteness;

impl Transform for SimplifyPoliteness {
    fn name(&self) -> &str {
        "SimplifyPolitenessNLTK"
    }

    fn apply(&self, sentence: &str, tagger: &dyn Tag) -> Result<String, Error> {
        let tokens = tagger.tag(sentence)?;
        let mut output: Vec<String> = Vec::with_capacity(tokens.len());
        let mut seen = false;
        let mut modified = false;

        for token in &tokens {
            let lower = token.lower();

            if !POLITENESS_MARKERS.contains(&lower.as_str()) {
                output.push(token.text.clone());
            } else if seen {
                // "please, kindly, help" must not leave ", ," behind
                if output.last().map(String::as_str) == Some(",") {
                    output.pop();
                }
                modified = true;
            } else {
                seen = true;
                let canonical = match_first_case(&token.text, "please");
                modified |= canonical != token.text;
                output.push(canonical);
            }
        }

        if modified {
            Ok(join(&output))
        } else {
            Ok(sentence.to_string())
        }
    }
}

/// Keeps the second of two adjacent modals: "might can" -> "can".
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortenDoubleModals;

impl Transform for ShortenDoubleModals {
    fn name(&self) -> &str {
        "ShortenDoubleModalsNLTK"
    }

    fn apply(&self, sentence: &str, tagger: &dyn Tag) -> Result<String, Error> {
        let tokens = tagger.tag(sentence)?;

        Ok(
            match collapse_pairs(&tokens, |a, b| a.pos == Pos::MD && b.pos == Pos::MD) {
                Some(output) => join(&output),
                None => sentence.to_string(),
            },
        )
    }
}

/// Keeps the second of two adjacent words with overlapping meaning: "finalized approved" -> "approved".
#[derive(Debug, Clone, Copy, Default)]
pub struct CompressOverqualifiedNouns;

impl Transform for CompressOverqualifiedNouns {
    fn name(&self) -> &str {
        "CompressOverqualifiedNounsNLTK"
    }

    fn apply(&self, sentence: &str, tagger: &dyn Tag) -> Result<String, Error> {
        let tokens = tagger.tag(sentence)?;

        Ok(
            match collapse_pairs(&tokens, |a, b| {
                let pair = (a.lower(), b.lower());
                REDUNDANT_PAIRS
                    .iter()
                    .any(|(first, second)| pair.0 == *first && pair.1 == *second)
            }) {
                Some(output) => join(&output),
                None => sentence.to_string(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::tests::apply;

    #[test]
    fn duplicates_keep_first_occurrence() {
        assert_eq!(
            apply(&RemoveDuplicateWords, "The the file is is here."),
            "The file is here."
        );
        assert_eq!(
            apply(&RemoveDuplicateWords, "very very very good"),
            "very good"
        );
        assert_eq!(
            apply(&RemoveDuplicateWords, "The sky is blue."),
            "The sky is blue."
        );
        // whitespace is only normalized when a word is removed
        assert_eq!(
            apply(&RemoveDuplicateWords, "The  sky\tis blue."),
            "The  sky\tis blue."
        );
    }

    #[test]
    fn politeness_is_collapsed() {
        assert_eq!(
            apply(
                &SimplifyPoliteness,
                "Also, kindly remind me please, if he plans."
            ),
            "Also , please remind me , if he plans ."
        );
        assert_eq!(
            apply(&SimplifyPoliteness, "Kindly send it."),
            "Please send it ."
        );
        assert_eq!(
            apply(&SimplifyPoliteness, "Please send it please."),
            "Please send it ."
        );
    }

    #[test]
    fn dropped_markers_take_their_comma() {
        assert_eq!(
            apply(&SimplifyPoliteness, "Please, please, kindly help."),
            "Please help ."
        );
        assert_eq!(
            apply(&SimplifyPoliteness, "Kindly send it, please."),
            "Please send it ."
        );
    }

    #[test]
    fn single_please_is_untouched() {
        assert_eq!(apply(&SimplifyPoliteness, "Please, send it."), "Please, send it.");
    }

    #[test]
    fn double_modals_keep_second() {
        assert_eq!(
            apply(&ShortenDoubleModals, "We might can go tomorrow."),
            "We can go tomorrow ."
        );
        assert_eq!(
            apply(&ShortenDoubleModals, "We can go tomorrow."),
            "We can go tomorrow."
        );
    }

    #[test]
    fn redundant_pairs_keep_second() {
        assert_eq!(
            apply(
                &CompressOverqualifiedNouns,
                "if the document gets finalized approved."
            ),
            "if the document gets approved ."
        );
        assert_eq!(
            apply(&CompressOverqualifiedNouns, "It is Fully complete"),
            "It is complete"
        );
        assert_eq!(
            apply(&CompressOverqualifiedNouns, "approved finalized"),
            "approved finalized"
        );
    }
}
