//! Rules matching a fixed regular expression on the raw sentence.

use super::Transform;
use crate::tokenizer::tag::Tag;
use crate::utils::{self, case_insensitive, match_first_case};
use crate::Error;
use lazy_static::lazy_static;
use onig::{Captures, Regex};

lazy_static! {
    static ref MISSING_SUBJECT: Regex = case_insensitive(r"\A(hope|want|need|wish)\b").unwrap();
    static ref FINAL_WISHES: Vec<Regex> = vec![
        case_insensitive(r"which is one of my (final|sincere|strong) wishes").unwrap(),
        case_insensitive(r"that is one of my (final|sincere|strong) wishes").unwrap(),
        case_insensitive(r"which I (sincerely|truly)? ?wish(ed)? for").unwrap(),
        case_insensitive(r"which I (have)? ?been wishing for").unwrap(),
    ];
    static ref EDITING_CONSTRUCTION: Regex =
        case_insensitive(r"plans (for|on) the editing").unwrap();
}

const FULFILLED_WISH: &str = "as I had hoped";

/// Prepends `I` to sentences starting with a subjectless wish: "Hope you are well." -> "I hope you are well.".
#[derive(Debug, Clone, Copy, Default)]
pub struct AddMissingSubject;

impl Transform for AddMissingSubject {
    fn name(&self) -> &str {
        "AddMissingSubject"
    }

    fn apply(&self, sentence: &str, _tagger: &dyn Tag) -> Result<String, Error> {
        if MISSING_SUBJECT.find(sentence).is_none() {
            return Ok(sentence.to_string());
        }

        Ok(format!(
            "I {}",
            utils::apply_to_first(sentence, |c| c.to_lowercase().collect())
        ))
    }
}

/// Replaces clauses describing a wish with "as I had hoped".
/// Patterns are tried in order, only the first matching pattern is applied (to all its matches).
#[derive(Debug, Clone, Copy, Default)]
pub struct SimplifyFinalWishes;

impl Transform for SimplifyFinalWishes {
    fn name(&self) -> &str {
        "SimplifyFinalWishes"
    }

    fn apply(&self, sentence: &str, _tagger: &dyn Tag) -> Result<String, Error> {
        for regex in FINAL_WISHES.iter() {
            if regex.find(sentence).is_some() {
                return Ok(regex.replace_all(sentence, FULFILLED_WISH));
            }
        }

        Ok(sentence.to_string())
    }
}

/// "plans for the editing" -> "plans to edit".
#[derive(Debug, Clone, Copy, Default)]
pub struct FixEditingVerbConstruction;

impl Transform for FixEditingVerbConstruction {
    fn name(&self) -> &str {
        "FixEditingVerbConstruction"
    }

    fn apply(&self, sentence: &str, _tagger: &dyn Tag) -> Result<String, Error> {
        Ok(EDITING_CONSTRUCTION.replace_all(sentence, |caps: &Captures| {
            match_first_case(caps.at(0).unwrap_or(""), "plans to edit")
        }))
    }
}
