//! Implementations of the sentence rewriting rules.
//!
//! A rule is a named, pure function from sentence to sentence. Rules come in four kinds:
//! - *pattern* rules matching a fixed regular expression ([pattern]),
//! - *substitution* rules replacing phrases from a fixed table ([substitution]),
//! - *collapsing* rules keeping one of two redundant words ([collapse]),
//! - *grammar* rules which tag the sentence and match a short window of tags ([grammar]).

use crate::tokenizer::tag::Tag;
use crate::Error;
use enum_dispatch::enum_dispatch;
use std::{fmt, sync::Arc};

pub mod collapse;
pub mod grammar;
pub mod pattern;
pub mod substitution;

pub use collapse::{
    CompressOverqualifiedNouns, RemoveDuplicateWords, ShortenDoubleModals, SimplifyPoliteness,
};
pub use grammar::{
    CleanFillers, DisambiguateNominalVerbNoun, FixArticles, FixAwkwardGratitude,
    FixNounModifierOrder, FixVerbAgreement, NormalizeInfinitives,
};
pub use pattern::{AddMissingSubject, FixEditingVerbConstruction, SimplifyFinalWishes};
pub use substitution::Substitution;

/// A named sentence transformation.
///
/// `apply` must be a pure function of its input: no state is kept between calls and calling it twice with
/// the same sentence gives the same result. Rules must not fail on malformed but nonempty text, if nothing
/// matches they return the sentence unchanged. Only tagging can fail.
#[enum_dispatch]
pub trait Transform {
    /// The name reported when this rule changes a sentence.
    fn name(&self) -> &str;

    /// Rewrites `sentence`. `tagger` is only used by rules which need tags.
    fn apply(&self, sentence: &str, tagger: &dyn Tag) -> Result<String, Error>;

    /// Applies the rule and reports whether it was triggered.
    /// Triggered means the output differs from the input by exact string comparison.
    fn run(&self, sentence: &str, tagger: &dyn Tag) -> Result<(String, bool), Error> {
        let new_sentence = self.apply(sentence, tagger)?;
        let triggered = new_sentence != sentence;
        Ok((new_sentence, triggered))
    }
}

/// A rule backed by an arbitrary pure function.
#[derive(Clone)]
pub struct FnRule {
    name: String,
    func: Arc<dyn Fn(&str) -> String + Send + Sync>,
}

impl FnRule {
    pub fn new<S, F>(name: S, func: F) -> Self
    where
        S: Into<String>,
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        FnRule {
            name: name.into(),
            func: Arc::new(func),
        }
    }
}

impl fmt::Debug for FnRule {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "FnRule {{ name: {:?} }}", self.name)
    }
}

impl Transform for FnRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, sentence: &str, _tagger: &dyn Tag) -> Result<String, Error> {
        Ok((self.func)(sentence))
    }
}

/// One rule of a [Rules][crate::rules::Rules] set.
#[enum_dispatch(Transform)]
#[derive(Debug)]
pub enum Rule {
    AddMissingSubject,
    RemoveDuplicateWords,
    SimplifyPoliteness,
    FixArticles,
    ShortenDoubleModals,
    CompressOverqualifiedNouns,
    FixAwkwardGratitude,
    Substitution,
    SimplifyFinalWishes,
    NormalizeInfinitives,
    FixNounModifierOrder,
    CleanFillers,
    FixEditingVerbConstruction,
    FixVerbAgreement,
    DisambiguateNominalVerbNoun,
    FnRule,
}

/// The built-in rules in the order they have to be applied.
///
/// Cleanup rules come first (duplicate words, politeness), later structural rules rely on it.
pub fn catalog() -> Vec<Rule> {
    vec![
        AddMissingSubject.into(),
        RemoveDuplicateWords.into(),
        SimplifyPoliteness.into(),
        FixArticles.into(),
        ShortenDoubleModals.into(),
        CompressOverqualifiedNouns.into(),
        FixAwkwardGratitude.into(),
        Substitution::clarify_contract_checking().into(),
        SimplifyFinalWishes.into(),
        NormalizeInfinitives.into(),
        FixNounModifierOrder.into(),
        CleanFillers.into(),
        FixEditingVerbConstruction.into(),
        FixVerbAgreement.into(),
        DisambiguateNominalVerbNoun.into(),
    ]
}
