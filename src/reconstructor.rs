//! A rule set together with the tagger its rules use. Also applies the rules to running text, sentence by sentence.

use crate::rules::{Rules, RulesOptions};
use crate::tokenizer::tag::{Tag, Tagger};
use crate::types::*;
use crate::utils::parallelism::*;
use crate::Error;
use itertools::Itertools;
use log::warn;
use unicode_segmentation::UnicodeSegmentation;

/// Splits `text` into sentences. Sentences are trimmed, empty ones are dropped.
pub fn sentences(text: &str) -> Vec<&str> {
    text.unicode_sentences()
        .map(str::trim)
        .filter(|x| !x.is_empty())
        .collect()
}

/// Reconstructs sentences with a fixed rule set and tagger.
///
/// A `Reconstructor` is read-only once built and can be shared between threads.
#[derive(Debug)]
pub struct Reconstructor<T: Tag = Tagger> {
    rules: Rules,
    tagger: T,
}

impl Reconstructor<Tagger> {
    /// The built-in rules with the built-in English tagger.
    pub fn english() -> Self {
        Reconstructor::new(Rules::english(), Tagger::english())
    }

    /// Rules selected by `options` with the built-in English tagger.
    pub fn from_options(options: &RulesOptions) -> Result<Self, Error> {
        Ok(Reconstructor::new(Rules::new(options)?, Tagger::english()))
    }
}

impl<T: Tag> Reconstructor<T> {
    pub fn new(rules: Rules, tagger: T) -> Self {
        Reconstructor { rules, tagger }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn tagger(&self) -> &T {
        &self.tagger
    }

    /// Reconstructs one sentence. See [Rules::reconstruct].
    pub fn reconstruct(&self, sentence: &str) -> Result<Reconstruction, Error> {
        self.rules.reconstruct(sentence, &self.tagger)
    }

    /// Splits `text` into sentences and reconstructs each of them independently.
    /// The result has one entry per sentence, in text order. A failure only affects the sentence it occurred in.
    pub fn reconstruct_text<'t>(
        &self,
        text: &'t str,
    ) -> Vec<(&'t str, Result<Reconstruction, Error>)> {
        let sentences = sentences(text);

        sentences
            .maybe_par_iter()
            .map(|sentence| (*sentence, self.reconstruct(sentence)))
            .collect()
    }

    /// Reconstructs running text and joins the sentences with single spaces.
    /// Sentences which can not be reconstructed are kept as they are.
    pub fn correct(&self, text: &str) -> String {
        self.reconstruct_text(text)
            .into_iter()
            .map(|(sentence, result)| match result {
                Ok(reconstruction) => reconstruction.output,
                Err(error) => {
                    warn!("keeping {:?} unchanged: {}", sentence, error);
                    sentence.to_string()
                }
            })
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fails on every sentence containing "fail".
    struct Flaky(Tagger);

    impl Tag for Flaky {
        fn tag(&self, sentence: &str) -> Result<Vec<Token>, Error> {
            if sentence.contains("fail") {
                Err(Error::TaggingFailed(sentence.to_string()))
            } else {
                self.0.tag(sentence)
            }
        }
    }

    #[test]
    fn text_is_split_into_trimmed_sentences() {
        assert_eq!(
            sentences("  Hope you are well.  The sky is blue! Is it?\n"),
            vec!["Hope you are well.", "The sky is blue!", "Is it?"]
        );
        assert!(sentences(" \n ").is_empty());
    }

    #[test]
    fn failures_are_isolated_to_their_sentence() {
        let reconstructor = Reconstructor::new(Rules::english(), Flaky(Tagger::english()));
        let results =
            reconstructor.reconstruct_text("We might can go. This will fail. The sky is blue.");

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].1.as_ref().unwrap().output(), "We can go.");
        assert!(matches!(results[1].1, Err(Error::TaggingFailed(_))));
        assert_eq!(results[2].1.as_ref().unwrap().output(), "The sky is blue.");

        assert_eq!(
            reconstructor.correct("We might can go. This will fail. The sky is blue."),
            "We can go. This will fail. The sky is blue."
        );
    }

    #[test]
    fn correct_joins_with_single_spaces() {
        let reconstructor = Reconstructor::english();
        assert_eq!(
            reconstructor.correct("Hope you too, to enjoy it.\n\nThe sky is blue."),
            "I hope you enjoy it. The sky is blue."
        );
        assert_eq!(reconstructor.correct(""), "");
    }
}
