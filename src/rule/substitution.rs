//! Data-driven phrase substitutions.

use super::Transform;
use crate::tokenizer::tag::Tag;
use crate::utils::{case_insensitive, escape, match_first_case};
use crate::Error;
use onig::{Captures, Regex};

/// Replaces phrases case-insensitively. Every occurrence of each phrase is replaced, phrases are applied in
/// the order they were given. If a match starts with an uppercase char, so does its replacement.
#[derive(Debug)]
pub struct Substitution {
    name: String,
    replacements: Vec<(Regex, String)>,
}

impl Substitution {
    /// Creates a new substitution rule. Phrases match literally, anywhere in the sentence.
    ///
    /// # Errors
    /// - If a phrase is empty.
    pub fn new<S, I, P, R>(name: S, replacements: I) -> Result<Self, Error>
    where
        S: Into<String>,
        I: IntoIterator<Item = (P, R)>,
        P: AsRef<str>,
        R: Into<String>,
    {
        let replacements = replacements
            .into_iter()
            .map(|(phrase, replacement)| {
                let phrase = phrase.as_ref();
                if phrase.trim().is_empty() {
                    return Err(Error::InvalidInput(
                        "phrases of a substitution must not be empty".into(),
                    ));
                }

                let regex = case_insensitive(&escape(phrase))?;
                Ok((regex, replacement.into()))
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(Substitution {
            name: name.into(),
            replacements,
        })
    }

    /// Rewords checking and correction phrases: "contract checking" -> "contract review".
    pub fn clarify_contract_checking() -> Self {
        Substitution::new(
            "ClarifyContractChecking",
            vec![
                ("contract checking", "contract review"),
                ("document check", "document review"),
                ("paper correction", "paper revision"),
            ],
        )
        .expect("built-in phrases are valid.")
    }

    /// The number of phrases this rule replaces.
    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }
}

impl Transform for Substitution {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, sentence: &str, _tagger: &dyn Tag) -> Result<String, Error> {
        let mut sentence = sentence.to_string();

        for (regex, replacement) in &self.replacements {
            if regex.find(&sentence).is_some() {
                sentence = regex.replace_all(&sentence, |caps: &Captures| {
                    match_first_case(caps.at(0).unwrap_or(""), replacement)
                });
            }
        }

        Ok(sentence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::tests::apply;

    #[test]
    fn phrases_are_replaced() {
        let rule = Substitution::clarify_contract_checking();
        assert_eq!(
            apply(&rule, "his next contract checking, to all of us."),
            "his next contract review, to all of us."
        );
        assert_eq!(
            apply(&rule, "Document check and paper correction done."),
            "Document review and paper revision done."
        );
        assert_eq!(
            apply(&rule, "A CONTRACT CHECKING and a contract checking."),
            "A Contract review and a contract review."
        );
    }

    #[test]
    fn phrases_match_as_substrings() {
        let rule = Substitution::clarify_contract_checking();
        assert_eq!(
            apply(&rule, "subcontract checkings are fine."),
            "subcontract reviews are fine."
        );
    }

    #[test]
    fn custom_phrases_are_literal() {
        let rule = Substitution::new("Abbreviations", vec![("e.g.", "for example")]).unwrap();
        assert_eq!(rule.name(), "Abbreviations");
        assert_eq!(rule.len(), 1);
        assert_eq!(apply(&rule, "fruit, e.g. apples"), "fruit, for example apples");
        assert_eq!(apply(&rule, "fruit, eXg. apples"), "fruit, eXg. apples");
    }

    #[test]
    fn empty_phrases_are_rejected() {
        assert!(matches!(
            Substitution::new("Empty", vec![(" ", "x")]),
            Err(Error::InvalidInput(_))
        ));
    }
}
