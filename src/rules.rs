//! Ordered sets of rewriting rules.

use crate::rule::{self, Rule, Substitution, Transform};
use crate::tokenizer::tag::Tag;
use crate::types::*;
use crate::utils::clean_spacing;
use crate::Error;
use fs_err::File;
use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{
    io::{BufReader, Read},
    path::Path,
};

/// An additional phrase substitution rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionOptions {
    /// Name reported when the rule changes a sentence.
    pub name: String,
    /// Phrases and their replacements, applied in this order.
    pub replacements: IndexMap<String, String>,
}

/// Options for a rule set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulesOptions {
    /// Names of built-in rules to use. If empty, all built-in rules are used.
    #[serde(default)]
    pub ids: Vec<String>,
    /// Names of built-in rules to leave out.
    #[serde(default)]
    pub ignore_ids: Vec<String>,
    /// Substitution rules to run after the built-in rules.
    #[serde(default)]
    pub substitutions: Vec<SubstitutionOptions>,
}

impl RulesOptions {
    /// Reads options from JSON.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Reads options from a JSON file.
    ///
    /// # Errors
    /// - If the file can not be opened.
    /// - If the file content is not valid options JSON.
    pub fn from_path<P: AsRef<Path>>(p: P) -> Result<Self, Error> {
        let reader = BufReader::new(File::open(p.as_ref())?);
        RulesOptions::from_reader(reader)
    }
}

/// An ordered set of rules. Order matters: each rule sees the text as left by all rules before it.
#[derive(Debug)]
pub struct Rules {
    rules: Vec<Rule>,
}

impl Default for Rules {
    fn default() -> Self {
        Rules::english()
    }
}

impl Rules {
    /// All built-in rules in their default order.
    pub fn english() -> Self {
        Rules {
            rules: rule::catalog(),
        }
    }

    /// Creates a rule set from the built-in rules selected by `options`, followed by the configured substitutions.
    /// Built-in rules keep their default order regardless of the order in `options.ids`.
    ///
    /// # Errors
    /// - [Error::UnknownRule] if `ids` or `ignore_ids` contain a name which is not a built-in rule.
    /// - [Error::InvalidInput] if a substitution has an empty phrase or reuses the name of another rule.
    pub fn new(options: &RulesOptions) -> Result<Self, Error> {
        let catalog = rule::catalog();

        if let Some(unknown) = options
            .ids
            .iter()
            .chain(&options.ignore_ids)
            .find(|id| catalog.iter().all(|rule| rule.name() != id.as_str()))
        {
            return Err(Error::UnknownRule(unknown.clone()));
        }

        let is_selected = |rule: &Rule| {
            (options.ids.is_empty() || options.ids.iter().any(|id| id == rule.name()))
                && !options.ignore_ids.iter().any(|id| id == rule.name())
        };
        let mut rules: Vec<Rule> = catalog.into_iter().filter(is_selected).collect();

        for substitution in &options.substitutions {
            if rules.iter().any(|rule| rule.name() == substitution.name) {
                return Err(Error::InvalidInput(format!(
                    "rule name {:?} is used more than once",
                    substitution.name
                )));
            }

            rules.push(
                Substitution::new(substitution.name.as_str(), substitution.replacements.iter())?
                    .into(),
            );
        }

        info!("Created rule set with {} rules.", rules.len());
        Ok(Rules { rules })
    }

    /// Creates a rule set applying exactly `rules`, in the given order.
    pub fn from_rules<I: IntoIterator<Item = Rule>>(rules: I) -> Self {
        Rules {
            rules: rules.into_iter().collect(),
        }
    }

    /// All rules in the order they are applied.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// A referential iterator.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Applies every rule once, in order, then removes whitespace in front of punctuation.
    /// Rules which do not change the sentence are skipped silently.
    ///
    /// # Errors
    /// - [Error::InvalidInput] if `sentence` is empty or whitespace only.
    /// - [Error::TaggingFailed] if the tagger fails on an intermediate sentence.
    pub fn reconstruct(&self, sentence: &str, tagger: &dyn Tag) -> Result<Reconstruction, Error> {
        if sentence.trim().is_empty() {
            return Err(Error::InvalidInput(
                "can not reconstruct an empty sentence".into(),
            ));
        }

        let mut current = sentence.to_string();
        let mut applied = Vec::new();

        for rule in &self.rules {
            let (new_sentence, triggered) = rule.run(&current, tagger)?;

            if triggered {
                debug!("{}: {:?} -> {:?}", rule.name(), current, new_sentence);
                applied.push(rule.name().to_string());
                current = new_sentence;
            }
        }

        Ok(Reconstruction {
            output: clean_spacing(&current),
            applied,
        })
    }
}

impl<'a> IntoIterator for &'a Rules {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::tests::TAGGER;

    fn names(rules: &Rules) -> Vec<&str> {
        rules.iter().map(|x| x.name()).collect()
    }

    #[test]
    fn options_parse_from_json() {
        let options = RulesOptions::from_reader(
            r#"{
                "ignore_ids": ["CleanFillersNLTK"],
                "substitutions": [
                    { "name": "Courtesy", "replacements": { "thx": "thanks", "pls": "please" } }
                ]
            }"#
            .as_bytes(),
        )
        .unwrap();

        assert!(options.ids.is_empty());
        assert_eq!(options.ignore_ids, vec!["CleanFillersNLTK"]);
        assert_eq!(
            options.substitutions[0]
                .replacements
                .keys()
                .collect::<Vec<_>>(),
            vec!["thx", "pls"]
        );

        let rules = Rules::new(&options).unwrap();
        assert_eq!(rules.len(), 15);
        assert!(!names(&rules).contains(&"CleanFillersNLTK"));
        assert_eq!(names(&rules).last(), Some(&"Courtesy"));
    }

    #[test]
    fn ids_keep_default_order() {
        let options = RulesOptions {
            ids: vec![
                "FixVerbAgreementNLTK".into(),
                "AddMissingSubject".into(),
            ],
            ..RulesOptions::default()
        };

        let rules = Rules::new(&options).unwrap();
        assert_eq!(names(&rules), vec!["AddMissingSubject", "FixVerbAgreementNLTK"]);
    }

    #[test]
    fn unknown_rules_are_rejected() {
        let options = RulesOptions {
            ignore_ids: vec!["FixEverything".into()],
            ..RulesOptions::default()
        };

        assert!(matches!(
            Rules::new(&options),
            Err(Error::UnknownRule(x)) if x == "FixEverything"
        ));
    }

    #[test]
    fn duplicate_substitution_names_are_rejected() {
        let mut replacements = IndexMap::new();
        replacements.insert("a".to_string(), "b".to_string());
        let options = RulesOptions {
            substitutions: vec![SubstitutionOptions {
                name: "RemoveDuplicateWords".into(),
                replacements,
            }],
            ..RulesOptions::default()
        };

        assert!(matches!(Rules::new(&options), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn empty_sentences_are_invalid() {
        let rules = Rules::english();
        assert!(matches!(
            rules.reconstruct(" \t", &*TAGGER),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            rules.reconstruct("", &*TAGGER),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn untriggered_rules_are_not_reported() {
        let rules = Rules::english();
        let result = rules.reconstruct("The sky is blue .", &*TAGGER).unwrap();

        assert_eq!(result.output(), "The sky is blue.");
        assert!(result.applied().is_empty());
    }

    #[test]
    fn empty_rule_set_only_cleans_spacing() {
        let rules = Rules::from_rules(Vec::new());
        let result = rules.reconstruct("Hello , world !", &*TAGGER).unwrap();

        assert_eq!(result.output(), "Hello, world!");
        assert!(result.applied().is_empty());
    }
}
