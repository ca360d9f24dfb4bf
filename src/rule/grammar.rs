//! Rules which tag the sentence and rewrite short windows of tokens.
//!
//! Every rule here looks at most four tokens ahead. If a rule changes anything, the sentence is rebuilt
//! from its tokens joined by single spaces; otherwise the input is returned untouched.

use super::Transform;
use crate::tokenizer::inflect::{gerund, third_person_singular};
use crate::tokenizer::tag::Tag;
use crate::types::*;
use crate::utils::{apply_to_first, join, match_first_case, starts_uppercase};
use crate::Error;

const GRATITUDE_OBJECTS: &[&str] = &["your", "the"];

/// Nouns which name an action and read better as a gerund in front of what they act on.
const ACTION_NOUNS: &[&str] = &[
    "edit",
    "review",
    "check",
    "submission",
    "approval",
    "revision",
    "update",
];

const FILLERS: &[&[&str]] = &[
    &["actually"],
    &["basically"],
    &["i", "mean"],
    &["you", "know"],
    &["in", "fact"],
];

const THIRD_PERSON_SUBJECTS: &[&str] = &[
    "he",
    "she",
    "it",
    "doctor",
    "professor",
    "editor",
    "reviewer",
    "author",
];

/// Nouns the tagger may confuse with the verb after a third person subject: "the doctor review".
const VERB_LIKE_NOUNS: &[&str] = &["plan", "check", "edit", "review", "submit"];

const AMBIGUOUS_ROOTS: &[&str] = &[
    "edit", "review", "check", "submit", "update", "approve", "correct", "revise",
];

fn texts(tokens: &[Token]) -> Vec<String> {
    tokens.iter().map(|x| x.text.clone()).collect()
}

fn finish(sentence: &str, output: &[String], modified: bool) -> String {
    if modified {
        join(output)
    } else {
        sentence.to_string()
    }
}

fn starts_with_vowel(word: &str) -> bool {
    word.chars()
        .next()
        .map_or(false, |c| "aeiou".contains(c.to_ascii_lowercase()))
}

/// "a" in front of a noun starting with a vowel becomes "an".
#[derive(Debug, Clone, Copy, Default)]
pub struct FixArticles;

impl Transform for FixArticles {
    fn name(&self) -> &str {
        "FixArticlesNLTK"
    }

    fn apply(&self, sentence: &str, tagger: &dyn Tag) -> Result<String, Error> {
        let tokens = tagger.tag(sentence)?;
        let mut output = texts(&tokens);
        let mut modified = false;

        for (i, pair) in tokens.windows(2).enumerate() {
            if pair[0].lower() == "a" && pair[1].pos.is_noun() && starts_with_vowel(&pair[1].text) {
                output[i] = match_first_case(&pair[0].text, "an");
                modified = true;
            }
        }

        Ok(finish(sentence, &output, modified))
    }
}

/// "Thank your message" -> "Thank you for the message".
#[derive(Debug, Clone, Copy, Default)]
pub struct FixAwkwardGratitude;

impl Transform for FixAwkwardGratitude {
    fn name(&self) -> &str {
        "FixAwkwardGratitudeNLTK"
    }

    fn apply(&self, sentence: &str, tagger: &dyn Tag) -> Result<String, Error> {
        let tokens = tagger.tag(sentence)?;
        let mut output = Vec::with_capacity(tokens.len() + 2);
        let mut modified = false;
        let mut i = 0;

        while i < tokens.len() {
            if let [thank, object, noun, ..] = &tokens[i..] {
                if thank.lower() == "thank"
                    && GRATITUDE_OBJECTS.contains(&object.lower().as_str())
                    && noun.pos.is_noun()
                {
                    output.push(thank.text.clone());
                    output.extend(["you", "for", "the"].iter().map(|x| x.to_string()));
                    output.push(noun.text.clone());
                    modified = true;
                    i += 3;
                    continue;
                }
            }

            output.push(tokens[i].text.clone());
            i += 1;
        }

        Ok(finish(sentence, &output, modified))
    }
}

/// "you too, to enjoy" -> "you enjoy". The comma and the "to" are both optional.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeInfinitives;

impl NormalizeInfinitives {
    /// Length of the malformed infinitive starting at the beginning of `tokens`, if there is one.
    fn match_len(tokens: &[Token]) -> Option<usize> {
        if tokens.len() < 3 || tokens[0].lower() != "you" || tokens[1].lower() != "too" {
            return None;
        }

        let mut j = 2;
        if tokens.get(j).map_or(false, |x| x.pos == Pos::Comma) {
            j += 1;
        }
        if tokens.get(j).map_or(false, |x| x.pos == Pos::TO) {
            j += 1;
        }

        match tokens.get(j) {
            Some(verb) if verb.pos.is_base_verb() => Some(j + 1),
            _ => None,
        }
    }
}

impl Transform for NormalizeInfinitives {
    fn name(&self) -> &str {
        "NormalizeInfinitivesNLTK"
    }

    fn apply(&self, sentence: &str, tagger: &dyn Tag) -> Result<String, Error> {
        let tokens = tagger.tag(sentence)?;
        let mut output = Vec::with_capacity(tokens.len());
        let mut modified = false;
        let mut i = 0;

        while i < tokens.len() {
            if let Some(length) = Self::match_len(&tokens[i..]) {
                output.push(tokens[i].text.clone());
                output.push(tokens[i + length - 1].text.clone());
                modified = true;
                i += length;
            } else {
                output.push(tokens[i].text.clone());
                i += 1;
            }
        }

        Ok(finish(sentence, &output, modified))
    }
}

/// Moves an action noun trailing two nouns to the front as a gerund:
/// "the acknowledgments section edit" -> "editing the acknowledgments section".
/// A determiner in front of the nouns is kept, without one "the" is inserted.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixNounModifierOrder;

impl Transform for FixNounModifierOrder {
    fn name(&self) -> &str {
        "FixNounModifierOrderNLTK"
    }

    fn apply(&self, sentence: &str, tagger: &dyn Tag) -> Result<String, Error> {
        let tokens = tagger.tag(sentence)?;
        let mut output: Vec<String> = Vec::with_capacity(tokens.len());
        let mut modified = false;
        let mut i = 0;

        while i < tokens.len() {
            if let [first, second, action, ..] = &tokens[i..] {
                if first.pos.is_noun()
                    && second.pos.is_noun()
                    && action.pos.is_noun()
                    && ACTION_NOUNS.contains(&action.lower().as_str())
                {
                    let determiner = match i.checked_sub(1).map(|j| &tokens[j]) {
                        Some(prev) if prev.pos == Pos::DT => {
                            output.pop();
                            prev.text.as_str()
                        }
                        _ => "the",
                    };

                    output.push(match_first_case(determiner, &gerund(&action.lower())));
                    output.push(determiner.to_lowercase());
                    output.push(first.text.clone());
                    output.push(second.text.clone());
                    modified = true;
                    i += 3;
                    continue;
                }
            }

            output.push(tokens[i].text.clone());
            i += 1;
        }

        Ok(finish(sentence, &output, modified))
    }
}

/// Removes discourse fillers ("actually", "basically", "I mean", "you know", "in fact") at the start of a
/// sentence or after a comma or period, together with the punctuation following them.
///
/// Two-word fillers are only removed if followed by a comma, so "You know the answer." is kept.
/// A filler is never removed if only punctuation would remain.
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanFillers;

impl CleanFillers {
    fn filler_len(tokens: &[Token]) -> Option<usize> {
        FILLERS
            .iter()
            .find(|filler| {
                tokens.len() >= filler.len()
                    && filler
                        .iter()
                        .zip(tokens)
                        .all(|(word, token)| token.lower() == *word)
                    && (filler.len() == 1
                        || tokens
                            .get(filler.len())
                            .map_or(false, |x| x.pos == Pos::Comma))
            })
            .map(|filler| filler.len())
    }
}

impl Transform for CleanFillers {
    fn name(&self) -> &str {
        "CleanFillersNLTK"
    }

    fn apply(&self, sentence: &str, tagger: &dyn Tag) -> Result<String, Error> {
        let tokens = tagger.tag(sentence)?;
        let is_separator = |token: &Token| token.text == "," || token.text == ".";

        let mut output: Vec<String> = Vec::with_capacity(tokens.len());
        let mut modified = false;
        let mut capitalize_next = false;
        let mut i = 0;

        while i < tokens.len() {
            let at_boundary = i == 0 || is_separator(&tokens[i - 1]);

            if let Some(length) = Self::filler_len(&tokens[i..]).filter(|_| at_boundary) {
                let has_content = tokens[..i]
                    .iter()
                    .chain(&tokens[i + length..])
                    .any(|x| !x.pos.is_punctuation());

                if has_content {
                    modified = true;
                    capitalize_next = i == 0 && starts_uppercase(&tokens[i].text);

                    i += length;
                    // skip separators after the filler, but keep the end of the sentence
                    while i + 1 < tokens.len() && is_separator(&tokens[i]) {
                        i += 1;
                    }

                    let at_end = i == tokens.len()
                        || (i + 1 == tokens.len() && tokens[i].pos == Pos::Period);
                    if at_end && output.last().map_or(false, |x| x == ",") {
                        output.pop();
                    }
                    continue;
                }
            }

            let text = if capitalize_next {
                capitalize_next = false;
                apply_to_first(&tokens[i].text, |c| c.to_uppercase().collect())
            } else {
                tokens[i].text.clone()
            };
            output.push(text);
            i += 1;
        }

        Ok(finish(sentence, &output, modified))
    }
}

/// Inflects the verb following a third person singular subject: "the doctor still plan" -> "the doctor
/// still plans", "he sending" -> "he sends". Up to three tokens after the subject are inspected, adverbs
/// in between are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixVerbAgreement;

impl FixVerbAgreement {
    fn is_subject(tokens: &[Token], i: usize) -> bool {
        let token = &tokens[i];

        (token.pos == Pos::NN || token.pos == Pos::PRP)
            && THIRD_PERSON_SUBJECTS.contains(&token.lower().as_str())
            // "enjoy it" - a pronoun after a verb is its object
            && !(i > 0 && tokens[i - 1].pos.is_verb())
    }

    /// The agreeing form of `token`, `None` if the token ends the lookahead.
    fn inflect(token: &Token) -> Option<String> {
        match token.pos {
            Pos::VB | Pos::VBP => Some(match_first_case(
                &token.text,
                &third_person_singular(&token.lemma),
            )),
            Pos::VBG if token.lower().ends_with("ing") => Some(match_first_case(
                &token.text,
                &third_person_singular(&token.lemma),
            )),
            Pos::NN if VERB_LIKE_NOUNS.contains(&token.lower().as_str()) => {
                Some(third_person_singular(&token.text))
            }
            _ => None,
        }
    }
}

impl Transform for FixVerbAgreement {
    fn name(&self) -> &str {
        "FixVerbAgreementNLTK"
    }

    fn apply(&self, sentence: &str, tagger: &dyn Tag) -> Result<String, Error> {
        let tokens = tagger.tag(sentence)?;
        let mut output = texts(&tokens);
        let mut modified = false;
        let mut i = 0;

        while i < tokens.len() {
            if !Self::is_subject(&tokens, i) {
                i += 1;
                continue;
            }

            let mut next = i + 1;
            for j in (i + 1)..tokens.len().min(i + 4) {
                if tokens[j].pos.is_adverb() {
                    continue;
                }

                if let Some(inflected) = Self::inflect(&tokens[j]) {
                    output[j] = inflected;
                    modified = true;
                    next = j + 1;
                }
                break;
            }

            i = next;
        }

        Ok(finish(sentence, &output, modified))
    }
}

/// A verb root tagged as noun in front of another noun becomes a gerund: "edit section" -> "editing section".
#[derive(Debug, Clone, Copy, Default)]
pub struct DisambiguateNominalVerbNoun;

impl Transform for DisambiguateNominalVerbNoun {
    fn name(&self) -> &str {
        "DisambiguateNominalVerbNounNLTK"
    }

    fn apply(&self, sentence: &str, tagger: &dyn Tag) -> Result<String, Error> {
        let tokens = tagger.tag(sentence)?;
        let mut output = texts(&tokens);
        let mut modified = false;
        let mut i = 0;

        while i + 1 < tokens.len() {
            let (root, noun) = (&tokens[i], &tokens[i + 1]);

            if root.pos == Pos::NN
                && noun.pos == Pos::NN
                && AMBIGUOUS_ROOTS.contains(&root.lower().as_str())
            {
                output[i] = gerund(&root.text);
                modified = true;
                i += 2;
            } else {
                i += 1;
            }
        }

        Ok(finish(sentence, &output, modified))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::tests::apply;

    #[test]
    fn articles_before_vowels() {
        assert_eq!(apply(&FixArticles, "It is a apple."), "It is an apple .");
        assert_eq!(apply(&FixArticles, "A error occurred"), "An error occurred");
        assert_eq!(apply(&FixArticles, "It is a pear."), "It is a pear.");
    }

    #[test]
    fn awkward_gratitude() {
        assert_eq!(
            apply(&FixAwkwardGratitude, "Thank your message to show our words."),
            "Thank you for the message to show our words ."
        );
        assert_eq!(
            apply(&FixAwkwardGratitude, "Thank you for the message."),
            "Thank you for the message."
        );
    }

    #[test]
    fn malformed_infinitives() {
        assert_eq!(
            apply(&NormalizeInfinitives, "I hope you too, to enjoy it."),
            "I hope you enjoy it ."
        );
        assert_eq!(
            apply(&NormalizeInfinitives, "I hope you too enjoy it"),
            "I hope you enjoy it"
        );
        assert_eq!(
            apply(&NormalizeInfinitives, "I like you too."),
            "I like you too."
        );
    }

    #[test]
    fn noun_modifier_order() {
        assert_eq!(
            apply(
                &FixNounModifierOrder,
                "if he plans for the acknowledgments section edit before"
            ),
            "if he plans for editing the acknowledgments section before"
        );
        assert_eq!(
            apply(&FixNounModifierOrder, "The report section review is due."),
            "Reviewing the report section is due ."
        );
        assert_eq!(
            apply(&FixNounModifierOrder, "the acknowledgments section"),
            "the acknowledgments section"
        );
    }

    #[test]
    fn fillers_are_removed() {
        assert_eq!(
            apply(&CleanFillers, "Actually, the file is ready."),
            "The file is ready ."
        );
        assert_eq!(
            apply(&CleanFillers, "The file is ready, basically."),
            "The file is ready ."
        );
        assert_eq!(
            apply(&CleanFillers, "You know, it works."),
            "It works ."
        );
        assert_eq!(
            apply(&CleanFillers, "You know the answer."),
            "You know the answer."
        );
        assert_eq!(apply(&CleanFillers, "Actually."), "Actually.");
        assert_eq!(
            apply(&CleanFillers, "It actually works."),
            "It actually works."
        );
    }

    #[test]
    fn verb_agreement() {
        assert_eq!(
            apply(
                &FixVerbAgreement,
                "if the doctor still plan for editing before he sending again."
            ),
            "if the doctor still plans for editing before he sends again ."
        );
        assert_eq!(
            apply(&FixVerbAgreement, "She really need it"),
            "She really needs it"
        );
        assert_eq!(
            apply(&FixVerbAgreement, "He plans it."),
            "He plans it."
        );
        assert_eq!(
            apply(&FixVerbAgreement, "We enjoy it."),
            "We enjoy it."
        );
    }

    #[test]
    fn irregular_verbs_agree_through_their_lemma() {
        assert_eq!(apply(&FixVerbAgreement, "He are late."), "He is late .");
        assert_eq!(
            apply(&FixVerbAgreement, "The doctor am busy."),
            "The doctor is busy ."
        );
    }

    #[test]
    fn nominal_verbs_become_gerunds() {
        assert_eq!(
            apply(&DisambiguateNominalVerbNoun, "the edit section"),
            "the editing section"
        );
        assert_eq!(
            apply(&DisambiguateNominalVerbNoun, "the sky is blue"),
            "the sky is blue"
        );
    }

    #[test]
    fn tagging_errors_propagate() {
        struct Failing;

        impl Tag for Failing {
            fn tag(&self, _sentence: &str) -> Result<Vec<Token>, Error> {
                Err(Error::TaggingFailed("unavailable".into()))
            }
        }

        assert!(matches!(
            FixVerbAgreement.apply("he plan", &Failing),
            Err(Error::TaggingFailed(_))
        ));
    }
}
