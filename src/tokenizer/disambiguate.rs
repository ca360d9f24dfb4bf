//! Chooses one reading per token from the readings the lexicon allows, based on the already chosen tag to the left.
//! One deterministic left-to-right pass, no backtracking.

use crate::types::*;

const THIRD_PERSON_PRONOUNS: &[&str] = &["he", "she", "it"];
const SUBJECT_PRONOUNS: &[&str] = &["i", "you", "we", "they"];

const FINITE: &[Pos] = &[Pos::VBP, Pos::VBZ, Pos::VBD, Pos::VB];
const NOUNS: &[Pos] = &[Pos::NN, Pos::NNS, Pos::NNP, Pos::NNPS];
const NOMINALS: &[Pos] = &[
    Pos::NN,
    Pos::NNS,
    Pos::NNP,
    Pos::NNPS,
    Pos::JJ,
    Pos::JJR,
    Pos::JJS,
];

/// Index of the first candidate with the most preferred tag.
fn position(candidates: &[WordData], preferred: &[Pos]) -> Option<usize> {
    preferred
        .iter()
        .find_map(|pos| candidates.iter().position(|x| x.pos == *pos))
}

fn pick(prev: Option<&Token>, candidates: &[WordData]) -> usize {
    if candidates.len() <= 1 {
        return 0;
    }

    let choice = match prev {
        // imperative at the start of a sentence: "Check the document."
        None => position(candidates, &[Pos::VB]),
        Some(prev) => match prev.pos {
            Pos::TO | Pos::MD => position(candidates, &[Pos::VB]),
            Pos::DT | Pos::PDT | Pos::PRPS | Pos::POS | Pos::CD | Pos::JJ | Pos::JJR | Pos::JJS => {
                position(candidates, NOMINALS)
            }
            Pos::NN | Pos::NNS | Pos::NNP | Pos::NNPS => {
                position(candidates, NOUNS).or_else(|| position(candidates, FINITE))
            }
            Pos::RB | Pos::RBR | Pos::RBS => position(candidates, FINITE),
            Pos::PRP => {
                let lower = prev.lower();
                if THIRD_PERSON_PRONOUNS.contains(&lower.as_str()) {
                    position(candidates, &[Pos::VBZ, Pos::VBD, Pos::MD])
                } else if SUBJECT_PRONOUNS.contains(&lower.as_str()) {
                    position(candidates, &[Pos::VBP, Pos::VBD, Pos::MD, Pos::VB])
                } else {
                    None
                }
            }
            _ => None,
        },
    };

    choice.unwrap_or(0)
}

/// Builds tokens from `words` and the lexicon readings of each word (same length, most likely reading first).
pub fn choose(words: &[&str], candidates: Vec<Vec<WordData>>) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::with_capacity(words.len());

    for (word, mut readings) in words.iter().zip(candidates) {
        let index = pick(tokens.last(), &readings);
        let data = readings.swap_remove(index);
        tokens.push(Token::new(*word, data));
    }

    tokens
}
