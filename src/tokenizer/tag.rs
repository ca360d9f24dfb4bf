//! The tagging boundary. Rules only see the [Tag] trait, so any tagger producing Penn Treebank tags can be plugged in.

use super::{disambiguate, inflect, tokenize};
use crate::types::*;
use crate::Error;
use fs_err::File;
use lazy_static::lazy_static;
use log::trace;
use std::{
    collections::{HashMap, HashSet},
    io::{BufRead, BufReader},
    path::Path,
};

/// Splits a sentence into tokens and assigns one part-of-speech tag per token.
///
/// Implementations must be deterministic: tagging the same sentence twice yields the same tokens.
/// Taggers are shared read-only between threads, a backend which is not thread-safe has to be wrapped
/// (e. g. in a `Mutex`) by the implementor.
pub trait Tag: Send + Sync {
    /// # Errors
    /// - [Error::TaggingFailed] if the sentence can not be tagged.
    fn tag(&self, sentence: &str) -> Result<Vec<Token>, Error>;
}

impl<'a, T> Tag for &'a T
where
    T: Tag + ?Sized,
{
    fn tag(&self, sentence: &str) -> Result<Vec<Token>, Error> {
        (*self).tag(sentence)
    }
}

impl<T> Tag for Box<T>
where
    T: Tag + ?Sized,
{
    fn tag(&self, sentence: &str) -> Result<Vec<Token>, Error> {
        (**self).tag(sentence)
    }
}

const ENGLISH_DUMP: &str = include_str!("../../data/en/tags.dump");

/// A lexicon-based English tagger.
///
/// Known words get their readings from the lexicon, unknown words are guessed from their shape.
/// If a word has more than one reading, the reading is chosen by its left context, see [disambiguate].
#[derive(Debug, Clone, Default)]
pub struct Tagger {
    tags: HashMap<String, Vec<WordData>>,
}

impl Tagger {
    /// The tagger with the built-in English lexicon.
    pub fn english() -> Self {
        let mut tagger = Tagger::default();
        tagger
            .add_dump(ENGLISH_DUMP, &HashSet::new())
            .expect("built-in lexicon is pre-tested.");
        tagger
    }

    /// Creates a tagger from lexicon dumps. Each line of a dump is `word<TAB>lemma<TAB>tag`,
    /// lines starting with `#` are ignored. Lines found verbatim in one of the `remove_paths` are skipped.
    ///
    /// # Errors
    /// - If a file can not be read.
    /// - If a line is malformed or has an unknown tag.
    pub fn from_dumps<P: AsRef<Path>>(paths: &[P], remove_paths: &[P]) -> Result<Self, Error> {
        let mut tagger = Tagger::default();
        tagger.extend_from_dumps(paths, remove_paths)?;
        Ok(tagger)
    }

    /// Adds the readings of more lexicon dumps to this tagger. See [Tagger::from_dumps].
    pub fn extend_from_dumps<P: AsRef<Path>>(
        &mut self,
        paths: &[P],
        remove_paths: &[P],
    ) -> Result<(), Error> {
        let mut disallowed = HashSet::new();

        for path in remove_paths {
            let reader = BufReader::new(File::open(path.as_ref())?);

            for line in reader.lines() {
                let line = line?;
                if line.starts_with('#') {
                    continue;
                }

                disallowed.insert(line);
            }
        }

        for path in paths {
            let dump = fs_err::read_to_string(path.as_ref())?;
            self.add_dump(&dump, &disallowed)?;
        }

        Ok(())
    }

    fn add_dump(&mut self, dump: &str, disallowed: &HashSet<String>) -> Result<(), Error> {
        for (i, line) in dump.lines().enumerate() {
            if line.starts_with('#') || line.trim().is_empty() || disallowed.contains(line) {
                continue;
            }

            let parts: Vec<_> = line.split('\t').collect();
            if parts.len() != 3 {
                return Err(Error::Dump {
                    line: i + 1,
                    message: format!("expected 3 tab-separated fields, found {}", parts.len()),
                });
            }

            let pos = parts[2]
                .parse::<Pos>()
                .map_err(|message| Error::Dump {
                    line: i + 1,
                    message,
                })?;

            let data = WordData::new(parts[1], pos);
            let readings = self.tags.entry(parts[0].to_string()).or_insert_with(Vec::new);
            if !readings.contains(&data) {
                readings.push(data);
            }
        }

        Ok(())
    }

    /// Number of distinct words in the lexicon.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    fn get_strict_tags(&self, word: &str) -> Vec<WordData> {
        let word = word.replace('’', "'");
        let mut tags = self.tags.get(&word).cloned().unwrap_or_else(Vec::new);
        let lower = word.to_lowercase();

        if word != lower {
            for data in self.tags.get(&lower).into_iter().flatten() {
                if !tags.contains(data) {
                    tags.push(data.clone());
                }
            }
        }

        tags
    }

    /// All readings of a word, most likely first. Never empty: words missing from the lexicon get a guessed reading.
    pub fn get_tags(&self, word: &str, is_sentence_start: bool) -> Vec<WordData> {
        let tags = self.get_strict_tags(word);

        if tags.is_empty() {
            vec![guess(word, is_sentence_start)]
        } else {
            tags
        }
    }
}

fn punctuation_tag(word: &str) -> Option<Pos> {
    let pos = match word {
        "," => Pos::Comma,
        "." | "!" | "?" => Pos::Period,
        ":" | ";" | "-" | "--" | "—" | "–" | "…" => Pos::Colon,
        "(" | "[" | "{" | "<" => Pos::OpenParen,
        ")" | "]" | "}" | ">" => Pos::CloseParen,
        "\"" | "“" | "„" | "‘" | "`" | "«" => Pos::OpenQuote,
        "”" | "’" | "'" | "´" | "»" => Pos::CloseQuote,
        "$" | "€" | "£" => Pos::Dollar,
        "#" => Pos::Hash,
        _ => return None,
    };

    Some(pos)
}

/// Guesses the reading of a word missing from the lexicon.
fn guess(word: &str, is_sentence_start: bool) -> WordData {
    lazy_static! {
        static ref NOUN_SUFFIXES: Vec<&'static str> =
            vec!["tion", "sion", "ment", "ness", "ity", "ance", "ence", "ship", "ism", "ist"];
        static ref ADJECTIVE_SUFFIXES: Vec<&'static str> =
            vec!["able", "ible", "ful", "ous", "ive", "less", "ish", "ical", "al", "ic"];
    }

    if let Some(pos) = punctuation_tag(word) {
        return WordData::new(word, pos);
    }

    let lower = word.to_lowercase();
    let n_chars = lower.chars().count();

    let pos = if lower
        .chars()
        .all(|c| c.is_ascii_digit() || c == ',' || c == '.')
        && lower.chars().any(|c| c.is_ascii_digit())
    {
        Pos::CD
    } else if !lower.chars().any(char::is_alphanumeric) {
        Pos::SYM
    } else if !is_sentence_start && crate::utils::starts_uppercase(word) {
        Pos::NNP
    } else if n_chars >= 5 && lower.ends_with("ing") {
        let lemma = inflect::base_of_gerund(&lower).unwrap_or_else(|| lower.clone());
        return WordData::new(lemma, Pos::VBG);
    } else if n_chars >= 4 && lower.ends_with("ed") {
        Pos::VBN
    } else if n_chars >= 4 && lower.ends_with("ly") {
        Pos::RB
    } else if NOUN_SUFFIXES.iter().any(|x| lower.ends_with(x)) {
        Pos::NN
    } else if ADJECTIVE_SUFFIXES.iter().any(|x| lower.ends_with(x)) {
        Pos::JJ
    } else if n_chars >= 3
        && lower.ends_with('s')
        && !["ss", "us", "is"].iter().any(|x| lower.ends_with(x))
    {
        return WordData::new(&lower[..lower.len() - 1], Pos::NNS);
    } else {
        Pos::NN
    };

    WordData::new(lower, pos)
}

impl Tag for Tagger {
    fn tag(&self, sentence: &str) -> Result<Vec<Token>, Error> {
        let words = tokenize(sentence);

        if words.is_empty() {
            return Err(Error::TaggingFailed(format!(
                "{:?} does not contain any tokens",
                sentence
            )));
        }

        let candidates: Vec<_> = words
            .iter()
            .enumerate()
            .map(|(i, word)| self.get_tags(word, i == 0))
            .collect();

        let tokens = disambiguate::choose(&words, candidates);
        trace!(
            "tagged {:?}",
            tokens
                .iter()
                .map(|x| format!("{}/{}", x.text, x.pos))
                .collect::<Vec<_>>()
        );

        Ok(tokens)
    }
}
