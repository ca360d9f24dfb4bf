//! Replacement of clauses by close paraphrases from a reference corpus of formal sentences.
//!
//! Embedding models are not part of this crate. They are plugged in through the [Embed] trait,
//! the corpus lookup through the [Corpus] trait. What is implemented here is the logic deciding
//! whether a candidate is close enough to replace a clause.

use crate::reconstructor::sentences;
use crate::Error;
use lazy_static::lazy_static;
use log::{debug, info};
use onig::Regex;
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, collections::HashSet};

/// Maps text to a fixed-size vector.
pub trait Embed: Send + Sync {
    /// # Errors
    /// - [Error::Embedding] if the backend fails.
    fn embed(&self, text: &str) -> Result<Vec<f32>, Error>;
}

/// The best match of a corpus lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Index of the matched sentence in the corpus.
    pub index: usize,
    /// Similarity of the matched sentence to the query, higher is closer.
    pub score: f32,
}

/// An ordered collection of reference sentences which can be searched by embedding.
pub trait Corpus: Send + Sync {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> Option<&str>;

    /// The sentence closest to `embedding`. `None` if the corpus is empty.
    fn nearest(&self, embedding: &[f32]) -> Option<Hit>;
}

/// Cosine similarity of two vectors. Zero if the lengths differ or one of the vectors is zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0. || norm_b == 0. {
        0.
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Whether `sentence` looks formal enough to serve as a replacement: more than six words,
/// no apostrophes, no questions and no colloquial contractions.
pub fn is_formal(sentence: &str) -> bool {
    sentence.split_whitespace().count() > 6
        && !sentence.contains('\'')
        && !sentence.contains('?')
        && !sentence.contains(" gonna ")
        && !sentence.contains(" wanna ")
}

/// Splits a sentence into clauses at commas and semicolons following a word, and around
/// "and" (unless preceded by "not"), "but" and "or". Clauses are trimmed, empty ones are dropped.
pub fn split_clauses(sentence: &str) -> Vec<&str> {
    lazy_static! {
        static ref CLAUSE_BOUNDARY: Regex =
            Regex::new(r"(?<=\w)[,;]\s+|(?<!not)\s+and\s+|\s+but\s+|\s+or\s+").unwrap();
    }

    CLAUSE_BOUNDARY
        .split(sentence)
        .map(str::trim)
        .filter(|x| !x.is_empty())
        .collect()
}

fn words(text: &str) -> HashSet<String> {
    text.split_whitespace().map(|x| x.to_lowercase()).collect()
}

/// Thresholds a candidate has to pass to replace a clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplacerOptions {
    /// The similarity score has to be strictly greater than this.
    pub threshold: f32,
    /// Minimum ratio of candidate word count to clause word count.
    pub min_ratio: f32,
    /// Maximum ratio of candidate word count to clause word count.
    pub max_ratio: f32,
    /// Minimum number of distinct lowercased words clause and candidate have in common.
    pub min_shared_tokens: usize,
    /// Whether sentences are split into clauses (see [split_clauses]) or replaced as a whole.
    pub split_clauses: bool,
}

impl Default for ReplacerOptions {
    fn default() -> Self {
        ReplacerOptions {
            threshold: 0.6,
            min_ratio: 0.6,
            max_ratio: 1.4,
            min_shared_tokens: 1,
            split_clauses: true,
        }
    }
}

impl ReplacerOptions {
    /// Whether `candidate` with similarity `score` may replace `clause`.
    pub fn accepts(&self, clause: &str, candidate: &str, score: f32) -> bool {
        let clause_len = clause.split_whitespace().count().max(1);
        let ratio = candidate.split_whitespace().count() as f32 / clause_len as f32;
        let shared = words(clause).intersection(&words(candidate)).count();

        score > self.threshold
            && self.min_ratio <= ratio
            && ratio <= self.max_ratio
            && shared >= self.min_shared_tokens
    }
}

/// A corpus kept in memory, searched exhaustively by cosine similarity.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedCorpus {
    sentences: Vec<String>,
    embeddings: Vec<Vec<f32>>,
}

impl EmbeddedCorpus {
    /// Embeds all formal sentences of `sentences` (see [is_formal]), others are dropped.
    pub fn new<E, I, S>(embedder: &E, sentences: I) -> Result<Self, Error>
    where
        E: Embed + ?Sized,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut corpus = EmbeddedCorpus::default();

        for sentence in sentences {
            let sentence = sentence.into();
            if !is_formal(&sentence) {
                continue;
            }

            let embedding = embedder.embed(&sentence)?;
            corpus.sentences.push(sentence);
            corpus.embeddings.push(embedding);
        }

        info!("Retained {} formal candidates.", corpus.sentences.len());
        Ok(corpus)
    }

    /// Creates a corpus from precomputed embeddings.
    ///
    /// # Errors
    /// - [Error::Embedding] if there is not exactly one embedding per sentence.
    pub fn from_parts(sentences: Vec<String>, embeddings: Vec<Vec<f32>>) -> Result<Self, Error> {
        if sentences.len() != embeddings.len() {
            return Err(Error::Embedding(format!(
                "{} sentences but {} embeddings",
                sentences.len(),
                embeddings.len()
            )));
        }

        Ok(EmbeddedCorpus {
            sentences,
            embeddings,
        })
    }
}

impl Corpus for EmbeddedCorpus {
    fn len(&self) -> usize {
        self.sentences.len()
    }

    fn get(&self, index: usize) -> Option<&str> {
        self.sentences.get(index).map(|x| x.as_str())
    }

    fn nearest(&self, embedding: &[f32]) -> Option<Hit> {
        self.embeddings
            .iter()
            .enumerate()
            .map(|(index, x)| Hit {
                index,
                score: cosine_similarity(embedding, x),
            })
            // first of equal scores wins
            .fold(None, |best: Option<Hit>, hit| match best {
                Some(best)
                    if best.score.partial_cmp(&hit.score) != Some(Ordering::Less) =>
                {
                    Some(best)
                }
                _ => Some(hit),
            })
    }
}

/// Replaces clauses (or whole sentences, depending on [ReplacerOptions::split_clauses]) by their nearest
/// corpus sentence if it passes the [ReplacerOptions].
pub struct ClauseReplacer<E: Embed, C: Corpus> {
    embedder: E,
    corpus: C,
    options: ReplacerOptions,
}

impl<E: Embed, C: Corpus> ClauseReplacer<E, C> {
    pub fn new(embedder: E, corpus: C, options: ReplacerOptions) -> Self {
        ClauseReplacer {
            embedder,
            corpus,
            options,
        }
    }

    pub fn options(&self) -> &ReplacerOptions {
        &self.options
    }

    /// The replacement for one clause, `None` if no candidate is close enough.
    pub fn replacement(&self, clause: &str) -> Result<Option<&str>, Error> {
        let embedding = self.embedder.embed(clause)?;

        Ok(self.corpus.nearest(&embedding).and_then(|hit| {
            let candidate = self.corpus.get(hit.index)?;

            if self.options.accepts(clause, candidate, hit.score) {
                debug!("{:?} -> {:?} (score {:.3})", clause, candidate, hit.score);
                Some(candidate)
            } else {
                None
            }
        }))
    }

    /// Replaces each clause of `sentence` and joins the clauses with ", ".
    pub fn reconstruct_sentence(&self, sentence: &str) -> Result<String, Error> {
        if !self.options.split_clauses {
            let sentence = sentence.trim();
            return Ok(self.replacement(sentence)?.unwrap_or(sentence).to_string());
        }

        let clauses = split_clauses(sentence)
            .into_iter()
            .map(|clause| Ok(self.replacement(clause)?.unwrap_or(clause)))
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(clauses.join(", "))
    }

    /// Splits `text` into sentences, reconstructs each and joins them with single spaces.
    pub fn reconstruct(&self, text: &str) -> Result<String, Error> {
        let sentences = sentences(text)
            .into_iter()
            .map(|sentence| self.reconstruct_sentence(sentence))
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(sentences.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Letter frequencies, enough to tell unrelated sentences apart.
    struct Letters;

    impl Embed for Letters {
        fn embed(&self, text: &str) -> Result<Vec<f32>, Error> {
            let mut counts = vec![0.; 26];
            for c in text.to_ascii_lowercase().bytes().filter(u8::is_ascii_lowercase) {
                counts[(c - b'a') as usize] += 1.;
            }
            Ok(counts)
        }
    }

    struct Unavailable;

    impl Embed for Unavailable {
        fn embed(&self, _text: &str) -> Result<Vec<f32>, Error> {
            Err(Error::Embedding("model not loaded".into()))
        }
    }

    const PROPOSAL: &str = "The committee approved the final version of the proposal.";

    fn corpus() -> EmbeddedCorpus {
        EmbeddedCorpus::new(
            &Letters,
            vec![
                PROPOSAL,
                "Short and informal.",
                "What do you think about the final version of it?",
            ],
        )
        .unwrap()
    }

    #[test]
    fn cosine() {
        assert!((cosine_similarity(&[1., 0.], &[1., 0.]) - 1.).abs() < 1e-6);
        assert!(cosine_similarity(&[1., 0.], &[0., 1.]).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0., 0.], &[1., 1.]), 0.);
        assert_eq!(cosine_similarity(&[1.], &[1., 1.]), 0.);
    }

    #[test]
    fn formality_filter() {
        assert!(is_formal(PROPOSAL));
        assert!(!is_formal("Too short to count."));
        assert!(!is_formal("We are gonna finish the draft by next week."));
        assert!(!is_formal("Is this the final version of the proposal?"));
        assert!(!is_formal("The committee's final version was approved last week."));
    }

    #[test]
    fn clauses() {
        assert_eq!(
            split_clauses("During our final discuss, I told him; it was late and we left"),
            vec!["During our final discuss", "I told him", "it was late", "we left"]
        );
        assert_eq!(
            split_clauses("slow but steady or not"),
            vec!["slow", "steady", "not"]
        );
        assert_eq!(
            split_clauses("whether or not and when"),
            vec!["whether", "not and when"]
        );
        assert!(split_clauses("  ").is_empty());
    }

    #[test]
    fn acceptance_needs_all_heuristics() {
        let options = ReplacerOptions::default();
        let clause = "the committee approved the final version";

        assert!(options.accepts(clause, "the committee approved its final version", 0.9));
        // score is not strictly greater than the threshold
        assert!(!options.accepts(clause, "the committee approved its final version", 0.6));
        // length ratio 2 / 6
        assert!(!options.accepts(clause, "committee approved", 0.9));
        // no shared words
        assert!(!options.accepts(clause, "a board accepted its last draft today", 0.9));
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: ReplacerOptions = serde_json::from_str(r#"{ "threshold": 0.8 }"#).unwrap();
        assert_eq!(
            options,
            ReplacerOptions {
                threshold: 0.8,
                ..ReplacerOptions::default()
            }
        );
    }

    #[test]
    fn corpus_keeps_formal_sentences_only() {
        let corpus = corpus();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.get(0), Some(PROPOSAL));
        assert_eq!(corpus.nearest(&Letters.embed(PROPOSAL).unwrap()).unwrap().index, 0);
        assert!(EmbeddedCorpus::default().nearest(&[1.]).is_none());
        assert!(matches!(
            EmbeddedCorpus::from_parts(vec!["a".into()], vec![]),
            Err(Error::Embedding(_))
        ));
    }

    #[test]
    fn close_clauses_are_replaced() {
        let replacer = ClauseReplacer::new(Letters, corpus(), ReplacerOptions::default());

        assert_eq!(
            replacer
                .reconstruct("The committee approved the final version of proposal, xyz. Hmm.")
                .unwrap(),
            format!("{}, xyz. Hmm.", PROPOSAL)
        );
    }

    #[test]
    fn whole_sentences_are_replaced_without_clause_splitting() {
        let options: ReplacerOptions = serde_json::from_str(
            r#"{ "threshold": 0.75, "min_ratio": 0.7, "max_ratio": 1.3, "min_shared_tokens": 2, "split_clauses": false }"#,
        )
        .unwrap();
        let replacer = ClauseReplacer::new(Letters, corpus(), options);

        assert_eq!(
            replacer
                .reconstruct_sentence("The committee approved the final version of proposal, xyz.")
                .unwrap(),
            PROPOSAL
        );
        assert_eq!(replacer.reconstruct_sentence("Hmm.").unwrap(), "Hmm.");
    }

    #[test]
    fn embedding_errors_propagate() {
        let replacer = ClauseReplacer::new(Unavailable, corpus(), ReplacerOptions::default());
        assert!(matches!(
            replacer.reconstruct_sentence("anything"),
            Err(Error::Embedding(_))
        ));
    }
}
