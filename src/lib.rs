//! Rule-based rewriting of informal or malformed English sentences into more formal paraphrases.
//! # Overview
//!
//! recast has the following core abstractions:
//! - A [Tag][tokenizer::tag::Tag] implementation which splits a sentence into tokens and assigns each token a
//!   part-of-speech tag. The crate ships a lexicon-based English [Tagger][tokenizer::tag::Tagger], any other tagger
//!   producing Penn Treebank tags can be plugged in.
//! - [Rule][rule::Rule]s: named, pure sentence-to-sentence transformations. Some are plain patterns, some re-tag
//!   the sentence and match on the tags.
//! - A [Rules][rules::Rules] set which applies its rules in a fixed order and records which of them changed the text.
//! - A [Reconstructor][reconstructor::Reconstructor] bundling rules and tagger which also splits running text into
//!   sentences and isolates failures to the sentence they occurred in.
//!
//! # Examples
//!
//! Reconstruct one sentence:
//!
//! ```no_run
//! use recast::Reconstructor;
//!
//! let reconstructor = Reconstructor::english();
//!
//! let result = reconstructor.reconstruct("We might can go tomorrow if the document gets finalized approved.")?;
//! assert_eq!(result.output(), "We can go tomorrow if the document gets approved.");
//! assert_eq!(
//!     result.applied(),
//!     &["ShortenDoubleModalsNLTK", "CompressOverqualifiedNounsNLTK"]
//! );
//! # Ok::<(), recast::Error>(())
//! ```
//!
//! Correct running text:
//!
//! ```no_run
//! use recast::Reconstructor;
//!
//! let reconstructor = Reconstructor::english();
//!
//! println!("{}", reconstructor.correct("Hope you too, to enjoy it. The sky is blue."));
//! ```

// #![warn(missing_docs)]
use std::io;

use thiserror::Error;

pub mod paraphrase;
pub mod reconstructor;
pub mod rule;
pub mod rules;
pub mod tokenizer;
pub mod types;
pub(crate) mod utils;

pub use reconstructor::Reconstructor;
pub use rules::{Rules, RulesOptions};
pub use utils::clean_spacing;

#[derive(Error, Debug)]
#[allow(missing_docs)]
pub enum Error {
    /// The tagger could not process a sentence.
    #[error("tagging failed: {0}")]
    TaggingFailed(String),
    /// Empty or whitespace-only input. Rejected before any rule runs.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unknown rule: {0}")]
    UnknownRule(String),
    #[error("malformed dump line {line}: {message}")]
    Dump { line: usize, message: String },
    #[error("embedding failed: {0}")]
    Embedding(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    /// (De)serialization error of a JSON configuration.
    #[error(transparent)]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Regex(#[from] onig::Error),
}
