//! Fundamental types used by this crate.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

macro_rules! pos_tags {
    ($($variant:ident => $tag:literal),* $(,)?) => {
        /// A part-of-speech tag from the Penn Treebank tagset.
        #[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
        pub enum Pos {
            $($variant),*
        }

        impl Pos {
            /// All tags in declaration order.
            pub fn tags() -> &'static [Pos] {
                &[$(Pos::$variant),*]
            }

            /// The tag as it is written in the Penn Treebank.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Pos::$variant => $tag),*
                }
            }
        }

        impl FromStr for Pos {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($tag => Ok(Pos::$variant),)*
                    _ => Err(format!("unknown part-of-speech tag: {:?}", s)),
                }
            }
        }
    };
}

pos_tags! {
    CC => "CC",
    CD => "CD",
    DT => "DT",
    EX => "EX",
    FW => "FW",
    IN => "IN",
    JJ => "JJ",
    JJR => "JJR",
    JJS => "JJS",
    LS => "LS",
    MD => "MD",
    NN => "NN",
    NNS => "NNS",
    NNP => "NNP",
    NNPS => "NNPS",
    PDT => "PDT",
    POS => "POS",
    PRP => "PRP",
    PRPS => "PRP$",
    RB => "RB",
    RBR => "RBR",
    RBS => "RBS",
    RP => "RP",
    SYM => "SYM",
    TO => "TO",
    UH => "UH",
    VB => "VB",
    VBD => "VBD",
    VBG => "VBG",
    VBN => "VBN",
    VBP => "VBP",
    VBZ => "VBZ",
    WDT => "WDT",
    WP => "WP",
    WPS => "WP$",
    WRB => "WRB",
    Comma => ",",
    Period => ".",
    Colon => ":",
    Dollar => "$",
    Hash => "#",
    OpenQuote => "``",
    CloseQuote => "''",
    OpenParen => "(",
    CloseParen => ")",
}

impl Pos {
    /// Singular, plural and proper nouns.
    pub fn is_noun(&self) -> bool {
        matches!(self, Pos::NN | Pos::NNS | Pos::NNP | Pos::NNPS)
    }

    pub fn is_verb(&self) -> bool {
        matches!(
            self,
            Pos::VB | Pos::VBD | Pos::VBG | Pos::VBN | Pos::VBP | Pos::VBZ
        )
    }

    pub fn is_adverb(&self) -> bool {
        matches!(self, Pos::RB | Pos::RBR | Pos::RBS)
    }

    pub fn is_adjective(&self) -> bool {
        matches!(self, Pos::JJ | Pos::JJR | Pos::JJS)
    }

    /// Base form or non-third-person present, i. e. verbs lacking subject agreement with a third person singular.
    pub fn is_base_verb(&self) -> bool {
        matches!(self, Pos::VB | Pos::VBP)
    }

    pub fn is_punctuation(&self) -> bool {
        matches!(
            self,
            Pos::Comma
                | Pos::Period
                | Pos::Colon
                | Pos::OpenQuote
                | Pos::CloseQuote
                | Pos::OpenParen
                | Pos::CloseParen
        )
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Pos {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Pos {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(deserializer)?;
        string.parse().map_err(serde::de::Error::custom)
    }
}

/// Lemma and part-of-speech tag associated with a word.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct WordData {
    pub lemma: String,
    pub pos: Pos,
}

impl WordData {
    pub fn new<S: Into<String>>(lemma: S, pos: Pos) -> Self {
        WordData {
            lemma: lemma.into(),
            pos,
        }
    }
}

/// A tagged token. Tokens are recomputed each time a rule tags a sentence, they never outlive that call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub lemma: String,
    pub pos: Pos,
}

impl Token {
    pub fn new<S: Into<String>>(text: S, data: WordData) -> Self {
        Token {
            text: text.into(),
            lemma: data.lemma,
            pos: data.pos,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Lower-cased text of the token.
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// The result of reconstructing one sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconstruction {
    pub(crate) output: String,
    pub(crate) applied: Vec<String>,
}

impl Reconstruction {
    /// The reconstructed sentence with punctuation spacing cleaned.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Names of the rules which changed the text, in the order they were applied.
    pub fn applied(&self) -> &[String] {
        &self.applied
    }

    pub fn into_parts(self) -> (String, Vec<String>) {
        (self.output, self.applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_roundtrip_through_str() {
        for pos in Pos::tags() {
            assert_eq!(pos.as_str().parse::<Pos>(), Ok(*pos));
        }
        assert!("XYZ".parse::<Pos>().is_err());
    }

    #[test]
    fn tags_deserialize_from_penn_strings() {
        let tags: Vec<Pos> = serde_json::from_str(r#"["PRP$", "NNS", ","]"#).unwrap();
        assert_eq!(tags, vec![Pos::PRPS, Pos::NNS, Pos::Comma]);
    }

    #[test]
    fn noun_and_verb_classes() {
        assert!(Pos::NNS.is_noun());
        assert!(!Pos::PRP.is_noun());
        assert!(Pos::VBP.is_base_verb());
        assert!(!Pos::VBZ.is_base_verb());
        assert!(Pos::RBR.is_adverb());
    }
}
