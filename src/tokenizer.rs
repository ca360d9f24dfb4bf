//! Splits a sentence into word and punctuation tokens and tags them.
//! Tokenization is deterministic: the same sentence always yields the same tokens, joining them
//! with single spaces and cleaning the punctuation spacing gives readable text back.

pub mod disambiguate;
pub mod inflect;
pub mod tag;

/// Characters split off the start of a whitespace-separated chunk.
#[inline]
fn leading_chars() -> &'static str {
    r##"«'’`´‘"“„([{<"##
}

/// Characters split off the end of a whitespace-separated chunk.
#[inline]
fn trailing_chars() -> &'static str {
    r##"»'’`´‘"”)]}>,.:;!?…"##
}

const CLITICS: &[&str] = &["s", "re", "ve", "ll", "d", "m"];

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '’'
}

/// Splits a word into stem and clitic, e. g. `don't` into `do` and `n't`, `doctor's` into `doctor` and `'s`.
fn split_clitic(word: &str) -> (&str, Option<&str>) {
    // "n't" is matched case-insensitively on the last three chars, "n" + apostrophe + "t"
    let chars: Vec<(usize, char)> = word.char_indices().collect();
    if chars.len() > 3 {
        let (start, n) = chars[chars.len() - 3];
        let (_, apostrophe) = chars[chars.len() - 2];
        let (_, t) = chars[chars.len() - 1];

        if n.eq_ignore_ascii_case(&'n') && is_apostrophe(apostrophe) && t.eq_ignore_ascii_case(&'t')
        {
            return (&word[..start], Some(&word[start..]));
        }
    }

    if let Some((index, _)) = word
        .char_indices()
        .rev()
        .find(|(_, c)| is_apostrophe(*c))
    {
        let suffix = &word[index..];
        let rest = suffix
            .char_indices()
            .nth(1)
            .map_or("", |(i, _)| &suffix[i..]);

        if index > 0 && CLITICS.contains(&rest.to_lowercase().as_str()) {
            return (&word[..index], Some(suffix));
        }
    }

    (word, None)
}

/// Splits one whitespace-free chunk into tokens.
fn split_chunk(chunk: &str) -> Vec<&str> {
    let mut leading = Vec::new();
    let mut trailing = Vec::new();
    let mut core = chunk;

    while let Some(c) = core.chars().next() {
        if core.chars().count() > 1 && leading_chars().contains(c) {
            leading.push(&core[..c.len_utf8()]);
            core = &core[c.len_utf8()..];
        } else {
            break;
        }
    }

    while let Some(c) = core.chars().last() {
        if core.chars().count() <= 1 || !trailing_chars().contains(c) {
            break;
        }

        let head = &core[..core.len() - c.len_utf8()];
        // keep the final period of abbreviations like "e.g." or "U.S."
        if c == '.' && head.contains('.') && !head.ends_with('.') {
            break;
        }

        trailing.push(&core[core.len() - c.len_utf8()..]);
        core = head;
    }

    let mut tokens = leading;
    if !core.is_empty() {
        let (stem, clitic) = split_clitic(core);
        tokens.push(stem);
        tokens.extend(clitic);
    }
    tokens.extend(trailing.into_iter().rev());

    tokens
}

/// Splits a sentence into tokens. Whitespace is never part of a token.
pub fn tokenize(sentence: &str) -> Vec<&str> {
    sentence
        .split_whitespace()
        .flat_map(split_chunk)
        .filter(|x| !x.is_empty())
        .collect()
}
