//! Navigation path and its comma codec.
//!
//! The path travels between turns as plain text in the front-end's context
//! values. [`Path::decode`] and [`Path::encode`] are the only places that
//! know the text form.

use std::fmt;

/// Five levels plus the target.
pub const MAX_DEPTH: usize = 6;

const SEPARATOR: char = ',';

/// Ordered selections made so far, at most [`MAX_DEPTH`] tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    tokens: Vec<String>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from tokens, dropping empty ones and keeping at most six.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens
                .into_iter()
                .map(Into::into)
                .filter(|t: &String| !t.is_empty())
                .take(MAX_DEPTH)
                .collect(),
        }
    }

    /// Split on commas, dropping empty tokens. Order is preserved.
    pub fn decode(text: &str) -> Self {
        Self::from_tokens(text.split(SEPARATOR))
    }

    /// Comma-joined tokens; the empty path encodes to "".
    pub fn encode(&self) -> String {
        self.tokens.join(",")
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tokens.len() >= MAX_DEPTH
    }

    pub fn last(&self) -> Option<&str> {
        self.tokens.last().map(|s| s.as_str())
    }

    /// New path with `token` appended. A full path is returned unchanged.
    pub fn push(&self, token: &str) -> Self {
        let mut next = self.clone();
        if !next.is_full() && !token.is_empty() {
            next.tokens.push(token.to_string());
        }
        next
    }

    /// New path with the last token removed.
    pub fn pop(&self) -> Self {
        let mut next = self.clone();
        next.tokens.pop();
        next
    }

    /// Six-token lookup key. A five-token path repeats its last token as the
    /// target; shorter paths have no key.
    pub fn resolution_key(&self) -> Option<[String; MAX_DEPTH]> {
        let mut key: [String; MAX_DEPTH] = Default::default();
        match self.tokens.len() {
            MAX_DEPTH => {
                key.clone_from_slice(&self.tokens);
            }
            5 => {
                key[..5].clone_from_slice(&self.tokens);
                key[5] = self.tokens[4].clone();
            }
            _ => return None,
        }
        Some(key)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
