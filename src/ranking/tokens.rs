use crate::error::{RegistryError, Result};

/// Lower-cased, whitespace-split view of a search query.
///
/// Never empty: construction fails with [`RegistryError::MissingQuery`] when
/// the query trims to nothing, so `first`/`last` are always available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTokens {
    raw: String,
    tokens: Vec<String>,
}

impl QueryTokens {
    /// Tokenize a raw query
    pub fn parse(query: &str) -> Result<Self> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(RegistryError::MissingQuery);
        }

        let tokens = trimmed.split_whitespace().map(str::to_lowercase).collect();

        Ok(Self {
            raw: query.to_string(),
            tokens,
        })
    }

    /// The query exactly as supplied, untrimmed
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    pub fn first(&self) -> &str {
        &self.tokens[0]
    }

    pub fn last(&self) -> &str {
        &self.tokens[self.tokens.len() - 1]
    }

    /// The "middle" token used by the coarse filter.
    ///
    /// Only defined for three or more tokens, and always the second token,
    /// not the arithmetic midpoint.
    pub fn middle(&self) -> Option<&str> {
        if self.tokens.len() > 2 {
            Some(&self.tokens[1])
        } else {
            None
        }
    }

    /// First two tokens joined by a space
    pub fn first_pair(&self) -> Option<String> {
        self.pair(0, 1)
    }

    /// First and last token joined by a space
    pub fn first_last_pair(&self) -> Option<String> {
        self.pair(0, self.tokens.len() - 1)
    }

    /// Last two tokens joined by a space
    pub fn last_pair(&self) -> Option<String> {
        let n = self.tokens.len();
        if n < 2 {
            return None;
        }
        self.pair(n - 2, n - 1)
    }

    // A one-token query has no pairs, so every pair tier scores 0 for it;
    // "john" must not become "john john" and match "John Johnson".
    fn pair(&self, a: usize, b: usize) -> Option<String> {
        if self.tokens.len() < 2 {
            return None;
        }
        Some(format!("{} {}", self.tokens[a], self.tokens[b]))
    }

    /// Coarse substring filter against an already lower-cased name
    pub fn coarse_match(&self, name_lower: &str) -> bool {
        name_lower.contains(self.first())
            || name_lower.contains(self.last())
            || self.middle().is_some_and(|middle| name_lower.contains(middle))
    }
}
