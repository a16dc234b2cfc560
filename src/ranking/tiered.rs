use std::cmp::Ordering;

use crate::error::Result;
use crate::ranking::tokens::QueryTokens;
use crate::ranking::Ranker;

/// Which adjacent token pair, if any, the name contains.
///
/// Declaration order is sort order, so `FirstPair` compares greatest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TwoWordCombo {
    None,
    LastPair,
    FirstLast,
    FirstPair,
}

impl TwoWordCombo {
    /// Ordinal weight: 0, 3, 4 or 5
    pub fn value(&self) -> u8 {
        match self {
            TwoWordCombo::None => 0,
            TwoWordCombo::LastPair => 3,
            TwoWordCombo::FirstLast => 4,
            TwoWordCombo::FirstPair => 5,
        }
    }
}

/// Per-candidate sort key. Field order is comparison order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScoreVector {
    pub full_match: bool,
    pub two_word_combo: TwoWordCombo,
    pub last_name_match: bool,
    pub first_name_match: bool,
}

impl ScoreVector {
    /// Score a lower-cased name against the query.
    ///
    /// `query_lower` is the raw query lower-cased without trimming or
    /// whitespace normalization.
    pub fn compute(tokens: &QueryTokens, query_lower: &str, name_lower: &str) -> Self {
        let contains = |pair: Option<String>| pair.is_some_and(|p| name_lower.contains(&p));

        let two_word_combo = if contains(tokens.first_pair()) {
            TwoWordCombo::FirstPair
        } else if contains(tokens.first_last_pair()) {
            TwoWordCombo::FirstLast
        } else if contains(tokens.last_pair()) {
            TwoWordCombo::LastPair
        } else {
            TwoWordCombo::None
        };

        Self {
            full_match: name_lower == query_lower,
            two_word_combo,
            last_name_match: name_lower.ends_with(tokens.last()),
            first_name_match: name_lower.starts_with(tokens.first()),
        }
    }

    /// Numeric form `(full, combo, last, first)`
    pub fn as_tuple(&self) -> (u8, u8, u8, u8) {
        (
            self.full_match as u8,
            self.two_word_combo.value(),
            self.last_name_match as u8,
            self.first_name_match as u8,
        )
    }
}

/// Default name-search ranker.
///
/// Coarse substring filter on first/last/second token, then a descending
/// sort on [`ScoreVector`] with the name as ascending tie-break.
#[derive(Debug, Clone, Copy, Default)]
pub struct TieredNameRanker;

impl TieredNameRanker {
    pub fn new() -> Self {
        Self
    }

    /// Filter and score, returning `(index, score)` in ranked order
    pub fn scored(&self, query: &str, names: &[&str]) -> Result<Vec<(usize, ScoreVector)>> {
        let tokens = QueryTokens::parse(query)?;
        let query_lower = tokens.raw().to_lowercase();

        let mut scored: Vec<(usize, ScoreVector)> = names
            .iter()
            .enumerate()
            .filter_map(|(idx, name)| {
                let name_lower = name.to_lowercase();
                if !tokens.coarse_match(&name_lower) {
                    return None;
                }
                Some((idx, ScoreVector::compute(&tokens, &query_lower, &name_lower)))
            })
            .collect();

        // stable: duplicate names with equal scores keep pool order
        scored.sort_by(|(ia, a), (ib, b)| by_score_then_name(a, b, names[*ia], names[*ib]));

        tracing::debug!(
            "Tiered ranking: {} tokens, {}/{} candidates kept",
            tokens.len(),
            scored.len(),
            names.len()
        );

        Ok(scored)
    }
}

fn by_score_then_name(a: &ScoreVector, b: &ScoreVector, name_a: &str, name_b: &str) -> Ordering {
    b.cmp(a).then_with(|| name_a.cmp(name_b))
}

impl Ranker for TieredNameRanker {
    fn rank_indices(&self, query: &str, names: &[&str]) -> Result<Vec<usize>> {
        Ok(self.scored(query, names)?.into_iter().map(|(idx, _)| idx).collect())
    }

    fn name(&self) -> &str {
        "tiered"
    }
}
