use crate::error::Result;
use crate::ranking::tokens::QueryTokens;
use crate::ranking::Ranker;

/// Ranker that counts whole-word overlap between query and name.
///
/// Shares tokenization and the coarse filter with the tiered ranker but
/// orders by word membership instead of substring tiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordOverlapRanker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OverlapScore {
    exact_match: bool,
    match_count: usize,
    last_name_match: bool,
    first_name_match: bool,
    word_order_score: usize,
}

impl OverlapScore {
    fn compute(tokens: &QueryTokens, name_lower: &str) -> Self {
        let name_words: Vec<&str> = name_lower.split_whitespace().collect();
        let position = |token: &str| name_words.iter().position(|w| *w == token);

        let positions: Vec<usize> = tokens
            .as_slice()
            .iter()
            .filter_map(|t| position(t.as_str()))
            .collect();

        Self {
            exact_match: positions.len() == tokens.len(),
            match_count: positions.len(),
            last_name_match: name_words.last().is_some_and(|w| w.contains(tokens.last())),
            first_name_match: name_words.first().is_some_and(|w| w.contains(tokens.first())),
            word_order_score: positions.iter().sum(),
        }
    }
}

impl WordOverlapRanker {
    pub fn new() -> Self {
        Self
    }
}

impl Ranker for WordOverlapRanker {
    fn rank_indices(&self, query: &str, names: &[&str]) -> Result<Vec<usize>> {
        let tokens = QueryTokens::parse(query)?;

        let mut scored: Vec<(usize, OverlapScore)> = names
            .iter()
            .enumerate()
            .filter_map(|(idx, name)| {
                let name_lower = name.to_lowercase();
                tokens
                    .coarse_match(&name_lower)
                    .then(|| (idx, OverlapScore::compute(&tokens, &name_lower)))
            })
            .collect();

        scored.sort_by(|(ia, a), (ib, b)| {
            b.exact_match
                .cmp(&a.exact_match)
                .then_with(|| b.match_count.cmp(&a.match_count))
                .then_with(|| b.last_name_match.cmp(&a.last_name_match))
                .then_with(|| b.first_name_match.cmp(&a.first_name_match))
                .then_with(|| a.word_order_score.cmp(&b.word_order_score))
                .then_with(|| names[*ia].cmp(names[*ib]))
        });

        tracing::debug!("Word-overlap ranking kept {}/{} candidates", scored.len(), names.len());

        Ok(scored.into_iter().map(|(idx, _)| idx).collect())
    }

    fn name(&self) -> &str {
        "word_overlap"
    }
}
