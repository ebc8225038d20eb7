//! Comprehension ratios: how much of an article's kanji a user already knows.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One stored article's kanji frequency table.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArticleFrequencies {
    pub article_id: i32,
    /// Sum of all counts, recorded when the article was processed.
    pub kanji_total: i64,
    pub counts: HashMap<char, i32>,
}

/// An article scored against a known-kanji set.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RankedArticle {
    pub article_id: i32,
    /// Occurrences of kanji the user knows.
    pub known_total: i64,
    /// `known_total / kanji_total`, in (0, 1].
    pub ratio: f64,
}

/// Ranks articles by the fraction of their kanji occurrences covered by `known_kanji`.
///
/// Articles that share no kanji with the set are left out rather than
/// ranked at zero, as are articles with no kanji at all. The result is
/// ordered by ratio descending; equal ratios order by article id.
pub fn rank_articles(
    known_kanji: &HashSet<char>,
    articles: Vec<ArticleFrequencies>,
) -> Vec<RankedArticle> {
    let mut ranked = articles
        .into_iter()
        .filter(|a| a.kanji_total > 0)
        .filter_map(|a| {
            let known_total = a
                .counts
                .iter()
                .filter(|(kanji, _)| known_kanji.contains(*kanji))
                .map(|(_, total)| i64::from(*total))
                .sum::<i64>();
            (known_total > 0).then(|| RankedArticle {
                article_id: a.article_id,
                known_total,
                ratio: known_total as f64 / a.kanji_total as f64,
            })
        })
        .collect::<Vec<_>>();
    ranked.sort_unstable_by(|a, b| {
        b.ratio
            .total_cmp(&a.ratio)
            .then(a.article_id.cmp(&b.article_id))
    });
    ranked
}

#[cfg(test)]
mod test {
    use super::*;

    fn frequencies(
        article_id: i32,
        kanji_total: i64,
        counts: &[(char, i32)],
    ) -> ArticleFrequencies {
        ArticleFrequencies {
            article_id,
            kanji_total,
            counts: counts.iter().copied().collect(),
        }
    }

    #[test]
    fn computes_ratio() {
        let known = HashSet::from(['一', '二']);
        let articles = vec![frequencies(1, 10, &[('一', 3), ('二', 2), ('三', 5)])];

        let ranked = rank_articles(&known, articles);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].article_id, 1);
        assert_eq!(ranked[0].known_total, 5);
        assert_eq!(ranked[0].ratio, 0.5);
    }

    #[test]
    fn excludes_articles_without_known_kanji() {
        let known = HashSet::from(['一']);
        let articles = vec![
            frequencies(1, 4, &[('四', 4)]),
            frequencies(2, 2, &[('一', 1), ('五', 1)]),
        ];

        let ranked = rank_articles(&known, articles);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].article_id, 2);
    }

    #[test]
    fn excludes_articles_without_kanji() {
        let known = HashSet::from(['一']);
        let articles = vec![frequencies(1, 0, &[])];

        let ranked = rank_articles(&known, articles);
        assert!(ranked.is_empty());
    }

    #[test]
    fn orders_by_ratio_descending() {
        let known = HashSet::from(['一']);
        let articles = vec![
            frequencies(1, 10, &[('一', 3), ('七', 7)]),
            frequencies(2, 10, &[('一', 8), ('七', 2)]),
        ];

        let ranked = rank_articles(&known, articles);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].article_id, 2);
        assert_eq!(ranked[0].ratio, 0.8);
        assert_eq!(ranked[1].article_id, 1);
        assert_eq!(ranked[1].ratio, 0.3);
    }

    #[test]
    fn breaks_ties_by_article_id() {
        let known = HashSet::from(['一']);
        let articles = vec![
            frequencies(7, 2, &[('一', 1), ('二', 1)]),
            frequencies(3, 4, &[('一', 2), ('二', 2)]),
        ];

        let ranked = rank_articles(&known, articles);
        assert_eq!(ranked[0].article_id, 3);
        assert_eq!(ranked[1].article_id, 7);
    }

    #[test]
    fn empty_known_set_ranks_nothing() {
        let known = HashSet::new();
        let articles = vec![frequencies(1, 3, &[('一', 3)])];

        let ranked = rank_articles(&known, articles);
        assert!(ranked.is_empty());
    }
}
