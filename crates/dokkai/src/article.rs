//! Article processing: fetching a page, extracting its text and counting the kanji in it.

use crate::kanji::kanji_in;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Failed to retrieve the raw content of a page.
#[derive(Debug, Error)]
#[error("failed to fetch {url}")]
pub struct FetchError {
    pub url: String,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

/// The fetched content could not be processed as a page.
#[derive(Debug, Error)]
#[error("failed to parse content: {reason}")]
pub struct ParseError {
    pub reason: String,
}

/// Error processing an article.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Retrieves the raw content of the page at a URL.
///
/// Implementations decode the response body to text; a non-success
/// status or transport failure is a [`FetchError`].
pub trait FetchContent {
    fn fetch_content(&self, url: &str) -> Result<String, FetchError>;
}

/// Extracts the plain text body and the title out of raw page content.
pub trait ExtractContent {
    fn extract_text(&self, content: &str) -> Result<String, ParseError>;

    /// A missing title is not an error: pages without one yield `None`.
    fn extract_title(&self, content: &str) -> Result<Option<String>, ParseError>;
}

/// Per-article kanji occurrence counts.
///
/// Sparse: kanji that do not occur in the article have no entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct KanjiCounts {
    pub counts: HashMap<char, i32>,
    /// Sum of all occurrences, repeats included.
    pub total: i64,
}

/// Counts the kanji in the text.
pub fn count_kanji(text: &str) -> KanjiCounts {
    let mut counts = HashMap::<char, i32>::new();
    let mut total = 0;
    for c in kanji_in(text) {
        *counts.entry(c).or_default() += 1;
        total += 1;
    }
    KanjiCounts { counts, total }
}

/// A fully processed article, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProcessedArticle {
    pub title: Option<String>,
    /// The raw fetched content, kept for storage.
    pub content: String,
    pub kanji_total: i64,
    pub kanji_counts: HashMap<char, i32>,
}

/// Fetches the page at `url` and counts the kanji in its text.
///
/// The result depends only on the content fetched during the call, so
/// reprocessing a page cleanly overwrites whatever was stored for it
/// before. Fetch and parse failures propagate untouched; persistence is
/// the caller's concern.
pub fn process_article<F, E>(
    url: &str,
    fetcher: &F,
    extractor: &E,
) -> Result<ProcessedArticle, ProcessError>
where
    F: FetchContent + ?Sized,
    E: ExtractContent + ?Sized,
{
    tracing::debug!("Processing article at {url}");
    let content = fetcher.fetch_content(url)?;
    let text = extractor.extract_text(&content)?;
    let title = extractor.extract_title(&content)?;
    let KanjiCounts { counts, total } = count_kanji(&text);
    tracing::debug!("Counted {total} kanji, {} distinct", counts.len());
    Ok(ProcessedArticle {
        title,
        content,
        kanji_total: total,
        kanji_counts: counts,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    struct StaticPage {
        content: &'static str,
    }

    impl FetchContent for StaticPage {
        fn fetch_content(&self, _url: &str) -> Result<String, FetchError> {
            Ok(self.content.to_string())
        }
    }

    struct Unreachable;

    impl FetchContent for Unreachable {
        fn fetch_content(&self, url: &str) -> Result<String, FetchError> {
            Err(FetchError {
                url: url.to_string(),
                source: "connection refused".into(),
            })
        }
    }

    struct RawText {
        title: Option<&'static str>,
    }

    impl ExtractContent for RawText {
        fn extract_text(&self, content: &str) -> Result<String, ParseError> {
            Ok(content.to_string())
        }

        fn extract_title(&self, _content: &str) -> Result<Option<String>, ParseError> {
            Ok(self.title.map(str::to_string))
        }
    }

    #[test]
    fn counts_kanji_occurrences() {
        let KanjiCounts { counts, total } = count_kanji("一二二三三三のひらがなとカタカナとabc");
        assert_eq!(counts.get(&'一'), Some(&1));
        assert_eq!(counts.get(&'二'), Some(&2));
        assert_eq!(counts.get(&'三'), Some(&3));
        assert_eq!(counts.len(), 3);
        assert_eq!(total, 6);
    }

    #[test]
    fn absent_kanji_have_no_entry() {
        let KanjiCounts { counts, .. } = count_kanji("一だけ");
        assert_eq!(counts.get(&'二'), None);
    }

    #[test]
    fn total_matches_sum_of_counts() {
        let KanjiCounts { counts, total } = count_kanji("雨の日も風の日も雪の日も");
        assert_eq!(total, counts.values().map(|c| i64::from(*c)).sum::<i64>());
    }

    #[test]
    fn processing_is_idempotent() {
        let fetcher = StaticPage {
            content: "横浜は横浜市の中心です",
        };
        let extractor = RawText { title: Some("横浜") };
        let first = process_article("https://example.com/yokohama", &fetcher, &extractor).unwrap();
        let second = process_article("https://example.com/yokohama", &fetcher, &extractor).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.title.as_deref(), Some("横浜"));
        assert_eq!(first.kanji_total, 6);
        assert_eq!(first.kanji_counts.get(&'横'), Some(&2));
    }

    #[test]
    fn missing_title_is_not_an_error() {
        let fetcher = StaticPage { content: "無題" };
        let extractor = RawText { title: None };
        let article = process_article("https://example.com", &fetcher, &extractor).unwrap();
        assert_eq!(article.title, None);
        assert_eq!(article.kanji_total, 2);
    }

    #[test]
    fn fetch_failure_propagates() {
        let res = process_article("https://example.com", &Unreachable, &RawText { title: None });
        assert!(matches!(res, Err(ProcessError::Fetch(_))));
    }

    #[test]
    fn parse_failure_propagates() {
        struct NoBody;

        impl ExtractContent for NoBody {
            fn extract_text(&self, _content: &str) -> Result<String, ParseError> {
                Err(ParseError {
                    reason: "no body element".to_string(),
                })
            }

            fn extract_title(&self, _content: &str) -> Result<Option<String>, ParseError> {
                Ok(None)
            }
        }

        let fetcher = StaticPage { content: "<" };
        let res = process_article("https://example.com", &fetcher, &NoBody);
        assert!(matches!(res, Err(ProcessError::Parse(_))));
    }
}
