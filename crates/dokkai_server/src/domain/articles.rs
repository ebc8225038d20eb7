//! Fetching web pages, extracting their text and storing processed articles.

use crate::{eq, error::EyreResult, utils::diesel::PostgresChunks};
use diesel::prelude::*;
use dokkai::article::{ExtractContent, FetchContent, FetchError, ParseError, ProcessedArticle};
use eyre::WrapErr;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use scraper::{Html, Selector};
use std::time::Duration;

/// Fetches raw page content over HTTP.
///
/// The request timeout is the only timeout in article processing;
/// failures are surfaced without retrying.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> eyre::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent).unwrap_or_else(|_| HeaderValue::from_static("dokkai")),
        );
        let client = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .wrap_err("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl FetchContent for HttpFetcher {
    fn fetch_content(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().map_err(|err| FetchError {
            url: url.to_string(),
            source: err.into(),
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError {
                url: url.to_string(),
                source: format!("http status {status}").into(),
            });
        }
        let bytes = response.bytes().map_err(|err| FetchError {
            url: url.to_string(),
            source: err.into(),
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Extracts the plain body text and the title out of an HTML page.
pub struct HtmlExtractor;

impl ExtractContent for HtmlExtractor {
    fn extract_text(&self, content: &str) -> Result<String, ParseError> {
        let document = Html::parse_document(content);
        let selector = Selector::parse("body").unwrap();
        let Some(body) = document.select(&selector).next() else {
            return Err(ParseError {
                reason: "no body element".to_string(),
            });
        };

        let mut text = String::new();
        for fragment in body.text() {
            let fragment = fragment.trim();
            if fragment.is_empty() {
                continue;
            }
            text.push_str(fragment);
            text.push('\n');
        }
        Ok(text)
    }

    fn extract_title(&self, content: &str) -> Result<Option<String>, ParseError> {
        let document = Html::parse_document(content);
        let selector = Selector::parse("title").unwrap();
        let title = document
            .select(&selector)
            .next()
            .map(|title| title.text().collect::<String>())
            .map(|title| title.trim().to_string())
            .filter(|title| !title.is_empty());
        Ok(title)
    }
}

/// Stores a processed article, overwriting any previous version at the same URL.
///
/// The article row and its count rows are replaced in a single
/// transaction so concurrent reprocessing of one URL stays
/// last-writer-wins instead of interleaving partial state.
pub fn store_article(
    conn: &mut PgConnection,
    url: &str,
    article: &ProcessedArticle,
) -> eyre::Result<i32> {
    use crate::schema::{articles as a, kanji_counts as kc};

    let id = conn.transaction(|conn| {
        let id = diesel::insert_into(a::table)
            .values((
                a::url.eq(url),
                a::title.eq(article.title.as_deref()),
                a::content.eq(&article.content),
                a::kanji_total.eq(article.kanji_total),
            ))
            .on_conflict(a::url)
            .do_update()
            .set((
                a::title.eq(article.title.as_deref()),
                a::content.eq(&article.content),
                a::kanji_total.eq(article.kanji_total),
            ))
            .returning(a::id)
            .get_result::<i32>(conn)
            .wrap_err("Failed to upsert article")?;

        diesel::delete(kc::table.filter(kc::article_id.eq(id)))
            .execute(conn)
            .wrap_err("Failed to clear old kanji counts")?;

        let article_id = id;
        let rows = article
            .kanji_counts
            .iter()
            .map(|(kanji, total)| {
                let kanji = kanji.to_string();
                let total = *total;
                eq!(kc, article_id, kanji, total)
            })
            .collect::<Vec<_>>();
        for chunk in rows.pg_chunks() {
            diesel::insert_into(kc::table)
                .values(chunk)
                .execute(conn)
                .wrap_err("Failed to insert kanji counts")?;
        }
        EyreResult::Ok(id)
    })?;
    Ok(id)
}

#[cfg(test)]
mod test {
    use super::*;

    const PAGE: &str = "<html>\
        <head><title>今日の天気</title></head>\
        <body><h1>天気</h1><p>今日は<b>晴れ</b>です。</p></body>\
        </html>";

    #[test]
    fn extracts_text_without_tags() {
        let text = HtmlExtractor.extract_text(PAGE).unwrap();
        assert!(text.contains("天気"));
        assert!(text.contains("晴れ"));
        assert!(!text.contains("<p>"));
        assert!(!text.contains("<b>"));
    }

    #[test]
    fn extracted_text_excludes_head() {
        let text = HtmlExtractor.extract_text(PAGE).unwrap();
        assert!(!text.contains("今日の天気"));
    }

    #[test]
    fn extracts_title() {
        let title = HtmlExtractor.extract_title(PAGE).unwrap();
        assert_eq!(title.as_deref(), Some("今日の天気"));
    }

    #[test]
    fn missing_title_is_none() {
        let title = HtmlExtractor
            .extract_title("<html><body>天気</body></html>")
            .unwrap();
        assert_eq!(title, None);
    }

    #[test]
    fn blank_title_is_none() {
        let title = HtmlExtractor
            .extract_title("<html><head><title>  </title></head><body></body></html>")
            .unwrap();
        assert_eq!(title, None);
    }

    #[test]
    fn extraction_feeds_kanji_counting() {
        let text = HtmlExtractor.extract_text(PAGE).unwrap();
        let counts = dokkai::article::count_kanji(&text);
        assert_eq!(counts.counts.get(&'天'), Some(&1));
        assert_eq!(counts.counts.get(&'気'), Some(&1));
        assert_eq!(counts.counts.get(&'今'), Some(&1));
        assert_eq!(counts.counts.get(&'日'), Some(&1));
        assert_eq!(counts.counts.get(&'晴'), Some(&1));
        assert_eq!(counts.total, 5);
    }
}
