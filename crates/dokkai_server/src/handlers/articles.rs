//! /articles

use super::prelude::*;
use crate::{domain, queries};
use dokkai::{
    article,
    comprehension::{self, ArticleFrequencies},
};
use itertools::Itertools;
use std::collections::HashMap;

// handlers

/// Gets all stored articles.
#[instrument]
pub async fn get_all(
    State(state): State<DokkaiState>,
    _user: Authentication,
) -> DokkaiResult<Json<Vec<res::Article>>> {
    use schema::articles as a;

    let articles = tokio::task::spawn_blocking(move || {
        let mut conn = state.pool.get()?;

        let articles = a::table
            .select(Article::as_select())
            .order(a::id.asc())
            .get_results(&mut conn)?;

        EyreResult::Ok(articles)
    })
    .await??
    .into_iter()
    .map(Into::into)
    .collect();

    Ok(Json(articles))
}

/// Fetches, processes and stores the article at the given URL.
///
/// Submitting a URL that was already processed overwrites the stored
/// article and its counts with the freshly fetched content.
#[instrument]
pub async fn insert(
    State(state): State<DokkaiState>,
    _user: Authentication,
    new_article: Json<req::NewArticle<'static>>,
) -> DokkaiResult<String> {
    tracing::info!("Inserting article");

    let req::NewArticle { url } = new_article.0;
    let id = tokio::task::spawn_blocking(move || {
        let processed = article::process_article(&url, &state.fetcher, &state.extractor)
            .wrap_err_with(|| format!("Failed to process article at {url}"))?;

        let mut conn = state.pool.get()?;
        let id = domain::articles::store_article(&mut conn, &url, &processed)?;
        EyreResult::Ok(id)
    })
    .await??;

    Ok(id.to_string())
}

/// Ranks the stored articles by the share of kanji the user knows.
///
/// Articles without any known kanji are left out of the response.
#[instrument]
pub async fn ranked(
    State(state): State<DokkaiState>,
    user: Authentication,
) -> DokkaiResult<Json<Vec<res::RankedArticle>>> {
    use schema::{articles as a, kanji_counts as kc};
    tracing::info!("Ranking articles");

    let user_id = user.user_id;
    let ranked = tokio::task::spawn_blocking(move || {
        let mut conn = state.pool.get()?;

        let known_kanji = queries::known_kanji(&mut conn, user_id)?;
        let articles = a::table
            .select(Article::as_select())
            .get_results(&mut conn)?;
        let counts = kc::table
            .select(ArticleKanjiCount::as_select())
            .get_results(&mut conn)?;

        let mut frequencies = HashMap::<i32, HashMap<char, i32>>::new();
        for count in counts {
            if let Some(kanji) = count.kanji.chars().next() {
                frequencies
                    .entry(count.article_id)
                    .or_default()
                    .insert(kanji, count.total);
            }
        }
        let article_frequencies = articles
            .iter()
            .map(|article| ArticleFrequencies {
                article_id: article.id,
                kanji_total: article.kanji_total,
                counts: frequencies.remove(&article.id).unwrap_or_default(),
            })
            .collect_vec();

        let mut article_by_id = articles
            .into_iter()
            .map(|article| (article.id, article))
            .collect::<HashMap<_, _>>();
        let ranked = comprehension::rank_articles(&known_kanji, article_frequencies)
            .into_iter()
            .filter_map(|ranked| {
                article_by_id.remove(&ranked.article_id).map(|article| {
                    res::RankedArticle {
                        id: article.id,
                        url: article.url,
                        title: article.title,
                        kanji_total: article.kanji_total,
                        known_total: ranked.known_total,
                        ratio: ranked.ratio,
                    }
                })
            })
            .collect_vec();
        EyreResult::Ok(ranked)
    })
    .await??;

    Ok(Json(ranked))
}

/// Gets the given article with its kanji counts.
#[instrument]
pub async fn get_one(
    State(state): State<DokkaiState>,
    Path(id): Path<i32>,
    _user: Authentication,
) -> DokkaiResult<Json<res::ArticleDetails>> {
    use schema::{articles as a, kanji_counts as kc};

    let (article, counts) = tokio::task::spawn_blocking(move || {
        let mut conn = state.pool.get()?;

        let article = a::table
            .select(Article::as_select())
            .filter(a::id.eq(id))
            .get_result(&mut conn)?;
        let counts = kc::table
            .select(KanjiCount::as_select())
            .filter(kc::article_id.eq(id))
            .order(kc::total.desc())
            .get_results(&mut conn)?;

        EyreResult::Ok((article, counts))
    })
    .await??;

    Ok(Json(res::ArticleDetails {
        id: article.id,
        url: article.url,
        title: article.title,
        kanji_total: article.kanji_total,
        counts: counts
            .into_iter()
            .filter_map(|count| {
                count.kanji.chars().next().map(|kanji| res::KanjiCount {
                    kanji,
                    total: count.total,
                })
            })
            .collect(),
    }))
}

/// Deletes the given article and its kanji counts.
#[instrument]
pub async fn delete(
    State(state): State<DokkaiState>,
    Path(id): Path<i32>,
    _user: Authentication,
) -> DokkaiResult<()> {
    use schema::{articles as a, kanji_counts as kc};
    tracing::info!("Deleting article {id}");

    tokio::task::spawn_blocking(move || {
        let mut conn = state.pool.get()?;
        conn.transaction(|conn| {
            diesel::delete(kc::table.filter(kc::article_id.eq(id))).execute(conn)?;
            diesel::delete(a::table.filter(a::id.eq(id))).execute(conn)?;
            EyreResult::Ok(())
        })?;
        EyreResult::Ok(())
    })
    .await??;

    Ok(())
}

// queries

query! {
    #[derive(Debug)]
    struct Article {
        id: i32 = articles::id,
        url: String = articles::url,
        title: Option<String> = articles::title,
        kanji_total: i64 = articles::kanji_total,
    }
}

impl From<Article> for res::Article {
    fn from(value: Article) -> Self {
        res::Article {
            id: value.id,
            url: value.url,
            title: value.title,
            kanji_total: value.kanji_total,
        }
    }
}

query! {
    #[derive(Debug)]
    struct KanjiCount {
        kanji: String = kanji_counts::kanji,
        total: i32 = kanji_counts::total,
    }
}

query! {
    #[derive(Debug)]
    struct ArticleKanjiCount {
        article_id: i32 = kanji_counts::article_id,
        kanji: String = kanji_counts::kanji,
        total: i32 = kanji_counts::total,
    }
}
