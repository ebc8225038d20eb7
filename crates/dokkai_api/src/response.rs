//! Types for responses from the backend to clients.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Error {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: i32,
    pub url: String,
    pub title: Option<String>,
    pub kanji_total: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleDetails {
    pub id: i32,
    pub url: String,
    pub title: Option<String>,
    pub kanji_total: i64,
    pub counts: Vec<KanjiCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KanjiCount {
    pub kanji: char,
    pub total: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedArticle {
    pub id: i32,
    pub url: String,
    pub title: Option<String>,
    pub kanji_total: i64,
    pub known_total: i64,
    pub ratio: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnownKanji {
    pub kanji: char,
}
