//! Web backend for DOKKAI.

pub mod authentication;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod queries;
pub mod schema;
pub mod utils;

use crate::handlers::{articles, auth, kanji};
use authentication::{Expiration, SessionCache};
use axum::{
    routing::{get, post},
    Router,
};
use diesel::{
    prelude::*,
    r2d2::{ConnectionManager, Pool},
};
use domain::articles::{HtmlExtractor, HttpFetcher};
use eyre::WrapErr;
use moka::future::Cache;
use std::{fmt::Debug, ops::Deref, sync::Arc, time::Duration};
use tower_cookies::{CookieManagerLayer, Key};

pub type DokkaiPool = Pool<ConnectionManager<PgConnection>>;

#[derive(Clone)]
pub struct DokkaiState(Arc<DokkaiStateCore>);

impl Deref for DokkaiState {
    type Target = DokkaiStateCore;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Debug for DokkaiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Dokkai")
    }
}

pub struct DokkaiStateCore {
    pub pool: DokkaiPool,
    pub fetcher: HttpFetcher,
    pub extractor: HtmlExtractor,
    pub private_cookie_key: Key,
    pub sessions: SessionCache,
}

pub async fn router(state: DokkaiState) -> Router<()> {
    Router::new()
        .nest(
            "/api",
            Router::new()
                .nest(
                    "/auth",
                    Router::new()
                        .route("/register", post(auth::register))
                        .route("/login", post(auth::login))
                        .route("/current", get(auth::current))
                        .route("/logout", post(auth::logout)),
                )
                .nest(
                    "/articles",
                    Router::new()
                        .route("/", get(articles::get_all).post(articles::insert))
                        .route("/ranked", get(articles::ranked))
                        .route("/{id}", get(articles::get_one).delete(articles::delete)),
                )
                .nest(
                    "/kanji",
                    Router::new().route("/known", get(kanji::known).post(kanji::add_known)),
                )
                .layer(CookieManagerLayer::new()),
        )
        .with_state(state)
}

pub async fn router_from_vars(
    database_url: &str,
    private_cookie_password: &str,
) -> eyre::Result<Router<()>> {
    // conservative pool config aimed at not using the database too much
    let pool = Pool::builder()
        .min_idle(Some(0))
        .idle_timeout(Some(Duration::from_secs(30)))
        .build(ConnectionManager::new(database_url))
        .wrap_err_with(|| format!("Failed to connect to the database at {database_url}"))?;

    let fetcher = HttpFetcher::new("dokkai", Duration::from_secs(30))
        .wrap_err("Failed to build article fetcher")?;
    let private_cookie_key = Key::from(private_cookie_password.as_bytes());
    let sessions = Cache::builder()
        .max_capacity(100_000_000)
        .expire_after(Expiration::new(4))
        .build();

    let state = DokkaiState(Arc::new(DokkaiStateCore {
        pool,
        fetcher,
        extractor: HtmlExtractor,
        private_cookie_key,
        sessions,
    }));
    let router = self::router(state).await;
    Ok(router)
}
