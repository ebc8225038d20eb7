//! Fetches and processes a single article from the command line, storing the result.

use diesel::prelude::*;
use dokkai::article;
use dokkai_server::domain::articles::{self, HtmlExtractor, HttpFetcher};
use eyre::WrapErr;
use std::{env, time::Duration};

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let url = env::args()
        .nth(1)
        .ok_or_else(|| eyre::eyre!("Missing argument: article url"))?;
    let database_url = env::var("DATABASE_URL").wrap_err("Missing DATABASE_URL")?;
    let mut conn = PgConnection::establish(&database_url)?;

    let fetcher = HttpFetcher::new("dokkai", Duration::from_secs(30))?;
    let processed = article::process_article(&url, &fetcher, &HtmlExtractor)
        .wrap_err_with(|| format!("Failed to process article at {url}"))?;
    let id = articles::store_article(&mut conn, &url, &processed)?;

    println!(
        "stored article {id}: {}",
        processed.title.as_deref().unwrap_or("(no title)")
    );
    println!("total kanji: {}", processed.kanji_total);
    let mut counts = processed.kanji_counts.into_iter().collect::<Vec<_>>();
    counts.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    for (kanji, total) in counts.into_iter().take(20) {
        println!("{kanji}: {total}");
    }
    Ok(())
}
