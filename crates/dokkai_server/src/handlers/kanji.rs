//! /kanji

use super::prelude::*;
use crate::queries;
use dokkai::kanji::is_kanji;

// handlers

/// Gets the user's known kanji.
#[instrument]
pub async fn known(
    State(state): State<DokkaiState>,
    user: Authentication,
) -> DokkaiResult<Json<Vec<res::KnownKanji>>> {
    let user_id = user.user_id;
    let known_kanji = tokio::task::spawn_blocking(move || {
        let mut conn = state.pool.get()?;

        let known_kanji = queries::known_kanji(&mut conn, user_id)?;

        EyreResult::Ok(known_kanji)
    })
    .await??;

    let mut known_kanji = known_kanji
        .into_iter()
        .map(|kanji| res::KnownKanji { kanji })
        .collect::<Vec<_>>();
    known_kanji.sort_unstable_by_key(|known| known.kanji);
    Ok(Json(known_kanji))
}

/// Marks a kanji as known for the user.
#[instrument]
pub async fn add_known(
    State(state): State<DokkaiState>,
    user: Authentication,
    new_known_kanji: Json<req::NewKnownKanji>,
) -> DokkaiResult<()> {
    use schema::known_kanji as kk;
    tracing::info!("Adding known kanji");

    let req::NewKnownKanji { kanji } = new_known_kanji.0;
    if !is_kanji(kanji) {
        return Err(eyre::eyre!("Not a kanji: {kanji}").into());
    }

    let user_id = user.user_id;
    tokio::task::spawn_blocking(move || {
        let mut conn = state.pool.get()?;

        let kanji = kanji.to_string();
        diesel::insert_into(kk::table)
            .values(eq!(kk, user_id, kanji))
            .on_conflict((kk::user_id, kk::kanji))
            .do_nothing()
            .execute(&mut conn)?;

        EyreResult::Ok(())
    })
    .await??;

    Ok(())
}
