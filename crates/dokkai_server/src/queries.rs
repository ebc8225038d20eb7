//! Reusable database query functions.

use diesel::prelude::*;
use std::collections::HashSet;

pub fn known_kanji(conn: &mut PgConnection, user_id: i32) -> eyre::Result<HashSet<char>> {
    use crate::schema::known_kanji as kk;

    let known_kanji = kk::table
        .select(kk::kanji)
        .filter(kk::user_id.eq(user_id))
        .get_results::<String>(conn)?
        .into_iter()
        .filter_map(|kanji| kanji.chars().next())
        .collect::<HashSet<char>>();

    Ok(known_kanji)
}
