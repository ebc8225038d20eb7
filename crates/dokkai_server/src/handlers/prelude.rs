//! Frequently used imports for handlers.

pub use crate::{
    authentication::Authentication,
    error::{DokkaiResult, EyreResult},
    schema,
    utils::diesel::{eq, query, PostgresChunks},
    DokkaiState,
};
pub use axum::{
    extract::{Path, State},
    Json,
};
pub use diesel::prelude::*;
pub use dokkai_api::{request as req, response as res};
pub use eyre::WrapErr;
pub use tracing::instrument;
