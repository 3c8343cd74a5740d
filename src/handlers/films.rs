//! Film handlers: top 5, detail, search.

use crate::error::AppError;
use crate::extractors::Paging;
use crate::models::{FilmDetail, FilmSearchItem, TopFilm};
use crate::pagination::Page;
use crate::service::{FilmFilters, FilmService};
use crate::sql::parse_id;
use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct FilmSearchQuery {
    pub title: Option<String>,
    pub actor: Option<String>,
    pub genre: Option<String>,
}

/// GET /films/top5
pub async fn top5(State(state): State<AppState>) -> Result<Json<Vec<TopFilm>>, AppError> {
    Ok(Json(FilmService::top5(&state.pool).await?))
}

/// GET /films/:id
pub async fn detail(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<FilmDetail>, AppError> {
    let film_id = parse_id("film id", &id_str)?;
    let film = FilmService::detail(&state.pool, film_id, state.config.store_id).await?;
    Ok(Json(film))
}

/// GET /films/search?title=&actor=&genre=&page=&pageSize=
pub async fn search(
    State(state): State<AppState>,
    Paging(paging): Paging,
    query: Result<Query<FilmSearchQuery>, QueryRejection>,
) -> Result<Json<Page<FilmSearchItem>>, AppError> {
    let Query(q) = query.map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;
    let filters = FilmFilters {
        title: q.title,
        actor: q.actor,
        genre: q.genre,
    };
    Ok(Json(FilmService::search(&state.pool, &filters, paging).await?))
}
