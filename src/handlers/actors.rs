//! Actor handlers: top 5 and detail.

use crate::error::AppError;
use crate::models::{ActorDetail, TopActor};
use crate::service::ActorService;
use crate::sql::parse_id;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

/// GET /actors/top5
pub async fn top5(State(state): State<AppState>) -> Result<Json<Vec<TopActor>>, AppError> {
    Ok(Json(ActorService::top5(&state.pool).await?))
}

/// GET /actors/:id
pub async fn detail(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<ActorDetail>, AppError> {
    let actor_id = parse_id("actor id", &id_str)?;
    Ok(Json(ActorService::detail(&state.pool, actor_id).await?))
}
