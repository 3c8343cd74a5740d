//! Rental-desk API routes. Static segments (`top5`, `search`) take priority over `:id`.

use crate::handlers::{actors, customers, films, rentals};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/films/top5", get(films::top5))
        .route("/films/search", get(films::search))
        .route("/films/:id", get(films::detail))
        .route("/actors/top5", get(actors::top5))
        .route("/actors/:id", get(actors::detail))
        .route("/customers", get(customers::search))
        .route("/customers/search", get(customers::search))
        .route("/customers/:id", get(customers::detail))
        .route("/rentals", post(rentals::create))
        .with_state(state)
}
