//! Customer handlers: list/search and detail.

use crate::error::AppError;
use crate::extractors::Paging;
use crate::models::{CustomerDetail, CustomerSummary};
use crate::pagination::Page;
use crate::service::{CustomerFilters, CustomerService};
use crate::sql::parse_id;
use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct CustomerSearchQuery {
    pub customer_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// GET /customers and GET /customers/search?customer_id=&first_name=&last_name=&page=&pageSize=
pub async fn search(
    State(state): State<AppState>,
    Paging(paging): Paging,
    query: Result<Query<CustomerSearchQuery>, QueryRejection>,
) -> Result<Json<Page<CustomerSummary>>, AppError> {
    let Query(q) = query.map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;
    let filters = CustomerFilters {
        customer_id: q.customer_id,
        first_name: q.first_name,
        last_name: q.last_name,
    };
    Ok(Json(CustomerService::search(&state.pool, &filters, paging).await?))
}

/// GET /customers/:id
pub async fn detail(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<CustomerDetail>, AppError> {
    let customer_id = parse_id("customer id", &id_str)?;
    Ok(Json(CustomerService::detail(&state.pool, customer_id).await?))
}
