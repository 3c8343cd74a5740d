//! Extract clamped pagination from the `page` and `pageSize` query parameters.

use crate::pagination::Pagination;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use std::collections::HashMap;

pub const PAGE_PARAM: &str = "page";
pub const PAGE_SIZE_PARAM: &str = "pageSize";

/// Never rejects: unparseable values fall back to the defaults.
#[derive(Clone, Copy, Debug)]
pub struct Paging(pub Pagination);

#[async_trait]
impl<S> FromRequestParts<S> for Paging
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let params = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map(|Query(m)| m)
            .unwrap_or_default();
        Ok(Paging(Pagination::from_raw(
            params.get(PAGE_PARAM).map(String::as_str),
            params.get(PAGE_SIZE_PARAM).map(String::as_str),
        )))
    }
}
