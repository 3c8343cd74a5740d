//! POST /rentals: rental checkout.

use crate::config::AppConfig;
use crate::error::AppError;
use crate::response::{checkout_created, checkout_failed};
use crate::service::{CheckoutRequest, RentalService};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Response,
    Json,
};
use serde_json::Value;

/// Read an id that may be sent as a JSON integer or a numeric string.
fn id_field(body: &Value, key: &str) -> Result<Option<i32>, AppError> {
    let invalid = || AppError::InvalidInput(format!("{} must be an integer", key));
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => {
            let n = n.as_i64().ok_or_else(invalid)?;
            i32::try_from(n).map(Some).map_err(|_| invalid())
        }
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s.trim().parse::<i32>().map(Some).map_err(|_| invalid()),
        Some(_) => Err(invalid()),
    }
}

/// Validate the body; `store_id`/`staff_id` fall back to configuration.
pub fn parse_checkout(body: &Value, config: &AppConfig) -> Result<CheckoutRequest, AppError> {
    if !body.is_object() {
        return Err(AppError::InvalidInput("body must be a JSON object".into()));
    }
    let customer_id = id_field(body, "customer_id")?;
    let film_id = id_field(body, "film_id")?;
    let (Some(customer_id), Some(film_id)) = (customer_id, film_id) else {
        return Err(AppError::InvalidInput("customer_id and film_id are required".into()));
    };
    Ok(CheckoutRequest {
        customer_id,
        film_id,
        store_id: id_field(body, "store_id")?.unwrap_or(config.store_id),
        staff_id: id_field(body, "staff_id")?.unwrap_or(config.staff_id),
    })
}

pub async fn create(State(state): State<AppState>, payload: Result<Json<Value>, JsonRejection>) -> Response {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => return checkout_failed(AppError::InvalidInput(rejection.body_text())),
    };
    let req = match parse_checkout(&body, &state.config) {
        Ok(req) => req,
        Err(e) => return checkout_failed(e),
    };
    match RentalService::checkout(&state.pool, req).await {
        Ok(c) => checkout_created(c),
        Err(e) => checkout_failed(e),
    }
}
