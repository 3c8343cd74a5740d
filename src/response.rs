//! Response envelope for the rental checkout endpoint.

use crate::error::AppError;
use crate::models::Checkout;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct CheckoutOk {
    pub ok: bool,
    pub message: String,
    pub rental_id: i32,
    pub inventory_id: i32,
}

#[derive(Serialize, Debug)]
pub struct CheckoutFailed {
    pub ok: bool,
    pub error: String,
}

pub fn checkout_message(c: &Checkout) -> String {
    format!(
        "film {} rented to customer {} (inventory {})",
        c.film_id, c.customer_id, c.inventory_id
    )
}

/// 201 with `{ok: true, message, rental_id, inventory_id}`.
pub fn checkout_created(c: Checkout) -> Response {
    (
        StatusCode::CREATED,
        Json(CheckoutOk {
            ok: true,
            message: checkout_message(&c),
            rental_id: c.rental_id,
            inventory_id: c.inventory_id,
        }),
    )
        .into_response()
}

/// Error status from the taxonomy with `{ok: false, error}`.
pub fn checkout_failed(err: AppError) -> Response {
    let status = err.status();
    if status.is_client_error() {
        tracing::warn!(error = %err, "checkout rejected");
    }
    (
        status,
        Json(CheckoutFailed {
            ok: false,
            error: err.public_message(),
        }),
    )
        .into_response()
}
