//! Rental checkout: validate the customer, claim a free copy, record the rental. One transaction.

use crate::error::AppError;
use crate::models::Checkout;
use sqlx::PgPool;

/// A validated checkout request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub customer_id: i32,
    pub film_id: i32,
    pub store_id: i32,
    pub staff_id: i32,
}

const CUSTOMER_ACTIVE_SQL: &str = "SELECT activebool FROM customer WHERE customer_id = $1";

// Serializes concurrent checkouts of the same film at the same store.
const LOCK_COPIES_SQL: &str = r#"
    SELECT inventory_id
    FROM inventory
    WHERE film_id = $1 AND store_id = $2
    ORDER BY inventory_id
    FOR UPDATE
"#;

// Runs after the lock is held, so it sees rentals committed by any checkout that held it before.
const AVAILABLE_COPY_SQL: &str = r#"
    SELECT i.inventory_id
    FROM inventory AS i
    LEFT JOIN rental AS r ON r.inventory_id = i.inventory_id AND r.return_date IS NULL
    WHERE i.film_id = $1 AND i.store_id = $2 AND r.rental_id IS NULL
    ORDER BY i.inventory_id
    LIMIT 1
"#;

const INSERT_RENTAL_SQL: &str = r#"
    INSERT INTO rental (rental_date, inventory_id, customer_id, staff_id)
    VALUES (NOW(), $1, $2, $3)
    RETURNING rental_id
"#;

pub const NO_AVAILABLE_COPIES: &str = "no available copies";

pub struct RentalService;

impl RentalService {
    /// Create an active rental for the customer against the lowest-numbered free copy of the film.
    /// Nothing is written unless every step succeeds; dropping the transaction on error rolls it back.
    pub async fn checkout(pool: &PgPool, req: CheckoutRequest) -> Result<Checkout, AppError> {
        let mut tx = pool.begin().await?;

        tracing::debug!(sql = %CUSTOMER_ACTIVE_SQL, customer_id = req.customer_id, "query (tx)");
        let active: Option<bool> = sqlx::query_scalar(CUSTOMER_ACTIVE_SQL)
            .bind(req.customer_id)
            .fetch_optional(&mut *tx)
            .await?;
        match active {
            None => {
                return Err(AppError::NotFound(format!("customer {} not found", req.customer_id)));
            }
            Some(false) => {
                return Err(AppError::InvalidState(format!("customer {} is inactive", req.customer_id)));
            }
            Some(true) => {}
        }

        tracing::debug!(sql = %LOCK_COPIES_SQL, film_id = req.film_id, store_id = req.store_id, "query (tx)");
        sqlx::query(LOCK_COPIES_SQL)
            .bind(req.film_id)
            .bind(req.store_id)
            .execute(&mut *tx)
            .await?;

        tracing::debug!(sql = %AVAILABLE_COPY_SQL, film_id = req.film_id, store_id = req.store_id, "query (tx)");
        let inventory_id: i32 = sqlx::query_scalar(AVAILABLE_COPY_SQL)
            .bind(req.film_id)
            .bind(req.store_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::InvalidState(NO_AVAILABLE_COPIES.to_string()))?;

        tracing::debug!(sql = %INSERT_RENTAL_SQL, inventory_id, customer_id = req.customer_id, staff_id = req.staff_id, "query (tx)");
        let rental_id: i32 = sqlx::query_scalar(INSERT_RENTAL_SQL)
            .bind(inventory_id)
            .bind(req.customer_id)
            .bind(req.staff_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(rental_id, inventory_id, customer_id = req.customer_id, film_id = req.film_id, "rental created");
        Ok(Checkout {
            rental_id,
            inventory_id,
            customer_id: req.customer_id,
            film_id: req.film_id,
        })
    }
}
