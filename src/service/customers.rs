//! Customer listing, search and detail queries.

use crate::error::AppError;
use crate::models::{CurrentRental, CustomerDetail, CustomerProfile, CustomerSummary, PastRental};
use crate::pagination::{Page, Pagination};
use crate::sql::{push_limit_offset, FilterBuilder};
use sqlx::{PgPool, Postgres};

/// Upper bound on returned rental history rows.
pub const HISTORY_LIMIT: i64 = 1000;

/// Optional search inputs. `customer_id` is raw text so a non-numeric value can be reported as invalid input.
#[derive(Debug, Default, Clone)]
pub struct CustomerFilters {
    pub customer_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

const PROFILE_SQL: &str = r#"
    SELECT c.customer_id,
           c.store_id::int4 AS store_id,
           c.first_name,
           c.last_name,
           c.email,
           c.activebool AS active,
           c.create_date,
           a.address,
           a.address2,
           a.district,
           ci.city,
           a.postal_code,
           co.country,
           a.phone
    FROM customer AS c
    JOIN address AS a ON a.address_id = c.address_id
    JOIN city AS ci ON ci.city_id = a.city_id
    JOIN country AS co ON co.country_id = ci.country_id
    WHERE c.customer_id = $1
"#;

const CURRENT_SQL: &str = r#"
    SELECT r.rental_id,
           r.inventory_id,
           f.film_id,
           f.title,
           r.rental_date,
           r.rental_date + make_interval(days => f.rental_duration::int4) AS due_date
    FROM rental AS r
    JOIN inventory AS i ON i.inventory_id = r.inventory_id
    JOIN film AS f ON f.film_id = i.film_id
    WHERE r.customer_id = $1 AND r.return_date IS NULL
    ORDER BY r.rental_date DESC, r.rental_id DESC
"#;

const HISTORY_SQL: &str = r#"
    SELECT r.rental_id,
           r.inventory_id,
           f.film_id,
           f.title,
           r.rental_date,
           r.return_date,
           (r.return_date::date - r.rental_date::date) AS days_out
    FROM rental AS r
    JOIN inventory AS i ON i.inventory_id = r.inventory_id
    JOIN film AS f ON f.film_id = i.film_id
    WHERE r.customer_id = $1 AND r.return_date IS NOT NULL
    ORDER BY r.rental_date DESC, r.rental_id DESC
    LIMIT $2
"#;

pub struct CustomerService;

impl CustomerService {
    /// Paginated customers matching the filters, ordered by id, each with rental aggregates.
    pub async fn search(
        pool: &PgPool,
        filters: &CustomerFilters,
        paging: Pagination,
    ) -> Result<Page<CustomerSummary>, AppError> {
        let filter = FilterBuilder::new()
            .equals_id("customer_id", "c.customer_id", filters.customer_id.as_deref())?
            .contains("first_name", "c.first_name", filters.first_name.as_deref())
            .contains("last_name", "c.last_name", filters.last_name.as_deref())
            .build();

        let count_sql = format!("SELECT COUNT(*) FROM customer AS c{}", filter.sql);
        tracing::debug!(sql = %count_sql, params = ?filter.params, "query");
        let total: i64 = filter
            .params
            .iter()
            .fold(sqlx::query_scalar::<Postgres, i64>(&count_sql), |q, p| q.bind(p.value.clone()))
            .fetch_one(pool)
            .await?;

        // Aggregates are computed once for the page's customers, not per row.
        let mut page_sql = format!(
            r#"SELECT c.customer_id, c.store_id::int4 AS store_id, c.first_name, c.last_name, c.email,
                      c.activebool AS active
               FROM customer AS c{}
               ORDER BY c.customer_id ASC"#,
            filter.sql
        );
        let mut params = filter.params;
        push_limit_offset(&mut page_sql, &mut params, paging.limit(), paging.offset());
        let sql = format!(
            r#"WITH page AS ({page_sql}),
               stats AS (
                   SELECT r.customer_id,
                          COUNT(*) AS rentals_count,
                          COUNT(*) FILTER (WHERE r.return_date IS NULL) AS current_rentals,
                          MAX(r.rental_date) AS last_rental_date
                   FROM rental AS r
                   WHERE r.customer_id IN (SELECT customer_id FROM page)
                   GROUP BY r.customer_id
               )
               SELECT p.customer_id, p.store_id, p.first_name, p.last_name, p.email, p.active,
                      COALESCE(s.rentals_count, 0) AS rentals_count,
                      COALESCE(s.current_rentals, 0) AS current_rentals,
                      s.last_rental_date
               FROM page AS p
               LEFT JOIN stats AS s ON s.customer_id = p.customer_id
               ORDER BY p.customer_id ASC"#
        );
        tracing::debug!(sql = %sql, params = ?params, "query");
        let items = params
            .iter()
            .fold(sqlx::query_as::<Postgres, CustomerSummary>(&sql), |q, p| q.bind(p.value.clone()))
            .fetch_all(pool)
            .await?;
        Ok(paging.wrap(total, items))
    }

    /// Profile with current rentals (with due dates) and capped rental history.
    pub async fn detail(pool: &PgPool, customer_id: i64) -> Result<CustomerDetail, AppError> {
        tracing::debug!(sql = %PROFILE_SQL, customer_id, "query");
        let profile = sqlx::query_as::<_, CustomerProfile>(PROFILE_SQL)
            .bind(customer_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("customer {} not found", customer_id)))?;
        tracing::debug!(sql = %CURRENT_SQL, customer_id, "query");
        let current_rentals = sqlx::query_as::<_, CurrentRental>(CURRENT_SQL)
            .bind(customer_id)
            .fetch_all(pool)
            .await?;
        tracing::debug!(sql = %HISTORY_SQL, customer_id, limit = HISTORY_LIMIT, "query");
        let rental_history = sqlx::query_as::<_, PastRental>(HISTORY_SQL)
            .bind(customer_id)
            .bind(HISTORY_LIMIT)
            .fetch_all(pool)
            .await?;
        Ok(CustomerDetail {
            profile,
            current_rentals,
            rental_history,
        })
    }
}
