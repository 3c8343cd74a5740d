//! Actor reporting and detail queries.

use crate::error::AppError;
use crate::models::{ActorDetail, ActorRow, TopActor, TopFilm};
use sqlx::PgPool;

const TOP5_SQL: &str = r#"
    SELECT a.actor_id, a.first_name || ' ' || a.last_name AS name, COUNT(DISTINCT fa.film_id) AS films_count
    FROM actor AS a
    JOIN film_actor AS fa ON fa.actor_id = a.actor_id
    GROUP BY a.actor_id, a.first_name, a.last_name
    ORDER BY films_count DESC, name ASC
    LIMIT 5
"#;

const ACTOR_SQL: &str = r#"
    SELECT a.actor_id,
           a.first_name,
           a.last_name,
           a.first_name || ' ' || a.last_name AS name,
           (SELECT COUNT(DISTINCT fa.film_id) FROM film_actor AS fa WHERE fa.actor_id = a.actor_id) AS films_count
    FROM actor AS a
    WHERE a.actor_id = $1
"#;

const TOP_FILMS_SQL: &str = r#"
    SELECT f.film_id, f.title, COUNT(r.rental_id) AS rentals_count
    FROM film_actor AS fa
    JOIN film AS f ON f.film_id = fa.film_id
    LEFT JOIN inventory AS i ON i.film_id = f.film_id
    LEFT JOIN rental AS r ON r.inventory_id = i.inventory_id
    WHERE fa.actor_id = $1
    GROUP BY f.film_id, f.title
    ORDER BY rentals_count DESC, f.film_id ASC
    LIMIT 5
"#;

pub struct ActorService;

impl ActorService {
    /// Five actors with the most distinct films; ties by name.
    pub async fn top5(pool: &PgPool) -> Result<Vec<TopActor>, AppError> {
        tracing::debug!(sql = %TOP5_SQL, "query");
        let rows = sqlx::query_as::<_, TopActor>(TOP5_SQL).fetch_all(pool).await?;
        Ok(rows)
    }

    /// Actor with film count and their five most-rented films.
    pub async fn detail(pool: &PgPool, actor_id: i64) -> Result<ActorDetail, AppError> {
        tracing::debug!(sql = %ACTOR_SQL, actor_id, "query");
        let actor = sqlx::query_as::<_, ActorRow>(ACTOR_SQL)
            .bind(actor_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("actor {} not found", actor_id)))?;
        tracing::debug!(sql = %TOP_FILMS_SQL, actor_id, "query");
        let top_films = sqlx::query_as::<_, TopFilm>(TOP_FILMS_SQL)
            .bind(actor_id)
            .fetch_all(pool)
            .await?;
        Ok(ActorDetail { actor, top_films })
    }
}
