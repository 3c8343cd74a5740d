//! Film reporting, detail and search queries.

use crate::error::AppError;
use crate::models::{ActorRef, FilmDetail, FilmRow, FilmSearchItem, TopFilm};
use crate::pagination::{Page, Pagination};
use crate::sql::{push_limit_offset, FilterBuilder};
use sqlx::{PgPool, Postgres};

/// Optional search inputs for film search.
#[derive(Debug, Default, Clone)]
pub struct FilmFilters {
    pub title: Option<String>,
    pub actor: Option<String>,
    pub genre: Option<String>,
}

const TOP5_SQL: &str = r#"
    SELECT f.film_id, f.title, COUNT(r.rental_id) AS rentals_count
    FROM film AS f
    JOIN inventory AS i ON i.film_id = f.film_id
    JOIN rental AS r ON r.inventory_id = i.inventory_id
    GROUP BY f.film_id, f.title
    ORDER BY rentals_count DESC, f.film_id ASC
    LIMIT 5
"#;

const DETAIL_SQL: &str = r#"
    SELECT f.film_id AS id,
           f.title,
           f.description,
           f.release_year::int4 AS release_year,
           (SELECT string_agg(DISTINCT c.name, ', ' ORDER BY c.name)
              FROM film_category AS fc
              JOIN category AS c ON c.category_id = fc.category_id
             WHERE fc.film_id = f.film_id) AS categories,
           l.name::text AS language,
           f.rental_duration::int4 AS rental_duration,
           f.rental_rate::text AS rental_rate,
           f.length::int4 AS duration,
           f.replacement_cost::text AS replacement_cost,
           f.rating::text AS rating,
           array_to_string(f.special_features, ',') AS special_features,
           f.last_update,
           (SELECT COUNT(*)
              FROM rental AS r
              JOIN inventory AS i ON i.inventory_id = r.inventory_id
             WHERE i.film_id = f.film_id) AS rentals_count,
           (SELECT COUNT(*)
              FROM inventory AS i
             WHERE i.film_id = f.film_id AND i.store_id = $2) AS total_copies,
           (SELECT COUNT(*)
              FROM inventory AS i
             WHERE i.film_id = f.film_id AND i.store_id = $2
               AND NOT EXISTS (SELECT 1 FROM rental AS r
                                WHERE r.inventory_id = i.inventory_id AND r.return_date IS NULL)) AS available_copies
    FROM film AS f
    JOIN language AS l ON l.language_id = f.language_id
    WHERE f.film_id = $1
"#;

const ACTORS_SQL: &str = r#"
    SELECT a.actor_id, a.first_name || ' ' || a.last_name AS name
    FROM actor AS a
    JOIN film_actor AS fa ON fa.actor_id = a.actor_id
    WHERE fa.film_id = $1
    ORDER BY name, a.actor_id
"#;

pub struct FilmService;

impl FilmService {
    /// Five most-rented films of all time.
    pub async fn top5(pool: &PgPool) -> Result<Vec<TopFilm>, AppError> {
        tracing::debug!(sql = %TOP5_SQL, "query");
        let rows = sqlx::query_as::<_, TopFilm>(TOP5_SQL).fetch_all(pool).await?;
        Ok(rows)
    }

    /// Film row with categories, copy counts at `store_id`, rental count and actors.
    pub async fn detail(pool: &PgPool, film_id: i64, store_id: i32) -> Result<FilmDetail, AppError> {
        tracing::debug!(sql = %DETAIL_SQL, film_id, store_id, "query");
        let film = sqlx::query_as::<_, FilmRow>(DETAIL_SQL)
            .bind(film_id)
            .bind(store_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("film {} not found", film_id)))?;
        tracing::debug!(sql = %ACTORS_SQL, film_id, "query");
        let actors = sqlx::query_as::<_, ActorRef>(ACTORS_SQL)
            .bind(film_id)
            .fetch_all(pool)
            .await?;
        Ok(FilmDetail { film, actors })
    }

    /// Paginated search by title, actor name and genre substrings, ordered by film id.
    pub async fn search(
        pool: &PgPool,
        filters: &FilmFilters,
        paging: Pagination,
    ) -> Result<Page<FilmSearchItem>, AppError> {
        let filter = FilterBuilder::new()
            .contains("title", "f.title", filters.title.as_deref())
            .exists_contains(
                "actor",
                "film_actor AS fa JOIN actor AS a ON a.actor_id = fa.actor_id",
                "fa.film_id = f.film_id",
                "(a.first_name || ' ' || a.last_name)",
                filters.actor.as_deref(),
            )
            .exists_contains(
                "genre",
                "film_category AS fc JOIN category AS c ON c.category_id = fc.category_id",
                "fc.film_id = f.film_id",
                "c.name",
                filters.genre.as_deref(),
            )
            .build();

        let count_sql = format!("SELECT COUNT(*) FROM film AS f{}", filter.sql);
        tracing::debug!(sql = %count_sql, params = ?filter.params, "query");
        let total: i64 = filter
            .params
            .iter()
            .fold(sqlx::query_scalar::<Postgres, i64>(&count_sql), |q, p| q.bind(p.value.clone()))
            .fetch_one(pool)
            .await?;

        let mut sql = format!(
            r#"SELECT f.film_id,
                      f.title,
                      f.description,
                      f.release_year::int4 AS release_year,
                      f.rating::text AS rating,
                      (SELECT string_agg(DISTINCT c.name, ', ' ORDER BY c.name)
                         FROM film_category AS fc
                         JOIN category AS c ON c.category_id = fc.category_id
                        WHERE fc.film_id = f.film_id) AS categories
               FROM film AS f{}
               ORDER BY f.film_id ASC"#,
            filter.sql
        );
        let mut params = filter.params;
        push_limit_offset(&mut sql, &mut params, paging.limit(), paging.offset());
        tracing::debug!(sql = %sql, params = ?params, "query");
        let items = params
            .iter()
            .fold(sqlx::query_as::<Postgres, FilmSearchItem>(&sql), |q, p| q.bind(p.value.clone()))
            .fetch_all(pool)
            .await?;
        Ok(paging.wrap(total, items))
    }
}
