//! End-to-end tests against PostgreSQL.
//!
//! Run only when `TEST_DATABASE_URL` is set. Each test loads `fixtures/schema.sql` and
//! `fixtures/seed.sql` into its own schema and drops it afterwards.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use rental_desk::service::{CheckoutRequest, CustomerFilters, FilmFilters, NO_AVAILABLE_COPIES};
use rental_desk::{
    app, ActorService, AppConfig, AppError, AppState, CustomerService, FilmService, Pagination, RentalService,
};
use serde_json::{json, Value};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::str::FromStr;
use tower::ServiceExt;

const SCHEMA_SQL: &str = include_str!("fixtures/schema.sql");
const SEED_SQL: &str = include_str!("fixtures/seed.sql");

struct TestDb {
    admin: PgPool,
    pool: PgPool,
    schema: String,
    url: String,
}

impl TestDb {
    async fn setup() -> Option<TestDb> {
        let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
            eprintln!("TEST_DATABASE_URL not set; skipping database test");
            return None;
        };
        let schema = format!("rental_desk_test_{}", uuid::Uuid::new_v4().simple());
        let admin = PgPool::connect(&url).await.expect("connect admin pool");
        sqlx::query(&format!("CREATE SCHEMA {}", schema))
            .execute(&admin)
            .await
            .expect("create schema");
        let options = PgConnectOptions::from_str(&url)
            .expect("parse TEST_DATABASE_URL")
            .options([("search_path", schema.as_str())]);
        let pool = PgPoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .expect("connect test pool");
        sqlx::raw_sql(SCHEMA_SQL).execute(&pool).await.expect("load schema");
        sqlx::raw_sql(SEED_SQL).execute(&pool).await.expect("load seed");
        Some(TestDb { admin, pool, schema, url })
    }

    fn state(&self) -> AppState {
        AppState::new(
            self.pool.clone(),
            AppConfig {
                database_url: self.url.clone(),
                bind_addr: "127.0.0.1:0".into(),
                max_connections: 4,
                cors_origins: Vec::new(),
                store_id: 1,
                staff_id: 1,
            },
        )
    }

    fn checkout(customer_id: i32, film_id: i32) -> CheckoutRequest {
        CheckoutRequest {
            customer_id,
            film_id,
            store_id: 1,
            staff_id: 1,
        }
    }

    async fn rental_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM rental")
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }

    async fn teardown(self) {
        self.pool.close().await;
        sqlx::query(&format!("DROP SCHEMA {} CASCADE", self.schema))
            .execute(&self.admin)
            .await
            .expect("drop schema");
    }
}

async fn call(state: AppState, req: Request<Body>) -> (StatusCode, Value) {
    let response = app(state).oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn top5_reports() {
    let Some(db) = TestDb::setup().await else { return };

    let films = FilmService::top5(&db.pool).await.unwrap();
    let ids: Vec<i32> = films.iter().map(|f| f.film_id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(films[0].rentals_count, 3);

    let actors = ActorService::top5(&db.pool).await.unwrap();
    let names: Vec<&str> = actors.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["JENNIFER DAVIS", "NICK WAHLBERG", "PENELOPE GUINESS", "BETTE NICHOLSON", "ED CHASE"]
    );
    assert!(actors.windows(2).all(|w| w[0].films_count >= w[1].films_count));

    db.teardown().await;
}

#[tokio::test]
async fn film_detail_shape() {
    let Some(db) = TestDb::setup().await else { return };

    let detail = FilmService::detail(&db.pool, 1, 1).await.unwrap();
    assert_eq!(detail.film.title, "ACADEMY DINOSAUR");
    assert_eq!(detail.film.categories.as_deref(), Some("Action, Drama"));
    assert_eq!(detail.film.language, "English");
    assert_eq!(detail.film.rental_rate, "0.99");
    assert_eq!(detail.film.rentals_count, 3);
    assert_eq!(detail.film.total_copies, 2);
    assert_eq!(detail.film.available_copies, 2);
    let actor_names: Vec<&str> = detail.actors.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(actor_names, vec!["ED CHASE", "NICK WAHLBERG", "PENELOPE GUINESS"]);

    let rented_out = FilmService::detail(&db.pool, 2, 1).await.unwrap();
    assert_eq!((rented_out.film.total_copies, rented_out.film.available_copies), (1, 0));

    let err = FilmService::detail(&db.pool, 999, 1).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let (status, body) = call(db.state(), get("/films/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");

    db.teardown().await;
}

#[tokio::test]
async fn actor_detail_lists_most_rented_films() {
    let Some(db) = TestDb::setup().await else { return };

    let detail = ActorService::detail(&db.pool, 1).await.unwrap();
    assert_eq!(detail.actor.name, "PENELOPE GUINESS");
    assert_eq!(detail.actor.films_count, 3);
    let ids: Vec<i32> = detail.top_films.iter().map(|f| f.film_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    assert!(matches!(ActorService::detail(&db.pool, 404).await, Err(AppError::NotFound(_))));

    db.teardown().await;
}

#[tokio::test]
async fn film_search_filters_and_paginates() {
    let Some(db) = TestDb::setup().await else { return };

    let comedies = FilmFilters {
        genre: Some("comedy".into()),
        ..Default::default()
    };
    let page = FilmService::search(&db.pool, &comedies, Pagination::default()).await.unwrap();
    let ids: Vec<i32> = page.items.iter().map(|f| f.film_id).collect();
    assert_eq!(ids, vec![2, 3, 6]);
    assert_eq!(page.total, 3);

    let combined = FilmFilters {
        genre: Some("Comedy".into()),
        actor: Some("penelope".into()),
        title: Some("a".into()),
    };
    let page = FilmService::search(&db.pool, &combined, Pagination::default()).await.unwrap();
    let ids: Vec<i32> = page.items.iter().map(|f| f.film_id).collect();
    assert_eq!(ids, vec![2, 3]);

    let page = FilmService::search(&db.pool, &FilmFilters::default(), Pagination::new(Some(2), Some(3)))
        .await
        .unwrap();
    assert_eq!(page.total, 7);
    assert_eq!(page.total_pages, 3);
    let ids: Vec<i32> = page.items.iter().map(|f| f.film_id).collect();
    assert_eq!(ids, vec![4, 5, 6]);

    let none = FilmFilters {
        title: Some("100%".into()),
        ..Default::default()
    };
    let page = FilmService::search(&db.pool, &none, Pagination::default()).await.unwrap();
    assert_eq!((page.total, page.total_pages), (0, 0));

    db.teardown().await;
}

#[tokio::test]
async fn customer_search_and_aggregates() {
    let Some(db) = TestDb::setup().await else { return };

    let by_id = CustomerFilters {
        customer_id: Some("7".into()),
        ..Default::default()
    };
    let page = CustomerService::search(&db.pool, &by_id, Pagination::default()).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].customer_id, 7);

    let by_name = CustomerFilters {
        first_name: Some("mar".into()),
        ..Default::default()
    };
    let page = CustomerService::search(&db.pool, &by_name, Pagination::default()).await.unwrap();
    let ids: Vec<i32> = page.items.iter().map(|c| c.customer_id).collect();
    assert_eq!(ids, vec![1, 7]);
    let mary = &page.items[0];
    assert_eq!((mary.rentals_count, mary.current_rentals), (3, 1));
    assert_eq!(mary.last_rental_date.unwrap().to_rfc3339(), "2024-03-03T10:00:00+00:00");

    let (status, body) = call(db.state(), get("/customers?page=2&pageSize=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 5);
    assert_eq!(body["totalPages"], 3);
    assert_eq!(body["items"][0]["customer_id"], 3);
    assert_eq!(body["items"][0]["rentals_count"], 0);

    db.teardown().await;
}

#[tokio::test]
async fn customer_detail_splits_current_and_history() {
    let Some(db) = TestDb::setup().await else { return };

    let detail = CustomerService::detail(&db.pool, 1).await.unwrap();
    assert_eq!(detail.profile.city, "Lethbridge");
    assert_eq!(detail.profile.country, "Canada");

    assert_eq!(detail.current_rentals.len(), 1);
    let current = &detail.current_rentals[0];
    assert_eq!(current.film_id, 2);
    assert_eq!((current.due_date - current.rental_date).num_days(), 5);

    let history: Vec<i32> = detail.rental_history.iter().map(|r| r.rental_id).collect();
    assert_eq!(history, vec![6, 1]);
    assert_eq!(detail.rental_history[0].days_out, 7);
    assert_eq!(detail.rental_history[1].days_out, 3);

    assert!(matches!(CustomerService::detail(&db.pool, 999).await, Err(AppError::NotFound(_))));

    db.teardown().await;
}

#[tokio::test]
async fn checkout_over_http_creates_active_rental() {
    let Some(db) = TestDb::setup().await else { return };

    let req = Request::builder()
        .method(Method::POST)
        .uri("/rentals")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"customer_id": 1, "film_id": 1}).to_string()))
        .unwrap();
    let (status, body) = call(db.state(), req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["ok"], true);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("film 1"));
    assert!(message.contains("customer 1"));
    assert_eq!(body["inventory_id"], 1);

    let rental_id = body["rental_id"].as_i64().unwrap() as i32;
    let row: (i32, i32, Option<chrono::DateTime<chrono::Utc>>) =
        sqlx::query_as("SELECT customer_id, inventory_id, return_date FROM rental WHERE rental_id = $1")
            .bind(rental_id)
            .fetch_one(&db.pool)
            .await
            .unwrap();
    assert_eq!(row, (1, 1, None));

    db.teardown().await;
}

#[tokio::test]
async fn checkout_rejections_write_nothing() {
    let Some(db) = TestDb::setup().await else { return };
    let before = db.rental_count().await;

    let err = RentalService::checkout(&db.pool, TestDb::checkout(999, 1)).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = RentalService::checkout(&db.pool, TestDb::checkout(3, 1)).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));

    let err = RentalService::checkout(&db.pool, TestDb::checkout(1, 2)).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidState(ref m) if m == NO_AVAILABLE_COPIES));

    assert_eq!(db.rental_count().await, before);
    db.teardown().await;
}

#[tokio::test]
async fn concurrent_checkout_of_last_copy_has_one_winner() {
    let Some(db) = TestDb::setup().await else { return };

    let (a, b) = tokio::join!(
        RentalService::checkout(&db.pool, TestDb::checkout(1, 7)),
        RentalService::checkout(&db.pool, TestDb::checkout(2, 7)),
    );
    let outcomes = [a, b];
    let wins = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1);
    let loser = outcomes.iter().find_map(|r| r.as_ref().err()).unwrap();
    assert!(matches!(loser, AppError::InvalidState(m) if m == NO_AVAILABLE_COPIES));

    let active: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rental WHERE inventory_id = 9 AND return_date IS NULL")
        .fetch_one(&db.pool)
        .await
        .unwrap();
    assert_eq!(active, 1);

    db.teardown().await;
}
