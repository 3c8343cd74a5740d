//! Row shapes returned by the API.
//!
//! Column casts in the service queries (`::int4`, `::text`) line up with these field types;
//! pagila stores years and durations as domains/smallint and money as numeric.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Serialize, FromRow)]
pub struct TopFilm {
    pub film_id: i32,
    pub title: String,
    pub rentals_count: i64,
}

#[derive(Debug, Serialize, FromRow)]
pub struct TopActor {
    pub actor_id: i32,
    pub name: String,
    pub films_count: i64,
}

#[derive(Debug, Serialize, FromRow)]
pub struct ActorRef {
    pub actor_id: i32,
    pub name: String,
}

#[derive(Debug, Serialize, FromRow)]
pub struct FilmRow {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    /// Distinct category names, alphabetical, joined with ", ".
    pub categories: Option<String>,
    pub language: String,
    pub rental_duration: i32,
    pub rental_rate: String,
    pub duration: Option<i32>,
    pub replacement_cost: String,
    pub rating: Option<String>,
    pub special_features: Option<String>,
    pub last_update: DateTime<Utc>,
    pub rentals_count: i64,
    pub total_copies: i64,
    pub available_copies: i64,
}

#[derive(Debug, Serialize)]
pub struct FilmDetail {
    #[serde(flatten)]
    pub film: FilmRow,
    pub actors: Vec<ActorRef>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct ActorRow {
    pub actor_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub name: String,
    pub films_count: i64,
}

#[derive(Debug, Serialize)]
pub struct ActorDetail {
    #[serde(flatten)]
    pub actor: ActorRow,
    pub top_films: Vec<TopFilm>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct FilmSearchItem {
    pub film_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    pub rating: Option<String>,
    pub categories: Option<String>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct CustomerSummary {
    pub customer_id: i32,
    pub store_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub active: bool,
    pub rentals_count: i64,
    pub current_rentals: i64,
    pub last_rental_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct CustomerProfile {
    pub customer_id: i32,
    pub store_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub active: bool,
    pub create_date: NaiveDate,
    pub address: String,
    pub address2: Option<String>,
    pub district: String,
    pub city: String,
    pub postal_code: Option<String>,
    pub country: String,
    pub phone: String,
}

#[derive(Debug, Serialize, FromRow)]
pub struct CurrentRental {
    pub rental_id: i32,
    pub inventory_id: i32,
    pub film_id: i32,
    pub title: String,
    pub rental_date: DateTime<Utc>,
    /// rental_date + film.rental_duration days.
    pub due_date: DateTime<Utc>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct PastRental {
    pub rental_id: i32,
    pub inventory_id: i32,
    pub film_id: i32,
    pub title: String,
    pub rental_date: DateTime<Utc>,
    pub return_date: DateTime<Utc>,
    /// Whole days between rental and return dates.
    pub days_out: i32,
}

#[derive(Debug, Serialize)]
pub struct CustomerDetail {
    #[serde(flatten)]
    pub profile: CustomerProfile,
    pub current_rentals: Vec<CurrentRental>,
    pub rental_history: Vec<PastRental>,
}

/// Result of a successful checkout.
#[derive(Debug, Clone, Serialize)]
pub struct Checkout {
    pub rental_id: i32,
    pub inventory_id: i32,
    pub customer_id: i32,
    pub film_id: i32,
}
