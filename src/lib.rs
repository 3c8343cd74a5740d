//! Rental desk: REST API over the sakila/pagila video-rental schema on PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;

pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use pagination::{Page, Pagination};
pub use routes::{api_routes, app, common_routes};
pub use service::{ActorService, CustomerService, FilmService, RentalService};
pub use state::AppState;
