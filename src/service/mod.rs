//! Query services, one per area. Each takes a `PgPool` and returns typed rows.

mod actors;
mod customers;
mod films;
mod rentals;

pub use actors::ActorService;
pub use customers::{CustomerFilters, CustomerService, HISTORY_LIMIT};
pub use films::{FilmFilters, FilmService};
pub use rentals::{CheckoutRequest, RentalService, NO_AVAILABLE_COPIES};
