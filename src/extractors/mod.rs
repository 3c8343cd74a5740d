//! Request extractors shared by handlers.

pub mod paging;

pub use paging::Paging;
