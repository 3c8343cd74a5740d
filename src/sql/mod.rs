//! Safe SQL building: fixed SQL text from code, user values as parameters.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
