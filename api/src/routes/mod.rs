//! API route definitions.
//!
//! This module organizes all HTTP routes for the Pulse API server.

mod ch4;
mod co2;
mod health;
mod index;
mod measurements;

pub use ch4::ch4_routes;
pub use co2::co2_routes;
pub use health::health_routes;
pub use index::index_routes;
