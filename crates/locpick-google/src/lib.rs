//! Google Maps web-service client backing the location selector.

pub mod client;
pub mod error;
pub mod types;

pub use client::GoogleMapsClient;
pub use error::GoogleMapsError;
