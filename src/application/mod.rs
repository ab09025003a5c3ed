/// Application layer - Use cases, REST clients and DTOs
///
/// This layer contains the application logic that orchestrates
/// domain services and coordinates with infrastructure through ports.
pub mod blocking;
pub mod connection;
pub mod dto;
pub mod rest;
pub mod use_cases;

pub use blocking::Blocking;
pub use connection::CatalogConnection;
