//! Catalog domain: entities and the pure rules applied to them
pub mod domain;
pub mod services;

pub use domain::*;
