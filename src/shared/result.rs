/// Result alias used across the adapter layer.
/// Typed failures travel as `CatalogError` inside the `anyhow::Error`.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
