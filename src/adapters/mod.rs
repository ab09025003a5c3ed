/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the ports,
/// providing the actual integration with the catalog, the filesystem
/// and the console.
pub mod outbound;
