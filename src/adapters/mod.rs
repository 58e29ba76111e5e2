/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the outbound ports,
/// providing the actual integration with the registry, the file system
/// and the terminal.
pub mod outbound;
