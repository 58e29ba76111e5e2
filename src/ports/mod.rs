/// Ports module defining interfaces for hexagonal architecture
///
/// The application core only depends on these driven ports; the adapters
/// layer provides their implementations.
pub mod outbound;
