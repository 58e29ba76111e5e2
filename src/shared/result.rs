/// Type alias for Result with anyhow::Error as the error type.
/// Adapters and use cases propagate through this; typed failures live in `DepGraphError`.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
