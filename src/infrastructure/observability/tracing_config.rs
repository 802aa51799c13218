/// Logging configuration applied at startup. Built from the application
/// settings by the caller; this layer does not read the environment itself.
pub struct TracingConfig {
    /// Base filter level, overridable per-run via `RUST_LOG`.
    pub level: String,
    pub json_format: bool,
}
