//! Process-wide logging setup shared by the binaries.

/// Tracing subscriber configuration.
pub mod tracing;

/// Initialize tracing with a caller-chosen fallback filter (e.g. `debug` for `-v`).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(default_filter: &str) {
    tracing::init(default_filter);
}
