/// Sink contract for consuming per-frame state batches.
pub mod sink;
/// Per-frame output state types.
pub mod state;
