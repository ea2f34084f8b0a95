// ── Query cache ──
//
// Explicit cache table keyed by operation + parameters, with per-key
// staleness, retention, retry budget, and single-flight fetching.

mod key;
mod table;

pub use key::{QueryKey, QueryPolicy};
pub use table::QueryCache;
