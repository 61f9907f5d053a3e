//! Content Pools
//!
//! Static candidate tables grouped by difficulty tier, plus the sampling helpers the
//! generators use. No mutable state: the only runtime structure, the lexicon index,
//! is built once behind a `OnceLock`.

pub mod categories;
pub mod fallback;
pub mod geography;
pub mod lexicon;
pub mod symbols;

/// Items passing `keep`, or the whole pool when the tier filter leaves nothing.
pub fn filter_or_all<'a, T>(pool: &'a [T], keep: impl Fn(&T) -> bool) -> Vec<&'a T> {
    let filtered: Vec<&T> = pool.iter().filter(|item| keep(item)).collect();
    if filtered.is_empty() {
        tracing::debug!(pool_size = pool.len(), "tier filter empty, using full pool");
        pool.iter().collect()
    } else {
        filtered
    }
}
