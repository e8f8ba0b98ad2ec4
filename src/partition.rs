//! Splitting the input list across workers

/// Upper bound on the number of worker chunks
pub const MAX_WORKERS: usize = 32;

/// Default number of chunks: `min(32, cpus + 4)`.
///
/// Reading files is IO-bound, so a few more workers than cores pays off.
pub fn default_worker_count() -> usize {
    MAX_WORKERS.min(num_cpus::get() + 4)
}

/// Split `items` into exactly `count` contiguous chunks.
///
/// Chunk lengths differ by at most one; the first `len % count` chunks take
/// the extra element. Surplus chunks are empty. A `count` of zero is treated
/// as one.
pub fn partition<T>(items: &[T], count: usize) -> Vec<&[T]> {
    let count = count.max(1);
    let base = items.len() / count;
    let extra = items.len() % count;

    let mut chunks = Vec::with_capacity(count);
    let mut start = 0;
    for i in 0..count {
        let len = base + usize::from(i < extra);
        chunks.push(&items[start..start + len]);
        start += len;
    }

    chunks
}
