use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

/// Collision-resistant client-side record id.
///
/// Used only when a save response carries no created id. Drawn from the
/// system RNG (63 random bits, always positive so it round-trips through
/// backend bigint columns). Uniqueness is still best-effort: the backend
/// echoing its generated id is the authoritative path.
pub(crate) fn random_record_id() -> i64 {
    let mut buf = [0u8; 8];
    if getrandom::getrandom(&mut buf).is_ok() {
        let n = i64::from_le_bytes(buf) & i64::MAX;
        if n != 0 {
            return n;
        }
    }

    // RNG unavailable (should not happen in a browser). Hash a process-local
    // counter so successive calls still differ.
    let mut hasher = DefaultHasher::new();
    COUNTER.fetch_add(1, Ordering::SeqCst).hash(&mut hasher);
    (hasher.finish() as i64) & i64::MAX
}

static COUNTER: AtomicU64 = AtomicU64::new(1);
