// The two-tier validation protocol: verify-tier hit/miss, record-tier
// tracking, and the promotion batch that migrates hot signatures from
// record to verify.

use std::sync::atomic::{AtomicU32, Ordering};

use tracing::{debug, trace};

use crate::config::{MAP_MIGRATE_MIN_FREQ, MIGRATE_VCALL_THRESH, RECORD_GROUP_NUM, VERIFY_GROUP_NUM};
use crate::map::Map;
use crate::signature::Keyv;
use crate::tiers::{RECORD_CACHE, VERIFY_CACHE};

/// Consecutive verify-tier misses since the last promotion. An
/// `AtomicU32` is used purely so the counter is a safe `static` (no
/// `UnsafeCell`/`unsafe` needed to touch it) — it does not make
/// concurrent calls to [`validate`] safe; see the single-mutator
/// contract on [`crate::tiers::StaticCache`].
static MISS_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Look up `(type_id, vptr)` in the verify tier; if absent, record the
/// observation and promote once enough misses have accumulated.
/// Matches `cfi_vcall_validation`'s contract: always returns, never
/// blocks, never allocates.
pub fn validate(type_id: usize, vptr: usize) -> bool {
    let signature = Keyv::new(type_id, vptr);

    // SAFETY: the single-mutator contract is the caller's to uphold;
    // this is the one place that contract is spent.
    let verify = unsafe { VERIFY_CACHE.get_mut() };
    if verify.find(&signature).is_some() {
        trace!(hit = true, "cfi_vcall_validation");
        return true;
    }

    let record = unsafe { RECORD_CACHE.get_mut() };
    track(record, signature);

    let misses = MISS_COUNTER.fetch_add(1, Ordering::Relaxed) + 1;
    if misses > MIGRATE_VCALL_THRESH {
        promote(verify, record);
        MISS_COUNTER.store(0, Ordering::Relaxed);
    }

    trace!(hit = false, "cfi_vcall_validation");
    false
}

/// Find-or-insert-with-count-1 against the record tier. `insert` never
/// deduplicates, so an explicit lookup is mandatory here.
pub fn track<const N: usize>(record: &mut Map<N>, signature: Keyv) {
    if let Some(existing) = record.find_mut(&signature) {
        existing.data += 1;
    } else {
        record.insert(signature, 1);
    }
}

/// Migrate every record-tier entry observed more than
/// `MAP_MIGRATE_MIN_FREQ` times into the verify tier, stamping it with
/// a freshly bumped generation, then clear the record tier. Does not
/// deduplicate against existing verify-tier entries: promoting the same
/// signature twice places two copies.
pub fn promote<const V: usize, const R: usize>(verify: &mut Map<V>, record: &mut Map<R>) {
    verify.meta.newest_generation += 1;

    let mut cursor = 0usize;
    let mut scanned = 0usize;
    let mut promoted = 0usize;
    while let Some(slot) = record.iterate(&mut cursor) {
        scanned += 1;
        let Some(key) = slot else { continue };
        if key.data > MAP_MIGRATE_MIN_FREQ {
            verify.insert(*key, key.data);
            promoted += 1;
        }
    }
    record.clear();

    debug!(
        scanned,
        promoted,
        generation = verify.meta.newest_generation,
        "promotion batch"
    );
}

/// Live entry count in the verify tier, for diagnostics.
///
/// # Safety contract
/// See [`crate::tiers::StaticCache::get_mut`] — reads the live static,
/// so it shares that type's single-mutator-context promise.
pub fn verify_tier_len() -> usize {
    unsafe { VERIFY_CACHE.len() }
}

/// Live entry count in the record tier, for diagnostics.
pub fn record_tier_len() -> usize {
    unsafe { RECORD_CACHE.len() }
}
