// The two static, page-aligned backing stores and the wrapper that
// lets a single-threaded mutator reach through a `static` into them.
//
// Each tier is a `Map` wrapped in an `UnsafeCell` so it can live in a
// `static` and still be mutated in place with no heap allocation and no
// locking. The single-mutator promise is documented on the `unsafe fn`
// that reaches inside it rather than enforced by the type.

use std::cell::UnsafeCell;

use crate::config::{PAGE_SIZE, RECORD_GROUP_NUM, VERIFY_GROUP_NUM};
use crate::map::{Map, TierMeta, Usage};

/// A page-aligned, statically-allocated `Map`. Construction is `const`,
/// so the instance lives in the process's static data segment with no
/// runtime initialization and no allocation.
#[repr(C, align(4096))]
pub struct StaticCache<const N: usize>(UnsafeCell<Map<N>>);

// SAFETY promise, not a guarantee: this type is `Sync` only under the
// contract that it is accessed from a single logical mutator context
// at a time. Concurrent access from multiple threads without external
// serialization is undefined behavior, by design — see module docs.
unsafe impl<const N: usize> Sync for StaticCache<N> {}

impl<const N: usize> StaticCache<N> {
    const fn new(meta: TierMeta) -> Self {
        Self(UnsafeCell::new(Map::new(meta)))
    }

    /// Reach the tier for mutation.
    ///
    /// # Safety
    /// The caller must guarantee single-mutator-context access: no two
    /// call sites may hold or use the returned reference concurrently.
    #[allow(clippy::mut_from_ref)]
    #[inline]
    pub unsafe fn get_mut(&self) -> &mut Map<N> {
        &mut *self.0.get()
    }

    /// Read-only snapshot of the live item count, for diagnostics.
    ///
    /// # Safety
    /// Same single-mutator contract as [`StaticCache::get_mut`].
    #[inline]
    pub unsafe fn len(&self) -> usize {
        (*self.0.get()).items
    }
}

/// The verify tier: 81 groups (~8 pages), FIFO-by-generation eviction.
pub static VERIFY_CACHE: StaticCache<VERIFY_GROUP_NUM> = StaticCache::new(TierMeta {
    usage: Usage::Verify,
    oldest_generation: 1,
    newest_generation: 0,
    eviction_min_freq: 0,
});

/// The record tier: 10 groups (~1 page), frequency-threshold eviction.
pub static RECORD_CACHE: StaticCache<RECORD_GROUP_NUM> = StaticCache::new(TierMeta {
    usage: Usage::Record,
    oldest_generation: 0,
    newest_generation: 0,
    eviction_min_freq: crate::config::MAP_MIGRATE_MIN_FREQ + 1,
});

const _: () = {
    assert!(
        std::mem::size_of::<crate::group::Group>() <= PAGE_SIZE,
        "a group must fit well within one page"
    );
};

// No unit tests here: `VERIFY_CACHE`/`RECORD_CACHE` are process-wide
// singletons shared by every test binary target. Exercising them is
// left to the single end-to-end test in `tests/ffi_entry_point.rs`;
// everything else in this crate's test suite drives a locally
// constructed `Map` instead.
