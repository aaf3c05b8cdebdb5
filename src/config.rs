// Compile-time tuning knobs for the vcall signature cache.
//
// Tier sizes are array lengths, fixed at build time so both caches can
// live in the process's static data segment with no heap allocation on
// the hot path. There is deliberately no runtime config surface: change
// the consts and rebuild.

/// Slots per SIMD-probed group (SSE2 control word width).
pub const GROUP_SIZE: usize = 16;

/// Load factor numerator/denominator (3/4 = 75%) at which insertion
/// triggers eviction before placing a new entry.
pub const LOAD_FACTOR_NUM: usize = 3;
pub const LOAD_FACTOR_DEN: usize = 4;

/// Minimum number of slots an eviction pass must free before returning.
pub const MAP_EVICT_MIN_COUNT: usize = 10;

/// Frequency strictly above which a record-tier entry is promoted.
pub const MAP_MIGRATE_MIN_FREQ: i64 = 4;

/// Consecutive verify-tier misses that trigger a promotion batch.
pub const MIGRATE_VCALL_THRESH: u32 = 100;

/// Groups in the verify tier: 81 * 16 slots, ~8 pages.
pub const VERIFY_GROUP_NUM: usize = 81;

/// Groups in the record tier: 10 * 16 slots, ~1 page.
pub const RECORD_GROUP_NUM: usize = 10;

/// Assumed host page size, used only for static alignment.
pub const PAGE_SIZE: usize = 4096;

/// Runtime-inspectable mirror of the consts above, for tests and
/// diagnostics — nothing in the crate reads limits from this struct;
/// it exists so a host (or a test) can assert on the sizing story
/// without repeating the raw consts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheLimits {
    pub group_size: usize,
    pub load_factor_num: usize,
    pub load_factor_den: usize,
    pub evict_min_count: usize,
    pub migrate_min_freq: i64,
    pub migrate_vcall_thresh: u32,
    pub verify_groups: usize,
    pub record_groups: usize,
    pub page_size: usize,
}

impl CacheLimits {
    pub const fn current() -> Self {
        Self {
            group_size: GROUP_SIZE,
            load_factor_num: LOAD_FACTOR_NUM,
            load_factor_den: LOAD_FACTOR_DEN,
            evict_min_count: MAP_EVICT_MIN_COUNT,
            migrate_min_freq: MAP_MIGRATE_MIN_FREQ,
            migrate_vcall_thresh: MIGRATE_VCALL_THRESH,
            verify_groups: VERIFY_GROUP_NUM,
            record_groups: RECORD_GROUP_NUM,
            page_size: PAGE_SIZE,
        }
    }
}
