// The two eviction policies: generational FIFO for the verify tier,
// frequency threshold for the record tier.
//
// Each policy is a zero-sized type bound permanently to one tier's
// `Usage`, implementing a shared `EvictionPolicy` trait.

use tracing::debug;

use crate::config::MAP_EVICT_MIN_COUNT;
use crate::group::{self, GROUP_SIZE};
use crate::map::{Map, Usage};

pub trait EvictionPolicy {
    const USAGE: Usage;

    /// Run one reduction call: repeated eviction passes until at least
    /// `MAP_EVICT_MIN_COUNT` slots have been freed. Returns the total
    /// freed.
    fn reduce<const N: usize>(map: &mut Map<N>) -> usize;
}

/// Generational FIFO: evict every live slot whose `data` (the
/// generation it was admitted at) is at or below `oldest_generation`,
/// then age `oldest_generation` forward one step.
pub struct VerifyEviction;

impl EvictionPolicy for VerifyEviction {
    const USAGE: Usage = Usage::Verify;

    fn reduce<const N: usize>(map: &mut Map<N>) -> usize {
        let mut freed = 0usize;
        let mut passes = 0u32;

        while freed <= MAP_EVICT_MIN_COUNT {
            let end_group = map.sentinel / GROUP_SIZE + 1;
            for g in 0..end_group {
                let live = group::match_full(&map.groups[g].ctrl);
                for pos in live {
                    if map.groups[g].keys[pos].data <= map.meta.oldest_generation {
                        map.groups[g].ctrl.0[pos] = group::DELETED;
                        map.items -= 1;
                        freed += 1;
                    }
                }
            }
            map.meta.oldest_generation += 1;
            passes += 1;
            debug_assert!(
                map.meta.oldest_generation <= map.meta.newest_generation,
                "{}",
                crate::error::CacheFault::GenerationInverted {
                    oldest: map.meta.oldest_generation,
                    newest: map.meta.newest_generation,
                }
            );
        }

        if map.items == 0 {
            map.sentinel = 0;
        }
        debug!(freed, passes, oldest = map.meta.oldest_generation, "verify tier eviction pass");
        freed
    }
}

/// Frequency threshold: evict every live slot whose `data` (observed
/// frequency) is at or below a threshold that starts at
/// `eviction_min_freq` and doubles each pass. The threshold is local to
/// this call — `eviction_min_freq` itself is never mutated, so the next
/// reduction starts from the same floor again.
pub struct RecordEviction;

impl EvictionPolicy for RecordEviction {
    const USAGE: Usage = Usage::Record;

    fn reduce<const N: usize>(map: &mut Map<N>) -> usize {
        let mut freed = 0usize;
        let mut min_freq = map.meta.eviction_min_freq;
        let mut passes = 0u32;

        while freed <= MAP_EVICT_MIN_COUNT {
            let end_group = map.sentinel / GROUP_SIZE + 1;
            for g in 0..end_group {
                let live = group::match_full(&map.groups[g].ctrl);
                for pos in live {
                    if map.groups[g].keys[pos].data <= min_freq {
                        map.groups[g].ctrl.0[pos] = group::DELETED;
                        map.items -= 1;
                        freed += 1;
                    }
                }
            }
            min_freq *= 2;
            passes += 1;
        }

        if map.items == 0 {
            map.sentinel = 0;
        }
        debug!(freed, passes, min_freq, "record tier eviction pass");
        freed
    }
}
