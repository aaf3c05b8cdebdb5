// End-to-end behavior of the two-tier validation protocol, driven
// against locally constructed tiers (never the process-wide statics —
// see `tests/ffi_entry_point.rs` for the one test that exercises
// those). Each test reuses the crate's real `validator::track`/
// `validator::promote` so this is the same protocol code the FFI
// entry point runs, just against private tiers.

use vcfi_cache::config::{MAP_MIGRATE_MIN_FREQ, MIGRATE_VCALL_THRESH, RECORD_GROUP_NUM, VERIFY_GROUP_NUM};
use vcfi_cache::map::{Map, TierMeta, Usage};
use vcfi_cache::signature::Keyv;
use vcfi_cache::validator::{promote, track};

struct Harness {
    verify: Map<VERIFY_GROUP_NUM>,
    record: Map<RECORD_GROUP_NUM>,
    misses: u32,
}

impl Harness {
    fn new() -> Self {
        Self {
            verify: Map::new(TierMeta {
                usage: Usage::Verify,
                oldest_generation: 1,
                newest_generation: 0,
                eviction_min_freq: 0,
            }),
            record: Map::new(TierMeta {
                usage: Usage::Record,
                oldest_generation: 0,
                newest_generation: 0,
                eviction_min_freq: MAP_MIGRATE_MIN_FREQ + 1,
            }),
            misses: 0,
        }
    }

    fn validate(&mut self, type_id: usize, vptr: usize) -> bool {
        let signature = Keyv::new(type_id, vptr);
        if self.verify.find(&signature).is_some() {
            return true;
        }
        track(&mut self.record, signature);
        self.misses += 1;
        if self.misses > MIGRATE_VCALL_THRESH {
            promote(&mut self.verify, &mut self.record);
            self.misses = 0;
        }
        false
    }
}

#[test]
fn first_miss_records_with_frequency_one() {
    let mut h = Harness::new();
    assert!(!h.validate(1001, 0xABCDEF));

    let record_hit = h.record.find(&Keyv::new(1001, 0xABCDEF)).expect("recorded");
    assert_eq!(record_hit.data, 1);
    assert!(h.verify.find(&Keyv::new(1001, 0xABCDEF)).is_none());
}

#[test]
fn repeated_misses_increment_record_frequency() {
    let mut h = Harness::new();
    for _ in 0..7 {
        assert!(!h.validate(2001, 0x123456));
    }
    assert_eq!(h.record.find(&Keyv::new(2001, 0x123456)).unwrap().data, 7);
    assert!(h.verify.find(&Keyv::new(2001, 0x123456)).is_none());
}

#[test]
fn crossing_migration_threshold_promotes_hot_signature() {
    let mut h = Harness::new();
    for _ in 0..101 {
        h.validate(2001, 0x123456);
    }
    assert!(h.verify.find(&Keyv::new(2001, 0x123456)).is_some());
    assert_eq!(h.record.items, 0);
}

#[test]
fn sub_threshold_frequency_is_not_promoted() {
    let mut h = Harness::new();
    // 101 distinct keys, each observed once: 101 misses forces a
    // promotion, but frequency 1 never clears MAP_MIGRATE_MIN_FREQ (4).
    for i in 0..101usize {
        h.validate(i, i * 97);
    }
    for i in 0..101usize {
        assert!(h.verify.find(&Keyv::new(i, i * 97)).is_none());
    }
    assert_eq!(h.record.items, 0);
}

#[test]
fn verify_tier_ages_out_old_generations_under_load() {
    let mut map: Map<VERIFY_GROUP_NUM> = Map::new(TierMeta {
        usage: Usage::Verify,
        oldest_generation: 1,
        newest_generation: 0,
        eviction_min_freq: 0,
    });

    let total = VERIFY_GROUP_NUM * 16; // 1296
    for i in 0..total {
        if i > 0 && i % 40 == 0 {
            map.meta.newest_generation += 1;
        }
        map.insert(Keyv::new(i, i.wrapping_mul(13)), 0);
    }

    assert!(map.meta.oldest_generation > 1, "eviction must have advanced the oldest generation");
    assert!(map.meta.oldest_generation < map.meta.newest_generation);
    assert!(
        map.items < total,
        "at least one eviction pass must have run under a 1296-slot load"
    );
    assert_eq!((total - map.items) % 40, 0, "evicted count tracks whole admission batches");
}

#[test]
fn record_tier_eviction_favors_high_frequency_entries() {
    let mut map: Map<RECORD_GROUP_NUM> = Map::new(TierMeta {
        usage: Usage::Record,
        oldest_generation: 0,
        newest_generation: 0,
        eviction_min_freq: MAP_MIGRATE_MIN_FREQ + 1,
    });

    let hot = Keyv::new(1, 1);
    map.insert(hot, 20);
    for i in 0..(RECORD_GROUP_NUM * 16 - 1) {
        map.insert(Keyv::new(i + 1000, i + 1000), 1);
    }

    assert!(map.find(&hot).is_some(), "the high-frequency entry must survive eviction");
    assert!(
        map.items < RECORD_GROUP_NUM * 16,
        "the majority of frequency-1 entries must have been evicted"
    );
}

#[test]
fn random_signatures_are_found_after_insert_and_gone_after_clear() {
    // Randomized probe-chain coverage rather than a handful of
    // hand-picked keys.
    let rng = fastrand::Rng::with_seed(0xC0FFEE);
    let mut record: Map<RECORD_GROUP_NUM> = Map::new(TierMeta {
        usage: Usage::Record,
        oldest_generation: 0,
        newest_generation: 0,
        eviction_min_freq: MAP_MIGRATE_MIN_FREQ + 1,
    });

    let signatures: Vec<Keyv> = (0..64)
        .map(|_| Keyv::new(rng.usize(..1_000_000), rng.usize(..1_000_000)))
        .collect();

    for sig in &signatures {
        record.insert(*sig, 1);
    }
    for sig in &signatures {
        assert!(record.find(sig).is_some(), "every inserted signature must be findable");
    }

    record.clear();
    for sig in &signatures {
        assert!(record.find(sig).is_none(), "clear must evict every entry");
    }
}

#[test]
fn fast_path_hit_is_read_only() {
    let mut h = Harness::new();
    let sig = Keyv::new(55, 0x9000);
    h.verify.insert(sig, 0);

    let verify_items_before = h.verify.items;
    let verify_sentinel_before = h.verify.sentinel;
    let record_items_before = h.record.items;

    assert!(h.validate(55, 0x9000));

    assert_eq!(h.verify.items, verify_items_before);
    assert_eq!(h.verify.sentinel, verify_sentinel_before);
    assert_eq!(h.record.items, record_items_before);
}
