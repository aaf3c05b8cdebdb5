// The crate's sole external entry point: the symbol instrumentation
// inserts before every indirect virtual dispatch.

use crate::validator;

/// Checks whether `(type_id, vptr)` is currently trusted.
///
/// Returns `true` if the pair is in the verify tier (the intended hot
/// path); otherwise records the observation in the record tier,
/// promotes high-frequency entries once enough misses have
/// accumulated, and returns `false`. Always safe to call; never fails,
/// never allocates, never blocks.
///
/// # Safety
/// Must be invoked from a single logical mutator context at a time — it
/// mutates process-global static caches with no internal locking (see
/// `crate::tiers::StaticCache`). A host with multiple threads issuing
/// indirect calls must serialize its own calls into this function.
#[no_mangle]
pub extern "C" fn cfi_vcall_validation(type_id: usize, vptr: usize) -> bool {
    validator::validate(type_id, vptr)
}
