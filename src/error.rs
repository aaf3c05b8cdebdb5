// Typed vocabulary for this crate's invariant-violation conditions.
//
// `cfi_vcall_validation` itself never returns a `Result` — it always
// succeeds. `CacheFault` names the misuse conditions that are reported
// by panicking rather than by propagating an error.

use thiserror::Error;

use crate::map::Usage;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheFault {
    /// An eviction policy was run against the wrong tier.
    #[error("eviction policy mismatch: expected {expected:?} tier, found {found:?} tier")]
    WrongPolicy { expected: Usage, found: Usage },

    /// The verify tier's generation invariant (`oldest <= newest`) broke.
    #[error("generation invariant violated: oldest ({oldest}) exceeds newest ({newest})")]
    GenerationInverted { oldest: i64, newest: i64 },
}

pub type Result<T> = std::result::Result<T, CacheFault>;
