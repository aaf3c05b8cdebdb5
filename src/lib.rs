//! # vcfi-cache
//!
//! A two-tier, SIMD-accelerated signature cache for runtime
//! Control-Flow Integrity validation of virtual calls.
//!
//! On every instrumented indirect dispatch the host calls
//! [`cfi_vcall_validation`] with `(type_id, vptr)`. A hit in the
//! *verify* tier is the fast path; a miss is recorded in the smaller
//! *record* tier, and once enough misses accumulate, high-frequency
//! record-tier entries are promoted into the verify tier.
//!
//! Both tiers are fixed-size, page-aligned, process-static Swiss
//! tables — see [`map`] for the table itself, [`group`] for the SSE2
//! control-byte probes it's built from, and [`eviction`] for the two
//! tier-specific reclamation policies. [`validator`] wires the two
//! tiers together into the promotion protocol; [`ffi`] exposes the
//! `extern "C"` entry point.
//!
//! This crate has no persisted state, no network surface, and no
//! internal locking by design: it assumes a single logical mutator
//! context.

pub mod config;
pub mod error;
pub mod eviction;
pub mod ffi;
pub mod group;
pub mod map;
pub mod signature;
pub mod tiers;
pub mod validator;

pub use error::{CacheFault, Result};
pub use ffi::cfi_vcall_validation;
pub use signature::{signature_hash, Keyv};
pub use validator::{record_tier_len, validate, verify_tier_len};

/// Crate version, for startup banners and diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
