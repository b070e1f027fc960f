//! Deterministic random number generation
//!
//! Uses the xorshift64* algorithm so that per-processor seeds are identical
//! on every platform. Seeds must never come from a platform-dependent
//! generator.

mod xorshift;

pub use xorshift::RngManager;
