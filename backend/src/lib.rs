//! Event Seeder Core
//!
//! Deterministic per-processor seeds for an event-processing framework.
//!
//! # Architecture
//!
//! - **config**: Global random seed configuration
//! - **hash**: Event → run → global seed hash chain
//! - **rng**: Deterministic random number generation
//! - **seeder**: Processor registry, seed refresh and snapshots
//!
//! # Critical Invariants
//!
//! 1. Same (event, run, global seed, registration order) → same seeds
//! 2. Registration is only possible before the first event
//! 3. All randomness goes through the xorshift64* generator

pub mod config;
pub mod hash;
pub mod rng;
pub mod seeder;

// Re-exports for convenience
pub use config::{ConfigError, GlobalSeed, SeederConfig, DEFAULT_GLOBAL_SEED};
pub use rng::RngManager;
pub use seeder::{
    EventSeeds, ProcessorId, ProcessorSeed, SeedAllocator, SeedRegistrar, SeedSource,
    SeederError, SeederState,
};
