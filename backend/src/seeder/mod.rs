//! Per-processor event seeding
//!
//! Hands out an independent, reproducible seed to every registered
//! processor for every event. Processors register once during setup and
//! query their seed while processing an event; the host refreshes all
//! seeds before each event.
//!
//! # Capabilities
//!
//! - [`SeedRegistrar`]: given to processors during setup
//! - [`SeedSource`]: given to processors during event processing
//! - [`SeedAllocator::refresh_seeds`]: only reachable by whoever owns the
//!   allocator, i.e. the host driving the event loop
//!
//! # Critical Invariants
//!
//! 1. Registration closes with the first refresh (`Configuring` → `Processing`)
//! 2. Same (event, run, global seed, registration order) → same seeds
//! 3. Seeds are drawn in registration order, one per processor

pub mod allocator;
pub mod error;
pub mod snapshot;

pub use allocator::{ProcessorId, SeedAllocator, SeedRegistrar, SeedSource, SeederState};
pub use error::SeederError;
pub use snapshot::{compute_fingerprint, EventSeeds, ProcessorSeed};
