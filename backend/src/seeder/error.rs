//! Seeding service errors
//!
//! All variants are programming or configuration mistakes. They are
//! returned to the caller as-is; the host decides whether to abort the job.

use crate::config::ConfigError;
use crate::seeder::ProcessorId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeederError {
    #[error("Processor '{0}' tried to register after event processing started")]
    ProcessorLifecycle(ProcessorId),

    #[error("Processor '{0}' is not registered for event seeds")]
    UnregisteredProcessor(ProcessorId),

    #[error("Processor '{0}' is already registered")]
    DuplicateRegistration(ProcessorId),

    #[error("No event seeded yet, processor '{0}' has no seed")]
    NotYetSeeded(ProcessorId),

    #[error("Global seed cannot change after event processing started")]
    GlobalSeedLocked,

    #[error("Global seed error: {0}")]
    GlobalSeed(#[from] ConfigError),

    #[error("Snapshot mismatch: {0}")]
    SnapshotMismatch(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
