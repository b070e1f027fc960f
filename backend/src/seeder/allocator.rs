//! Seed allocator - registry of processors and their current event seeds
//!
//! # Lifecycle
//!
//! ```text
//! Configuring --(first refresh_seeds)--> Processing
//! ```
//!
//! While `Configuring`, processors register and the global seed may be
//! configured. The first refresh closes registration for the rest of the
//! job. Every refresh recomputes all seeds from scratch, so the seeds of an
//! event never depend on which events were seeded before it.

use crate::config::{GlobalSeed, SeederConfig};
use crate::hash::master_seed;
use crate::rng::RngManager;
use crate::seeder::snapshot::{compute_fingerprint, EventSeeds, ProcessorSeed};
use crate::seeder::SeederError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Stable identity of a registered processor
///
/// Processor names are unique within a job, so the name is the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessorId(String);

impl ProcessorId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProcessorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProcessorId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Allocator lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeederState {
    /// Registration open, no event seeded yet
    Configuring,
    /// At least one event seeded, registration closed
    Processing,
}

/// Setup-time view: lets a processor sign up for event seeds.
pub trait SeedRegistrar {
    /// Register `id` for event seeds.
    ///
    /// # Errors
    /// - [`SeederError::ProcessorLifecycle`] once event processing started
    /// - [`SeederError::DuplicateRegistration`] if `id` is already registered
    fn register_processor(&mut self, id: &ProcessorId) -> Result<(), SeederError>;
}

/// Event-time view: lets a processor read its seed for the current event.
pub trait SeedSource {
    /// Seed assigned to `id` for the current event.
    ///
    /// # Errors
    /// - [`SeederError::UnregisteredProcessor`] if `id` never registered
    /// - [`SeederError::NotYetSeeded`] before the first event was seeded
    fn get_seed(&self, id: &ProcessorId) -> Result<u32, SeederError>;
}

/// Identifies the event the allocator's seeds currently belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CurrentEvent {
    event_number: u32,
    run_number: u32,
    master_seed: u32,
}

/// Per-job seed allocator
///
/// The host owns the allocator and is the only party calling
/// [`refresh_seeds`](Self::refresh_seeds). Processors receive it as
/// `&mut dyn SeedRegistrar` during setup and `&dyn SeedSource` during
/// event processing.
///
/// # Example
/// ```
/// use event_seeder_core::config::GlobalSeed;
/// use event_seeder_core::seeder::{ProcessorId, SeedAllocator, SeedRegistrar, SeedSource};
///
/// let mut seeder = SeedAllocator::new(GlobalSeed::new(1234567890).unwrap());
/// let digitizer = ProcessorId::new("digitizer");
/// seeder.register_processor(&digitizer).unwrap();
///
/// seeder.refresh_seeds(42, 7);
/// let seed = seeder.get_seed(&digitizer).unwrap();
///
/// seeder.refresh_seeds(42, 7);
/// assert_eq!(seeder.get_seed(&digitizer).unwrap(), seed);
/// ```
#[derive(Debug, Clone)]
pub struct SeedAllocator {
    global_seed: GlobalSeed,
    state: SeederState,
    /// Registration order is draw order
    registry: Vec<ProcessorSeed>,
    current: Option<CurrentEvent>,
    /// Fixed when registration closes
    fingerprint: Option<String>,
}

impl Default for SeedAllocator {
    fn default() -> Self {
        Self::new(GlobalSeed::default())
    }
}

impl SeedAllocator {
    pub fn new(global_seed: GlobalSeed) -> Self {
        Self {
            global_seed,
            state: SeederState::Configuring,
            registry: Vec::new(),
            current: None,
            fingerprint: None,
        }
    }

    /// Create an allocator from the job's seeder configuration.
    pub fn from_config(config: &SeederConfig) -> Result<Self, SeederError> {
        Ok(Self::new(config.global_seed()?))
    }

    /// Explicitly configure the global seed.
    ///
    /// Only allowed before the first event and only once per job.
    pub fn configure_global_seed(&mut self, value: i64) -> Result<(), SeederError> {
        if self.state == SeederState::Processing {
            return Err(SeederError::GlobalSeedLocked);
        }
        self.global_seed.configure(value)?;
        info!(global_seed = value, "Configured global random seed");
        Ok(())
    }

    pub fn global_seed(&self) -> GlobalSeed {
        self.global_seed
    }

    pub fn state(&self) -> SeederState {
        self.state
    }

    /// Registered processors in draw order
    pub fn processors(&self) -> impl Iterator<Item = &ProcessorId> {
        self.registry.iter().map(|entry| &entry.processor)
    }

    /// `(event_number, run_number)` of the most recent refresh
    pub fn current_event(&self) -> Option<(u32, u32)> {
        self.current
            .map(|current| (current.event_number, current.run_number))
    }

    /// Recompute every processor's seed for a new event.
    ///
    /// Must run before any processor queries its seed for this event. The
    /// first call closes registration for the rest of the job.
    pub fn refresh_seeds(&mut self, event_number: u32, run_number: u32) {
        if self.state == SeederState::Configuring {
            self.state = SeederState::Processing;
            self.fingerprint = Some(self.current_fingerprint());
            info!(
                processors = self.registry.len(),
                global_seed = self.global_seed.value(),
                explicit = self.global_seed.is_explicitly_set(),
                "Event processing started, processor registration closed"
            );
        }

        let master = master_seed(event_number, run_number, self.global_seed.value());
        let mut rng = RngManager::from_master_seed(master);
        for entry in &mut self.registry {
            entry.seed = rng.next_u32();
        }

        self.current = Some(CurrentEvent {
            event_number,
            run_number,
            master_seed: master,
        });
        debug!(
            event = event_number,
            run = run_number,
            master_seed = master,
            "Refreshed processor seeds"
        );
    }

    /// Seeds `event_number`/`run_number` would receive, without touching
    /// the allocator's state.
    pub fn derive_seeds(&self, event_number: u32, run_number: u32) -> EventSeeds {
        let master = master_seed(event_number, run_number, self.global_seed.value());
        let mut rng = RngManager::from_master_seed(master);
        let seeds = self
            .registry
            .iter()
            .map(|entry| ProcessorSeed {
                processor: entry.processor.clone(),
                seed: rng.next_u32(),
            })
            .collect();

        EventSeeds {
            event_number,
            run_number,
            master_seed: master,
            fingerprint: self.current_fingerprint(),
            seeds,
        }
    }

    /// Immutable copy of the current event's seeds.
    ///
    /// `None` until the first refresh. The copy can be handed to workers
    /// processing the event on other threads.
    pub fn snapshot(&self) -> Option<EventSeeds> {
        let current = self.current?;
        Some(EventSeeds {
            event_number: current.event_number,
            run_number: current.run_number,
            master_seed: current.master_seed,
            fingerprint: self.current_fingerprint(),
            seeds: self.registry.clone(),
        })
    }

    /// Check that a recorded event reproduces exactly under this allocator.
    ///
    /// # Errors
    /// [`SeederError::SnapshotMismatch`] if the recording came from a
    /// different global seed or processor list, or any seed differs.
    pub fn verify(&self, recorded: &EventSeeds) -> Result<(), SeederError> {
        let expected = self.derive_seeds(recorded.event_number, recorded.run_number);

        if recorded.fingerprint != expected.fingerprint {
            return Err(SeederError::SnapshotMismatch(format!(
                "fingerprint {} does not match allocator fingerprint {}",
                recorded.fingerprint, expected.fingerprint
            )));
        }
        if recorded.master_seed != expected.master_seed {
            return Err(SeederError::SnapshotMismatch(format!(
                "master seed {} for event {} (run {}), expected {}",
                recorded.master_seed,
                recorded.event_number,
                recorded.run_number,
                expected.master_seed
            )));
        }
        if recorded.seeds.len() != expected.seeds.len() {
            return Err(SeederError::SnapshotMismatch(format!(
                "{} recorded seeds, expected {}",
                recorded.seeds.len(),
                expected.seeds.len()
            )));
        }
        for (got, want) in recorded.seeds.iter().zip(&expected.seeds) {
            if got != want {
                return Err(SeederError::SnapshotMismatch(format!(
                    "processor '{}' recorded seed {}, expected '{}' with seed {}",
                    got.processor, got.seed, want.processor, want.seed
                )));
            }
        }
        Ok(())
    }

    fn current_fingerprint(&self) -> String {
        match &self.fingerprint {
            Some(fingerprint) => fingerprint.clone(),
            None => compute_fingerprint(self.global_seed.value(), self.processors()),
        }
    }

    fn position(&self, id: &ProcessorId) -> Option<usize> {
        self.registry.iter().position(|entry| &entry.processor == id)
    }
}

impl SeedRegistrar for SeedAllocator {
    fn register_processor(&mut self, id: &ProcessorId) -> Result<(), SeederError> {
        if self.state == SeederState::Processing {
            return Err(SeederError::ProcessorLifecycle(id.clone()));
        }
        if self.position(id).is_some() {
            return Err(SeederError::DuplicateRegistration(id.clone()));
        }

        self.registry.push(ProcessorSeed {
            processor: id.clone(),
            seed: 0,
        });
        debug!(
            processor = %id,
            position = self.registry.len() - 1,
            "Registered processor for event seeds"
        );
        Ok(())
    }
}

impl SeedSource for SeedAllocator {
    fn get_seed(&self, id: &ProcessorId) -> Result<u32, SeederError> {
        let index = self
            .position(id)
            .ok_or_else(|| SeederError::UnregisteredProcessor(id.clone()))?;
        if self.current.is_none() {
            return Err(SeederError::NotYetSeeded(id.clone()));
        }
        Ok(self.registry[index].seed)
    }
}
