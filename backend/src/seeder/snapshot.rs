//! Event seed snapshots
//!
//! An [`EventSeeds`] value is an immutable record of one event's seeds. It
//! can be shared with workers on other threads, written to a log and later
//! checked against a fresh allocator with [`SeedAllocator::verify`].
//!
//! [`SeedAllocator::verify`]: crate::seeder::SeedAllocator::verify

use crate::seeder::{ProcessorId, SeedSource, SeederError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Seed assigned to one processor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorSeed {
    pub processor: ProcessorId,
    pub seed: u32,
}

/// All processor seeds for one event, in draw order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSeeds {
    pub event_number: u32,
    pub run_number: u32,
    pub master_seed: u32,

    /// SHA256 over global seed and processor order (see [`compute_fingerprint`])
    pub fingerprint: String,

    pub seeds: Vec<ProcessorSeed>,
}

impl EventSeeds {
    pub fn to_json(&self) -> Result<String, SeederError> {
        serde_json::to_string(self).map_err(|e| SeederError::Serialization(e.to_string()))
    }

    /// Parse a recorded snapshot and check its integrity.
    pub fn from_json(json: &str) -> Result<Self, SeederError> {
        let seeds: Self =
            serde_json::from_str(json).map_err(|e| SeederError::Serialization(e.to_string()))?;
        seeds.validate()?;
        Ok(seeds)
    }

    /// Reject snapshots listing the same processor twice.
    pub fn validate(&self) -> Result<(), SeederError> {
        let mut seen = HashSet::new();
        for entry in &self.seeds {
            if !seen.insert(&entry.processor) {
                return Err(SeederError::SnapshotMismatch(format!(
                    "processor '{}' listed more than once",
                    entry.processor
                )));
            }
        }
        Ok(())
    }
}

impl SeedSource for EventSeeds {
    fn get_seed(&self, id: &ProcessorId) -> Result<u32, SeederError> {
        self.seeds
            .iter()
            .find(|entry| &entry.processor == id)
            .map(|entry| entry.seed)
            .ok_or_else(|| SeederError::UnregisteredProcessor(id.clone()))
    }
}

/// Fingerprint of everything besides event and run that decides the seeds.
///
/// Names are length-prefixed so that `["ab", "c"]` and `["a", "bc"]` hash
/// differently.
pub fn compute_fingerprint<'a>(
    global_seed: i32,
    processors: impl IntoIterator<Item = &'a ProcessorId>,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(global_seed.to_le_bytes());
    for processor in processors {
        let name = processor.as_str().as_bytes();
        hasher.update((name.len() as u64).to_le_bytes());
        hasher.update(name);
    }
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<ProcessorId> {
        names.iter().map(|n| ProcessorId::new(*n)).collect()
    }

    #[test]
    fn test_fingerprint_depends_on_order_and_seed() {
        let ab = compute_fingerprint(1, &ids(&["a", "b"]));
        assert_eq!(ab, compute_fingerprint(1, &ids(&["a", "b"])));
        assert_ne!(ab, compute_fingerprint(1, &ids(&["b", "a"])));
        assert_ne!(ab, compute_fingerprint(2, &ids(&["a", "b"])));
        assert_eq!(ab.len(), 64);
    }

    #[test]
    fn test_fingerprint_name_boundaries() {
        assert_ne!(
            compute_fingerprint(1, &ids(&["ab", "c"])),
            compute_fingerprint(1, &ids(&["a", "bc"]))
        );
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let seeds = EventSeeds {
            event_number: 1,
            run_number: 1,
            master_seed: 1,
            fingerprint: String::new(),
            seeds: vec![
                ProcessorSeed {
                    processor: ProcessorId::new("a"),
                    seed: 1,
                },
                ProcessorSeed {
                    processor: ProcessorId::new("a"),
                    seed: 2,
                },
            ],
        };
        assert!(matches!(
            seeds.validate(),
            Err(SeederError::SnapshotMismatch(_))
        ));
    }
}
