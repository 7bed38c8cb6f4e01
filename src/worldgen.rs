//! The asynchronous world-generator capability interface.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use mithrilgen_world::{Chunk, Transform};

/// Predicate over a chunk index indicating whether the result is still wanted.
///
/// Forwarded to upstream generators. The substitution pass always completes
/// its scan regardless of this signal.
pub type StillNeeded = Arc<dyn Fn(u64) -> bool + Send + Sync>;

/// Predicate that always reports the chunk as needed.
pub fn always_needed() -> StillNeeded {
    Arc::new(|_| true)
}

/// Errors surfaced by world generators.
#[derive(Debug, Error)]
pub enum WorldGenError {
    /// The generator (or its upstream) failed to load.
    #[error("world generator failed to load: {0}")]
    Load(String),
    /// The provider configuration document did not parse.
    #[error("invalid provider configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Named-phase timing snapshot reported by a generator.
#[derive(Debug, Default, Clone)]
pub struct WorldGenTimings {
    phases: HashMap<String, Duration>,
}

impl WorldGenTimings {
    /// Accumulate time spent in a named phase.
    pub fn record(&mut self, phase: &str, elapsed: Duration) {
        *self.phases.entry(phase.to_string()).or_default() += elapsed;
    }

    /// Total time recorded for a phase, if any.
    pub fn phase(&self, name: &str) -> Option<Duration> {
        self.phases.get(name).copied()
    }

    /// Iterate recorded phases.
    pub fn phases(&self) -> impl Iterator<Item = (&str, Duration)> {
        self.phases.iter().map(|(name, d)| (name.as_str(), *d))
    }
}

/// Capability interface of a chunk generator.
///
/// Implementations produce chunks asynchronously; the two auxiliary queries
/// return `None` until the generator is fully initialized.
#[async_trait]
pub trait WorldGen: Send + Sync {
    /// Generate the chunk at (x, z), or `None` when the upstream yields nothing.
    async fn generate(
        &self,
        seed: i32,
        index: u64,
        x: i32,
        z: i32,
        still_needed: StillNeeded,
    ) -> Result<Option<Chunk>, WorldGenError>;

    /// Spawn points within `radius` of the origin, or `None` when not yet available.
    fn spawn_points(&self, radius: i32) -> Option<Vec<Transform>>;

    /// Generation timings, or `None` when not yet available.
    fn timings(&self) -> Option<WorldGenTimings>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timings_accumulate_per_phase() {
        let mut timings = WorldGenTimings::default();
        timings.record("terrain", Duration::from_millis(5));
        timings.record("terrain", Duration::from_millis(3));
        timings.record("ores", Duration::from_millis(1));

        assert_eq!(timings.phase("terrain"), Some(Duration::from_millis(8)));
        assert_eq!(timings.phase("ores"), Some(Duration::from_millis(1)));
        assert_eq!(timings.phase("caves"), None);
        assert_eq!(timings.phases().count(), 2);
    }

    #[test]
    fn always_needed_accepts_any_index() {
        let pred = always_needed();
        assert!(pred(0));
        assert!(pred(u64::MAX));
    }
}
