//! The mithril world-gen provider: lazy one-time classification plus the
//! generate-then-substitute orchestration.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::{info, instrument};

use mithrilgen_assets::BlockTypeCatalog;
use mithrilgen_world::{Chunk, Transform};

use crate::classifier::OreTables;
use crate::substitute::inject_ores;
use crate::worldgen::{StillNeeded, WorldGen, WorldGenError, WorldGenTimings};

/// Factory producing the upstream (base) generator on first use.
///
/// Load failures surface unchanged as [`WorldGenError::Load`].
pub type UpstreamFactory = Arc<dyn Fn() -> Result<Arc<dyn WorldGen>, WorldGenError> + Send + Sync>;

/// One-time state: the upstream generator and the classified ore tables land
/// together, so callers never observe one without the other.
struct ProviderState {
    upstream: Arc<dyn WorldGen>,
    tables: Arc<OreTables>,
}

/// World-gen provider that rewrites vanilla ores into mithril variants after
/// the upstream generator has produced each chunk.
///
/// The upstream generator is obtained lazily on the first generation request;
/// the block-type catalog is classified at the same moment and the result is
/// cached for the process lifetime.
pub struct MithrilWorldGenProvider {
    catalog: Arc<BlockTypeCatalog>,
    upstream_factory: UpstreamFactory,
    state: Mutex<Option<ProviderState>>,
}

impl MithrilWorldGenProvider {
    /// Create a provider over the given catalog and upstream factory.
    pub fn new(catalog: Arc<BlockTypeCatalog>, upstream_factory: UpstreamFactory) -> Self {
        Self {
            catalog,
            upstream_factory,
            state: Mutex::new(None),
        }
    }

    /// Obtain the initialized state, performing the one-time upstream load and
    /// catalog classification on first call.
    ///
    /// Concurrent callers either perform the single initialization or observe
    /// the cached result; a failed load leaves the provider uninitialized so
    /// the next request surfaces the failure again.
    fn ensure_initialized(&self) -> Result<(Arc<dyn WorldGen>, Arc<OreTables>), WorldGenError> {
        let mut guard = self
            .state
            .lock()
            .map_err(|_| WorldGenError::Load("provider state lock poisoned".to_string()))?;

        if let Some(state) = guard.as_ref() {
            return Ok((state.upstream.clone(), state.tables.clone()));
        }

        let upstream = (self.upstream_factory)()?;
        let tables = Arc::new(OreTables::classify(&self.catalog));

        info!(
            vanilla_ores = tables.replacement_count(),
            mithril_variants = tables.candidates().len(),
            "mithril world-gen initialized"
        );

        *guard = Some(ProviderState {
            upstream: upstream.clone(),
            tables: tables.clone(),
        });

        Ok((upstream, tables))
    }

    fn initialized_state(&self) -> Option<(Arc<dyn WorldGen>, Arc<OreTables>)> {
        let guard = self.state.lock().ok()?;
        guard
            .as_ref()
            .map(|state| (state.upstream.clone(), state.tables.clone()))
    }
}

#[async_trait]
impl WorldGen for MithrilWorldGenProvider {
    #[instrument(skip(self, still_needed))]
    async fn generate(
        &self,
        seed: i32,
        index: u64,
        x: i32,
        z: i32,
        still_needed: StillNeeded,
    ) -> Result<Option<Chunk>, WorldGenError> {
        let (upstream, tables) = self.ensure_initialized()?;

        let chunk = upstream.generate(seed, index, x, z, still_needed).await?;

        // Absent upstream chunks propagate unchanged.
        Ok(chunk.map(|mut chunk| {
            inject_ores(&mut chunk, &tables, seed, x, z);
            chunk
        }))
    }

    fn spawn_points(&self, radius: i32) -> Option<Vec<Transform>> {
        let (upstream, _) = self.initialized_state()?;
        upstream.spawn_points(radius)
    }

    fn timings(&self) -> Option<WorldGenTimings> {
        let (upstream, _) = self.initialized_state()?;
        upstream.timings()
    }
}
