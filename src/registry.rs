//! Host-facing registration of world-gen providers.
//!
//! Providers register under a stable name with a priority and a configuration
//! descriptor; the host instantiates them from world-configuration documents.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};

use mithrilgen_assets::BlockTypeCatalog;

use crate::provider::{MithrilWorldGenProvider, UpstreamFactory};
use crate::worldgen::{WorldGen, WorldGenError};

/// Fixed registration name of the mithril provider.
pub const PROVIDER_NAME: &str = "MithrilOre";

/// Registration precedence when several plugins claim the same provider name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Priority {
    /// Yield to any other registration.
    Low,
    /// Default precedence.
    #[default]
    Normal,
    /// Override normal registrations.
    High,
}

/// Human-readable descriptor advertised alongside a provider registration.
#[derive(Debug, Clone)]
pub struct ConfigDescriptor {
    /// Documentation string surfaced by world-configuration tooling.
    pub documentation: &'static str,
}

/// Per-instance configuration of the mithril provider.
///
/// No fields: the provider carries no configuration beyond its registration
/// name.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MithrilOreConfig {}

impl MithrilOreConfig {
    /// Descriptor advertised at registration time.
    pub fn descriptor() -> ConfigDescriptor {
        ConfigDescriptor {
            documentation: "Configuration for the Mithril Ore Injector",
        }
    }
}

/// Factory constructing a generator from its JSON configuration document.
pub type ProviderFactory =
    Box<dyn Fn(&serde_json::Value) -> Result<Arc<dyn WorldGen>, WorldGenError> + Send + Sync>;

struct RegisteredProvider {
    priority: Priority,
    descriptor: ConfigDescriptor,
    factory: ProviderFactory,
}

/// Registry of world-gen providers keyed by registration name.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, RegisteredProvider>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider under `name`.
    ///
    /// When the name is already claimed, the higher priority wins; ties keep
    /// the earlier registration.
    pub fn register(
        &mut self,
        priority: Priority,
        name: &str,
        descriptor: ConfigDescriptor,
        factory: ProviderFactory,
    ) {
        if let Some(existing) = self.providers.get(name) {
            if existing.priority >= priority {
                warn!(
                    name,
                    "ignoring provider registration: name already claimed at equal or higher priority"
                );
                return;
            }
        }
        self.providers.insert(
            name.to_string(),
            RegisteredProvider {
                priority,
                descriptor,
                factory,
            },
        );
    }

    /// Descriptor advertised for the named provider.
    pub fn descriptor(&self, name: &str) -> Option<&ConfigDescriptor> {
        self.providers.get(name).map(|p| &p.descriptor)
    }

    /// Registered provider names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    /// Instantiate the named provider from its JSON configuration document.
    pub fn create(
        &self,
        name: &str,
        config: &serde_json::Value,
    ) -> Result<Arc<dyn WorldGen>, WorldGenError> {
        let registered = self.providers.get(name).ok_or_else(|| {
            WorldGenError::Load(format!("no world-gen provider registered under '{name}'"))
        })?;
        (registered.factory)(config)
    }
}

/// Register the mithril provider under its fixed name at normal priority.
///
/// The catalog and upstream factory are captured so the host can instantiate
/// the provider from a world-configuration document later.
pub fn register_mithril_ore(
    registry: &mut ProviderRegistry,
    catalog: Arc<BlockTypeCatalog>,
    upstream: UpstreamFactory,
) {
    registry.register(
        Priority::Normal,
        PROVIDER_NAME,
        MithrilOreConfig::descriptor(),
        Box::new(move |config| {
            let _config: MithrilOreConfig = serde_json::from_value(config.clone())?;
            Ok(Arc::new(MithrilWorldGenProvider::new(
                catalog.clone(),
                upstream.clone(),
            )) as Arc<dyn WorldGen>)
        }),
    );
    info!(name = PROVIDER_NAME, "registered mithril world-gen provider");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worldgen::{StillNeeded, WorldGenTimings};
    use async_trait::async_trait;
    use mithrilgen_world::{Chunk, Transform};

    struct NullGen;

    #[async_trait]
    impl WorldGen for NullGen {
        async fn generate(
            &self,
            _seed: i32,
            _index: u64,
            _x: i32,
            _z: i32,
            _still_needed: StillNeeded,
        ) -> Result<Option<Chunk>, WorldGenError> {
            Ok(None)
        }

        fn spawn_points(&self, _radius: i32) -> Option<Vec<Transform>> {
            None
        }

        fn timings(&self) -> Option<WorldGenTimings> {
            None
        }
    }

    fn null_factory() -> ProviderFactory {
        Box::new(|_| Ok(Arc::new(NullGen) as Arc<dyn WorldGen>))
    }

    fn descriptor(doc: &'static str) -> ConfigDescriptor {
        ConfigDescriptor { documentation: doc }
    }

    #[test]
    fn priority_ordering() {
        assert!(Priority::High > Priority::Normal);
        assert!(Priority::Normal > Priority::Low);
        assert_eq!(Priority::default(), Priority::Normal);
    }

    #[test]
    fn register_and_create() {
        let mut registry = ProviderRegistry::new();
        registry.register(Priority::Normal, "Null", descriptor("null"), null_factory());

        assert_eq!(registry.names().count(), 1);
        assert_eq!(registry.descriptor("Null").unwrap().documentation, "null");
        assert!(registry.create("Null", &serde_json::json!({})).is_ok());
    }

    #[test]
    fn unknown_name_is_a_load_error() {
        let registry = ProviderRegistry::new();
        let err = registry
            .create("Missing", &serde_json::json!({}))
            .err()
            .expect("missing provider must not resolve");
        assert!(matches!(err, WorldGenError::Load(_)));
    }

    #[test]
    fn equal_priority_keeps_first_registration() {
        let mut registry = ProviderRegistry::new();
        registry.register(Priority::Normal, "Gen", descriptor("first"), null_factory());
        registry.register(Priority::Normal, "Gen", descriptor("second"), null_factory());

        assert_eq!(registry.descriptor("Gen").unwrap().documentation, "first");
    }

    #[test]
    fn higher_priority_replaces_lower() {
        let mut registry = ProviderRegistry::new();
        registry.register(Priority::Normal, "Gen", descriptor("normal"), null_factory());
        registry.register(Priority::High, "Gen", descriptor("high"), null_factory());
        registry.register(Priority::Low, "Gen", descriptor("low"), null_factory());

        assert_eq!(registry.descriptor("Gen").unwrap().documentation, "high");
    }

    #[test]
    fn mithril_config_rejects_unknown_fields() {
        let parsed: Result<MithrilOreConfig, _> =
            serde_json::from_value(serde_json::json!({"unknown": 1}));
        assert!(parsed.is_err());

        let parsed: Result<MithrilOreConfig, _> = serde_json::from_value(serde_json::json!({}));
        assert!(parsed.is_ok());
    }
}
