//! Registry of available algorithms.

use std::sync::Arc;

use tracing::warn;

use crate::algorithm::{AlgorithmDefinition, AlgorithmInfo, Category};
use crate::engine::{Engine, EngineConfig};
use crate::error::{EngineError, Result};
use crate::player::Player;
use crate::snapshot::Domain;

type Loader = Box<dyn Fn(EngineConfig, Option<usize>) -> Result<Box<dyn Player>> + Send + Sync>;

struct Entry {
    info: AlgorithmInfo,
    loader: Loader,
}

/// Explicit map from algorithm id to definition, built once at startup.
///
/// Entries keep registration order.
#[derive(Default)]
pub struct Catalog {
    entries: Vec<Entry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition. A later registration with the same id
    /// replaces the earlier one.
    pub fn register<T: Domain>(&mut self, definition: AlgorithmDefinition<T>) -> &mut Self {
        let info = definition.info.clone();
        let definition = Arc::new(definition);
        let loader: Loader = Box::new(move |config, size| {
            let engine = Engine::with_algorithm(Arc::clone(&definition), size, config)?;
            Ok(Box::new(engine) as Box<dyn Player>)
        });

        if let Some(existing) = self.entries.iter_mut().find(|e| e.info.id == info.id) {
            warn!(algorithm = info.id, "replacing duplicate catalog entry");
            *existing = Entry { info, loader };
        } else {
            self.entries.push(Entry { info, loader });
        }
        self
    }

    pub fn get(&self, id: &str) -> Option<&AlgorithmInfo> {
        self.entries.iter().find(|e| e.info.id == id).map(|e| &e.info)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// All entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &AlgorithmInfo> {
        self.entries.iter().map(|e| &e.info)
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &AlgorithmInfo> {
        self.iter().filter(move |info| info.category == category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build an engine with the named algorithm loaded.
    pub fn load(&self, id: &str, config: EngineConfig, size: Option<usize>) -> Result<Box<dyn Player>> {
        let Some(entry) = self.entries.iter().find(|e| e.info.id == id) else {
            warn!(algorithm = id, "unknown algorithm");
            return Err(EngineError::UnknownAlgorithm(id.to_string()));
        };
        (entry.loader)(config, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::Visualizer;
    use crate::playback::PlaybackState;
    use crate::producer::{Context, Producer};
    use crate::snapshot::Snapshot;
    use rand::rngs::StdRng;

    fn input(size: Option<usize>, _rng: &mut StdRng) -> Vec<i64> {
        vec![1; size.unwrap_or(3)]
    }

    fn run(ctx: Context<Vec<i64>>) -> Producer<Vec<i64>> {
        Producer::new(move |y| async move {
            y.emit(Snapshot::domain(ctx.state.get())).await;
        })
    }

    fn definition(id: &'static str, category: Category) -> AlgorithmDefinition<Vec<i64>> {
        AlgorithmDefinition::autonomous(
            AlgorithmInfo::new(id, id, category, Visualizer::BarChart, "test"),
            input,
            run,
        )
    }

    #[test]
    fn register_and_load() {
        let mut catalog = Catalog::new();
        catalog
            .register(definition("a", Category::Sorting))
            .register(definition("b", Category::Shuffling));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.iter().map(|i| i.id).collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(catalog.in_category(Category::Shuffling).count(), 1);

        let player = catalog.load("b", EngineConfig::default(), Some(2)).unwrap();
        assert_eq!(player.info().map(|i| i.id), Some("b"));
        assert_eq!(player.state(), PlaybackState::Ready);
    }

    #[test]
    fn duplicate_id_replaces() {
        let mut catalog = Catalog::new();
        catalog
            .register(definition("a", Category::Sorting))
            .register(definition("a", Category::Greedy));

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("a").map(|i| i.category), Some(Category::Greedy));
    }

    #[test]
    fn unknown_id_is_an_error() {
        let catalog = Catalog::new();
        let err = catalog.load("nope", EngineConfig::default(), None).err();
        assert_eq!(err, Some(EngineError::UnknownAlgorithm("nope".into())));
    }
}
