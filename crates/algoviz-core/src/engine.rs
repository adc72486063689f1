//! The playback engine.
//!
//! Owns one algorithm definition, its logical state and at most one active
//! producer. Every advance pulls exactly one snapshot; the engine keeps no
//! history beyond the current one.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::algorithm::{AlgorithmDefinition, AlgorithmInfo, Mode};
use crate::error::{EngineError, Result};
use crate::playback::{PlaybackSpeed, PlaybackState, PlaybackStatus};
use crate::producer::{Context, Producer, StateHandle};
use crate::snapshot::{Domain, Payload, Snapshot};

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seed for input generation; fresh entropy on every load when unset
    pub seed: Option<u64>,
    /// Initial auto-play period
    pub speed_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            speed_ms: PlaybackSpeed::DEFAULT_MS,
        }
    }
}

impl EngineConfig {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}

/// Outcome of a single `step_forward`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// A new snapshot was published
    Stepped,
    /// The producer completed; nothing new was published
    Finished,
    /// There was no active producer
    Idle,
}

/// Drives one algorithm's producers.
pub struct Engine<T: Domain> {
    config: EngineConfig,
    definition: Option<Arc<AlgorithmDefinition<T>>>,
    state: Option<StateHandle<T>>,
    producer: Option<Producer<T>>,
    current: Option<Snapshot<T>>,
    playback: PlaybackState,
    speed: PlaybackSpeed,
    step_count: u64,
    fault: Option<String>,
    rng: StdRng,
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

impl<T: Domain> Engine<T> {
    /// Create an idle engine.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            definition: None,
            state: None,
            producer: None,
            current: None,
            playback: PlaybackState::Idle,
            speed: PlaybackSpeed::from_millis(config.speed_ms),
            step_count: 0,
            fault: None,
            rng: seeded_rng(config.seed),
        }
    }

    /// Create an engine and load an algorithm into it.
    pub fn with_algorithm(
        definition: Arc<AlgorithmDefinition<T>>,
        size: Option<usize>,
        config: EngineConfig,
    ) -> Result<Self> {
        let mut engine = Self::new(config);
        engine.load(definition, size)?;
        Ok(engine)
    }

    /// Load an algorithm, discarding all prior state.
    ///
    /// Autonomous algorithms have their first snapshot pulled eagerly;
    /// interactive ones show their raw input until a command runs.
    pub fn load(&mut self, definition: Arc<AlgorithmDefinition<T>>, size: Option<usize>) -> Result<()> {
        self.producer = None;
        self.step_count = 0;
        self.fault = None;
        self.rng = seeded_rng(self.config.seed);

        let input = (definition.generate_input)(size, &mut self.rng);
        let state = StateHandle::new(input.clone());
        self.definition = Some(Arc::clone(&definition));
        self.state = Some(state.clone());
        self.playback = PlaybackState::Ready;

        let placeholder = Snapshot::domain(input).describe("Ready");
        let run = match &definition.mode {
            Mode::Autonomous(run) => *run,
            Mode::Interactive(_) => {
                info!(algorithm = definition.id(), ?size, "loaded interactive algorithm");
                self.current = Some(placeholder);
                return Ok(());
            }
        };

        let mut producer = run(self.context(state));
        match producer.resume() {
            Ok(Some(first)) => {
                self.reconcile(&first);
                self.current = Some(first);
                self.producer = Some(producer);
                info!(algorithm = definition.id(), ?size, "loaded algorithm");
                Ok(())
            }
            Ok(None) => {
                warn!(algorithm = definition.id(), "producer finished without a snapshot");
                self.current = Some(placeholder);
                self.playback = PlaybackState::Finished;
                Ok(())
            }
            Err(source) => {
                error!(algorithm = definition.id(), %source, "producer fault on load");
                self.fault = Some(source.to_string());
                self.current = Some(placeholder);
                self.playback = PlaybackState::Paused;
                Err(EngineError::ProducerFault {
                    algorithm: definition.id().to_string(),
                    source,
                })
            }
        }
    }

    /// Reload the current algorithm with a fresh input.
    pub fn reset(&mut self, size: Option<usize>) -> Result<()> {
        let Some(definition) = self.definition.clone() else {
            warn!("reset requested with no algorithm loaded");
            return Err(EngineError::NoAlgorithm);
        };
        self.load(definition, size)
    }

    /// Start or pause auto-play.
    pub fn toggle_play(&mut self) {
        self.playback = match self.playback {
            PlaybackState::Playing => PlaybackState::Paused,
            state if state.can_play() => PlaybackState::Playing,
            state => state,
        };
    }

    /// Stop auto-play without touching the producer.
    pub fn pause(&mut self) {
        if self.playback == PlaybackState::Playing {
            self.playback = PlaybackState::Paused;
        }
    }

    /// Pull one snapshot from the active producer.
    pub fn step_forward(&mut self) -> Result<Advance> {
        let Some(producer) = self.producer.as_mut() else {
            self.pause();
            return Ok(Advance::Idle);
        };

        match producer.resume() {
            Ok(Some(snapshot)) => {
                self.reconcile(&snapshot);
                self.current = Some(snapshot);
                self.step_count += 1;
                if self.playback == PlaybackState::Ready {
                    self.playback = PlaybackState::Paused;
                }
                debug!(step = self.step_count, "published snapshot");
                Ok(Advance::Stepped)
            }
            Ok(None) => {
                self.producer = None;
                self.playback = PlaybackState::Finished;
                info!(algorithm = self.algorithm_id(), steps = self.step_count, "run finished");
                Ok(Advance::Finished)
            }
            Err(source) => {
                self.producer = None;
                self.playback = PlaybackState::Paused;
                error!(algorithm = self.algorithm_id(), %source, "producer fault");
                self.fault = Some(source.to_string());
                Err(EngineError::ProducerFault {
                    algorithm: self.algorithm_id().to_string(),
                    source,
                })
            }
        }
    }

    /// Invoke a named operation of an interactive algorithm.
    ///
    /// Any previous producer is abandoned undrained. On error nothing
    /// changes.
    pub fn run_command(&mut self, name: &str, args: &[i64]) -> Result<()> {
        let (Some(definition), Some(state)) = (self.definition.clone(), self.state.clone()) else {
            warn!(command = name, "command requested with no algorithm loaded");
            return Err(EngineError::NoAlgorithm);
        };

        let operation = match &definition.mode {
            Mode::Autonomous(_) => {
                warn!(algorithm = definition.id(), command = name, "command sent to autonomous algorithm");
                return Err(EngineError::NotInteractive(definition.id().to_string()));
            }
            Mode::Interactive(methods) => match methods.get(name) {
                Some(operation) => *operation,
                None => {
                    warn!(algorithm = definition.id(), command = name, "unknown operation");
                    return Err(EngineError::UnknownOperation {
                        algorithm: definition.id().to_string(),
                        operation: name.to_string(),
                    });
                }
            },
        };

        self.producer = Some(operation(self.context(state), args));
        self.fault = None;
        self.playback = PlaybackState::Playing;
        info!(algorithm = definition.id(), command = name, ?args, "running command");
        Ok(())
    }

    pub fn set_speed(&mut self, ms: u64) {
        self.speed = PlaybackSpeed::from_millis(ms);
    }

    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    pub fn state(&self) -> PlaybackState {
        self.playback
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Message of the fault that stopped the last run, if any.
    pub fn fault(&self) -> Option<&str> {
        self.fault.as_deref()
    }

    pub fn has_producer(&self) -> bool {
        self.producer.is_some()
    }

    pub fn definition(&self) -> Option<&AlgorithmDefinition<T>> {
        self.definition.as_deref()
    }

    pub fn info(&self) -> Option<&AlgorithmInfo> {
        self.definition.as_ref().map(|d| &d.info)
    }

    /// The last published snapshot.
    pub fn current(&self) -> Option<&Snapshot<T>> {
        self.current.as_ref()
    }

    /// Copy of the authoritative domain value.
    pub fn logical_state(&self) -> Option<T> {
        self.state.as_ref().map(StateHandle::get)
    }

    pub fn status(&self) -> PlaybackStatus {
        PlaybackStatus::from(self)
    }

    fn algorithm_id(&self) -> &'static str {
        self.definition.as_ref().map_or("<none>", |d| d.id())
    }

    fn context(&mut self, state: StateHandle<T>) -> Context<T> {
        Context {
            state,
            rng: StdRng::seed_from_u64(self.rng.gen()),
        }
    }

    fn reconcile(&self, snapshot: &Snapshot<T>) {
        if let (Payload::Domain(value), Some(state)) = (&snapshot.data, &self.state) {
            state.replace(value.clone());
        }
    }
}

impl<T: Domain> From<&Engine<T>> for PlaybackStatus {
    fn from(engine: &Engine<T>) -> Self {
        Self {
            algorithm: engine.info().map(|i| i.id.to_string()),
            state: engine.playback,
            step_count: engine.step_count,
            speed_ms: engine.speed.millis(),
            slider: engine.speed.slider(),
            has_producer: engine.producer.is_some(),
            fault: engine.fault.clone(),
            operations: engine
                .definition()
                .map(|d| d.operations().into_iter().map(String::from).collect())
                .unwrap_or_default(),
        }
    }
}
