//! Async playback driver.
//!
//! A single task owns the type-erased engine and its auto-play timer.
//! Commands and timer ticks are handled one at a time, so the engine never
//! sees concurrent access.

use std::collections::HashMap;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, error, info, warn};

use crate::catalog::Catalog;
use crate::dispatch;
use crate::engine::{Advance, EngineConfig};
use crate::error::{EngineError, Result};
use crate::playback::{PlaybackSpeed, PlaybackState, PlaybackStatus};
use crate::player::Player;
use crate::snapshot::Frame;

const COMMAND_BUFFER: usize = 64;
const UPDATE_BUFFER: usize = 256;

/// Commands accepted by the driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DriverCommand {
    Load {
        id: String,
        #[serde(default)]
        size: Option<usize>,
    },
    TogglePlay,
    Step,
    Reset {
        #[serde(default)]
        size: Option<usize>,
    },
    SetSpeed {
        ms: u64,
    },
    SetSlider {
        position: u64,
    },
    RunCommand {
        name: String,
        #[serde(default)]
        args: Vec<i64>,
    },
    Press {
        button: String,
        #[serde(default)]
        inputs: HashMap<String, i64>,
    },
}

/// Published after every change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub frame: Option<Frame>,
    pub status: PlaybackStatus,
}

struct Request {
    command: DriverCommand,
    reply: oneshot::Sender<Result<PlaybackStatus>>,
}

/// Cheap, cloneable handle to a running driver.
#[derive(Clone)]
pub struct DriverHandle {
    commands: mpsc::Sender<Request>,
    updates: broadcast::Sender<Update>,
    latest: watch::Receiver<Update>,
}

impl DriverHandle {
    /// Send a command and wait for it to be applied.
    pub async fn send(&self, command: DriverCommand) -> Result<PlaybackStatus> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Request { command, reply })
            .await
            .map_err(|_| EngineError::DriverStopped)?;
        response.await.map_err(|_| EngineError::DriverStopped)?
    }

    /// Every update from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Update> {
        self.updates.subscribe()
    }

    /// Most recent update.
    pub fn latest(&self) -> Update {
        self.latest.borrow().clone()
    }
}

/// Owns one engine, its timer and the publication channels.
pub struct PlaybackDriver {
    catalog: Arc<Catalog>,
    config: EngineConfig,
    player: Option<Box<dyn Player>>,
    speed: PlaybackSpeed,
    next_tick: Option<Instant>,
    rng: StdRng,
    updates: broadcast::Sender<Update>,
    latest: watch::Sender<Update>,
}

impl PlaybackDriver {
    /// Spawn the driver task and return its handle.
    ///
    /// The task stops once every handle has been dropped.
    pub fn spawn(catalog: Arc<Catalog>, config: EngineConfig) -> DriverHandle {
        let speed = PlaybackSpeed::from_millis(config.speed_ms);
        let initial = Update {
            frame: None,
            status: PlaybackStatus::idle(speed),
        };
        let (commands, receiver) = mpsc::channel(COMMAND_BUFFER);
        let (updates, _) = broadcast::channel(UPDATE_BUFFER);
        let (latest, latest_rx) = watch::channel(initial);

        let driver = Self {
            catalog,
            config,
            player: None,
            speed,
            next_tick: None,
            rng: config.seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64),
            updates: updates.clone(),
            latest,
        };
        tokio::spawn(driver.run(receiver));

        DriverHandle {
            commands,
            updates,
            latest: latest_rx,
        }
    }

    async fn run(mut self, mut commands: mpsc::Receiver<Request>) {
        info!("playback driver started");
        loop {
            let deadline = self.next_tick;
            tokio::select! {
                request = commands.recv() => {
                    let Some(Request { command, reply }) = request else {
                        break;
                    };
                    let result = self.apply(command);
                    let _ = reply.send(result);
                }
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.tick();
                }
            }
        }
        info!("playback driver stopped");
    }

    fn apply(&mut self, command: DriverCommand) -> Result<PlaybackStatus> {
        debug!(?command, "applying command");
        let result = match command {
            DriverCommand::Load { id, size } => self.load(&id, size),
            DriverCommand::TogglePlay => self.with_player(|p| {
                p.toggle_play();
                Ok(())
            }),
            DriverCommand::Step => self.with_player(|p| p.step_forward().map(|_| ())),
            DriverCommand::Reset { size } => self.with_player(|p| p.reset(size)),
            DriverCommand::SetSpeed { ms } => {
                self.set_speed(PlaybackSpeed::from_millis(ms));
                Ok(())
            }
            DriverCommand::SetSlider { position } => {
                self.set_speed(PlaybackSpeed::from_slider(position));
                Ok(())
            }
            DriverCommand::RunCommand { name, args } => self.with_player(|p| p.run_command(&name, &args)),
            DriverCommand::Press { button, inputs } => {
                let rng = &mut self.rng;
                match self.player.as_deref_mut() {
                    Some(player) => dispatch::press(player, &button, &inputs, rng).map(|_| ()),
                    None => Err(EngineError::NoAlgorithm),
                }
            }
        };

        if let Err(err) = &result {
            if err.is_configuration() {
                warn!(%err, "command rejected");
            }
        }
        self.reschedule();
        self.publish();
        result.map(|()| self.status())
    }

    fn load(&mut self, id: &str, size: Option<usize>) -> Result<()> {
        let config = EngineConfig {
            speed_ms: self.speed.millis(),
            ..self.config
        };
        let player = self.catalog.load(id, config, size)?;
        self.player = Some(player);
        Ok(())
    }

    fn with_player(&mut self, f: impl FnOnce(&mut dyn Player) -> Result<()>) -> Result<()> {
        match self.player.as_deref_mut() {
            Some(player) => f(player),
            None => Err(EngineError::NoAlgorithm),
        }
    }

    fn set_speed(&mut self, speed: PlaybackSpeed) {
        self.speed = speed;
        if let Some(player) = self.player.as_deref_mut() {
            player.set_speed(speed.millis());
        }
    }

    fn tick(&mut self) {
        self.next_tick = None;
        let Some(player) = self.player.as_deref_mut() else {
            return;
        };
        if player.state() != PlaybackState::Playing {
            return;
        }

        match player.step_forward() {
            Ok(Advance::Stepped) => {}
            Ok(Advance::Finished) => info!(steps = player.step_count(), "playback finished"),
            Ok(Advance::Idle) => debug!("tick with no active producer"),
            Err(err) => error!(%err, "auto-play stopped by producer fault"),
        }
        self.reschedule();
        self.publish();
    }

    /// Arm the timer while playing, disarm it otherwise.
    fn reschedule(&mut self) {
        let playing = self
            .player
            .as_deref()
            .is_some_and(|p| p.state() == PlaybackState::Playing);
        self.next_tick = match (playing, self.next_tick) {
            (false, _) => None,
            (true, Some(at)) => Some(at),
            (true, None) => Some(Instant::now() + self.speed.period()),
        };
    }

    fn status(&self) -> PlaybackStatus {
        match self.player.as_deref() {
            Some(player) => player.status(),
            None => PlaybackStatus::idle(self.speed),
        }
    }

    fn publish(&self) {
        let update = Update {
            frame: self.player.as_deref().and_then(|p| p.frame()),
            status: self.status(),
        };
        let _ = self.updates.send(update.clone());
        self.latest.send_replace(update);
    }
}
