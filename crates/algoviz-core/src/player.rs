//! Type-erased engine access for hosts.

use crate::algorithm::AlgorithmInfo;
use crate::engine::{Advance, Engine};
use crate::error::Result;
use crate::playback::{PlaybackSpeed, PlaybackState, PlaybackStatus};
use crate::snapshot::{Domain, Frame};

/// An engine whose domain type has been erased.
///
/// Hosts hold a `Box<dyn Player>` so one driver can serve every algorithm
/// in the catalog.
pub trait Player: Send {
    fn info(&self) -> Option<&AlgorithmInfo>;

    fn reset(&mut self, size: Option<usize>) -> Result<()>;

    fn toggle_play(&mut self);

    fn pause(&mut self);

    fn step_forward(&mut self) -> Result<Advance>;

    fn run_command(&mut self, name: &str, args: &[i64]) -> Result<()>;

    fn set_speed(&mut self, ms: u64);

    fn speed(&self) -> PlaybackSpeed;

    fn state(&self) -> PlaybackState;

    fn step_count(&self) -> u64;

    /// The current snapshot, projected for rendering.
    fn frame(&self) -> Option<Frame>;

    fn status(&self) -> PlaybackStatus;
}

impl<T: Domain> Player for Engine<T> {
    fn info(&self) -> Option<&AlgorithmInfo> {
        Engine::info(self)
    }

    fn reset(&mut self, size: Option<usize>) -> Result<()> {
        Engine::reset(self, size)
    }

    fn toggle_play(&mut self) {
        Engine::toggle_play(self)
    }

    fn pause(&mut self) {
        Engine::pause(self)
    }

    fn step_forward(&mut self) -> Result<Advance> {
        Engine::step_forward(self)
    }

    fn run_command(&mut self, name: &str, args: &[i64]) -> Result<()> {
        Engine::run_command(self, name, args)
    }

    fn set_speed(&mut self, ms: u64) {
        Engine::set_speed(self, ms)
    }

    fn speed(&self) -> PlaybackSpeed {
        Engine::speed(self)
    }

    fn state(&self) -> PlaybackState {
        Engine::state(self)
    }

    fn step_count(&self) -> u64 {
        Engine::step_count(self)
    }

    fn frame(&self) -> Option<Frame> {
        self.current().map(Frame::from)
    }

    fn status(&self) -> PlaybackStatus {
        Engine::status(self)
    }
}
