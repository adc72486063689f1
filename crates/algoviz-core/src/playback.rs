//! Playback state, speed and status.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Current state of playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// Nothing loaded
    Idle,
    /// Loaded, first snapshot shown, timer stopped
    Ready,
    /// Timer is advancing the producer
    Playing,
    /// Timer stopped mid-run
    Paused,
    /// Producer exhausted
    Finished,
}

impl PlaybackState {
    /// Whether `toggle_play` can start the timer from here.
    pub fn can_play(&self) -> bool {
        matches!(self, PlaybackState::Ready | PlaybackState::Paused)
    }
}

/// Auto-play period in milliseconds.
///
/// The control slider is inverted (`slider = 1050 - period`) so that moving
/// it right plays faster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaybackSpeed(u64);

impl PlaybackSpeed {
    pub const MIN_MS: u64 = 50;
    pub const MAX_MS: u64 = 1000;
    pub const STEP_MS: u64 = 50;
    pub const DEFAULT_MS: u64 = 500;

    const SLIDER_SUM: u64 = Self::MIN_MS + Self::MAX_MS;

    /// Speed from a period, clamped to the supported range.
    pub fn from_millis(ms: u64) -> Self {
        Self(ms.clamp(Self::MIN_MS, Self::MAX_MS))
    }

    /// Speed from an inverted slider position.
    pub fn from_slider(position: u64) -> Self {
        Self::from_millis(Self::SLIDER_SUM.saturating_sub(position))
    }

    pub fn millis(&self) -> u64 {
        self.0
    }

    /// Inverted slider position for this speed.
    pub fn slider(&self) -> u64 {
        Self::SLIDER_SUM - self.0
    }

    /// Time between timer ticks.
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.0)
    }

    /// One slider notch faster.
    pub fn faster(&self) -> Self {
        Self::from_millis(self.0.saturating_sub(Self::STEP_MS))
    }

    /// One slider notch slower.
    pub fn slower(&self) -> Self {
        Self::from_millis(self.0 + Self::STEP_MS)
    }
}

impl Default for PlaybackSpeed {
    fn default() -> Self {
        Self(Self::DEFAULT_MS)
    }
}

/// Playback status for sending to frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub algorithm: Option<String>,
    pub state: PlaybackState,
    pub step_count: u64,
    pub speed_ms: u64,
    pub slider: u64,
    pub has_producer: bool,
    /// Set when a producer fault stopped playback; cleared on load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fault: Option<String>,
    pub operations: Vec<String>,
}

impl PlaybackStatus {
    /// Status of an engine with nothing loaded.
    pub fn idle(speed: PlaybackSpeed) -> Self {
        Self {
            algorithm: None,
            state: PlaybackState::Idle,
            step_count: 0,
            speed_ms: speed.millis(),
            slider: speed.slider(),
            has_producer: false,
            fault: None,
            operations: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_clamps_to_range() {
        assert_eq!(PlaybackSpeed::from_millis(0).millis(), 50);
        assert_eq!(PlaybackSpeed::from_millis(5000).millis(), 1000);
        assert_eq!(PlaybackSpeed::default().millis(), 500);
    }

    #[test]
    fn slider_is_inverted() {
        let speed = PlaybackSpeed::from_millis(200);
        assert_eq!(speed.slider(), 850);
        assert_eq!(PlaybackSpeed::from_slider(850), speed);

        assert_eq!(PlaybackSpeed::from_slider(1000).millis(), 50);
        assert_eq!(PlaybackSpeed::from_slider(50).millis(), 1000);
        assert_eq!(PlaybackSpeed::from_slider(5000).millis(), 50);
    }

    #[test]
    fn notches_stay_in_range() {
        let fastest = PlaybackSpeed::from_millis(50);
        assert_eq!(fastest.faster(), fastest);
        assert_eq!(fastest.slower().millis(), 100);

        let slowest = PlaybackSpeed::from_millis(1000);
        assert_eq!(slowest.slower(), slowest);
    }

    #[test]
    fn only_ready_and_paused_can_play() {
        assert!(PlaybackState::Ready.can_play());
        assert!(PlaybackState::Paused.can_play());
        assert!(!PlaybackState::Idle.can_play());
        assert!(!PlaybackState::Finished.can_play());
        assert!(!PlaybackState::Playing.can_play());
    }

    #[test]
    fn idle_status_serialization() {
        let status = PlaybackStatus::idle(PlaybackSpeed::default());
        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"state\":\"idle\""));
        assert!(json.contains("\"speed_ms\":500"));
        assert!(json.contains("\"slider\":550"));
    }
}
