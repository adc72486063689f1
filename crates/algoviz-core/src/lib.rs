//! Algoviz Step-Simulation Core
//!
//! The contract by which an algorithm exposes its internal state as a
//! sequence of discrete snapshots, and the engine that drives, paces and
//! mutates that state over time.
//!
//! # Architecture
//!
//! - **Snapshot**: complete, renderer-ready record of one instant
//! - **Producer**: suspendable async body emitting snapshots on demand
//! - **Engine**: owns the logical state and at most one producer
//! - **Dispatcher**: turns control presses into interactive commands
//! - **Driver**: async actor running the engine's auto-play timer
//!
//! # Usage
//!
//! ```ignore
//! let mut catalog = Catalog::new();
//! catalog.register(bubble_sort());
//!
//! let mut player = catalog.load("bubble-sort", EngineConfig::default(), Some(20))?;
//! while player.step_forward()? == Advance::Stepped {
//!     draw(player.frame());
//! }
//! ```

pub mod algorithm;
pub mod catalog;
pub mod dispatch;
pub mod driver;
pub mod engine;
pub mod error;
pub mod playback;
pub mod player;
pub mod producer;
pub mod snapshot;

pub use algorithm::{
    AlgorithmDefinition, AlgorithmInfo, Category, Control, InputFn, Mode, OperationFn, RunFn, Visualizer,
};
pub use catalog::Catalog;
pub use dispatch::{press, resolve_press, resolve_size, Invocation};
pub use driver::{DriverCommand, DriverHandle, PlaybackDriver, Update};
pub use engine::{Advance, Engine, EngineConfig};
pub use error::{EngineError, ProducerError, Result};
pub use playback::{PlaybackSpeed, PlaybackState, PlaybackStatus};
pub use player::Player;
pub use producer::{Context, Emit, Producer, StateHandle, Yielder};
pub use snapshot::{
    Cell, Domain, Frame, GraphEdge, GraphNode, GraphView, Grid, Heightmap, Payload, Projection, Snapshot, Tone,
};
