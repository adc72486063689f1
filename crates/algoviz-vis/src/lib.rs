//! Algoviz Visualization Host
//!
//! Plays catalog algorithms in the terminal or streams them to a browser.
//!
//! # Architecture
//!
//! - **Render**: text renderers, one per visualizer kind
//! - **Terminal**: plays one algorithm to completion on stdout
//! - **REST API**: load algorithms, control playback, run commands
//! - **WebSocket**: streams every published frame to the frontend
//!
//! # Usage
//!
//! ```ignore
//! let catalog = Arc::new(algoviz_algorithms::catalog());
//!
//! let server = VisServer::new(catalog, &VisConfig::default());
//! server.serve(3000).await?;
//! ```

mod config;
mod error;
mod render;
mod server;
mod terminal;

pub use config::{parse_args, Command, VisConfig, DEFAULT_PORT, SEED_VAR};
pub use error::{RenderError, Result, VisError};
pub use render::{render, renderer_for, BarChart, GraphText, GridText, Renderer, TerrainShade};
pub use server::VisServer;
pub use terminal::play;
