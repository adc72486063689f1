//! Terminal player.

use std::io::Write;
use std::sync::Arc;

use algoviz_core::{Catalog, DriverCommand, EngineError, PlaybackDriver, PlaybackState, Update};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info};

use crate::config::VisConfig;
use crate::error::{Result, VisError};
use crate::render::render;

/// Play one algorithm to completion, drawing every frame to `out`.
///
/// Interactive algorithms have nothing to play; their initial frame and
/// operations are printed instead. Returns the number of steps taken, or
/// `VisError::Fault` if a producer fault stopped the run.
pub async fn play<W: Write>(
    catalog: Arc<Catalog>,
    config: &VisConfig,
    id: &str,
    size: Option<usize>,
    out: &mut W,
) -> Result<u64> {
    let info = catalog
        .get(id)
        .cloned()
        .ok_or_else(|| EngineError::UnknownAlgorithm(id.to_string()))?;

    let driver = PlaybackDriver::spawn(catalog, config.engine());
    let mut updates = driver.subscribe();

    let status = driver.send(DriverCommand::Load { id: id.to_string(), size }).await?;
    writeln!(out, "{} ({})", info.name, info.category)?;

    if !status.operations.is_empty() {
        if let Some(frame) = driver.latest().frame {
            write!(out, "{}", render(info.visualizer, &frame)?)?;
        }
        writeln!(out, "operations: {}", status.operations.join(", "))?;
        return Ok(0);
    }

    driver.send(DriverCommand::TogglePlay).await?;
    info!(algorithm = id, speed_ms = config.speed_ms, "playing");

    let mut shown = None;
    loop {
        let Update { frame, status } = match updates.recv().await {
            Ok(update) => update,
            Err(RecvError::Lagged(skipped)) => {
                debug!(skipped, "terminal fell behind");
                continue;
            }
            Err(RecvError::Closed) => break,
        };

        if shown != Some(status.step_count) {
            if let Some(frame) = &frame {
                writeln!(out, "-- step {} --", status.step_count)?;
                write!(out, "{}", render(info.visualizer, frame)?)?;
            }
            shown = Some(status.step_count);
        }

        if let Some(message) = status.fault {
            return Err(VisError::Fault {
                algorithm: id.to_string(),
                message,
            });
        }
        if !matches!(status.state, PlaybackState::Playing | PlaybackState::Ready) {
            return Ok(status.step_count);
        }
    }
    Ok(shown.unwrap_or(0))
}
