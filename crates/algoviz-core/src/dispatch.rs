//! Resolves control presses into engine commands.

use std::collections::HashMap;
use std::ops::RangeInclusive;

use rand::Rng;
use tracing::{debug, warn};

use crate::algorithm::{AlgorithmInfo, Control};
use crate::error::{EngineError, Result};
use crate::player::Player;

/// Input ids treated as the generic value field for buttons.
pub const VALUE_FIELDS: [&str; 2] = ["value", "val"];

/// Fallback argument range when an algorithm has no value field.
pub const FALLBACK_RANGE: RangeInclusive<i64> = 1..=99;

/// A command ready to hand to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub method: &'static str,
    pub args: Vec<i64>,
}

/// Resolve a button press to its operation and argument.
///
/// The argument is read from the value field in `inputs`, falling back to
/// that field's default. Algorithms without a value field get a random
/// argument in [`FALLBACK_RANGE`].
pub fn resolve_press(
    info: &AlgorithmInfo,
    button: &str,
    inputs: &HashMap<String, i64>,
    rng: &mut impl Rng,
) -> Result<Invocation> {
    let method = info.controls.iter().find_map(|control| match control {
        Control::Button { id, method, .. } if *id == button => Some(*method),
        _ => None,
    });
    let Some(method) = method else {
        warn!(algorithm = info.id, button, "unknown button");
        return Err(EngineError::UnknownControl {
            algorithm: info.id.to_string(),
            button: button.to_string(),
        });
    };

    let value_field = info.controls.iter().find_map(|control| match control {
        Control::NumericInput {
            id, default_value, ..
        } if VALUE_FIELDS.contains(id) => Some((*id, *default_value)),
        _ => None,
    });

    let value = match value_field {
        Some((id, default_value)) => inputs.get(id).copied().unwrap_or(default_value),
        None => rng.gen_range(FALLBACK_RANGE),
    };

    debug!(algorithm = info.id, button, method, value, "resolved button press");
    Ok(Invocation {
        method,
        args: vec![value],
    })
}

/// Size argument for a reset, read from the first non-value numeric input.
pub fn resolve_size(info: &AlgorithmInfo, inputs: &HashMap<String, i64>) -> Option<usize> {
    info.controls.iter().find_map(|control| match control {
        Control::NumericInput { id, .. } if !VALUE_FIELDS.contains(id) => {
            inputs.get(*id).and_then(|v| usize::try_from(*v).ok())
        }
        _ => None,
    })
}

/// Resolve a button press and run it on the player.
pub fn press(
    player: &mut dyn Player,
    button: &str,
    inputs: &HashMap<String, i64>,
    rng: &mut impl Rng,
) -> Result<Invocation> {
    let invocation = {
        let Some(info) = player.info() else {
            warn!(button, "button pressed with no algorithm loaded");
            return Err(EngineError::NoAlgorithm);
        };
        resolve_press(info, button, inputs, rng)?
    };
    player.run_command(invocation.method, &invocation.args)?;
    Ok(invocation)
}
