//! Algorithm descriptors.

use std::collections::BTreeMap;
use std::fmt;

use rand::rngs::StdRng;
use serde::Serialize;

use crate::producer::{Context, Producer, StateHandle};
use crate::snapshot::Domain;

/// Catalog grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Category {
    Sorting,
    Pathfinding,
    #[serde(rename = "Data Structures")]
    DataStructures,
    Backtracking,
    Greedy,
    Terrain,
    Shuffling,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Sorting => "Sorting",
            Category::Pathfinding => "Pathfinding",
            Category::DataStructures => "Data Structures",
            Category::Backtracking => "Backtracking",
            Category::Greedy => "Greedy",
            Category::Terrain => "Terrain",
            Category::Shuffling => "Shuffling",
        };
        f.write_str(name)
    }
}

/// Which renderer draws an algorithm's snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Visualizer {
    #[serde(rename = "bar-chart")]
    BarChart,
    #[serde(rename = "grid-2d")]
    Grid2d,
    #[serde(rename = "primitive-graph")]
    PrimitiveGraph,
    #[serde(rename = "terrain-3d")]
    Terrain3d,
}

impl fmt::Display for Visualizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Visualizer::BarChart => "bar-chart",
            Visualizer::Grid2d => "grid-2d",
            Visualizer::PrimitiveGraph => "primitive-graph",
            Visualizer::Terrain3d => "terrain-3d",
        };
        f.write_str(name)
    }
}

/// A UI control declared by an algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Control {
    NumericInput {
        label: &'static str,
        id: &'static str,
        default_value: i64,
    },
    Button {
        label: &'static str,
        id: &'static str,
        method: &'static str,
    },
}

impl Control {
    pub fn input(label: &'static str, id: &'static str, default_value: i64) -> Self {
        Control::NumericInput {
            label,
            id,
            default_value,
        }
    }

    pub fn button(label: &'static str, id: &'static str, method: &'static str) -> Self {
        Control::Button { label, id, method }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Control::NumericInput { id, .. } | Control::Button { id, .. } => id,
        }
    }
}

/// Static, serializable part of an algorithm definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub visualizer: Visualizer,
    pub description: &'static str,
    pub controls: Vec<Control>,
}

impl AlgorithmInfo {
    pub fn new(
        id: &'static str,
        name: &'static str,
        category: Category,
        visualizer: Visualizer,
        description: &'static str,
    ) -> Self {
        Self {
            id,
            name,
            category,
            visualizer,
            description,
            controls: Vec::new(),
        }
    }

    pub fn with_controls(mut self, controls: impl IntoIterator<Item = Control>) -> Self {
        self.controls = controls.into_iter().collect();
        self
    }

    pub fn control(&self, id: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.id() == id)
    }
}

/// Builds the initial logical state from an optional size.
pub type InputFn<T> = fn(Option<usize>, &mut StdRng) -> T;

/// Builds the producer of an autonomous algorithm.
pub type RunFn<T> = fn(Context<T>) -> Producer<T>;

/// Builds the producer of one interactive operation.
pub type OperationFn<T> = fn(Context<T>, &[i64]) -> Producer<T>;

/// How an algorithm produces snapshots. Exactly one per definition.
pub enum Mode<T> {
    /// One producer for the whole run
    Autonomous(RunFn<T>),
    /// One producer per invoked operation, chained on persistent state
    Interactive(BTreeMap<&'static str, OperationFn<T>>),
}

impl<T> Clone for Mode<T> {
    fn clone(&self) -> Self {
        match self {
            Mode::Autonomous(run) => Mode::Autonomous(*run),
            Mode::Interactive(methods) => Mode::Interactive(methods.clone()),
        }
    }
}

/// A catalog entry: descriptor, input generator and producer mode.
pub struct AlgorithmDefinition<T> {
    pub info: AlgorithmInfo,
    pub generate_input: InputFn<T>,
    pub mode: Mode<T>,
}

impl<T> Clone for AlgorithmDefinition<T> {
    fn clone(&self) -> Self {
        Self {
            info: self.info.clone(),
            generate_input: self.generate_input,
            mode: self.mode.clone(),
        }
    }
}

impl<T> AlgorithmDefinition<T> {
    pub fn autonomous(info: AlgorithmInfo, generate_input: InputFn<T>, run: RunFn<T>) -> Self {
        Self {
            info,
            generate_input,
            mode: Mode::Autonomous(run),
        }
    }

    pub fn interactive(
        info: AlgorithmInfo,
        generate_input: InputFn<T>,
        methods: impl IntoIterator<Item = (&'static str, OperationFn<T>)>,
    ) -> Self {
        Self {
            info,
            generate_input,
            mode: Mode::Interactive(methods.into_iter().collect()),
        }
    }

    pub fn id(&self) -> &'static str {
        self.info.id
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self.mode, Mode::Interactive(_))
    }

    /// Look up a named operation.
    pub fn operation(&self, name: &str) -> Option<OperationFn<T>> {
        match &self.mode {
            Mode::Autonomous(_) => None,
            Mode::Interactive(methods) => methods.get(name).copied(),
        }
    }

    /// Names of all operations, sorted.
    pub fn operations(&self) -> Vec<&'static str> {
        match &self.mode {
            Mode::Autonomous(_) => Vec::new(),
            Mode::Interactive(methods) => methods.keys().copied().collect(),
        }
    }
}

impl<T: Domain> AlgorithmDefinition<T> {
    /// Run an autonomous algorithm on a given input, outside any engine.
    ///
    /// Returns `None` for interactive algorithms.
    pub fn simulate(&self, input: T, rng: StdRng) -> Option<Producer<T>> {
        match &self.mode {
            Mode::Autonomous(run) => Some(run(Context {
                state: StateHandle::new(input),
                rng,
            })),
            Mode::Interactive(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Snapshot;

    fn noop(_ctx: Context<Vec<i64>>, _args: &[i64]) -> Producer<Vec<i64>> {
        Producer::new(|y| async move {
            y.emit(Snapshot::domain(vec![])).await;
        })
    }

    fn empty_input(_size: Option<usize>, _rng: &mut StdRng) -> Vec<i64> {
        Vec::new()
    }

    #[test]
    fn interactive_lookup() {
        let info = AlgorithmInfo::new(
            "demo",
            "Demo",
            Category::DataStructures,
            Visualizer::BarChart,
            "demo",
        );
        let def = AlgorithmDefinition::interactive(info, empty_input, [("push", noop as OperationFn<_>)]);

        assert!(def.is_interactive());
        assert!(def.operation("push").is_some());
        assert!(def.operation("pop").is_none());
        assert_eq!(def.operations(), vec!["push"]);
    }

    #[test]
    fn info_serialization() {
        let info = AlgorithmInfo::new(
            "stack-interactive",
            "Stack",
            Category::DataStructures,
            Visualizer::PrimitiveGraph,
            "LIFO",
        )
        .with_controls([
            Control::input("Value", "val", 42),
            Control::button("Push", "btn-push", "push"),
        ]);

        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"category\":\"Data Structures\""));
        assert!(json.contains("\"visualizer\":\"primitive-graph\""));
        assert!(json.contains("\"type\":\"numeric_input\""));
        assert!(json.contains("\"method\":\"push\""));
    }

    #[test]
    fn display_names() {
        assert_eq!(Category::DataStructures.to_string(), "Data Structures");
        assert_eq!(Visualizer::Terrain3d.to_string(), "terrain-3d");
    }
}
