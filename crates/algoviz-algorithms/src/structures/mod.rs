//! Data structures drawn as node/edge graphs.
//!
//! The interactive structures keep their value in the engine's logical
//! state. Each operation mutates it in place through the state lease and
//! emits graph projections with the touched node highlighted; the closing
//! `Ready` frame carries the structure itself.

pub mod bst;
pub mod linked_list;
pub mod min_heap;
pub mod queue;
pub mod stack;

use algoviz_core::{Catalog, GraphView, Snapshot};

pub use bst::SearchTree;
pub use linked_list::LinkedList;
pub use min_heap::HeapInput;
pub use queue::Queue;
pub use stack::Stack;

/// Register every data structure.
pub fn register(catalog: &mut Catalog) {
    catalog
        .register(bst::definition())
        .register(linked_list::definition())
        .register(min_heap::definition())
        .register(queue::definition())
        .register(stack::definition());
}

pub(crate) fn show<T>(graph: GraphView, description: impl Into<String>) -> Snapshot<T> {
    Snapshot::projection(graph).describe(description)
}
