//! Canvasflow Workflow
//!
//! This crate provides the "locked" workflow representation for canvasflow.
//! A locked workflow is the typed, indexed form of a [`canvasflow_config::WorkflowDef`]
//! that the engine walks during a run.
//!
//! Key differences from `canvasflow-config`:
//! - Nodes are a tagged sum type ([`NodeKind`]) matched exhaustively by the engine
//! - Node ids are indexed for O(1) lookup and checked for uniqueness
//! - Referential integrity is NOT checked: a `next` id that does not resolve is
//!   a legal transient state while the editor builds the graph one node at a time

mod error;
mod graph;
mod node;
mod workflow;

pub use error::WorkflowError;
pub use graph::Graph;
pub use node::{ActionSpec, Node, NodeKind, TriggerSpec};
pub use workflow::Workflow;
