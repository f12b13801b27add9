//! Canvasflow Host Canvas
//!
//! The canvas is the external state workflows observe and act on. This crate
//! provides the two halves the engine needs from it:
//!
//! - [`Snapshot`]: an immutable capture of the current selection, taken by the
//!   host at the moment a run starts. Condition evaluation and actions read it.
//! - [`Canvas`]: the host's mutator interface. Actions never touch the snapshot;
//!   they signal their effects through this trait.
//!
//! [`InMemoryCanvas`] is a reference implementation backed by a
//! [`CanvasDocument`], used by the CLI and by tests.

mod canvas;
mod element;
mod error;
mod memory;
mod snapshot;

pub use canvas::Canvas;
pub use element::{Element, kinds};
pub use error::CanvasError;
pub use memory::{CanvasDocument, InMemoryCanvas};
pub use snapshot::Snapshot;
