//! Canvasflow Config
//!
//! This crate contains the serializable workflow configuration types for canvasflow.
//! These types represent trigger/action graphs as authored by the editor, before
//! they are locked into an executable graph by `canvasflow-workflow`.
//!
//! Configuration is usually loaded from JSON:
//!
//! ```json
//! {
//!   "workflow_id": "dim-images",
//!   "name": "Dim selected images",
//!   "nodes": [
//!     {
//!       "id": "t1",
//!       "label": "Trigger",
//!       "type": "trigger",
//!       "condition": { "when": "selected_element", "conditional": "contains", "target": "image" },
//!       "next": ["a1"]
//!     },
//!     {
//!       "id": "a1",
//!       "label": "Action",
//!       "type": "action",
//!       "action": "set_property",
//!       "inputs": { "key": "opacity", "value": "0.5" },
//!       "next": []
//!     }
//!   ]
//! }
//! ```

mod condition;
mod input;
mod node;
mod workflow;

pub use condition::Condition;
pub use input::InputValue;
pub use node::{NodeDef, NodeType};
pub use workflow::WorkflowDef;
