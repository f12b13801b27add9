//! Canvasflow Action Runtime
//!
//! Actions are the side-effecting half of a workflow. This crate defines:
//!
//! - [`Action`]: the host extension point. An action receives an
//!   [`ActionContext`] (snapshot, activation inputs, canvas mutators) plus its
//!   resolved inputs, and reports success or failure.
//! - [`ActionRegistry`]: maps the action names used in workflow definitions to
//!   implementations. [`ActionRegistry::with_builtins`] installs the built-in set.
//! - [`ActionExecutor`]: runs one action node end to end: template resolution,
//!   input coercion, the effect itself, an optional timeout, and panic capture.
//!
//! # Built-in actions
//!
//! | name           | inputs                     | effect                                   |
//! |----------------|----------------------------|------------------------------------------|
//! | `log`          | `message` (optional)       | logs the activation                      |
//! | `set_property` | `key`, `value`             | sets a property on each activated element |
//! | `move_by`      | `dx`, `dy`                 | translates each activated element        |
//! | `remove`       |                            | removes each activated element           |
//! | `delay`        | `ms`                       | sleeps                                   |

mod action;
pub mod builtins;
mod error;
mod executor;
mod input;
mod registry;

pub use action::{Action, ActionContext, FnAction, action_fn};
pub use error::ActionError;
pub use executor::{ActionExecutor, ActionInvocation};
pub use input::{InputType, coerce_inputs, resolve_inputs, template_context};
pub use registry::ActionRegistry;
