//! Input value types for action node configuration.
//!
//! All input values are template strings that get resolved by minijinja when the
//! action runs. The template context exposes the run's selection and the
//! activation inputs of the trigger that reached the action:
//!
//! ```json
//! {
//!   "key": "opacity",
//!   "value": "{{ 1 / count }}",
//!   "message": "dimming {{ activation | length }} image(s)"
//! }
//! ```
//!
//! The rendered string is then coerced into the type the action declares for
//! that input (number, boolean, ...).

/// An input value is a template string that gets resolved at runtime.
pub type InputValue = String;
