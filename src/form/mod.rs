//! Form surface
//!
//! The user-facing side of the predictor: control descriptors in
//! feature-vector order, submission parsing, and verdict rendering.

pub mod fields;
pub mod render;

pub use fields::{form_fields, parse_form, parse_form_text, FieldKind, FormField};
pub use render::{render_error, render_outcome, render_prompt, render_state};
