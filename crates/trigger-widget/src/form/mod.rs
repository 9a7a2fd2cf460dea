//! Dynamic form generation
//!
//! - [`field_renderer`]: one descriptor to markup plus control
//! - [`assembler`]: ordered descriptors to a form container
//! - [`controls`]: live values and serialization

pub mod assembler;
pub mod controls;
pub mod field_renderer;

pub use assembler::{assemble_confirmation, assemble_form};
pub use controls::{ControlOption, FieldControl, FormError, RenderedForm};
pub use field_renderer::{render_field, RenderedField};
