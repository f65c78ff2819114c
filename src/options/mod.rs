//! Options — the form-to-viewer translation boundary.
//!
//! Turns a `FormInput` (string-typed form snapshot) into a `ViewerConfig`
//! (typed option record) in two pure stages: coercion, then resolution
//! against the default option table.
//!
//! Nothing here knows about dialogs, surfaces or busy indicators.

pub mod coerce;
pub mod defaults;
pub mod resolve;

pub use coerce::{CoercedOptions, coerce};
pub use defaults::{OptionName, defaults};
pub use resolve::{resolve, resolve_form};
