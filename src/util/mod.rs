//! Utility types and functions for the exporter.
//!
//! This module contains fundamental types used throughout the library:
//! - [`ValueKind`] / [`DataType`] - property type tags
//! - [`Value`] - tagged property values and coercion
//! - [`Error`] / [`Result`] - Error handling
//! - Math type re-exports from glam

mod data_type;
mod value;
mod error;
mod math;

pub use data_type::*;
pub use value::*;
pub use error::*;
pub use math::*;
