//! Hierarchy export.
//!
//! - [`Exporter`] - builds a scene from a [`SourceNode`] tree and writes it
//! - [`ascii`] - FBX 7.4 ASCII writer
//! - [`ExportSettings`] - persisted naming and scene-info settings
//! - [`SceneDescription`] - JSON hierarchy input

pub mod ascii;
mod exporter;
mod settings;
mod source;

pub use exporter::Exporter;
pub use settings::ExportSettings;
pub use source::{SceneDescription, SourceNode};
