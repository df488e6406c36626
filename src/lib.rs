//! # fbx-exporter
//!
//! Typed, hierarchical property trees attached to scene objects, plus a
//! small exporter that turns a node hierarchy into an ASCII FBX file.
//!
//! ## Modules
//!
//! - [`util`] - Value kinds, data types, values, errors, math
//! - [`core`] - Property handles, per-object property stores, animation layers
//! - [`scene`] - Object manager, nodes, documents, built-in properties
//! - [`export`] - Hierarchy exporter, ASCII writer, settings
//!
//! ## Example
//!
//! ```
//! use fbx_exporter::prelude::*;
//!
//! # fn main() -> fbx_exporter::Result<()> {
//! let mut manager = Manager::new();
//! let node = manager.create_object(ObjectClass::Node, "Cube")?;
//! let p = manager.create_property(node, DataType::DOUBLE, "weight")?;
//! manager.set(p, 0.5)?;
//! assert_eq!(manager.get_as::<f64>(p)?, 0.5);
//!
//! let label = manager.create_property(node, DataType::STRING, "label")?;
//! manager.set(label, 0.5)?;
//! assert_eq!(manager.get_as::<String>(label)?, "0.500000");
//! # Ok(())
//! # }
//! ```

pub mod util;
pub mod core;
pub mod scene;
pub mod export;

// Re-export commonly used types
pub use util::{DataType, Error, Result, Value, ValueKind};
pub use core::{ObjectId, Property};
pub use scene::{Manager, ObjectClass};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{DataType, Error, LocalTransform, Result, Value, ValueKind};
    pub use crate::core::{AnimCurve, CreateOptions, ObjectId, Property, PropertyParent};
    pub use crate::scene::{props, BlendMode, DocumentInfo, Manager, ObjectClass, WrapMode};
    pub use crate::export::{ExportSettings, Exporter, SceneDescription, SourceNode};
}
