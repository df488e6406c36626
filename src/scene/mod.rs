//! Scene layer - objects that own property trees.
//!
//! - [`Manager`] - arena of objects, routes property handles to their store
//! - [`ObjectClass`] - node, document, scene, texture, ... with built-in properties
//! - [`DocumentInfo`] - title/author block attached to documents
//! - [`BlendMode`] / [`WrapMode`] - texture enums

mod object;
mod manager;
mod properties;
mod document;
mod node;
mod texture;

pub use object::{props, Builtin, ObjectClass};
pub use manager::{Manager, ROOT_NODE_NAME};
pub use document::DocumentInfo;
pub use texture::{blend_mode_items, wrap_mode_items, BlendMode, WrapMode};
