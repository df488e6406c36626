//! Core layer - the typed hierarchical property store.
//!
//! This module provides:
//! - [`ObjectId`] / [`Property`] - identity handles
//! - [`PropertyStore`] - per-object property arena
//! - [`PropertyRef`] - read view over a live property
//! - [`AnimLayer`] / [`AnimCurve`] - curve bindings keyed by property channel

mod handle;
mod store;
mod property;
mod anim;

pub use handle::{ObjectId, Property, PropertyParent};
pub use store::{CreateOptions, Created, PropertyStore, HIERARCHICAL_SEPARATOR};
pub use property::PropertyRef;
pub use anim::{AnimCurve, AnimLayer, CurveBinding};
