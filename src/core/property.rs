//! Read view over a live property.

use std::fmt;

use super::handle::{ObjectId, Property};
use super::store::{PropertyEntry, PropertyStore};
use crate::util::{DataType, Result, Value};

/// Borrowed view of one property, obtained from [`PropertyStore::get_ref`]
/// or [`Manager::property`](crate::scene::Manager::property).
///
/// `Display` prints the property name.
#[derive(Clone, Copy)]
pub struct PropertyRef<'a> {
    store: &'a PropertyStore,
    handle: Property,
    entry: &'a PropertyEntry,
}

impl<'a> PropertyRef<'a> {
    pub(crate) fn new(store: &'a PropertyStore, handle: Property, entry: &'a PropertyEntry) -> Self {
        Self { store, handle, entry }
    }

    /// The handle this view was built from.
    #[inline]
    pub fn handle(&self) -> Property {
        self.handle
    }

    #[inline]
    pub fn name(&self) -> &'a str {
        &self.entry.name
    }

    /// Raw label, empty until one is set.
    #[inline]
    pub fn label(&self) -> &'a str {
        &self.entry.label
    }

    /// Label if one is set, otherwise the name.
    pub fn label_or_name(&self) -> &'a str {
        if self.entry.label.is_empty() {
            &self.entry.name
        } else {
            &self.entry.label
        }
    }

    pub fn hierarchical_name(&self) -> String {
        // entry is live, so the walk cannot fail
        self.store
            .hierarchical_name(self.handle)
            .unwrap_or_else(|_| self.entry.name.clone())
    }

    #[inline]
    pub fn data_type(&self) -> DataType {
        self.entry.data_type
    }

    /// The object at the root of this property's tree.
    #[inline]
    pub fn fbx_object(&self) -> ObjectId {
        self.store.owner()
    }

    pub fn value(&self) -> Option<&'a Value> {
        self.entry.value.as_ref()
    }

    /// Current value; fails with `WrongType` for compounds.
    pub fn get(&self) -> Result<Value> {
        self.store.get(self.handle)
    }

    pub fn parent(&self) -> Option<Property> {
        self.store.parent(self.handle).ok().flatten()
    }

    pub fn children(&self) -> Vec<Property> {
        self.store.children(self.handle).unwrap_or_default()
    }

    /// Declared items of an Enum property.
    pub fn enum_items(&self) -> &'a [String] {
        &self.entry.enum_items
    }
}

impl PartialEq for PropertyRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl fmt::Display for PropertyRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.entry.name)
    }
}

impl fmt::Debug for PropertyRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyRef")
            .field("handle", &self.handle)
            .field("name", &self.entry.name)
            .field("data_type", &self.entry.data_type)
            .field("value", &self.entry.value)
            .finish()
    }
}
