//! Identity handles for objects and properties.
//!
//! Handles are small `Copy` keys into arenas. Equality is identity: two
//! handles compare equal only when they name the same slot of the same
//! arena generation, never because the values behind them match.

use std::fmt;

/// Identity of an object (node, document, texture, ...) in a [`Manager`].
///
/// [`Manager`]: crate::scene::Manager
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl ObjectId {
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index, stable for the lifetime of the object.
    #[inline]
    pub const fn index(&self) -> u32 {
        self.index
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({}v{})", self.index, self.generation)
    }
}

/// Identity of one property inside its owner's [`PropertyStore`].
///
/// The epoch changes whenever the owner clears its properties, so handles
/// taken before a clear never alias properties created after it.
///
/// [`PropertyStore`]: super::PropertyStore
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Property {
    pub(crate) owner: ObjectId,
    pub(crate) epoch: u32,
    pub(crate) slot: u32,
    pub(crate) generation: u32,
}

impl Property {
    /// The object at the root of this property's tree.
    #[inline]
    pub const fn owner(&self) -> ObjectId {
        self.owner
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Property({:?}/{}:{}v{})",
            self.owner, self.epoch, self.slot, self.generation
        )
    }
}

/// Where a new property is attached: directly under an object, or under a compound property.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyParent {
    Object(ObjectId),
    Property(Property),
}

impl PropertyParent {
    /// The object owning the tree the new property joins.
    pub const fn owner(&self) -> ObjectId {
        match self {
            Self::Object(id) => *id,
            Self::Property(p) => p.owner,
        }
    }
}

impl From<ObjectId> for PropertyParent {
    fn from(id: ObjectId) -> Self {
        Self::Object(id)
    }
}

impl From<Property> for PropertyParent {
    fn from(p: Property) -> Self {
        Self::Property(p)
    }
}
