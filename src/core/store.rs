//! Per-object property arena.
//!
//! Every property of one object lives in a single [`PropertyStore`]. Nodes
//! are addressed by slot with a generation counter, so destroyed slots can be
//! reused without reviving stale handles. Clearing the store drops the whole
//! arena at once and advances the epoch.

use smallvec::SmallVec;
use tracing::{debug, trace};

use super::handle::{ObjectId, Property};
use super::property::PropertyRef;
use crate::util::{DataType, Error, Result, Value, ValueKind};

/// Separator between names in a hierarchical property name.
pub const HIERARCHICAL_SEPARATOR: &str = "|";

/// Optional arguments of property creation.
#[derive(Clone, Debug, Default)]
pub struct CreateOptions {
    /// Display label; empty means "use the name".
    pub label: String,
    /// Return an existing sibling with the same name instead of failing.
    pub reuse_existing: bool,
}

impl CreateOptions {
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            reuse_existing: false,
        }
    }

    pub fn reuse_existing(mut self, reuse: bool) -> Self {
        self.reuse_existing = reuse;
        self
    }
}

/// Result of a create call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Created {
    pub property: Property,
    /// True when an existing property was returned instead of a new one.
    pub found: bool,
}

/// Stored state of one property.
#[derive(Clone, Debug)]
pub(crate) struct PropertyEntry {
    pub(crate) name: String,
    pub(crate) label: String,
    pub(crate) data_type: DataType,
    pub(crate) value: Option<Value>,
    pub(crate) enum_items: Vec<String>,
    pub(crate) parent: Option<u32>,
    pub(crate) children: SmallVec<[u32; 4]>,
}

#[derive(Clone, Debug, Default)]
struct Slot {
    generation: u32,
    entry: Option<PropertyEntry>,
}

/// All properties belonging to one object.
#[derive(Clone, Debug)]
pub struct PropertyStore {
    owner: ObjectId,
    epoch: u32,
    slots: Vec<Slot>,
    free: Vec<u32>,
    roots: SmallVec<[u32; 8]>,
}

impl PropertyStore {
    /// Create an empty store for `owner`.
    pub fn new(owner: ObjectId) -> Self {
        Self {
            owner,
            epoch: 0,
            slots: Vec::new(),
            free: Vec::new(),
            roots: SmallVec::new(),
        }
    }

    /// The object owning every property in this store.
    #[inline]
    pub fn owner(&self) -> ObjectId {
        self.owner
    }

    /// Number of live properties.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.entry.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    fn handle(&self, slot: u32) -> Property {
        Property {
            owner: self.owner,
            epoch: self.epoch,
            slot,
            generation: self.slots[slot as usize].generation,
        }
    }

    fn lookup(&self, p: Property) -> Option<&PropertyEntry> {
        if p.owner != self.owner || p.epoch != self.epoch {
            return None;
        }
        let slot = self.slots.get(p.slot as usize)?;
        if slot.generation != p.generation {
            return None;
        }
        slot.entry.as_ref()
    }

    pub(crate) fn entry(&self, p: Property) -> Result<&PropertyEntry> {
        self.lookup(p)
            .ok_or_else(|| Error::invalid(format!("{:?} was destroyed", p)))
    }

    fn entry_mut(&mut self, p: Property) -> Result<&mut PropertyEntry> {
        self.entry(p)?;
        match self.slots[p.slot as usize].entry.as_mut() {
            Some(entry) => Ok(entry),
            None => Err(Error::invalid(format!("{:?} was destroyed", p))),
        }
    }

    /// True until the property, an ancestor, or the whole store has been destroyed.
    pub fn is_valid(&self, p: Property) -> bool {
        self.lookup(p).is_some()
    }

    /// Borrow a read view of a property.
    pub fn get_ref(&self, p: Property) -> Result<PropertyRef<'_>> {
        let entry = self.entry(p)?;
        Ok(PropertyRef::new(self, p, entry))
    }

    fn sibling_slots(&self, parent: Option<u32>) -> &[u32] {
        match parent {
            Some(slot) => self.slots[slot as usize]
                .entry
                .as_ref()
                .map(|e| e.children.as_slice())
                .unwrap_or(&[]),
            None => self.roots.as_slice(),
        }
    }

    fn find_among(&self, parent: Option<u32>, name: &str) -> Option<u32> {
        self.sibling_slots(parent).iter().copied().find(|&slot| {
            self.slots[slot as usize]
                .entry
                .as_ref()
                .is_some_and(|e| e.name == name)
        })
    }

    /// Create a property at the root of this store (`parent == None`) or under a compound property.
    ///
    /// Names must be non-empty and must not contain [`HIERARCHICAL_SEPARATOR`].
    pub fn create(
        &mut self,
        parent: Option<Property>,
        data_type: DataType,
        name: &str,
        options: CreateOptions,
    ) -> Result<Created> {
        if name.is_empty() {
            return Err(Error::InvalidArgument("property name is empty".into()));
        }
        if name.contains(HIERARCHICAL_SEPARATOR) {
            return Err(Error::InvalidArgument(format!(
                "property name '{}' contains '{}'",
                name, HIERARCHICAL_SEPARATOR
            )));
        }

        let parent_slot = match parent {
            None => None,
            Some(p) => {
                let entry = self
                    .lookup(p)
                    .ok_or_else(|| Error::InvalidParent(format!("{:?} is not a live property", p)))?;
                if !entry.data_type.is_compound() {
                    return Err(Error::InvalidParent(format!(
                        "'{}' is {} and cannot hold children",
                        entry.name, entry.data_type
                    )));
                }
                Some(p.slot)
            }
        };

        if let Some(existing) = self.find_among(parent_slot, name) {
            if options.reuse_existing {
                trace!(name, "reusing existing property");
                return Ok(Created {
                    property: self.handle(existing),
                    found: true,
                });
            }
            return Err(Error::DuplicateName(name.to_string()));
        }

        let entry = PropertyEntry {
            name: name.to_string(),
            label: options.label,
            data_type,
            value: Value::default_for(data_type.kind),
            enum_items: Vec::new(),
            parent: parent_slot,
            children: SmallVec::new(),
        };

        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot as usize].entry = Some(entry);
                slot
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    entry: Some(entry),
                });
                (self.slots.len() - 1) as u32
            }
        };

        match parent_slot {
            Some(ps) => {
                if let Some(parent_entry) = self.slots[ps as usize].entry.as_mut() {
                    parent_entry.children.push(slot);
                }
            }
            None => self.roots.push(slot),
        }

        debug!(owner = ?self.owner, name, data_type = %data_type, "created property");
        Ok(Created {
            property: self.handle(slot),
            found: false,
        })
    }

    /// Find a root property by name, or by a `|`-joined hierarchical name.
    pub fn find(&self, name: &str) -> Option<Property> {
        let mut parts = name.split(HIERARCHICAL_SEPARATOR);
        let mut slot = self.find_among(None, parts.next()?)?;
        for part in parts {
            slot = self.find_among(Some(slot), part)?;
        }
        Some(self.handle(slot))
    }

    /// Find a direct child of `p` by name.
    pub fn find_child(&self, p: Property, name: &str) -> Result<Option<Property>> {
        self.entry(p)?;
        Ok(self.find_among(Some(p.slot), name).map(|slot| self.handle(slot)))
    }

    /// Root properties in creation order.
    pub fn roots(&self) -> Vec<Property> {
        self.roots.iter().map(|&slot| self.handle(slot)).collect()
    }

    /// Children of `p` in creation order.
    pub fn children(&self, p: Property) -> Result<Vec<Property>> {
        let entry = self.entry(p)?;
        Ok(entry.children.iter().map(|&slot| self.handle(slot)).collect())
    }

    /// Parent property of `p`, `None` for root properties.
    pub fn parent(&self, p: Property) -> Result<Option<Property>> {
        let entry = self.entry(p)?;
        Ok(entry.parent.map(|slot| self.handle(slot)))
    }

    /// Every live property, depth-first in creation order.
    pub fn iter(&self) -> impl Iterator<Item = Property> + '_ {
        let mut stack: Vec<u32> = self.roots.iter().rev().copied().collect();
        std::iter::from_fn(move || {
            let slot = stack.pop()?;
            if let Some(entry) = self.slots[slot as usize].entry.as_ref() {
                stack.extend(entry.children.iter().rev().copied());
            }
            Some(self.handle(slot))
        })
    }

    /// Root-to-self path of names.
    pub fn hierarchical_name(&self, p: Property) -> Result<String> {
        let mut names = vec![self.entry(p)?.name.as_str()];
        let mut cursor = self.entry(p)?.parent;
        while let Some(slot) = cursor {
            let entry = self.slots[slot as usize]
                .entry
                .as_ref()
                .ok_or_else(|| Error::invalid("dangling parent link"))?;
            names.push(entry.name.as_str());
            cursor = entry.parent;
        }
        names.reverse();
        Ok(names.join(HIERARCHICAL_SEPARATOR))
    }

    /// Current value; Compound properties have none.
    pub fn get(&self, p: Property) -> Result<Value> {
        let entry = self.entry(p)?;
        entry
            .value
            .clone()
            .ok_or_else(|| Error::wrong_type("a value type", entry.data_type))
    }

    /// Assign a value, coercing numeric inputs to the property's kind.
    ///
    /// Returns whether the coercion succeeded; every defined coercion does.
    pub fn set(&mut self, p: Property, value: impl Into<Value>) -> Result<bool> {
        let entry = self.entry_mut(p)?;
        let value = value.into();
        let stored = value.coerce(entry.data_type.kind, entry.enum_items.len())?;
        trace!(name = %entry.name, value = %stored, "set property");
        entry.value = Some(stored);
        Ok(true)
    }

    pub fn set_label(&mut self, p: Property, label: impl Into<String>) -> Result<()> {
        self.entry_mut(p)?.label = label.into();
        Ok(())
    }

    /// Declare the next item of an Enum property; returns its ordinal.
    pub fn add_enum_value(&mut self, p: Property, item: impl Into<String>) -> Result<i32> {
        let entry = self.entry_mut(p)?;
        if entry.data_type.kind != ValueKind::Enum {
            return Err(Error::wrong_type(ValueKind::Enum, entry.data_type));
        }
        entry.enum_items.push(item.into());
        Ok(entry.enum_items.len() as i32 - 1)
    }

    /// Destroy a childless property.
    ///
    /// A property with children is never orphaned: the call fails with
    /// [`Error::HasChildren`] and leaves the tree untouched.
    pub fn destroy(&mut self, p: Property) -> Result<()> {
        let entry = self.entry(p)?;
        if !entry.children.is_empty() {
            return Err(Error::HasChildren(entry.name.clone()));
        }
        self.detach(p.slot);
        self.free_slot(p.slot);
        Ok(())
    }

    /// Destroy every descendant of `p`; `p` stays valid and childless.
    pub fn destroy_children(&mut self, p: Property) -> Result<()> {
        let entry = self.entry(p)?;
        let children: SmallVec<[u32; 4]> = entry.children.clone();
        if children.is_empty() {
            return Ok(());
        }
        for child in children {
            for slot in self.subtree_post_order(child) {
                self.free_slot(slot);
            }
        }
        if let Some(entry) = self.slots[p.slot as usize].entry.as_mut() {
            entry.children.clear();
        }
        Ok(())
    }

    /// Destroy `p` and all of its descendants.
    pub fn destroy_recursively(&mut self, p: Property) -> Result<()> {
        self.entry(p)?;
        self.detach(p.slot);
        for slot in self.subtree_post_order(p.slot) {
            self.free_slot(slot);
        }
        Ok(())
    }

    /// Drop every property at once; all outstanding handles become invalid.
    pub fn clear(&mut self) {
        debug!(owner = ?self.owner, count = self.len(), "clearing properties");
        self.slots.clear();
        self.free.clear();
        self.roots.clear();
        self.epoch = self.epoch.wrapping_add(1);
    }

    fn subtree_post_order(&self, root: u32) -> Vec<u32> {
        let mut order = Vec::new();
        let mut stack = vec![(root, false)];
        while let Some((slot, expanded)) = stack.pop() {
            if expanded {
                order.push(slot);
                continue;
            }
            stack.push((slot, true));
            if let Some(entry) = self.slots[slot as usize].entry.as_ref() {
                stack.extend(entry.children.iter().map(|&c| (c, false)));
            }
        }
        order
    }

    fn detach(&mut self, slot: u32) {
        let parent = self.slots[slot as usize].entry.as_ref().and_then(|e| e.parent);
        match parent {
            Some(ps) => {
                if let Some(parent_entry) = self.slots[ps as usize].entry.as_mut() {
                    parent_entry.children.retain(|c| *c != slot);
                }
            }
            None => self.roots.retain(|r| *r != slot),
        }
    }

    fn free_slot(&mut self, slot: u32) {
        let s = &mut self.slots[slot as usize];
        if let Some(entry) = s.entry.take() {
            debug!(owner = ?self.owner, name = %entry.name, "destroyed property");
            s.generation = s.generation.wrapping_add(1);
            self.free.push(slot);
        }
    }
}
