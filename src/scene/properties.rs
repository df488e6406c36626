//! Handle-based property operations.
//!
//! Every call resolves the owning object from the handle and forwards to
//! that object's [`PropertyStore`](crate::core::PropertyStore).

use tracing::trace;

use super::Manager;
use crate::core::{AnimCurve, CreateOptions, Created, ObjectId, Property, PropertyParent, PropertyRef};
use crate::util::{DataType, Error, Result, Value};

impl Manager {
    /// Borrow a read view of a live property.
    pub fn property(&self, p: Property) -> Result<PropertyRef<'_>> {
        self.properties(p.owner())?.get_ref(p)
    }

    /// True until the property, an ancestor, or its owner has been destroyed or cleared.
    pub fn is_valid(&self, p: Property) -> bool {
        self.properties(p.owner()).is_ok_and(|store| store.is_valid(p))
    }

    /// Create a property under an object or a compound property.
    pub fn create_property(
        &mut self,
        parent: impl Into<PropertyParent>,
        data_type: DataType,
        name: &str,
    ) -> Result<Property> {
        Ok(self
            .create_property_with(parent, data_type, name, CreateOptions::default())?
            .property)
    }

    /// Create a property with a label and duplicate-name policy.
    pub fn create_property_with(
        &mut self,
        parent: impl Into<PropertyParent>,
        data_type: DataType,
        name: &str,
        options: CreateOptions,
    ) -> Result<Created> {
        let parent = parent.into();
        let store = self
            .properties_mut(parent.owner())
            .map_err(|_| Error::InvalidParent(format!("owner {:?} is not alive", parent.owner())))?;
        let parent_property = match parent {
            PropertyParent::Object(_) => None,
            PropertyParent::Property(p) => Some(p),
        };
        store.create(parent_property, data_type, name, options)
    }

    /// Find a property of `object` by name or `|`-joined hierarchical name.
    pub fn find_property(&self, object: ObjectId, name: &str) -> Result<Option<Property>> {
        Ok(self.properties(object)?.find(name))
    }

    /// Find a built-in or previously created property, failing if it does not exist.
    pub fn expect_property(&self, object: ObjectId, name: &str) -> Result<Property> {
        self.find_property(object, name)?
            .ok_or_else(|| Error::InvalidArgument(format!("object {:?} has no property '{}'", object, name)))
    }

    pub fn find_child(&self, p: Property, name: &str) -> Result<Option<Property>> {
        self.properties(p.owner())?.find_child(p, name)
    }

    pub fn get(&self, p: Property) -> Result<Value> {
        self.properties(p.owner())?.get(p)
    }

    /// Typed read, e.g. `manager.get_as::<bool>(visibility)`.
    pub fn get_as<T>(&self, p: Property) -> Result<T>
    where
        T: TryFrom<Value, Error = Error>,
    {
        T::try_from(self.get(p)?)
    }

    /// Assign a value, coercing numeric inputs; see [`Value::coerce`].
    pub fn set(&mut self, p: Property, value: impl Into<Value>) -> Result<bool> {
        self.properties_mut(p.owner())?.set(p, value)
    }

    pub fn set_label(&mut self, p: Property, label: impl Into<String>) -> Result<()> {
        self.properties_mut(p.owner())?.set_label(p, label)
    }

    pub fn add_enum_value(&mut self, p: Property, item: impl Into<String>) -> Result<i32> {
        self.properties_mut(p.owner())?.add_enum_value(p, item)
    }

    /// Destroy a childless property; fails with `HasChildren` otherwise.
    pub fn destroy_property(&mut self, p: Property) -> Result<()> {
        self.properties_mut(p.owner())?.destroy(p)
    }

    pub fn destroy_children(&mut self, p: Property) -> Result<()> {
        self.properties_mut(p.owner())?.destroy_children(p)
    }

    pub fn destroy_recursively(&mut self, p: Property) -> Result<()> {
        self.properties_mut(p.owner())?.destroy_recursively(p)
    }

    /// Drop every property of `object`.
    pub fn clear_properties(&mut self, object: ObjectId) -> Result<()> {
        self.properties_mut(object)?.clear();
        Ok(())
    }

    /// Look up, and optionally create, the curve driving `p` on `layer`.
    ///
    /// `layer` is required. `channel == None` selects the default channel.
    /// Returns `Ok(None)` when no curve is bound or when the channel cannot
    /// be resolved for the property's type (strings, compounds, a Double3
    /// without a component name).
    pub fn get_curve(
        &mut self,
        p: Property,
        layer: Option<ObjectId>,
        channel: Option<&str>,
        create_if_missing: bool,
    ) -> Result<Option<AnimCurve>> {
        let layer = layer.ok_or_else(|| Error::InvalidArgument("animation layer is required".into()))?;

        let resolved = {
            let prop = self.property(p)?;
            prop.data_type().resolve_channel(channel, prop.name())
        };

        let anim = self.anim_layer_mut(layer)?;
        let Some(channel) = resolved else {
            trace!(?p, "no curve channel for property");
            return Ok(None);
        };

        if create_if_missing {
            Ok(Some(anim.find_or_create_channel_binding(p, channel)))
        } else {
            Ok(anim.find_binding(p, channel))
        }
    }

    /// Curves on `layer` whose property has been destroyed or cleared.
    pub fn stale_curves(&self, layer: ObjectId) -> Result<Vec<AnimCurve>> {
        Ok(self
            .anim_layer(layer)?
            .stale_curves(|p| self.is_valid(p))
            .collect())
    }
}
