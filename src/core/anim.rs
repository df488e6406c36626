//! Animation layers and curve bindings.
//!
//! A layer owns its curves. A property never holds a curve: the binding is
//! a (property, channel) key in the layer's table, looked up on demand, so
//! destroying either side leaves the other intact.

use tracing::debug;

use super::handle::{ObjectId, Property};

/// Handle of a curve owned by an animation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnimCurve {
    layer: ObjectId,
    index: u32,
}

impl AnimCurve {
    /// The layer owning this curve.
    #[inline]
    pub fn layer(&self) -> ObjectId {
        self.layer
    }
}

/// Key of one curve: which property channel it drives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurveBinding {
    pub property: Property,
    /// Resolved channel name; empty for single-component properties.
    pub channel: String,
}

/// Table of curve bindings belonging to one animation layer object.
#[derive(Clone, Debug)]
pub struct AnimLayer {
    id: ObjectId,
    curves: Vec<CurveBinding>,
}

impl AnimLayer {
    pub fn new(id: ObjectId) -> Self {
        Self {
            id,
            curves: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Find the curve bound to `property` on `channel`.
    pub fn find_binding(&self, property: Property, channel: &str) -> Option<AnimCurve> {
        self.curves
            .iter()
            .position(|b| b.property == property && b.channel == channel)
            .map(|index| self.curve(index))
    }

    /// Find the curve bound to `property` on `channel`, creating it if missing.
    pub fn find_or_create_channel_binding(&mut self, property: Property, channel: &str) -> AnimCurve {
        if let Some(curve) = self.find_binding(property, channel) {
            return curve;
        }
        self.curves.push(CurveBinding {
            property,
            channel: channel.to_string(),
        });
        debug!(layer = ?self.id, ?property, channel, "created curve binding");
        self.curve(self.curves.len() - 1)
    }

    /// The binding a curve was created for.
    pub fn binding(&self, curve: AnimCurve) -> Option<&CurveBinding> {
        if curve.layer != self.id {
            return None;
        }
        self.curves.get(curve.index as usize)
    }

    /// Curves whose property is not matched by `is_live` any more.
    pub fn stale_curves<'a>(
        &'a self,
        is_live: impl Fn(Property) -> bool + 'a,
    ) -> impl Iterator<Item = AnimCurve> + 'a {
        self.curves
            .iter()
            .enumerate()
            .filter(move |(_, b)| !is_live(b.property))
            .map(move |(index, _)| self.curve(index))
    }

    fn curve(&self, index: usize) -> AnimCurve {
        AnimCurve {
            layer: self.id,
            index: index as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prop(slot: u32) -> Property {
        Property {
            owner: ObjectId::new(1, 0),
            epoch: 0,
            slot,
            generation: 0,
        }
    }

    #[test]
    fn test_find_or_create_is_idempotent() {
        let mut layer = AnimLayer::new(ObjectId::new(7, 0));
        assert_eq!(layer.find_binding(prop(0), ""), None);
        let c1 = layer.find_or_create_channel_binding(prop(0), "");
        let c2 = layer.find_or_create_channel_binding(prop(0), "");
        assert_eq!(c1, c2);
        assert_eq!(layer.find_binding(prop(0), ""), Some(c1));
        assert_eq!(layer.len(), 1);
        assert_eq!(c1.layer(), layer.id());
    }

    #[test]
    fn test_channels_are_separate_curves() {
        let mut layer = AnimLayer::new(ObjectId::new(7, 0));
        let x = layer.find_or_create_channel_binding(prop(0), "X");
        let y = layer.find_or_create_channel_binding(prop(0), "Y");
        assert_ne!(x, y);
        assert_eq!(layer.binding(y).unwrap().channel, "Y");
    }

    #[test]
    fn test_foreign_curve_has_no_binding() {
        let mut layer = AnimLayer::new(ObjectId::new(7, 0));
        let other = AnimLayer::new(ObjectId::new(8, 0));
        let c = layer.find_or_create_channel_binding(prop(0), "");
        assert!(layer.binding(c).is_some());
        assert!(other.binding(c).is_none());
    }

    #[test]
    fn test_stale_curves() {
        let mut layer = AnimLayer::new(ObjectId::new(7, 0));
        let live = layer.find_or_create_channel_binding(prop(0), "");
        let dead = layer.find_or_create_channel_binding(prop(1), "");
        let stale: Vec<AnimCurve> = layer.stale_curves(|p| p.slot == 0).collect();
        assert_eq!(stale, [dead]);
        assert_ne!(stale[0], live);
    }
}
