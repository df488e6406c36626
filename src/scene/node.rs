//! Node hierarchy and local transforms.

use super::object::props;
use super::Manager;
use crate::core::ObjectId;
use crate::util::{DVec3, Error, LocalTransform, Result};

impl Manager {
    /// Attach `child` under `parent`, detaching it from its previous parent.
    pub fn add_child(&mut self, parent: ObjectId, child: ObjectId) -> Result<()> {
        self.node_links(parent)?;
        self.node_links(child)?;

        let mut cursor = Some(parent);
        while let Some(node) = cursor {
            if node == child {
                return Err(Error::InvalidArgument(format!(
                    "{:?} cannot become a descendant of itself",
                    child
                )));
            }
            cursor = self.node_links(node)?.parent;
        }

        if let Some(old) = self.node_links(child)?.parent {
            self.node_links_mut(old)?.children.retain(|c| *c != child);
        }
        self.node_links_mut(child)?.parent = Some(parent);
        self.node_links_mut(parent)?.children.push(child);
        Ok(())
    }

    pub fn node_parent(&self, node: ObjectId) -> Result<Option<ObjectId>> {
        Ok(self.node_links(node)?.parent)
    }

    pub fn node_children(&self, node: ObjectId) -> Result<&[ObjectId]> {
        Ok(&self.node_links(node)?.children)
    }

    /// Number of nodes below `node`, not counting `node` itself.
    pub fn descendant_count(&self, node: ObjectId) -> Result<usize> {
        let mut count = 0;
        let mut stack = self.node_children(node)?.to_vec();
        while let Some(n) = stack.pop() {
            count += 1;
            stack.extend_from_slice(self.node_children(n)?);
        }
        Ok(count)
    }

    /// Write translation, rotation and scaling into the node's `Lcl` properties.
    pub fn set_local_transform(&mut self, node: ObjectId, transform: &LocalTransform) -> Result<()> {
        self.node_links(node)?;
        for (name, value) in [
            (props::LCL_TRANSLATION, transform.translation),
            (props::LCL_ROTATION, transform.rotation),
            (props::LCL_SCALING, transform.scaling),
        ] {
            let p = self.expect_property(node, name)?;
            self.set(p, value)?;
        }
        Ok(())
    }

    pub fn local_transform(&self, node: ObjectId) -> Result<LocalTransform> {
        self.node_links(node)?;
        let read = |name: &str| -> Result<DVec3> { self.get_as::<DVec3>(self.expect_property(node, name)?) };
        Ok(LocalTransform {
            translation: read(props::LCL_TRANSLATION)?,
            rotation: read(props::LCL_ROTATION)?,
            scaling: read(props::LCL_SCALING)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::ObjectClass;

    #[test]
    fn test_add_child_reparents() {
        let mut m = Manager::new();
        let a = m.create_object(ObjectClass::Node, "a").unwrap();
        let b = m.create_object(ObjectClass::Node, "b").unwrap();
        let c = m.create_object(ObjectClass::Node, "c").unwrap();

        m.add_child(a, c).unwrap();
        m.add_child(b, c).unwrap();
        assert!(m.node_children(a).unwrap().is_empty());
        assert_eq!(m.node_children(b).unwrap(), [c]);
        assert_eq!(m.node_parent(c).unwrap(), Some(b));
    }

    #[test]
    fn test_add_child_rejects_cycles() {
        let mut m = Manager::new();
        let a = m.create_object(ObjectClass::Node, "a").unwrap();
        let b = m.create_object(ObjectClass::Node, "b").unwrap();
        m.add_child(a, b).unwrap();
        assert!(matches!(m.add_child(b, a), Err(Error::InvalidArgument(_))));
        assert!(matches!(m.add_child(a, a), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_add_child_requires_nodes() {
        let mut m = Manager::new();
        let a = m.create_object(ObjectClass::Node, "a").unwrap();
        let tex = m.create_object(ObjectClass::Texture, "tex").unwrap();
        assert!(matches!(m.add_child(a, tex), Err(Error::WrongType { .. })));
    }

    #[test]
    fn test_destroying_node_detaches_links() {
        let mut m = Manager::new();
        let a = m.create_object(ObjectClass::Node, "a").unwrap();
        let b = m.create_object(ObjectClass::Node, "b").unwrap();
        let c = m.create_object(ObjectClass::Node, "c").unwrap();
        m.add_child(a, b).unwrap();
        m.add_child(b, c).unwrap();
        assert_eq!(m.descendant_count(a).unwrap(), 2);

        m.destroy_object(b).unwrap();
        assert!(m.node_children(a).unwrap().is_empty());
        assert_eq!(m.node_parent(c).unwrap(), None);
    }

    #[test]
    fn test_local_transform_round_trip() {
        let mut m = Manager::new();
        let n = m.create_object(ObjectClass::Node, "n").unwrap();
        assert_eq!(m.local_transform(n).unwrap(), LocalTransform::IDENTITY);

        let t = LocalTransform {
            translation: DVec3::new(1.0, 2.0, 3.0),
            rotation: DVec3::new(0.0, 90.0, 0.0),
            scaling: DVec3::splat(2.0),
        };
        m.set_local_transform(n, &t).unwrap();
        assert_eq!(m.local_transform(n).unwrap(), t);
    }
}
