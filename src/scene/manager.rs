//! Object arena.
//!
//! The [`Manager`] owns every object. Each object owns exactly one
//! [`PropertyStore`]; dropping the object drops the store, and the bumped
//! slot generation turns every outstanding handle into a stale one.

use tracing::debug;

use crate::core::{AnimLayer, CreateOptions, ObjectId, PropertyStore};
use crate::util::{Error, Result};

use super::object::{DocumentLinks, NodeLinks, ObjectClass, ObjectData, Payload};

/// Name of the node every scene is created with.
pub const ROOT_NODE_NAME: &str = "RootNode";

#[derive(Debug, Default)]
struct ObjectSlot {
    generation: u32,
    data: Option<ObjectData>,
}

/// Owner of all objects (nodes, documents, textures, layers, ...).
#[derive(Debug, Default)]
pub struct Manager {
    objects: Vec<ObjectSlot>,
    free: Vec<u32>,
}

impl Manager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a free-standing object of `class` with its built-in properties.
    pub fn create_object(&mut self, class: ObjectClass, name: &str) -> Result<ObjectId> {
        self.create_object_inner(class, name, None)
    }

    /// Create an object inside `container`.
    ///
    /// If the container is a document the object becomes one of its members;
    /// otherwise it joins the container's document, if the container has one.
    pub fn create_object_in(
        &mut self,
        container: ObjectId,
        class: ObjectClass,
        name: &str,
    ) -> Result<ObjectId> {
        let data = self
            .object(container)
            .map_err(|_| Error::InvalidParent(format!("container {:?} is not alive", container)))?;
        let document = if data.class.is_document() {
            Some(container)
        } else {
            data.document
        };
        self.create_object_inner(class, name, document)
    }

    fn create_object_inner(
        &mut self,
        class: ObjectClass,
        name: &str,
        document: Option<ObjectId>,
    ) -> Result<ObjectId> {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.objects.push(ObjectSlot::default());
                (self.objects.len() - 1) as u32
            }
        };
        let id = ObjectId::new(index, self.objects[index as usize].generation);

        let mut properties = PropertyStore::new(id);
        for builtin in class.builtin_properties() {
            let p = properties
                .create(None, builtin.data_type, builtin.name, CreateOptions::default())?
                .property;
            for item in &builtin.enum_items {
                properties.add_enum_value(p, *item)?;
            }
            properties.set(p, builtin.default)?;
        }

        let payload = match class {
            ObjectClass::Node => Payload::Node(NodeLinks::default()),
            ObjectClass::Document | ObjectClass::Scene => Payload::Document(DocumentLinks::default()),
            ObjectClass::AnimLayer => Payload::AnimLayer(AnimLayer::new(id)),
            _ => Payload::None,
        };

        self.objects[index as usize].data = Some(ObjectData {
            class,
            name: name.to_string(),
            document,
            properties,
            payload,
        });

        if let Some(doc) = document {
            if let Payload::Document(links) = &mut self.object_mut(doc)?.payload {
                links.members.push(id);
            }
        }

        if class == ObjectClass::Scene {
            let root = self.create_object_inner(ObjectClass::Node, ROOT_NODE_NAME, Some(id))?;
            if let Payload::Document(links) = &mut self.object_mut(id)?.payload {
                links.root_node = Some(root);
            }
        }

        debug!(?id, class = %class, name, "created object");
        Ok(id)
    }

    /// Destroy an object, its property tree, and (for documents) every member.
    pub fn destroy_object(&mut self, id: ObjectId) -> Result<()> {
        let data = self.take_object(id)?;
        debug!(?id, class = %data.class, name = %data.name, "destroyed object");

        if let Some(doc) = data.document {
            if let Ok(parent_doc) = self.object_mut(doc) {
                if let Payload::Document(links) = &mut parent_doc.payload {
                    links.members.retain(|m| *m != id);
                    if links.info == Some(id) {
                        links.info = None;
                    }
                    if links.root_node == Some(id) {
                        links.root_node = None;
                    }
                }
            }
        }

        match data.payload {
            Payload::Node(links) => {
                if let Some(parent) = links.parent {
                    if let Ok(NodeLinks { children, .. }) = self.node_links_mut(parent) {
                        children.retain(|c| *c != id);
                    }
                }
                for child in links.children {
                    if let Ok(child_links) = self.node_links_mut(child) {
                        child_links.parent = None;
                    }
                }
            }
            Payload::Document(links) => {
                for member in links.members.into_iter().chain(links.info) {
                    if self.is_object_valid(member) {
                        self.destroy_object(member)?;
                    }
                }
            }
            Payload::AnimLayer(_) | Payload::None => {}
        }
        Ok(())
    }

    fn take_object(&mut self, id: ObjectId) -> Result<ObjectData> {
        self.object(id)?;
        let slot = &mut self.objects[id.index as usize];
        let data = slot
            .data
            .take()
            .ok_or_else(|| Error::invalid(format!("object {:?} was destroyed", id)))?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Ok(data)
    }

    pub fn is_object_valid(&self, id: ObjectId) -> bool {
        self.object(id).is_ok()
    }

    pub(crate) fn object(&self, id: ObjectId) -> Result<&ObjectData> {
        self.objects
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.data.as_ref())
            .ok_or_else(|| Error::invalid(format!("object {:?} was destroyed", id)))
    }

    pub(crate) fn object_mut(&mut self, id: ObjectId) -> Result<&mut ObjectData> {
        self.objects
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.data.as_mut())
            .ok_or_else(|| Error::invalid(format!("object {:?} was destroyed", id)))
    }

    pub fn object_name(&self, id: ObjectId) -> Result<&str> {
        Ok(&self.object(id)?.name)
    }

    pub fn object_class(&self, id: ObjectId) -> Result<ObjectClass> {
        Ok(self.object(id)?.class)
    }

    /// Document the object was created in.
    pub fn object_document(&self, id: ObjectId) -> Result<Option<ObjectId>> {
        Ok(self.object(id)?.document)
    }

    /// Live objects in slot order.
    pub fn objects(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects.iter().enumerate().filter_map(|(index, slot)| {
            slot.data
                .as_ref()
                .map(|_| ObjectId::new(index as u32, slot.generation))
        })
    }

    pub fn object_count(&self) -> usize {
        self.objects().count()
    }

    /// First live object with the given name and class.
    pub fn find_object(&self, class: ObjectClass, name: &str) -> Option<ObjectId> {
        self.objects().find(|&id| {
            self.object(id)
                .is_ok_and(|data| data.class == class && data.name == name)
        })
    }

    /// The property namespace of an object.
    pub fn properties(&self, id: ObjectId) -> Result<&PropertyStore> {
        Ok(&self.object(id)?.properties)
    }

    pub(crate) fn properties_mut(&mut self, id: ObjectId) -> Result<&mut PropertyStore> {
        Ok(&mut self.object_mut(id)?.properties)
    }

    /// Animation layer table of an `AnimLayer` object.
    pub fn anim_layer(&self, id: ObjectId) -> Result<&AnimLayer> {
        match &self.object(id)?.payload {
            Payload::AnimLayer(layer) => Ok(layer),
            _ => Err(Error::InvalidArgument(format!("{:?} is not an animation layer", id))),
        }
    }

    pub fn anim_layer_mut(&mut self, id: ObjectId) -> Result<&mut AnimLayer> {
        match &mut self.object_mut(id)?.payload {
            Payload::AnimLayer(layer) => Ok(layer),
            _ => Err(Error::InvalidArgument(format!("{:?} is not an animation layer", id))),
        }
    }

    pub(crate) fn node_links(&self, id: ObjectId) -> Result<&NodeLinks> {
        let data = self.object(id)?;
        match &data.payload {
            Payload::Node(links) => Ok(links),
            _ => Err(Error::wrong_type(ObjectClass::Node, data.class)),
        }
    }

    pub(crate) fn node_links_mut(&mut self, id: ObjectId) -> Result<&mut NodeLinks> {
        let data = self.object_mut(id)?;
        let class = data.class;
        match &mut data.payload {
            Payload::Node(links) => Ok(links),
            _ => Err(Error::wrong_type(ObjectClass::Node, class)),
        }
    }

    pub(crate) fn document_links(&self, id: ObjectId) -> Result<&DocumentLinks> {
        let data = self.object(id)?;
        match &data.payload {
            Payload::Document(links) => Ok(links),
            _ => Err(Error::wrong_type(ObjectClass::Document, data.class)),
        }
    }

    pub(crate) fn document_links_mut(&mut self, id: ObjectId) -> Result<&mut DocumentLinks> {
        let data = self.object_mut(id)?;
        let class = data.class;
        match &mut data.payload {
            Payload::Document(links) => Ok(links),
            _ => Err(Error::wrong_type(ObjectClass::Document, class)),
        }
    }
}
