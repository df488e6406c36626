//! Documents, scenes and document info.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::object::props;
use super::{Manager, ObjectClass};
use crate::core::ObjectId;
use crate::util::{Error, Result};

/// Descriptive block of a document, stored as string properties of a
/// `DocumentInfo` object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentInfo {
    pub title: String,
    pub subject: String,
    pub author: String,
    pub revision: String,
    pub keywords: String,
    pub comment: String,
}

impl DocumentInfo {
    fn fields(&self) -> [(&'static str, &str); 6] {
        [
            (props::TITLE, &self.title),
            (props::SUBJECT, &self.subject),
            (props::AUTHOR, &self.author),
            (props::REVISION, &self.revision),
            (props::KEYWORDS, &self.keywords),
            (props::COMMENT, &self.comment),
        ]
    }
}

impl Manager {
    pub fn create_document(&mut self, name: &str) -> Result<ObjectId> {
        self.create_object(ObjectClass::Document, name)
    }

    /// Create a scene: a document with a root node.
    pub fn create_scene(&mut self, name: &str) -> Result<ObjectId> {
        self.create_object(ObjectClass::Scene, name)
    }

    pub fn root_node(&self, scene: ObjectId) -> Result<ObjectId> {
        self.document_links(scene)?
            .root_node
            .ok_or_else(|| Error::ObjectNotFound(format!("{:?} has no root node", scene)))
    }

    /// Objects created inside a document, in creation order.
    pub fn document_members(&self, doc: ObjectId) -> Result<&[ObjectId]> {
        Ok(&self.document_links(doc)?.members)
    }

    /// The document info attached to `doc`, if any.
    pub fn document_info(&self, doc: ObjectId) -> Result<Option<ObjectId>> {
        Ok(self
            .document_links(doc)?
            .info
            .filter(|info| self.is_object_valid(*info)))
    }

    /// Attach a document info object. `None` is rejected.
    pub fn set_document_info(&mut self, doc: ObjectId, info: Option<ObjectId>) -> Result<()> {
        let info = info.ok_or_else(|| Error::InvalidArgument("document info is required".into()))?;
        let class = self.object_class(info)?;
        if class != ObjectClass::DocumentInfo {
            return Err(Error::wrong_type(ObjectClass::DocumentInfo, class));
        }
        self.document_links_mut(doc)?.info = Some(info);
        Ok(())
    }

    /// Scene flavored alias of [`set_document_info`](Self::set_document_info).
    pub fn set_scene_info(&mut self, scene: ObjectId, info: ObjectId) -> Result<()> {
        self.set_document_info(scene, Some(info))
    }

    /// Reset a document: destroy its members and info, drop its properties.
    ///
    /// A scene keeps a fresh, childless root node.
    pub fn clear_document(&mut self, doc: ObjectId) -> Result<()> {
        let links = std::mem::take(self.document_links_mut(doc)?);
        let had_root = links.root_node.is_some();
        for member in links.members.into_iter().chain(links.info) {
            if self.is_object_valid(member) {
                self.destroy_object(member)?;
            }
        }
        self.clear_properties(doc)?;

        if had_root {
            let root = self.create_object_in(doc, ObjectClass::Node, super::ROOT_NODE_NAME)?;
            self.document_links_mut(doc)?.root_node = Some(root);
        }
        debug!(?doc, "cleared document");
        Ok(())
    }

    /// Store `info` into the properties of a `DocumentInfo` object.
    pub fn write_document_info(&mut self, info_object: ObjectId, info: &DocumentInfo) -> Result<()> {
        for (name, value) in info.fields() {
            let p = self.expect_property(info_object, name)?;
            self.set(p, value)?;
        }
        Ok(())
    }

    /// Read a `DocumentInfo` object back into a plain struct.
    pub fn read_document_info(&self, info_object: ObjectId) -> Result<DocumentInfo> {
        let read = |name: &str| -> Result<String> {
            self.get_as::<String>(self.expect_property(info_object, name)?)
        };
        Ok(DocumentInfo {
            title: read(props::TITLE)?,
            subject: read(props::SUBJECT)?,
            author: read(props::AUTHOR)?,
            revision: read(props::REVISION)?,
            keywords: read(props::KEYWORDS)?,
            comment: read(props::COMMENT)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_info_round_trip() {
        let mut m = Manager::new();
        let info_obj = m.create_object(ObjectClass::DocumentInfo, "info").unwrap();
        let info = DocumentInfo {
            title: "Title".into(),
            author: "Author".into(),
            ..Default::default()
        };
        m.write_document_info(info_obj, &info).unwrap();
        assert_eq!(m.read_document_info(info_obj).unwrap(), info);
    }

    #[test]
    fn test_set_document_info_rejects_wrong_class() {
        let mut m = Manager::new();
        let doc = m.create_document("doc").unwrap();
        let node = m.create_object(ObjectClass::Node, "node").unwrap();
        assert!(matches!(m.set_document_info(doc, Some(node)), Err(Error::WrongType { .. })));
        assert!(matches!(m.set_document_info(doc, None), Err(Error::InvalidArgument(_))));
        assert_eq!(m.document_info(doc).unwrap(), None);
    }

    #[test]
    fn test_clear_scene_keeps_fresh_root() {
        let mut m = Manager::new();
        let scene = m.create_scene("scene").unwrap();
        let old_root = m.root_node(scene).unwrap();
        let child = m.create_object_in(scene, ObjectClass::Node, "child").unwrap();
        m.add_child(old_root, child).unwrap();

        m.clear_document(scene).unwrap();
        assert!(!m.is_object_valid(old_root));
        assert!(!m.is_object_valid(child));
        let root = m.root_node(scene).unwrap();
        assert!(m.node_children(root).unwrap().is_empty());
        assert_eq!(m.document_members(scene).unwrap(), [root]);
    }
}
