//! Node hierarchy exporter.

use std::path::Path;

use tracing::{debug, info, warn};

use super::ascii;
use super::settings::ExportSettings;
use super::source::{SceneDescription, SourceNode};
use crate::core::ObjectId;
use crate::scene::{DocumentInfo, Manager, ObjectClass};
use crate::util::Result;

const TITLE: &str = "Exporting a node hierarchy with transforms";

const SUBJECT: &str = "Creates a scene, builds one node per source node, \
copies the local transform onto each node and writes the scene as ASCII FBX.";

const KEYWORDS: &str = "export node transform";

const COMMENT: &str = "Rotations are exported as Euler angles in degrees.";

/// Exports source hierarchies into a scene and writes it to disk.
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    settings: ExportSettings,
    num_nodes: usize,
}

impl Exporter {
    pub fn new(settings: ExportSettings) -> Self {
        Self {
            settings,
            num_nodes: 0,
        }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Nodes exported by the last call, siblings and descendants included.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Export a described scene to `path`.
    pub fn export_description(&mut self, desc: &SceneDescription, path: impl AsRef<Path>) -> Result<usize> {
        self.export_all(&desc.nodes, path)
    }

    /// Export every root in `roots` to `path`; returns the number of nodes written.
    #[tracing::instrument(skip_all, fields(roots = roots.len()))]
    pub fn export_all(&mut self, roots: &[SourceNode], path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }

        let mut manager = Manager::new();
        let scene = self.build_scene(&mut manager, roots)?;
        let written = ascii::write_scene_file(&manager, scene, path)?;
        if written != self.num_nodes {
            warn!(written, expected = self.num_nodes, "node count mismatch");
        }

        info!(nodes = self.num_nodes, "exported {}", path.display());
        Ok(self.num_nodes)
    }

    /// Populate a fresh scene in `manager` from `roots`.
    pub fn build_scene(&mut self, manager: &mut Manager, roots: &[SourceNode]) -> Result<ObjectId> {
        self.num_nodes = 0;

        let scene = manager.create_scene(&self.settings.object_name("fbxScene"))?;
        let info_object =
            manager.create_object_in(scene, ObjectClass::DocumentInfo, &self.settings.object_name("SceneInfo"))?;
        manager.write_document_info(info_object, &self.scene_info())?;
        manager.set_scene_info(scene, info_object)?;

        let root = manager.root_node(scene)?;
        for node in roots {
            self.export_components(manager, scene, root, node)?;
        }
        Ok(scene)
    }

    fn scene_info(&self) -> DocumentInfo {
        DocumentInfo {
            title: TITLE.to_string(),
            subject: SUBJECT.to_string(),
            author: self.settings.author.clone(),
            revision: self.settings.revision.clone(),
            keywords: KEYWORDS.to_string(),
            comment: COMMENT.to_string(),
        }
    }

    fn export_components(
        &mut self,
        manager: &mut Manager,
        scene: ObjectId,
        parent: ObjectId,
        source: &SourceNode,
    ) -> Result<()> {
        let node = manager.create_object_in(scene, ObjectClass::Node, &source.name)?;
        self.num_nodes += 1;

        manager.set_local_transform(node, &source.local_transform())?;
        if self.settings.verbose {
            info!("exporting {}", source.name);
        } else {
            debug!("exporting {}", source.name);
        }

        manager.add_child(parent, node)?;
        for child in &source.children {
            self.export_components(manager, scene, node, child)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::DVec3;

    fn sample() -> Vec<SourceNode> {
        vec![
            SourceNode::new("Body")
                .with_translation([0.0, 1.0, 0.0])
                .with_child(SourceNode::new("Arm").with_rotation([0.0, 0.0, 45.0]))
                .with_child(SourceNode::new("Leg")),
            SourceNode::new("Light"),
        ]
    }

    #[test]
    fn test_build_scene_counts_nodes() {
        let mut m = Manager::new();
        let mut exp = Exporter::default();
        let scene = exp.build_scene(&mut m, &sample()).unwrap();
        assert_eq!(exp.num_nodes(), 4);

        let root = m.root_node(scene).unwrap();
        assert_eq!(m.descendant_count(root).unwrap(), 4);
        assert_eq!(m.node_children(root).unwrap().len(), 2);
    }

    #[test]
    fn test_build_scene_copies_transforms() {
        let mut m = Manager::new();
        let mut exp = Exporter::default();
        exp.build_scene(&mut m, &sample()).unwrap();

        let body = m.find_object(ObjectClass::Node, "Body").unwrap();
        let arm = m.find_object(ObjectClass::Node, "Arm").unwrap();
        assert_eq!(m.local_transform(body).unwrap().translation, DVec3::new(0.0, 1.0, 0.0));
        assert_eq!(m.local_transform(arm).unwrap().rotation, DVec3::new(0.0, 0.0, 45.0));
        assert_eq!(m.node_parent(arm).unwrap(), Some(body));
    }

    #[test]
    fn test_scene_info_uses_settings() {
        let settings = ExportSettings {
            name_prefix: "x_".into(),
            author: "tester".into(),
            ..Default::default()
        };
        let mut m = Manager::new();
        let mut exp = Exporter::new(settings);
        let scene = exp.build_scene(&mut m, &[]).unwrap();

        assert_eq!(m.object_name(scene).unwrap(), "x_fbxScene");
        let info = m.document_info(scene).unwrap().unwrap();
        assert_eq!(m.object_name(info).unwrap(), "x_SceneInfo");
        let info = m.read_document_info(info).unwrap();
        assert_eq!(info.author, "tester");
        assert_eq!(info.keywords, KEYWORDS);
    }

    #[test]
    fn test_counter_resets_between_exports() {
        let mut m = Manager::new();
        let mut exp = Exporter::default();
        exp.build_scene(&mut m, &sample()).unwrap();
        exp.build_scene(&mut m, &[SourceNode::new("only")]).unwrap();
        assert_eq!(exp.num_nodes(), 1);
    }
}
