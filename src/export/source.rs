//! Source hierarchy handed to the exporter.
//!
//! A hierarchy file is JSON:
//!
//! ```json
//! { "name": "Level01",
//!   "nodes": [
//!     { "name": "Cube", "translation": [0, 1, 0],
//!       "children": [ { "name": "Handle", "scale": [0.5, 0.5, 0.5] } ] } ] }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::util::{DVec3, LocalTransform, Result};

/// One node of the source hierarchy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceNode {
    pub name: String,
    pub translation: [f64; 3],
    /// Euler angles in degrees, XYZ order
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
    pub children: Vec<SourceNode>,
}

impl Default for SourceNode {
    fn default() -> Self {
        Self {
            name: String::new(),
            translation: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
            children: Vec::new(),
        }
    }
}

impl SourceNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_translation(mut self, t: [f64; 3]) -> Self {
        self.translation = t;
        self
    }

    pub fn with_rotation(mut self, r: [f64; 3]) -> Self {
        self.rotation = r;
        self
    }

    pub fn with_scale(mut self, s: [f64; 3]) -> Self {
        self.scale = s;
        self
    }

    pub fn with_child(mut self, child: SourceNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn local_transform(&self) -> LocalTransform {
        LocalTransform {
            translation: DVec3::from_array(self.translation),
            rotation: DVec3::from_array(self.rotation),
            scaling: DVec3::from_array(self.scale),
        }
    }

    /// Number of nodes in this subtree, including itself.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(SourceNode::count).sum::<usize>()
    }
}

/// A hierarchy file: a scene name and its top-level nodes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub name: String,
    pub nodes: Vec<SourceNode>,
}

impl SceneDescription {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.iter().map(SourceNode::count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let desc = SceneDescription::from_json(
            r#"{ "name": "Level", "nodes": [ { "name": "Cube", "children": [ { "name": "Handle" } ] } ] }"#,
        )
        .unwrap();
        assert_eq!(desc.name, "Level");
        assert_eq!(desc.node_count(), 2);
        let cube = &desc.nodes[0];
        assert_eq!(cube.scale, [1.0; 3]);
        assert_eq!(cube.local_transform(), LocalTransform::IDENTITY);
    }

    #[test]
    fn test_rotation_is_euler_degrees() {
        let node = SourceNode::new("n")
            .with_rotation([10.0, 20.0, 30.0])
            .with_scale([2.0, 2.0, 2.0]);
        let t = node.local_transform();
        assert_eq!(t.rotation, DVec3::new(10.0, 20.0, 30.0));
        assert_eq!(t.scaling, DVec3::splat(2.0));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            SceneDescription::from_json("{ nodes: "),
            Err(crate::util::Error::Json(_))
        ));
    }
}
