//! Object classes and the properties each class is born with.

use std::fmt;

use crate::core::{AnimLayer, ObjectId, PropertyStore};
use crate::util::{DataType, DVec3, Value};

use super::texture::{blend_mode_items, wrap_mode_items, BlendMode, WrapMode};

/// Built-in property names, as FBX spells them.
pub mod props {
    pub const VISIBILITY_INHERITANCE: &str = "Visibility Inheritance";
    pub const LCL_TRANSLATION: &str = "Lcl Translation";
    pub const LCL_ROTATION: &str = "Lcl Rotation";
    pub const LCL_SCALING: &str = "Lcl Scaling";

    pub const EMISSIVE_FACTOR: &str = "EmissiveFactor";
    pub const AMBIENT_FACTOR: &str = "AmbientFactor";

    pub const CURRENT_TEXTURE_BLEND_MODE: &str = "CurrentTextureBlendMode";
    pub const WRAP_MODE_U: &str = "WrapModeU";
    pub const WRAP_MODE_V: &str = "WrapModeV";

    pub const RENDER_API: &str = "RenderAPI";
    pub const RENDER_API_VERSION: &str = "RenderAPIVersion";

    pub const TITLE: &str = "Title";
    pub const SUBJECT: &str = "Subject";
    pub const AUTHOR: &str = "Author";
    pub const KEYWORDS: &str = "Keywords";
    pub const REVISION: &str = "Revision";
    pub const COMMENT: &str = "Comment";
}

/// Kind of object living in a [`Manager`](super::Manager).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectClass {
    /// Plain object with an empty property namespace
    Object,
    /// Scene graph node
    Node,
    /// Container of other objects
    Document,
    /// Document with a root node
    Scene,
    /// Title/author/... block attached to a document
    DocumentInfo,
    SurfaceLambert,
    Texture,
    /// Shader implementation description
    Implementation,
    AnimLayer,
}

impl ObjectClass {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Object => "Object",
            Self::Node => "Node",
            Self::Document => "Document",
            Self::Scene => "Scene",
            Self::DocumentInfo => "DocumentInfo",
            Self::SurfaceLambert => "SurfaceLambert",
            Self::Texture => "Texture",
            Self::Implementation => "Implementation",
            Self::AnimLayer => "AnimLayer",
        }
    }

    #[inline]
    pub const fn is_document(self) -> bool {
        matches!(self, Self::Document | Self::Scene)
    }

    /// Properties created together with an object of this class.
    pub fn builtin_properties(self) -> Vec<Builtin> {
        use props::*;
        match self {
            Self::Node => vec![
                Builtin::new(VISIBILITY_INHERITANCE, DataType::VISIBILITY_INHERITANCE, Value::Bool(true)),
                Builtin::new(LCL_TRANSLATION, DataType::LOCAL_TRANSLATION, Value::Double3(DVec3::ZERO)),
                Builtin::new(LCL_ROTATION, DataType::LOCAL_ROTATION, Value::Double3(DVec3::ZERO)),
                Builtin::new(LCL_SCALING, DataType::LOCAL_SCALING, Value::Double3(DVec3::ONE)),
            ],
            Self::SurfaceLambert => vec![
                Builtin::new(EMISSIVE_FACTOR, DataType::DOUBLE, Value::Double(1.0)),
                Builtin::new(AMBIENT_FACTOR, DataType::DOUBLE, Value::Double(1.0)),
            ],
            Self::Texture => vec![
                Builtin::new(CURRENT_TEXTURE_BLEND_MODE, DataType::ENUM, BlendMode::Normal.into())
                    .with_items(blend_mode_items()),
                Builtin::new(WRAP_MODE_U, DataType::ENUM, WrapMode::Repeat.into())
                    .with_items(wrap_mode_items()),
                Builtin::new(WRAP_MODE_V, DataType::ENUM, WrapMode::Repeat.into())
                    .with_items(wrap_mode_items()),
            ],
            Self::Implementation => vec![
                Builtin::new(RENDER_API, DataType::STRING, Value::String(String::new())),
                Builtin::new(RENDER_API_VERSION, DataType::STRING, Value::String(String::new())),
            ],
            Self::DocumentInfo => [TITLE, SUBJECT, AUTHOR, KEYWORDS, REVISION, COMMENT]
                .into_iter()
                .map(|name| Builtin::new(name, DataType::STRING, Value::String(String::new())))
                .collect(),
            Self::Object | Self::Document | Self::Scene | Self::AnimLayer => Vec::new(),
        }
    }
}

impl fmt::Display for ObjectClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Description of one built-in property.
#[derive(Clone, Debug)]
pub struct Builtin {
    pub name: &'static str,
    pub data_type: DataType,
    pub default: Value,
    pub enum_items: Vec<&'static str>,
}

impl Builtin {
    fn new(name: &'static str, data_type: DataType, default: Value) -> Self {
        Self {
            name,
            data_type,
            default,
            enum_items: Vec::new(),
        }
    }

    fn with_items(mut self, items: impl Iterator<Item = &'static str>) -> Self {
        self.enum_items = items.collect();
        self
    }
}

/// Scene graph links of a node.
#[derive(Clone, Debug, Default)]
pub(crate) struct NodeLinks {
    pub(crate) parent: Option<ObjectId>,
    pub(crate) children: Vec<ObjectId>,
}

/// Contents of a document or scene.
#[derive(Clone, Debug, Default)]
pub(crate) struct DocumentLinks {
    pub(crate) members: Vec<ObjectId>,
    pub(crate) info: Option<ObjectId>,
    pub(crate) root_node: Option<ObjectId>,
}

/// Class-specific state next to the property store.
#[derive(Clone, Debug)]
pub(crate) enum Payload {
    None,
    Node(NodeLinks),
    Document(DocumentLinks),
    AnimLayer(AnimLayer),
}

/// Everything the manager keeps for one live object.
#[derive(Clone, Debug)]
pub(crate) struct ObjectData {
    pub(crate) class: ObjectClass,
    pub(crate) name: String,
    /// Document this object was created in, if any.
    pub(crate) document: Option<ObjectId>,
    pub(crate) properties: PropertyStore,
    pub(crate) payload: Payload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_builtins() {
        let names: Vec<&str> = ObjectClass::Node
            .builtin_properties()
            .iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(
            names,
            [props::VISIBILITY_INHERITANCE, props::LCL_TRANSLATION, props::LCL_ROTATION, props::LCL_SCALING]
        );
    }

    #[test]
    fn test_texture_enums_declare_items() {
        let builtins = ObjectClass::Texture.builtin_properties();
        assert_eq!(builtins[0].enum_items.len(), BlendMode::ALL.len());
        assert_eq!(builtins[1].enum_items, ["Repeat", "Clamp"]);
    }

    #[test]
    fn test_plain_classes_have_no_builtins() {
        assert!(ObjectClass::Object.builtin_properties().is_empty());
        assert!(ObjectClass::AnimLayer.builtin_properties().is_empty());
        assert!(ObjectClass::Scene.is_document());
    }
}
