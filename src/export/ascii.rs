//! FBX 7.4 ASCII writer for node hierarchies.
//!
//! Writes the sections needed to carry a transform hierarchy:
//! - `FBXHeaderExtension` with the scene info block
//! - `Definitions` with the model count
//! - `Objects` with one `Model` per node and its `Properties70`
//! - `Connections` linking each model to its parent (0 = root)

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::ObjectId;
use crate::scene::{DocumentInfo, Manager};
use crate::util::{DataType, Result, Value};

/// FBX version written in the header (7.4)
pub const FBX_VERSION: u32 = 7400;

/// Version of the `Model` object template
const MODEL_VERSION: u32 = 232;

/// First id handed to exported models; 0 is the scene root.
const FIRST_MODEL_ID: i64 = 1000;

/// A node scheduled for writing.
struct ModelEntry {
    node: ObjectId,
    id: i64,
    parent_id: i64,
}

/// Indenting line writer.
struct AsciiWriter<W: Write> {
    out: W,
    depth: usize,
}

impl<W: Write> AsciiWriter<W> {
    fn new(out: W) -> Self {
        Self { out, depth: 0 }
    }

    fn line(&mut self, text: &str) -> Result<()> {
        for _ in 0..self.depth {
            self.out.write_all(b"\t")?;
        }
        self.out.write_all(text.as_bytes())?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn begin(&mut self, header: &str) -> Result<()> {
        self.line(&format!("{} {{", header))?;
        self.depth += 1;
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        self.depth = self.depth.saturating_sub(1);
        self.line("}")
    }

    fn into_inner(self) -> W {
        self.out
    }
}

/// Escape quotes and control characters so `s` stays on one line.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("&#10;"),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// Quote a string for ASCII FBX.
fn quote(s: &str) -> String {
    format!("\"{}\"", escape(s))
}

/// Write `scene` to `path`.
pub fn write_scene_file(manager: &Manager, scene: ObjectId, path: &Path) -> Result<usize> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    let count = write_scene(manager, scene, &mut out)?;
    out.flush()?;
    Ok(count)
}

/// Write `scene` to any writer; returns the number of models written.
pub fn write_scene<W: Write>(manager: &Manager, scene: ObjectId, out: W) -> Result<usize> {
    let models = collect_models(manager, scene)?;
    let info = match manager.document_info(scene)? {
        Some(info) => manager.read_document_info(info)?,
        None => DocumentInfo::default(),
    };

    let mut w = AsciiWriter::new(out);
    w.line(&format!("; FBX {}.{}.0 project file", FBX_VERSION / 1000, FBX_VERSION / 100 % 10))?;
    w.line(&format!("; Created by fbx-export {}", env!("CARGO_PKG_VERSION")))?;
    w.line("; ----------------------------------------------------")?;
    w.line("")?;

    write_header_extension(&mut w, &info)?;
    write_definitions(&mut w, models.len())?;
    write_objects(&mut w, manager, &models)?;
    write_connections(&mut w, manager, &models)?;

    w.into_inner().flush()?;
    Ok(models.len())
}

/// Pre-order walk below the scene root, assigning ids.
fn collect_models(manager: &Manager, scene: ObjectId) -> Result<Vec<ModelEntry>> {
    let root = manager.root_node(scene)?;
    let mut models = Vec::new();
    let mut next_id = FIRST_MODEL_ID;
    let mut stack: Vec<(ObjectId, i64)> = manager
        .node_children(root)?
        .iter()
        .rev()
        .map(|&n| (n, 0))
        .collect();

    while let Some((node, parent_id)) = stack.pop() {
        let id = next_id;
        next_id += 1;
        models.push(ModelEntry { node, id, parent_id });
        stack.extend(manager.node_children(node)?.iter().rev().map(|&c| (c, id)));
    }
    Ok(models)
}

fn write_header_extension<W: Write>(w: &mut AsciiWriter<W>, info: &DocumentInfo) -> Result<()> {
    w.begin("FBXHeaderExtension: ")?;
    w.line("FBXHeaderVersion: 1003")?;
    w.line(&format!("FBXVersion: {}", FBX_VERSION))?;
    w.line(&format!("Creator: {}", quote(&format!("fbx-export {}", env!("CARGO_PKG_VERSION")))))?;
    w.begin("SceneInfo: \"GlobalInfo::SceneInfo\", \"UserData\"")?;
    w.line("Type: \"UserData\"")?;
    w.line("Version: 100")?;
    w.begin("MetaData: ")?;
    w.line("Version: 100")?;
    for (key, value) in [
        ("Title", &info.title),
        ("Subject", &info.subject),
        ("Author", &info.author),
        ("Keywords", &info.keywords),
        ("Revision", &info.revision),
        ("Comment", &info.comment),
    ] {
        w.line(&format!("{}: {}", key, quote(value)))?;
    }
    w.end()?;
    w.end()?;
    w.end()
}

fn write_definitions<W: Write>(w: &mut AsciiWriter<W>, model_count: usize) -> Result<()> {
    w.begin("Definitions: ")?;
    w.line("Version: 100")?;
    w.line(&format!("Count: {}", model_count + 1))?;
    w.begin("ObjectType: \"GlobalSettings\"")?;
    w.line("Count: 1")?;
    w.end()?;
    if model_count > 0 {
        w.begin("ObjectType: \"Model\"")?;
        w.line(&format!("Count: {}", model_count))?;
        w.end()?;
    }
    w.end()
}

fn write_objects<W: Write>(w: &mut AsciiWriter<W>, manager: &Manager, models: &[ModelEntry]) -> Result<()> {
    w.begin("Objects: ")?;
    for model in models {
        let name = manager.object_name(model.node)?;
        w.begin(&format!("Model: {}, {}, \"Null\"", model.id, quote(&format!("Model::{}", name))))?;
        w.line(&format!("Version: {}", MODEL_VERSION))?;
        w.begin("Properties70: ")?;
        let store = manager.properties(model.node)?;
        for p in store.iter() {
            let prop = store.get_ref(p)?;
            w.line(&property_line(&prop.hierarchical_name(), prop.data_type(), prop.value()))?;
        }
        w.end()?;
        w.line("Shading: Y")?;
        w.line("Culling: \"CullingOff\"")?;
        w.end()?;
    }
    w.end()
}

/// One `P:` row of a `Properties70` block.
fn property_line(name: &str, data_type: DataType, value: Option<&Value>) -> String {
    let q = quote(name);
    match value {
        Some(Value::Bool(b)) => format!("P: {}, \"bool\", \"\", \"\",{}", q, *b as i32),
        Some(Value::Double(d)) => format!("P: {}, \"double\", \"Number\", \"\",{}", q, d),
        Some(Value::Int(i)) => format!("P: {}, \"int\", \"Integer\", \"\",{}", q, i),
        Some(Value::Enum(e)) => format!("P: {}, \"enum\", \"\", \"\",{}", q, e),
        Some(Value::String(s)) => format!("P: {}, \"KString\", \"\", \"\", {}", q, quote(s)),
        Some(Value::Double3(v)) if data_type == DataType::DOUBLE3 => {
            format!("P: {}, \"Vector3D\", \"Vector\", \"\",{},{},{}", q, v.x, v.y, v.z)
        }
        Some(Value::Double3(v)) => format!(
            "P: {}, {}, \"\", \"A\",{},{},{}",
            q,
            quote(data_type.name),
            v.x,
            v.y,
            v.z
        ),
        None => format!("P: {}, \"Compound\", \"\", \"\"", q),
    }
}

fn write_connections<W: Write>(w: &mut AsciiWriter<W>, manager: &Manager, models: &[ModelEntry]) -> Result<()> {
    w.begin("Connections: ")?;
    for model in models {
        let name = manager.object_name(model.node)?;
        let parent = models
            .iter()
            .find(|m| m.id == model.parent_id)
            .map(|m| manager.object_name(m.node))
            .transpose()?
            .unwrap_or("RootNode");
        w.line(&format!(";Model::{}, Model::{}", escape(name), escape(parent)))?;
        w.line(&format!("C: \"OO\",{},{}", model.id, model.parent_id))?;
    }
    w.end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::DVec3;

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("a\"b"), "\"a&quot;b\"");
        assert_eq!(quote("line1\nline2"), "\"line1&#10;line2\"");
        assert_eq!(quote("a\r\tb"), "\"ab\"");
    }

    #[test]
    fn test_escape_keeps_one_line() {
        let escaped = escape("evil\nC: \"OO\",42,43");
        assert!(!escaped.contains('\n'));
        assert_eq!(escaped, "evil&#10;C: &quot;OO&quot;,42,43");
    }

    #[test]
    fn test_property_lines() {
        assert_eq!(
            property_line(
                "Lcl Translation",
                DataType::LOCAL_TRANSLATION,
                Some(&Value::Double3(DVec3::new(1.0, 2.5, 3.0)))
            ),
            "P: \"Lcl Translation\", \"Lcl Translation\", \"\", \"A\",1,2.5,3"
        );
        assert_eq!(
            property_line("Visibility Inheritance", DataType::VISIBILITY_INHERITANCE, Some(&Value::Bool(true))),
            "P: \"Visibility Inheritance\", \"bool\", \"\", \"\",1"
        );
        assert_eq!(
            property_line("root", DataType::COMPOUND, None),
            "P: \"root\", \"Compound\", \"\", \"\""
        );
    }

    #[test]
    fn test_write_empty_scene() {
        let mut m = Manager::new();
        let scene = m.create_scene("scene").unwrap();
        let mut buf = Vec::new();
        assert_eq!(write_scene(&m, scene, &mut buf).unwrap(), 0);
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("; FBX 7.4.0 project file"));
        assert!(text.contains("FBXVersion: 7400"));
        assert!(!text.contains("ObjectType: \"Model\""));
    }
}
