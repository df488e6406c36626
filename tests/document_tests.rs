//! Integration tests for documents, scenes and document info.

use fbx_exporter::prelude::*;

fn sample_info() -> DocumentInfo {
    DocumentInfo {
        title: "Title".into(),
        subject: "Subject".into(),
        author: "Author".into(),
        revision: "1.0".into(),
        keywords: "a b c".into(),
        comment: "Comment".into(),
    }
}

#[test]
fn test_document_info_round_trip() {
    let mut m = Manager::new();
    let doc = m.create_document("doc").expect("Failed to create document");
    let info = m
        .create_object_in(doc, ObjectClass::DocumentInfo, "info")
        .expect("Failed to create info");

    assert_eq!(m.document_info(doc).expect("alive"), None);
    m.write_document_info(info, &sample_info()).expect("write");
    m.set_document_info(doc, Some(info)).expect("attach");

    let attached = m.document_info(doc).expect("alive").expect("info attached");
    assert_eq!(attached, info);
    assert_eq!(m.read_document_info(attached).expect("read"), sample_info());

    let title = m.expect_property(info, props::TITLE).expect("builtin");
    assert_eq!(m.get_as::<String>(title).expect("get"), "Title");
}

#[test]
fn test_document_info_requires_info_object() {
    let mut m = Manager::new();
    let doc = m.create_document("doc").expect("create");
    let node = m.create_object(ObjectClass::Node, "node").expect("create");

    assert!(matches!(m.set_document_info(doc, None), Err(Error::InvalidArgument(_))));
    assert!(matches!(m.set_document_info(doc, Some(node)), Err(Error::WrongType { .. })));
    assert!(matches!(m.set_document_info(node, Some(doc)), Err(Error::WrongType { .. })));
}

#[test]
fn test_clear_document() {
    let mut m = Manager::new();
    let scene = m.create_scene("scene").expect("create");
    let info = m
        .create_object_in(scene, ObjectClass::DocumentInfo, "info")
        .expect("create");
    m.set_scene_info(scene, info).expect("attach");

    let old_root = m.root_node(scene).expect("root");
    let child = m.create_object_in(scene, ObjectClass::Node, "child").expect("create");
    m.add_child(old_root, child).expect("add child");
    let visibility = m.expect_property(child, props::VISIBILITY_INHERITANCE).expect("builtin");
    let custom = m.create_property(scene, DataType::BOOL, "custom").expect("create");

    m.clear_document(scene).expect("clear");

    assert_eq!(m.document_info(scene).expect("alive"), None);
    assert!(!m.is_object_valid(info));
    assert!(!m.is_object_valid(child));
    assert!(!m.is_object_valid(old_root));
    assert!(!m.is_valid(visibility));
    assert!(!m.is_valid(custom));

    let root = m.root_node(scene).expect("fresh root");
    assert_ne!(root, old_root);
    assert!(m.node_children(root).expect("node").is_empty());
    assert_eq!(m.document_members(scene).expect("alive"), [root]);
}

#[test]
fn test_destroying_document_cascades() {
    let mut m = Manager::new();
    let doc = m.create_document("doc").expect("create");
    let tex = m.create_object_in(doc, ObjectClass::Texture, "tex").expect("create");
    let nested = m.create_object_in(tex, ObjectClass::Node, "nested").expect("create");
    assert_eq!(m.object_document(nested).expect("alive"), Some(doc));

    let blend = m.expect_property(tex, props::CURRENT_TEXTURE_BLEND_MODE).expect("builtin");
    m.destroy_object(doc).expect("destroy");

    assert!(!m.is_object_valid(tex));
    assert!(!m.is_object_valid(nested));
    assert!(!m.is_valid(blend));
    assert!(matches!(m.get(blend), Err(Error::Invalid(_))));
}

#[test]
fn test_create_in_dead_container() {
    let mut m = Manager::new();
    let doc = m.create_document("doc").expect("create");
    m.destroy_object(doc).expect("destroy");
    assert!(matches!(
        m.create_object_in(doc, ObjectClass::Node, "n"),
        Err(Error::InvalidParent(_))
    ));
}
