use json_docstore::serializer::{JsonSerializer, Serializer};
use json_docstore::{
    Document, DocumentStore, Error, FlatLocator, Locator, RecordShape, RepairPolicy, StoreConfig,
};
use serde_json::json;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn temp_root() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("data");
    (dir, root)
}

/// `<root>/<first two chars>/<identifier>.json`
fn sharded(root: &Path, identifier: &str) -> PathBuf {
    let prefix: String = identifier.chars().take(2).collect();
    root.join(prefix).join(format!("{identifier}.json"))
}

// ---- path derivation --------------------------------------------------------

#[test]
fn flat_locator_appends_json_extension() {
    let root = Path::new("store");
    assert_eq!(FlatLocator.locate(root, "user123"), root.join("user123.json"));
    assert_eq!(FlatLocator.locate(root, "a.b"), root.join("a.b.json"));
}

#[test]
fn locate_is_deterministic() {
    let (_dir, root) = temp_root();
    let db = DocumentStore::mapping(&root).unwrap();
    assert_eq!(db.locate("x"), db.locate("x"));
    assert_eq!(db.locate("x"), root.join("x.json"));
}

#[test]
fn nested_locator_round_trips() {
    let (_dir, root) = temp_root();
    let db = DocumentStore::builder(&root)
        .locator(sharded)
        .build()
        .unwrap();

    db.create("alice").unwrap();
    assert!(root.join("al").join("alice.json").is_file());
    assert!(db.exists("alice"));

    db.set_field("alice", "age", 30).unwrap();
    assert_eq!(db.read_field("alice", "age").unwrap(), json!(30));

    db.delete("alice").unwrap();
    assert!(!db.exists("alice"));
}

#[test]
fn closure_locator_with_captured_state() {
    let (_dir, root) = temp_root();
    let suffix = String::from("doc");
    let db = DocumentStore::builder(&root)
        .shape(RecordShape::Sequence)
        .locator(move |root: &Path, id: &str| root.join(format!("{id}.{suffix}.json")))
        .build()
        .unwrap();
    db.create("x").unwrap();
    assert!(root.join("x.doc.json").is_file());
}

// ---- on-disk format ---------------------------------------------------------

#[test]
fn pretty_output_uses_four_space_indent() {
    let (_dir, root) = temp_root();
    let db = DocumentStore::mapping(&root).unwrap();
    db.create("u").unwrap();
    let raw = std::fs::read_to_string(db.locate("u")).unwrap();
    assert_eq!(raw, "{\n    \"identifier\": \"u\"\n}");
}

#[test]
fn serializer_defaults_to_pretty() {
    assert!(JsonSerializer::default().is_pretty());
    assert!(!JsonSerializer::compact().is_pretty());

    let items: Vec<serde_json::Value> = vec![json!(1), json!("two")];
    let doc = Document::from(items);
    assert_eq!(doc.shape(), RecordShape::Sequence);
    let bytes = JsonSerializer::default().serialize(&doc).unwrap();
    assert_eq!(String::from_utf8(bytes).unwrap(), "[\n    1,\n    \"two\"\n]");

    let map = json!({ "identifier": "m" }).as_object().cloned().unwrap();
    let doc = Document::from(map);
    let bytes = JsonSerializer::compact().serialize(&doc).unwrap();
    assert_eq!(JsonSerializer::compact().deserialize(&bytes).unwrap(), doc);
}

#[test]
fn compact_output_fits_on_one_line() {
    let (_dir, root) = temp_root();
    let db = DocumentStore::builder(&root).pretty(false).build().unwrap();
    db.create("u").unwrap();
    db.set_field("u", "list", vec![1, 2, 3]).unwrap();
    let raw = std::fs::read_to_string(db.locate("u")).unwrap();
    assert!(!raw.contains('\n'));
}

#[test]
fn mapping_keys_keep_insertion_order() {
    let (_dir, root) = temp_root();
    let db = DocumentStore::mapping(&root).unwrap();
    db.create("u").unwrap();
    db.set_field("u", "zeta", 1).unwrap();
    db.set_field("u", "alpha", 2).unwrap();

    let map = db.read_mapping("u").unwrap();
    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    assert_eq!(keys, ["identifier", "zeta", "alpha"]);
}

#[test]
fn writes_leave_no_temp_files() {
    let (_dir, root) = temp_root();
    let db = DocumentStore::sequence(&root).unwrap();
    db.create("a").unwrap();
    db.append_item("a", 1).unwrap();

    let names: Vec<String> = std::fs::read_dir(&root)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.json".to_string()]);
}

#[test]
fn malformed_file_is_a_decode_error() {
    let (_dir, root) = temp_root();
    let db = DocumentStore::mapping(&root).unwrap();
    std::fs::write(db.locate("broken"), "{ not json").unwrap();
    match db.read("broken") {
        Err(Error::Deserialize { path, .. }) => assert_eq!(path, db.locate("broken")),
        other => panic!("expected Deserialize, got {other:?}"),
    }
}

// ---- config -----------------------------------------------------------------

#[test]
fn config_accepts_dict_and_list_aliases() {
    let dict = StoreConfig::from_json(r#"{"root": "a", "shape": "dict"}"#).unwrap();
    assert_eq!(dict.shape, RecordShape::Mapping);
    assert!(dict.pretty);
    assert_eq!(dict.repair, RepairPolicy::Always);

    let list = StoreConfig::from_json(r#"{"root": "b", "shape": "list", "pretty": false}"#).unwrap();
    assert_eq!(list.shape, RecordShape::Sequence);
    assert!(!list.pretty);

    let named =
        StoreConfig::from_json(r#"{"root": "c", "shape": "mapping", "repair": "when_changed"}"#)
            .unwrap();
    assert_eq!(named.repair, RepairPolicy::WhenChanged);
}

#[test]
fn config_with_non_string_root_is_invalid() {
    for text in [
        r#"{"root": 42, "shape": "mapping"}"#,
        r#"{"root": null, "shape": "mapping"}"#,
        r#"{"shape": "mapping"}"#,
        r#"{"root": "x", "shape": "tree"}"#,
        r#"{"root": "x", "shape": "mapping", "colour": "blue"}"#,
    ] {
        assert!(
            matches!(StoreConfig::from_json(text), Err(Error::InvalidConfiguration(_))),
            "{text} should be rejected"
        );
    }
}

#[test]
fn store_from_config_applies_defaults() {
    let (dir, root) = temp_root();
    let cfg_path = dir.path().join("store.json");
    let cfg = json!({
        "root": root,
        "shape": "mapping",
        "defaults": { "visits": 0 },
    });
    std::fs::write(&cfg_path, cfg.to_string()).unwrap();

    let db = DocumentStore::from_config(StoreConfig::load(&cfg_path).unwrap()).unwrap();
    db.create("u").unwrap();
    assert_eq!(db.read_field_as::<u64>("u", "visits").unwrap(), 0);
}

#[test]
fn store_config_new_matches_open() {
    let (_dir, root) = temp_root();
    let db = DocumentStore::from_config(StoreConfig::new(&root, RecordShape::Sequence)).unwrap();
    db.create("s").unwrap();
    assert_eq!(db.read("s").unwrap(), Document::Sequence(Vec::new()));
}
