use forgeprops::config::FileNames;
use forgeprops::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// Write the five database files into `dir`.
fn write_database(dir: &Path, attrs: &str, offs: &str, avs: &str, vals: &str, ids: &str) {
    fs::write(dir.join("objects_attrs.json"), attrs).unwrap();
    fs::write(dir.join("objects_offs.json"), offs).unwrap();
    fs::write(dir.join("objects_avs.json"), avs).unwrap();
    fs::write(dir.join("objects_vals.json"), vals).unwrap();
    fs::write(dir.join("objects_ids.json"), ids).unwrap();
}

/// A small building model:
///
/// 1. Model (root)
/// 2. Walls category, child of the root
/// 3. Basic Wall type
/// 4. Wall instance: instance of 3, child of 2
const ATTRS: &str = r#"[
    0,
    ["name", "__name__", 20, null, null, null, 0],
    ["parent", "__parent__", 11, null, null, null, 0],
    ["instanceof_objid", "__instanceof__", 11, null, null, null, 0],
    ["child", "__child__", 11, null, null, null, 0],
    ["Length", "Dimensions", 3, "mm", null, null, 0],
    ["Structural", "Construction", 1, null, null, null, 0],
    ["Comments", "", 20, null, null, null, 1],
    ["Phase", null, 20, null, null, null, 0]
]"#;

// Pair counts per object: 0, 2, 3, 3, 4
const OFFS: &str = "[0, 0, 2, 5, 8]";

const AVS: &str = r#"[
    1, 0,  4, 1,
    1, 2,  2, 3,  8, 4,
    1, 5,  5, 6,  6, 7,
    1, 8,  3, 9,  2, 10,  7, 11
]"#;

const VALS: &str = r#"[
    "Model", 2,
    "Walls", 1, "New Construction",
    "Basic Wall", 3000, false,
    "Wall [1234]", 3, 2, "exterior"
]"#;

const IDS: &str = r#"["", "root-0", "cat-1", "type-2", "inst-3"]"#;

fn building() -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    write_database(dir.path(), ATTRS, OFFS, AVS, VALS, IDS);
    dir
}

#[test]
fn test_resolve_building() {
    let dir = building();
    let db = PropertyDatabase::open(dir.path()).unwrap();

    assert_eq!(db.max_id(), 4);
    assert_eq!(db.source_path(), dir.path());

    let objects = db.resolve_all().unwrap();
    let ids: Vec<usize> = objects.iter().map(|o| o.object_id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);

    let wall = &objects[3];
    assert_eq!(wall.name, "Wall [1234]");
    assert_eq!(wall.external_id, "inst-3");
    assert_eq!(wall.parents, vec![2, 1]);
    assert_eq!(wall.get("Dimensions", "Length"), Some("3000.000000 mm"));
    assert_eq!(wall.get("Construction", "Structural"), Some("No"));
    assert_eq!(wall.get("Attribute", "Comments"), Some("exterior"));
    // Inherited from the category through the parent chain
    assert_eq!(wall.get("General", "Phase"), Some("New Construction"));
    // The child link on the root is never shown, and the root is never merged
    assert_eq!(wall.get("__child__", "child"), None);
}

#[test]
fn test_every_result_is_named_and_in_range() {
    let dir = building();
    let db = PropertyDatabase::open(dir.path()).unwrap();

    for id in 0..=db.max_id() + 2 {
        if let Some(object) = db.resolve_one(id).unwrap() {
            assert_eq!(object.object_id, id);
            assert!(!object.name.is_empty());
            assert!(id >= 1 && id <= db.max_id());
        }
    }
}

#[test]
fn test_resolution_is_idempotent() {
    let dir = building();
    let first = PropertyDatabase::open(dir.path()).unwrap().resolve_all().unwrap();
    let second = PropertyDatabase::open(dir.path()).unwrap().resolve_all().unwrap();
    assert_eq!(first, second);

    let parallel = PropertyDatabase::open(dir.path())
        .unwrap()
        .with_parallel(true)
        .resolve_all()
        .unwrap();
    assert_eq!(first, parallel);
}

#[test]
fn test_single_pair_database() {
    // Object 2 owns the only pair; object 1 has an empty range
    let dir = tempdir().unwrap();
    write_database(
        dir.path(),
        r#"[["name","__name__",20,null,null,null,0]]"#,
        "[0,0,0]",
        "[1,0]",
        r#"["Door"]"#,
        r#"["","",""]"#,
    );

    let db = PropertyDatabase::open(dir.path()).unwrap();
    let objects = db.resolve_all().unwrap();
    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0].object_id, 2);
    assert_eq!(objects[0].name, "Door");
    assert!(objects[0].properties.is_empty());
    assert!(objects[0].parents.is_empty());
}

#[test]
fn test_single_pair_database_with_overrunning_offsets() {
    // Offsets [0,0,2] give object 1 entries 0..4 of a two-entry pair array
    let dir = tempdir().unwrap();
    write_database(
        dir.path(),
        r#"[["name","__name__",20,null,null,null,0]]"#,
        "[0,0,2]",
        "[1,0]",
        r#"["Door"]"#,
        r#"["","",""]"#,
    );

    let db = PropertyDatabase::open(dir.path()).unwrap();
    // Object 2 starts past its end, so it holds no pairs
    assert_eq!(db.resolve_one(2).unwrap(), None);
    assert!(matches!(
        db.resolve_all(),
        Err(Error::PairRangeOutOfBounds { object_id: 1, start: 0, end: 4, len: 2 })
    ));
}

#[test]
fn test_export_json() {
    let dir = building();
    let db = PropertyDatabase::open(dir.path()).unwrap();

    let json = db.export_json(&ExportSettings::compact()).unwrap();
    let parsed: Vec<ObjectProperties> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, db.resolve_all().unwrap());

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[1]["Name"], "Walls");
    assert_eq!(value[1]["ExternalID"], "cat-1");
    assert_eq!(value[1]["Parents"], serde_json::json!([1]));
}

#[test]
fn test_write_json_file() {
    let dir = building();
    let db = PropertyDatabase::open(dir.path()).unwrap();
    let out = dir.path().join("out.json");

    db.write_json_file(&out, &ExportSettings::pretty(2)).unwrap();
    let written = fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("[\n  {\n    \"ObjectID\": 1,"));
}

#[test]
fn test_custom_file_names_and_root() {
    let dir = tempdir().unwrap();
    let names = FileNames {
        attrs: "a.json".to_string(),
        offsets: "o.json".to_string(),
        pairs: "p.json".to_string(),
        values: "v.json".to_string(),
        ids: "i.json".to_string(),
    };
    let paths = names.paths_in(dir.path());
    fs::write(&paths.attrs, ATTRS).unwrap();
    fs::write(&paths.offsets, OFFS).unwrap();
    fs::write(&paths.pairs, AVS).unwrap();
    fs::write(&paths.values, VALS).unwrap();
    fs::write(&paths.ids, IDS).unwrap();

    let settings_path = dir.path().join("forgeprops.toml");
    fs::write(
        &settings_path,
        r#"
        [files]
        attrs = "a.json"
        offsets = "o.json"
        pairs = "p.json"
        values = "v.json"
        ids = "i.json"

        [resolver]
        root_id = 2
        "#,
    )
    .unwrap();

    let settings = Settings::load(&settings_path).unwrap();
    assert_eq!(settings.files, names);

    let db = PropertyDatabase::open_with(dir.path(), &settings).unwrap();
    let wall = db.resolve_one(4).unwrap().unwrap();
    // The chain now stops at the category
    assert_eq!(wall.parents, vec![2]);
    assert_eq!(wall.get("General", "Phase"), None);
}

#[test]
fn test_missing_file() {
    let dir = building();
    fs::remove_file(dir.path().join("objects_vals.json")).unwrap();

    let err = PropertyDatabase::open(dir.path()).unwrap_err();
    match err {
        Error::MissingFile { path } => assert!(path.ends_with("objects_vals.json")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_malformed_file() {
    let dir = building();
    fs::write(dir.path().join("objects_offs.json"), r#"{"not": "an array"}"#).unwrap();

    assert!(matches!(
        PropertyDatabase::open(dir.path()),
        Err(Error::MalformedFile { .. })
    ));
}

#[test]
fn test_stats() {
    let dir = building();
    let stats = PropertyDatabase::open(dir.path()).unwrap().stats();
    assert_eq!(
        stats,
        DatabaseStats {
            attribute_count: 8,
            object_count: 4,
            pair_count: 12,
            value_count: 12,
            external_id_count: 5,
        }
    );
}
