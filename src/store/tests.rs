use super::*;
use std::fs;
use tempfile::tempdir;

fn rec(id: &str) -> Record {
    Record {
        id: id.into(),
        artist: "Talk Talk".into(),
        album: "Spirit of Eden".into(),
        year: "1988".into(),
        genre: String::new(),
        condition: "NM".into(),
        price: "31.50".into(),
        notes: String::new(),
        date_added: "2024-02-02T12:00:00.000Z".into(),
    }
}

#[test]
fn missing_key_loads_empty() {
    let store = MemoryStore::new();
    assert!(load_collection(&store, RECORDS_KEY).is_empty());
}

#[test]
fn malformed_or_wrong_shape_loads_empty() {
    for raw in ["{not json", "{\"id\":\"1\"}", "[1, 2, 3]", "[{\"artist\":\"no id\"}]", "   "] {
        let store = MemoryStore::with_entry(RECORDS_KEY, raw);
        assert!(load_collection(&store, RECORDS_KEY).is_empty(), "input: {raw}");
    }
}

#[test]
fn save_then_load_round_trips() {
    let mut store = MemoryStore::new();
    let records = vec![rec("a"), rec("b")];
    save_collection(&mut store, RECORDS_KEY, &records).unwrap();
    assert_eq!(load_collection(&store, RECORDS_KEY), records);
}

#[test]
fn file_store_creates_dir_and_persists_per_key() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("nested").join("data");
    let mut store = FileStore::open(&root).unwrap();
    assert!(root.is_dir());
    assert_eq!(store.get(RECORDS_KEY).unwrap(), None);

    save_collection(&mut store, RECORDS_KEY, &[rec("a")]).unwrap();
    assert!(store.path_for(RECORDS_KEY).is_file());
    assert!(!root.join("recordCollection.json.tmp").exists());

    let reopened = FileStore::open(&root).unwrap();
    assert_eq!(load_collection(&reopened, RECORDS_KEY), vec![rec("a")]);
}

#[test]
fn file_store_reads_hand_edited_json() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("recordCollection.json"),
        r#"[{"id":"x","artist":"Can","album":"Tago Mago","year":"1971","genre":"","condition":"","price":"","notes":"","dateAdded":"2024-01-01T00:00:00.000Z"}]"#,
    )
    .unwrap();

    let store = FileStore::open(dir.path()).unwrap();
    let records = load_collection(&store, RECORDS_KEY);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].album, "Tago Mago");
}
