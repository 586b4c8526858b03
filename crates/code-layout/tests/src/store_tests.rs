use super::*;
use crate::syntax::Language;

#[test]
fn rescan_replaces_the_snapshot() {
    let store = OutlineStore::new();
    let path = Path::new("src/widget.cpp");
    let options = ExtractOptions::for_language(Language::Cpp);

    let first = store.scan_and_store(path, "int a;\n", &options);
    store.scan_and_store(path, "int b;\nint c;\n", &options);

    assert_eq!(store.len(), 1);
    assert_eq!(first.iter().count(), 1);
    let current = store.get(path).unwrap();
    let names: Vec<&str> = current.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["b", "c"]);
}

#[test]
fn remove_drops_the_entry() {
    let store = OutlineStore::default();
    let path = Path::new("a.c");
    store.scan_and_store(path, "int x;", &ExtractOptions::for_language(Language::C));
    assert!(store.remove(path).is_some());
    assert!(store.is_empty());
    assert!(store.get(path).is_none());
}

#[test]
fn search_is_case_insensitive_and_limited() {
    let store = OutlineStore::new();
    let options = ExtractOptions::default();
    store.scan_and_store(Path::new("b.cpp"), "void drawLine();\nvoid DrawCircle();\n", &options);
    store.scan_and_store(Path::new("a.cpp"), "struct Drawer { int draws; };\n", &options);

    let hits = store.search("draw", 10);
    let names: Vec<(&str, &str)> =
        hits.iter().map(|h| (h.path.to_str().unwrap(), h.name.as_str())).collect();
    assert_eq!(
        names,
        vec![("a.cpp", "Drawer"), ("a.cpp", "draws"), ("b.cpp", "drawLine"), ("b.cpp", "DrawCircle")]
    );
    assert_eq!(hits[1].key.to_string(), "Drawer::draws");

    assert_eq!(store.search("draw", 2).len(), 2);
    assert!(store.search("missing", 10).is_empty());
}
