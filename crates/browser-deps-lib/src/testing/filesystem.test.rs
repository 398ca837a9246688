use super::*;

#[test]
fn test_fixture_creates_temp_dir() {
    let fixture = PackageTreeFixture::new().unwrap();
    assert!(fixture.path().exists());
    assert!(fixture.path().is_dir());
}

#[test]
fn test_root_with_deps_writes_overrides() {
    let fixture = PackageTreeFixture::new().unwrap();
    let path = fixture
        .root_with_deps(&["simple", "browser"], Some(json!({ "simple": false })))
        .unwrap();

    let value: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    let deps: Vec<&String> = value["dependencies"].as_object().unwrap().keys().collect();
    assert_eq!(deps, ["simple", "browser"]);
    assert_eq!(value["browser-overrides"]["simple"], json!(false));
}

#[test]
fn test_package_helpers_write_under_node_modules() {
    let fixture = PackageTreeFixture::new().unwrap();
    fixture.package("simple", json!({ "name": "simple" })).unwrap();
    let index = fixture.package_file("simple", "index.js", "").unwrap();
    fixture.bower("simple", &["other"]).unwrap();

    assert_eq!(index, fixture.module_file("simple", "index.js"));
    assert!(fixture.file_exists("node_modules/simple/package.json"));
    assert!(fixture.file_exists("node_modules/simple/bower.json"));
}

#[test]
fn test_cleanup_on_drop() {
    let path = {
        let fixture = PackageTreeFixture::new().unwrap();
        fixture.write_file("a/b.txt", "x").unwrap();
        fixture.path().to_path_buf()
    };
    assert!(!path.exists());
}
