use super::*;
use crate::pipeline::ResolvedModule;
use crate::primitives::OutputKind;
use std::path::PathBuf;

fn sample() -> Resolution {
    Resolution {
        root: PathBuf::from("/app"),
        environment: Some("prod".to_string()),
        output_kind: OutputKind::Main,
        files: vec![
            PathBuf::from("/app/node_modules/simple/index.js"),
            PathBuf::from("/app/node_modules/bower-deps/dist/index.js"),
        ],
        modules: vec![ResolvedModule {
            id: "bower-deps".to_string(),
            manifest: PathBuf::from("/app/node_modules/bower-deps/package.json"),
            output_file: Some(PathBuf::from("/app/node_modules/bower-deps/dist/index.js")),
            dependencies: vec!["simple".to_string()],
        }],
    }
}

#[test]
fn test_render_text_lists_one_file_per_line() {
    let text = render(&sample(), ListFormat::Text).unwrap();
    assert_eq!(
        text,
        "/app/node_modules/simple/index.js\n/app/node_modules/bower-deps/dist/index.js\n"
    );
}

#[test]
fn test_render_empty_text() {
    let resolution = Resolution {
        files: Vec::new(),
        modules: Vec::new(),
        ..sample()
    };
    assert_eq!(render(&resolution, ListFormat::Text).unwrap(), "");
}

#[test]
fn test_render_json_report() {
    let json = render(&sample(), ListFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["environment"], "prod");
    assert_eq!(value["output_kind"], "main");
    assert_eq!(value["files"].as_array().unwrap().len(), 2);
    assert_eq!(value["modules"][0]["dependencies"][0], "simple");
}
