use std::fs;

use js_debundle_rs::io::{ModuleManifest, write_modules};
use js_debundle_rs::{
    DebundleError, ModuleOutput, NameStyle, Options, beautify, beautify_file, unbundle,
    unbundle_file,
};
use tempfile::TempDir;

const BUNDLE: &str = r#"
!function(){ function r(e,n,t){ return x.exports; } return r; }()({
  1: [function(a, b, c) {
    var d = a("./lib/format"), f = a("lodash");
    c.run = function(g) { return g && d(g), void 0; };
  }, {"./lib/format": 2, "lodash": 3}],
  2: [function(a, b, c) { b.exports = function(h) { return "[" + h + "]"; }; }, {}],
  3: [function(a, b, c) { b.exports = {}; }, {}]
}, {}, [1]);
"#;

fn output(name: &str, code: &str) -> ModuleOutput {
    ModuleOutput {
        name: name.to_string(),
        code: code.to_string(),
    }
}

#[test]
fn test_unbundle_pipeline() {
    let modules = unbundle(BUNDLE, &Options::default()).unwrap();
    let names: Vec<_> = modules.iter().map(|module| module.name.as_str()).collect();
    assert_eq!(names, ["/main", "/lodash", "/lib/format"]);

    let main = &modules[0].code;
    assert!(main.contains("var format = require(\"./lib/format\");"), "{main}");
    assert!(main.contains("var lodash = require(\"lodash\");"), "{main}");
    assert!(main.contains("exports.run = function"), "{main}");
    assert!(main.contains("if (_"), "{main}");
    assert!(main.contains("return undefined;"), "{main}");

    assert_eq!(
        modules[1].code,
        "module.exports = {};\n"
    );
}

#[test]
fn test_unbundle_without_modifications() {
    let options = Options {
        mods: false,
        ..Options::default()
    };
    let modules = unbundle(BUNDLE, &options).unwrap();
    let main = &modules[0].code;
    assert!(main.contains("var d = require(\"./lib/format\"), f = require(\"lodash\");"), "{main}");
    assert!(main.contains("return g && d(g), void 0;"), "{main}");
}

#[test]
fn test_phonetic_names() {
    let options = Options {
        code: false,
        name_style: NameStyle::Phonetic,
        ..Options::default()
    };
    let result = beautify("function f(a, b) { return a + b; }", &options).unwrap();
    assert_eq!(result, "function f(baba, nouho) {\n  return baba + nouho;\n}\n");
}

#[test]
fn test_write_modules_with_manifest() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("out");
    let manifest_path = dir.path().join("manifest.json");
    let modules = [
        output("/main", "main();\n"),
        output("/lib/format", "format();\n"),
        output("/styles/site.css", "css();\n"),
    ];

    let written = write_modules(&target, &modules, Some(&manifest_path)).unwrap();
    assert_eq!(written.total_modules, 3);
    assert_eq!(fs::read_to_string(target.join("main.js")).unwrap(), "main();\n");
    assert_eq!(
        fs::read_to_string(target.join("lib").join("format.js")).unwrap(),
        "format();\n"
    );
    assert!(target.join("styles").join("site.css").exists());

    let manifest: ModuleManifest =
        serde_json::from_str(&fs::read_to_string(&manifest_path).unwrap()).unwrap();
    assert_eq!(manifest.total_modules, 3);
    assert_eq!(manifest.modules[1].name, "/lib/format");
    assert_eq!(manifest.modules[1].path, target.join("lib").join("format.js"));
}

#[test]
fn test_escaping_module_is_rejected_before_writing() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("out");
    let modules = [output("/main", "main();\n"), output("/../../evil", "evil();\n")];

    let error = write_modules(&target, &modules, None).unwrap_err();
    assert!(matches!(error, DebundleError::PathEscape { .. }), "{error}");
    assert!(!target.exists());
}

#[test]
fn test_unbundle_then_write() {
    let dir = TempDir::new().unwrap();
    let modules = unbundle(BUNDLE, &Options::default()).unwrap();
    write_modules(dir.path(), &modules, None).unwrap();
    for file in ["main.js", "lodash.js", "lib/format.js"] {
        assert!(dir.path().join(file).is_file(), "{file} missing");
    }
}

#[test]
fn test_beautify_file_in_place() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("min.js");
    fs::write(&script, "var a=!0;a&&b()").unwrap();
    let options = Options {
        vars: false,
        ..Options::default()
    };

    beautify_file(&script, &options).unwrap();
    assert_eq!(
        fs::read_to_string(&script).unwrap(),
        "var a = true;\nif (a)\n  b();\n"
    );
}

#[test]
fn test_missing_script_reports_its_path() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("missing.js");

    let error = beautify_file(&script, &Options::default()).unwrap_err();
    let DebundleError::Io { path, .. } = &error else {
        panic!("expected an I/O error, got {error}");
    };
    assert_eq!(path, &script);
    assert!(error.to_string().contains("missing.js"), "{error}");
}

#[test]
fn test_unbundle_file_writes_manifest() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("bundle.js");
    fs::write(&script, BUNDLE).unwrap();
    let target = dir.path().join("out");
    let options = Options {
        manifest: Some(dir.path().join("manifest.json")),
        ..Options::default()
    };

    let manifest = unbundle_file(&script, &target, &options).unwrap();
    assert_eq!(manifest.total_modules, 3);
    assert!(target.join("lib").join("format.js").is_file());
    assert!(dir.path().join("manifest.json").is_file());
}

#[test]
fn test_too_deep_script_is_left_untouched() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("deep.js");
    let source = format!("x = {};", vec!["a"; 2100].join("+"));
    fs::write(&script, &source).unwrap();

    let error = beautify_file(&script, &Options::default()).unwrap_err();
    assert!(matches!(error, DebundleError::Parse(_)), "{error}");
    assert_eq!(fs::read_to_string(&script).unwrap(), source);
}
