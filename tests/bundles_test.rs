use js_debundle_rs::ast::Node;
use js_debundle_rs::{Module, parse_modules, parse_script};

const BROWSERIFY_MODULES: &str = r#"{
    1: [
      function(r, m, e)
      {
        e.test = function()
        {
          return r("test");
        };
      },
      {
        "test": 2
      }
    ],
    2: [
      function(r, m, e)
      {
        m.exports = 42;
      },
      {}
    ]
  }, {}, [1]"#;

const WEBPACK_MODULES: &str = "[
    function(m, e, r)
    {
      e.test = function()
      {
        return r(1);
      };
    },
    function(m, e, r)
    {
      m.exports = 42;
    }
  ]";

const WEBPACK_RUNTIME: &str = "
    function __webpack_require(moduleId)
    {
      return module.exports;
    }";

fn modules(source: &str) -> Vec<Module> {
    parse_modules(&parse_script(source).unwrap()).unwrap()
}

fn body(source: &str) -> Vec<Node> {
    match parse_script(source).unwrap() {
        Node::Program { body } => body,
        other => panic!("expected a program, got {other:?}"),
    }
}

fn assert_modules(found: &[Module], expected: &[(&str, &str)]) {
    let names: Vec<_> = found.iter().map(|module| module.name.as_str()).collect();
    let expected_names: Vec<_> = expected.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, expected_names);
    for (module, (name, code)) in found.iter().zip(expected) {
        assert_eq!(module.body(), body(code).as_slice(), "body of {name}");
    }
}

fn assert_browserify(source: &str) {
    assert_modules(
        &modules(source),
        &[
            ("/main", "exports.test = function() { return require(\"test\"); };"),
            ("/test", "module.exports = 42;"),
        ],
    );
}

fn assert_webpack(source: &str) {
    assert_modules(
        &modules(source),
        &[
            ("/main", "exports.test = function() { return require(1); };"),
            ("/1", "module.exports = 42;"),
        ],
    );
}

#[test]
fn test_default_browserify() {
    assert_browserify(&format!(
        "(function(){{ function r(e,n,t){{ return x.exports; }} return r; }})()({BROWSERIFY_MODULES})"
    ));
}

#[test]
fn test_browserify_assigned_to_global() {
    assert_browserify(&format!(
        "require = function(){{ function r(e,n,t){{ return x.exports; }} return r; }}()({BROWSERIFY_MODULES}); noop;"
    ));
}

#[test]
fn test_optimized_browserify() {
    assert_browserify(&format!(
        "!function(){{ function r(e,n,t){{ return x.exports; }} return r; }}()({BROWSERIFY_MODULES})"
    ));
}

#[test]
fn test_browserify_relative_requires() {
    let found = modules(
        r#"!function(){}()({
          1: [function(r){ r("lib"); r("./local"); }, {"lib": 2, "./local": 4}],
          2: [function(r){ r("./util/"); }, {"./util/": 3}],
          3: [function(r){ r("../../up"); }, {"../../up": 5}],
          4: [function(){}, {}],
          5: [function(){}, {}]
        }, {}, [1])"#,
    );
    let names: Vec<_> = found.iter().map(|module| module.name.as_str()).collect();
    assert_eq!(names, ["/main", "/lib", "/local", "/lib/util/index", "/lib/up"]);
}

#[test]
fn test_default_webpack4() {
    assert_webpack(&format!(
        "(function(modules){{ {WEBPACK_RUNTIME} return __webpack_require__(__webpack_require__.s = 0); }})({WEBPACK_MODULES})"
    ));
}

#[test]
fn test_optimized_webpack4() {
    assert_webpack(&format!(
        "!function(modules){{ {WEBPACK_RUNTIME} __webpack_require__.m=1,__webpack_require__.n=2,__webpack_require__(__webpack_require__.s = 0); }}({WEBPACK_MODULES})"
    ));
}

#[test]
fn test_jsonp_chunk_entry_point() {
    assert_webpack(&format!(
        "!function(modules){{ {WEBPACK_RUNTIME}
          function init(){{ __webpack_require__(__webpack_require__.s = foo[0]); }}
          bar.push([0, 1, 2]);
          init();
        }}({WEBPACK_MODULES})"
    ));
}

#[test]
fn test_optimized_jsonp_chunk_entry_point() {
    assert_webpack(&format!(
        "!function(modules){{ {WEBPACK_RUNTIME}
          function init(){{ __webpack_require__(__webpack_require__.s = foo[0]); }}
          bar.push([0, 1, 2]), init();
        }}({WEBPACK_MODULES})"
    ));
}

#[test]
fn test_jsonp_chunks() {
    assert_modules(
        &modules(
            "(window.webpackJsonp = window.webpackJsonp || []).push([
              [123],
              [
                function(m, e, r) { e.test = function() { return r(2); }; },
                ,
                function(m, e, r) { m.exports = 42; }
              ]
            ]);",
        ),
        &[
            ("/0", "exports.test = function() { return require(2); };"),
            ("/2", "module.exports = 42;"),
        ],
    );
}

#[test]
fn test_jsonp_chunks_with_additional_parameter() {
    assert_modules(
        &modules(
            r#"(window.webpackJsonp = window.webpackJsonp || []).push([
              ["abc", "cda"],
              {
                "abc": function(m, e, r) { e.test = function() { return r("123"); }; },
                "123": function(m, e, r) { m.exports = 42; }
              },
              [["xyz", "zyx"]]
            ]);"#,
        ),
        &[
            ("/abc", "exports.test = function() { return require(\"123\"); };"),
            ("/123", "module.exports = 42;"),
        ],
    );
}

#[test]
fn test_strict_jsonp_chunks() {
    assert_modules(
        &modules(
            r#""use strict";
            (self.webpackChunk = self.webpackChunk || []).push([[5], {7: function(m) { m.exports = 1; }}]);"#,
        ),
        &[("/7", "module.exports = 1;")],
    );
}
