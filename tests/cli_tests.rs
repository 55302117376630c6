//! spacey-embed binary tests

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn spacey_embed(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_spacey-embed"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn spacey-embed")
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_pack_then_run() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "main.js", "console.log('sum', require('./math').add(2, 3));");
    write(root, "math/index.js", "exports.add = require('./add');");
    write(root, "math/add.js", "module.exports = function (a, b) { return a + b; };");

    let entry = root.join("main.js");
    let bundle = root.join("out.bundle.json");
    let output = spacey_embed(&["pack", entry.to_str().unwrap(), bundle.to_str().unwrap()]);
    assert!(output.status.success(), "{:?}", output);
    assert!(stdout(&output).contains("OK"));
    assert!(bundle.is_file());

    let output = spacey_embed(&["run", bundle.to_str().unwrap()]);
    assert!(output.status.success(), "{:?}", output);
    assert_eq!(stdout(&output), "sum 5\n");
}

#[test]
fn test_script_failure_still_exits_successfully() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "main.js", "require('./missing');");

    let entry = root.join("main.js");
    let output = spacey_embed(&["exec", entry.to_str().unwrap()]);
    assert!(output.status.success(), "{:?}", output);
    assert!(stdout(&output).contains("Error: Cannot find module 'missing'"));
}

#[test]
fn test_unreadable_bundle_fails() {
    let dir = TempDir::new().unwrap();
    let bundle = dir.path().join("nope.bundle.json");
    let output = spacey_embed(&["run", bundle.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read bundle"));
}
