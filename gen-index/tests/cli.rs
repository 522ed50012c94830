use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn write_fixture(dir: &Path, names: &[&str]) {
    fs::create_dir_all(dir).expect("create fixture dir");
    for name in names {
        fs::write(dir.join(name), format!("// {name}\n")).expect("fixture write");
    }
}

#[test]
fn gen_writes_index_for_configured_directory() {
    let tmp = tempdir().expect("tempdir");
    let src = tmp.path().join("src");
    write_fixture(&src, &["a.ts", "b.ts"]);

    let config_path = tmp.path().join("gi.yaml");
    fs::write(
        &config_path,
        format!("- input: \"{}\"\n", src.display()),
    )
    .expect("write config");

    let mut cmd = Command::cargo_bin("gen-index").expect("binary exists");
    cmd.arg("gen").arg("--config").arg(&config_path);
    cmd.assert().success();

    let content = fs::read_to_string(src.join("index.ts")).expect("index.ts written");
    let mut lines: Vec<&str> = content.lines().collect();
    lines.sort_unstable();
    assert_eq!(lines, vec!["export * from './a'", "export * from './b'"]);
}

#[test]
fn gen_supports_shared_defaults_form() {
    let tmp = tempdir().expect("tempdir");
    let a = tmp.path().join("a");
    let b = tmp.path().join("b");
    write_fixture(&a, &["one.ts"]);
    write_fixture(&b, &["two.ts"]);

    let config_path = tmp.path().join("gi.yaml");
    fs::write(
        &config_path,
        format!(
            "preserveExtName: true\ndirs:\n  - \"{}\"\n  - \"{}\"\n",
            a.display(),
            b.display()
        ),
    )
    .expect("write config");

    let mut cmd = Command::cargo_bin("gen-index").expect("binary exists");
    cmd.arg("gen").arg("--config").arg(&config_path);
    cmd.assert().success();

    assert_eq!(
        fs::read_to_string(a.join("index.ts")).expect("a index"),
        "export * from './one.ts'\n"
    );
    assert_eq!(
        fs::read_to_string(b.join("index.ts")).expect("b index"),
        "export * from './two.ts'\n"
    );
}

#[test]
fn missing_config_file_exits_nonzero() {
    let mut cmd = Command::cargo_bin("gen-index").expect("binary exists");
    cmd.arg("gen").arg("--config").arg("no/such/config.yaml");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn failing_first_task_aborts_and_exits_nonzero() {
    let tmp = tempdir().expect("tempdir");
    let first = tmp.path().join("first");
    let second = tmp.path().join("second");
    write_fixture(&first, &["a.ts"]);
    write_fixture(&second, &["b.ts"]);

    // invalid include glob makes the first task fail; default
    // exitWhenError abandons the second entry
    let config_path = tmp.path().join("gi.yaml");
    fs::write(
        &config_path,
        format!(
            "- input: \"{}\"\n  include: \"a[\"\n- input: \"{}\"\n",
            first.display(),
            second.display()
        ),
    )
    .expect("write config");

    let mut cmd = Command::cargo_bin("gen-index").expect("binary exists");
    cmd.arg("gen").arg("--config").arg(&config_path);
    cmd.assert().failure();

    assert!(
        !second.join("index.ts").exists(),
        "second task must not run after aborting failure"
    );
}
