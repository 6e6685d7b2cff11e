use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "clean.jsx", "<nav role=\"navigation\" />\n");
    write(
        dir.path(),
        "components/widget.jsx",
        "<div>\n  <span role=\"datepicker\" />\n  <Card role=\"range\" />\n</div>\n",
    );
    write(dir.path(), "notes.md", "<div role=\"foobar\" />\n");
    dir
}

#[test]
fn clean_file_exits_zero() {
    let dir = project();
    let mut cmd = cargo_bin_cmd!("aria-role-lint");
    cmd.arg("check").arg(dir.path().join("clean.jsx"));

    cmd.assert().success().stdout(predicate::str::is_empty());
}

#[test]
fn problems_exit_one() {
    let dir = project();
    let mut cmd = cargo_bin_cmd!("aria-role-lint");
    cmd.current_dir(dir.path()).arg("check").arg(".");

    cmd.assert()
        .code(1)
        .stdout(
            predicate::str::contains("widget.jsx:2:9: Elements with ARIA roles")
                .and(predicate::str::contains("widget.jsx:3:9:"))
                .and(predicate::str::contains("2 problems"))
                .and(predicate::str::contains("notes.md").not()),
        );
}

#[test]
fn ignore_non_dom_flag() {
    let dir = project();
    let mut cmd = cargo_bin_cmd!("aria-role-lint");
    cmd.arg("check")
        .arg(dir.path().join("components"))
        .arg("--ignore-non-dom");

    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("1 problem\n"));
}

#[test]
fn allow_role_flag() {
    let dir = project();
    let mut cmd = cargo_bin_cmd!("aria-role-lint");
    cmd.arg("check")
        .arg(dir.path().join("components"))
        .args(["--allow-role", "datepicker", "--allow-role", "range"]);

    cmd.assert().success();
}

#[test]
fn project_config_file_is_picked_up() {
    let dir = project();
    write(
        dir.path(),
        "aria-role-lint.toml",
        "[rules.aria_role]\nignore_non_dom = true\nallowed_invalid_roles = [\"datepicker\"]\n",
    );
    let mut cmd = cargo_bin_cmd!("aria-role-lint");
    cmd.current_dir(dir.path()).arg("check").arg("components");

    cmd.assert().success();
}

#[test]
fn explicit_config_file() {
    let dir = project();
    write(
        dir.path(),
        "strict.toml",
        "[rules.aria_role]\nallowed_invalid_roles = [\"range\"]\n",
    );
    let mut cmd = cargo_bin_cmd!("aria-role-lint");
    cmd.arg("check")
        .arg(dir.path().join("components"))
        .arg("--config")
        .arg(dir.path().join("strict.toml"));

    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("1 problem\n"));
}

#[test]
fn json_output() {
    let dir = project();
    let mut cmd = cargo_bin_cmd!("aria-role-lint");
    cmd.arg("check")
        .arg(dir.path().join("components/widget.jsx"))
        .args(["--format", "json"]);

    let output = cmd.assert().code(1).get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value[0]["diagnostics"].as_array().unwrap().len(), 2);
    assert_eq!(value[0]["diagnostics"][0]["rule"], "aria-role");
}

#[test]
fn unknown_format_exits_two() {
    let dir = project();
    let mut cmd = cargo_bin_cmd!("aria-role-lint");
    cmd.arg("check")
        .arg(dir.path().join("clean.jsx"))
        .args(["--format", "xml"]);

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown format 'xml'"));
}

#[test]
fn missing_file_exits_two() {
    let mut cmd = cargo_bin_cmd!("aria-role-lint");
    cmd.arg("check").arg("does/not/exist.jsx");

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("does/not/exist.jsx"));
}

#[test]
fn parse_error_exits_two() {
    let dir = project();
    write(dir.path(), "broken.jsx", "<div>\n  <span>\n</div>\n");
    let mut cmd = cargo_bin_cmd!("aria-role-lint");
    cmd.arg("check").arg(dir.path().join("broken.jsx"));

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("broken.jsx:"));
}

#[test]
fn missing_config_file_exits_two() {
    let dir = project();
    let mut cmd = cargo_bin_cmd!("aria-role-lint");
    cmd.arg("check")
        .arg(dir.path().join("clean.jsx"))
        .arg("--config")
        .arg(dir.path().join("missing.toml"));

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn roles_command() {
    let mut cmd = cargo_bin_cmd!("aria-role-lint");
    cmd.arg("roles");
    cmd.assert().success().stdout(
        predicate::str::contains("button\n")
            .and(predicate::str::contains("doc-abstract\n"))
            .and(predicate::str::contains("widget\n").not()),
    );

    let mut cmd = cargo_bin_cmd!("aria-role-lint");
    cmd.args(["roles", "--abstract"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("range\n").and(predicate::str::contains("button").not()));
}

#[test]
fn formats_command() {
    let mut cmd = cargo_bin_cmd!("aria-role-lint");
    cmd.arg("formats");
    cmd.assert().success().stdout(
        predicate::str::contains("simple")
            .and(predicate::str::contains("json"))
            .and(predicate::str::contains("yaml")),
    );
}
