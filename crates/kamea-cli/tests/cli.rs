//! CLI command integration tests.
//! Each test clears KAMEA_CONFIG so a developer's config cannot leak in.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn kamea_cmd() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("kamea").unwrap();
    cmd.env_remove("KAMEA_CONFIG");
    cmd
}

fn json_output(args: &[&str]) -> serde_json::Value {
    let output = kamea_cmd().arg("--json").args(args).output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn ternary_of_364() {
    kamea_cmd()
        .args(["ternary", "364"])
        .assert()
        .success()
        .stdout("111111\n");
}

#[test]
fn ternary_with_width() {
    kamea_cmd()
        .args(["ternary", "5", "--width", "3"])
        .assert()
        .success()
        .stdout("012\n");
}

#[test]
fn ternary_out_of_range_fails() {
    kamea_cmd()
        .args(["ternary", "729"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 729"));
    kamea_cmd()
        .args(["ternary", "-3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value -3"));
}

#[test]
fn decimal_conversion() {
    kamea_cmd()
        .args(["decimal", "222222"])
        .assert()
        .success()
        .stdout("728\n");
    kamea_cmd()
        .args(["decimal", "01x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid digit 'x' at position 2"));
}

#[test]
fn transition_of_one_and_two() {
    kamea_cmd()
        .args(["transition", "000001", "000002"])
        .assert()
        .success()
        .stdout(predicate::str::contains("result:     000000"))
        .stdout(predicate::str::contains("decimal:    0"));
}

#[test]
fn transforms_json() {
    let json = json_output(&["transforms", "001122"]);
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[1]["transform"], "reversal");
    assert_eq!(rows[1]["ternary"], "221100");
    assert_eq!(rows[2]["ternary"], "002211");
    assert_eq!(rows[3]["ternary"], "112200");
}

#[test]
fn region_lookup() {
    kamea_cmd()
        .args(["region", "-13", "13"])
        .assert()
        .success()
        .stdout(predicate::str::contains("region:     NorthWest"))
        .stdout(predicate::str::contains("bigram:     21"));
    kamea_cmd()
        .args(["region", "14", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of bounds"));
}

#[test]
fn quadset_json() {
    let json = json_output(&["quadset", "3", "5", "012201"]);
    let cells = json.as_array().unwrap();
    assert_eq!(cells.len(), 4);
    let at = |x: i64, y: i64| {
        cells
            .iter()
            .find(|c| c["coordinate"]["x"] == x && c["coordinate"]["y"] == y)
            .unwrap()["value"]
            .clone()
    };
    assert_eq!(at(3, 5), "012201");
    assert_eq!(at(3, -5), "102210");
    assert_eq!(at(-3, -5), "021102");
}

#[test]
fn quadset_inconsistent_on_axis() {
    kamea_cmd()
        .args(["quadset", "0", "5", "111111"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("inconsistent quadset"));
}

#[test]
fn nuclear_text_and_json() {
    kamea_cmd()
        .args(["nuclear", "111111"])
        .assert()
        .success()
        .stdout(predicate::str::contains("class:      prime"))
        .stdout(predicate::str::contains("iterations: 0"))
        .stdout(predicate::str::contains("reason:     fixed_point"));

    let json = json_output(&["nuclear", "012210", "--max-iterations", "1"]);
    assert_eq!(json["terminal_reason"], "iteration_limit");
    assert_eq!(json["core_value"], "122221");
    assert_eq!(json["hierarchy_class"], "temple");
}

#[test]
fn polygon_skip_group() {
    let json = json_output(&["polygon", "7", "--skip", "2"]);
    assert_eq!(json["label"], "skip 2");
    assert_eq!(json["transitions"].as_array().unwrap().len(), 7);
    assert_eq!(json["summary"]["count"], 7);
}

#[test]
fn polygon_pattern_with_values() {
    let json = json_output(&[
        "polygon",
        "5",
        "--pattern",
        "pentagram",
        "--values",
        "1,2,3,4,364",
    ]);
    assert_eq!(json["label"], "Pentagram");
    let first = &json["transitions"][0];
    assert_eq!(first["from_index"], 0);
    assert_eq!(first["to_index"], 2);
    assert_eq!(first["from_value"], 1);
    assert_eq!(first["to_value"], 3);
}

#[test]
fn polygon_random_values_are_seeded() {
    let a = json_output(&["polygon", "6", "--skip", "1", "--random-values", "--seed", "7"]);
    let b = json_output(&["polygon", "6", "--skip", "1", "--random-values", "--seed", "7"]);
    assert_eq!(a, b);
    for t in a["transitions"].as_array().unwrap() {
        assert!(t["from_value"].as_i64().unwrap() <= 728);
    }
}

#[test]
fn polygon_errors() {
    kamea_cmd()
        .args(["polygon", "2", "--skip", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid sides 2"));
    kamea_cmd()
        .args(["polygon", "4", "--skip", "1", "--values", "1,2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("4 vertices but 2 values"));
    kamea_cmd()
        .args(["polygon", "4", "--pattern", "pentagram"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no pattern named"));
    kamea_cmd().args(["polygon", "4"]).assert().failure();
}

#[test]
fn patterns_listing() {
    kamea_cmd()
        .args(["patterns", "6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hexagram"))
        .stdout(predicate::str::contains("Unicursal Hexagram"));
    kamea_cmd()
        .args(["patterns", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(no patterns for 4 sides)"));
}

#[test]
fn config_file_sets_width_and_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kamea.toml");
    std::fs::write(&path, "width = 3\njson = true\n").unwrap();

    let output = kamea_cmd()
        .env("KAMEA_CONFIG", &path)
        .args(["ternary", "5"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["ternary"], "012");
    assert_eq!(json["value"], 5);
}

#[test]
fn missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    kamea_cmd()
        .arg("--config")
        .arg(dir.path().join("missing.toml"))
        .args(["ternary", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config"));
}

#[test]
fn bad_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kamea.toml");
    std::fs::write(&path, "width = \"wide\"\n").unwrap();
    kamea_cmd()
        .arg("--config")
        .arg(&path)
        .args(["ternary", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config"));
}

#[test]
fn region_extreme_coordinate_is_out_of_bounds() {
    kamea_cmd()
        .args(["region", "-2147483648", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of bounds"));
}

#[test]
fn polygon_at_widest_width() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kamea.toml");
    std::fs::write(&path, "width = 40\n").unwrap();

    let output = kamea_cmd()
        .env("KAMEA_CONFIG", &path)
        .args(["--json", "polygon", "9", "--skip", "1", "--random-values", "--seed", "3"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["summary"]["count"], 9);
}
