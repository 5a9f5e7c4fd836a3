use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/ames_campus.tsv")
        .canonicalize()
        .expect("fixture map present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("citymap");
    cmd.env("RUST_LOG", "error");
    cmd
}

fn campus() -> Command {
    let mut cmd = cli();
    cmd.arg("-f").arg(fixture_path());
    cmd
}

fn temp_map(contents: &str) -> NamedTempFile {
    let file = NamedTempFile::new().expect("create temp file");
    std::fs::write(file.path(), contents).expect("write temp map");
    file
}

#[test]
fn location_prints_coordinates() {
    campus()
        .args(["-location", "Campanile"])
        .assert()
        .success()
        .stdout("42.0254 -93.6468\n");
}

#[test]
fn unknown_location_reports_on_stderr_and_succeeds() {
    campus()
        .args(["-location", "Atlantis"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error: Location 'Atlantis' not found"));
}

#[test]
fn misspelled_location_gets_a_suggestion() {
    campus()
        .args(["-location", "Campanil"])
        .assert()
        .success()
        .stderr(predicate::str::contains("did you mean 'Campanile'?"));
}

#[test]
fn diameter_prints_furthest_pair() {
    campus()
        .arg("-diameter")
        .assert()
        .success()
        .stdout("42.0110 -93.6378 42.0254 -93.6468 1765.40\n");
}

#[test]
fn distance_is_straight_line() {
    campus()
        .args(["-distance", "Memorial Union", "Campanile"])
        .assert()
        .success()
        .stdout("186.126\n");
}

#[test]
fn distance_with_unknown_name_reports_pair_error() {
    campus()
        .args(["-distance", "Memorial Union", "Atlantis"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Error: One or both locations not found",
        ));
}

#[test]
fn roaddist_follows_directed_roads() {
    campus()
        .args(["-roaddist", "Memorial Union", "Reiman Gardens"])
        .assert()
        .success()
        .stdout("1200.000\n");
}

#[test]
fn roaddist_ignores_duplicate_road() {
    campus()
        .args(["-roaddist", "Memorial Union", "Jack Trice Stadium"])
        .assert()
        .success()
        .stdout("1500.000\n");
}

#[test]
fn roaddist_against_one_way_roads_has_no_path() {
    campus()
        .args(["-roaddist", "Reiman Gardens", "Memorial Union"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Error: No path found between locations",
        ));
}

#[test]
fn queries_run_in_argument_order() {
    campus()
        .args([
            "-roaddist",
            "Campanile",
            "Reiman Gardens",
            "-location",
            "Memorial Union",
            "-location",
            "Atlantis",
            "-distance",
            "Memorial Union",
            "Campanile",
        ])
        .assert()
        .success()
        .stdout("1400.000\n42.0239 -93.6458\n186.126\n")
        .stderr(predicate::str::contains("Atlantis"));
}

#[test]
fn file_flag_may_follow_queries() {
    cli()
        .args(["-location", "Campanile", "-f"])
        .arg(fixture_path())
        .assert()
        .success()
        .stdout("42.0254 -93.6468\n");
}

#[test]
fn double_dash_flags_are_accepted() {
    cli()
        .arg("--file")
        .arg(fixture_path())
        .args(["--roaddist", "Campanile", "Memorial Union"])
        .assert()
        .success()
        .stdout("200.000\n");
}

#[test]
fn json_format_prints_one_object_per_query() {
    let output = campus()
        .args(["--format", "json", "-location", "Campanile", "-roaddist"])
        .args(["Memorial Union", "Reiman Gardens"])
        .output()
        .expect("run citymap");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    let values: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("valid json line"))
        .collect();
    assert_eq!(values.len(), 2);
    assert_eq!(values[0]["query"], "location");
    assert_eq!(values[0]["coordinate"]["latitude"], 42.0254);
    assert_eq!(values[1]["query"], "road_distance");
    assert_eq!(values[1]["meters"], 1200.0);
    assert_eq!(values[1]["route"]["nodes"], serde_json::json!([1, 10, 3]));
}

#[test]
fn print_graph_lists_nodes_and_roads() {
    campus()
        .arg("-print-graph")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Node 1: Memorial Union (42.0239, -93.6458)",
        ))
        .stdout(predicate::str::contains("  -> Node 10 (weight: 300.0, Union Drive)"))
        .stdout(predicate::str::contains("Node 20: intersection (42.0300, -93.6500)"))
        .stdout(predicate::str::contains("Shortcut Alley").not());
}

#[test]
fn invalid_file_fails_with_line_number() {
    let map = temp_map("2\n1\tA\t42.0\t-93.0\n2\tB\t95.0\t-93.0\n1\n1\t2\t10\t0\t0\tRoad\n");
    cli()
        .arg("-f")
        .arg(map.path())
        .args(["-location", "A"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid file format at line 3"));
}

#[test]
fn missing_file_fails() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let missing = dir.path().join("absent.tsv");
    cli()
        .arg("-f")
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot open file"));
}

#[test]
fn file_flag_is_required() {
    cli().args(["-location", "Campanile"]).assert().failure();
}

#[test]
fn repeated_diameter_keeps_argument_order() {
    campus()
        .args(["-diameter", "-location", "Campanile", "-diameter"])
        .assert()
        .success()
        .stdout(concat!(
            "42.0110 -93.6378 42.0254 -93.6468 1765.40\n",
            "42.0254 -93.6468\n",
            "42.0110 -93.6378 42.0254 -93.6468 1765.40\n",
        ));
}

#[test]
fn print_graph_may_repeat() {
    let output = campus()
        .args(["-print-graph", "-location", "Campanile", "-print-graph"])
        .output()
        .expect("run citymap");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    assert_eq!(stdout.matches("Node 1: Memorial Union").count(), 2);
    let location = stdout.find("42.0254 -93.6468\n").expect("location printed");
    let second_dump = stdout.rfind("Node 1: Memorial Union").expect("second dump");
    assert!(location < second_dump);
}

#[test]
fn trailing_location_without_name_is_reported() {
    campus()
        .args(["-location", "Campanile", "-location"])
        .assert()
        .success()
        .stdout("42.0254 -93.6468\n")
        .stderr(predicate::str::contains(
            "Error: -location requires a location name",
        ));
}

#[test]
fn distance_with_one_name_is_reported() {
    campus()
        .args(["-diameter", "-distance", "Campanile"])
        .assert()
        .success()
        .stdout("42.0110 -93.6378 42.0254 -93.6468 1765.40\n")
        .stderr(predicate::str::contains(
            "Error: -distance requires two location names",
        ));
}

#[test]
fn roaddist_uses_single_precision_road_lengths() {
    let map = temp_map("2\n1\tA\t0\t0\n2\tB\t0\t1\n1\n1\t2\t1234567.891\t0\t0\tLong Road\n");
    cli()
        .arg("-f")
        .arg(map.path())
        .args(["-roaddist", "A", "B"])
        .assert()
        .success()
        .stdout("1234567.875\n");
}

#[test]
fn diameter_of_coincident_pois_prints_nothing() {
    let map = temp_map("2\n1\tHere\t5\t5\n2\tThere\t5\t5\n1\n1\t2\t1\t5\t5\tRoad\n");
    cli()
        .arg("-f")
        .arg(map.path())
        .arg("-diameter")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
