use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

const MAP: &str = "\
Main Street
2
34.0000000 -118.0000000 34.0000000 -117.9990000
34.0000000 -117.9990000 34.0000000 -117.9980000

Island Road
1
35.0000000 -117.0000000 35.0000000 -117.0010000
";

const DELIVERIES: &str = "\
34.0000000 -118.0000000
34.0000000 -117.9990000:Tacos
34.0000000 -117.9980000:Soup
";

struct Fixture {
    _dir: TempDir,
    map: PathBuf,
    deliveries: PathBuf,
}

impl Fixture {
    fn new(deliveries: &str) -> Self {
        let dir = tempdir().expect("create temp dir");
        let map = dir.path().join("streets.txt");
        let list = dir.path().join("deliveries.txt");
        fs::write(&map, MAP).expect("write map");
        fs::write(&list, deliveries).expect("write deliveries");
        Self {
            _dir: dir,
            map,
            deliveries: list,
        }
    }
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("courier");
    cmd.env("RUST_LOG", "error").env_remove("COURIER_MAP");
    cmd
}

fn plan_command(fixture: &Fixture) -> Command {
    let mut cmd = cli();
    cmd.arg("--map")
        .arg(&fixture.map)
        .arg("plan")
        .arg("--deliveries")
        .arg(&fixture.deliveries)
        .arg("--seed")
        .arg("1")
        .arg("--epochs")
        .arg("0");
    cmd
}

#[test]
fn plan_prints_turn_by_turn_text() {
    let fixture = Fixture::new(DELIVERIES);
    let output = plan_command(&fixture).assert().success().get_output().stdout.clone();
    let text = String::from_utf8(output).expect("utf8 stdout");
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        lines,
        vec![
            "Starting at the depot...",
            "Proceed east on Main Street for 0.06 miles",
            "Deliver Tacos",
            "Proceed east on Main Street for 0.06 miles",
            "Deliver Soup",
            "Proceed west on Main Street for 0.11 miles",
            "You are back at the depot and your deliveries are done!",
            "0.23 miles travelled for all deliveries.",
        ]
    );
}

#[test]
fn plan_json_is_a_plan_summary() {
    let fixture = Fixture::new(DELIVERIES);
    let output = plan_command(&fixture)
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("valid json");
    assert_eq!(json["depot"]["longitude"], "-118.0000000");
    assert_eq!(json["deliveries"][0]["item"], "Tacos");
    assert_eq!(json["commands"].as_array().map(Vec::len), Some(5));
    assert_eq!(json["commands"][1]["command"], "deliver");
    assert!(json["total_miles"].as_f64().unwrap() > 0.2);
}

#[test]
fn map_path_falls_back_to_environment() {
    let fixture = Fixture::new(DELIVERIES);
    cli()
        .env("COURIER_MAP", &fixture.map)
        .arg("plan")
        .arg("--deliveries")
        .arg(&fixture.deliveries)
        .arg("--seed")
        .arg("3")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deliver Tacos"))
        .stdout(predicate::str::contains("Deliver Soup"));
}

#[test]
fn missing_map_is_reported() {
    let fixture = Fixture::new(DELIVERIES);
    cli()
        .arg("plan")
        .arg("--deliveries")
        .arg(&fixture.deliveries)
        .assert()
        .failure()
        .stderr(predicate::str::contains("COURIER_MAP"));
}

#[test]
fn unreachable_delivery_fails_without_partial_output() {
    let fixture = Fixture::new(
        "34.0000000 -118.0000000\n34.0000000 -117.9990000:Tacos\n35.0000000 -117.0000000:Rescue kit\n",
    );
    plan_command(&fixture)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no route found"));
}

#[test]
fn unknown_delivery_location_is_reported() {
    let fixture = Fixture::new("34.0000000 -118.0000000\n12.0000000 12.0000000:Nothing\n");
    plan_command(&fixture)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not present in the street map"));
}

#[test]
fn malformed_delivery_list_is_reported() {
    let fixture = Fixture::new("34.0000000 -118.0000000\n34.0000000 -117.9990000 Tacos\n");
    plan_command(&fixture)
        .assert()
        .failure()
        .stderr(predicate::str::contains("delivery list"));
}

#[test]
fn route_lists_segments() {
    let fixture = Fixture::new(DELIVERIES);
    cli()
        .arg("--map")
        .arg(&fixture.map)
        .arg("route")
        .arg("--from")
        .arg("34.0000000 -118.0000000")
        .arg("--to")
        .arg("34.0000000 -117.9980000")
        .assert()
        .success()
        .stdout(predicate::str::contains("(2 segments; algorithm: a-star)"))
        .stdout(predicate::str::contains("Main Street"))
        .stdout(predicate::str::contains("Total distance: 0.11 miles"));
}

#[test]
fn route_supports_dijkstra() {
    let fixture = Fixture::new(DELIVERIES);
    cli()
        .arg("--map")
        .arg(&fixture.map)
        .arg("route")
        .arg("--from")
        .arg("34.0000000,-117.9980000")
        .arg("--to")
        .arg("34.0000000,-118.0000000")
        .arg("--algorithm")
        .arg("dijkstra")
        .assert()
        .success()
        .stdout(predicate::str::contains("algorithm: dijkstra"));
}

#[test]
fn route_to_island_fails() {
    let fixture = Fixture::new(DELIVERIES);
    cli()
        .arg("--map")
        .arg(&fixture.map)
        .arg("route")
        .arg("--from")
        .arg("34.0000000 -118.0000000")
        .arg("--to")
        .arg("35.0000000 -117.0000000")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no route found"));
}
