mod common;

use std::fs;

use assert_cmd::Command;
use common::{TestWorkspace, sample_catalog};
use predicates::str::contains;
use product_finder::matcher::FilterSpec;

fn product_finder() -> Command {
    Command::cargo_bin("product-finder").expect("binary exists")
}

#[test]
fn domains_lists_options_and_integer_bounds() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("catalog.csv", &sample_catalog(';'));
    product_finder()
        .args([
            "domains",
            "-i",
            path.to_str().unwrap(),
            "--delimiter",
            ";",
        ])
        .assert()
        .success()
        .stdout(contains("Space types: Warehouse, Office, Outdoor"))
        .stdout(contains("Lighting types: LED, HID, Fluorescent"))
        .stdout(contains("Power (W): 18..400"))
        .stdout(contains("Lumen output: 1350..42000"));
}

#[test]
fn domains_reports_no_data_for_header_only_catalog() {
    let workspace = TestWorkspace::new();
    let path = workspace.write(
        "empty.csv",
        "Product Name,Space Type,Lighting Type,ATEX Certified,Power (W),Lumen Output,Image URL,Product Link\n",
    );
    product_finder()
        .args(["domains", "-i", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("Space types: (none)"))
        .stdout(contains("Power (W): no data"));
}

#[test]
fn match_filters_and_exports_csv() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("catalog.csv", &sample_catalog(','));
    let output = workspace.path().join("matched_products.csv");
    product_finder()
        .args([
            "match",
            "-i",
            path.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--space-type",
            "Office",
            "--lighting-type",
            "LED",
            "--power-max",
            "100",
        ])
        .assert()
        .success();

    let exported = fs::read_to_string(&output).expect("read export");
    assert!(exported.lines().next().unwrap().contains("Product Name"));
    assert!(exported.contains("Beam Office Panel"));
    assert!(!exported.contains("Aurora Highbay"));
    assert!(!exported.contains("Dura Tube"));
}

#[test]
fn match_defaults_to_all_observed_categories() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("catalog.csv", &sample_catalog(','));
    let output = workspace.path().join("all.csv");
    product_finder()
        .args([
            "match",
            "-i",
            path.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();

    let exported = fs::read_to_string(&output).expect("read export");
    // Header plus all four catalog rows.
    assert_eq!(exported.lines().count(), 5);
}

#[test]
fn match_atex_flag_drops_uncertified_products() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("catalog.csv", &sample_catalog(','));
    let output = workspace.path().join("atex.csv");
    product_finder()
        .args([
            "match",
            "-i",
            path.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--atex",
        ])
        .assert()
        .success();

    let exported = fs::read_to_string(&output).expect("read export");
    assert!(exported.contains("Aurora Highbay"));
    assert!(exported.contains("Corona Floodlight"));
    assert!(!exported.contains("Beam Office Panel"));
}

#[test]
fn match_accepts_a_json_spec_file() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("catalog.csv", &sample_catalog(','));
    let spec = FilterSpec {
        space_types: ["Warehouse".to_string()].into_iter().collect(),
        lighting_types: ["LED".to_string()].into_iter().collect(),
        atex_required: true,
        power_range: (0.0, 300.0),
        lumen_range: (0.0, 30000.0),
    };
    let spec_path = workspace.write(
        "spec.json",
        &serde_json::to_string(&spec).expect("serialize spec"),
    );
    let output = workspace.path().join("from_spec.csv");
    product_finder()
        .args([
            "match",
            "-i",
            path.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--spec",
            spec_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    let exported = fs::read_to_string(&output).expect("read export");
    assert!(exported.contains("Aurora Highbay"));
    assert_eq!(exported.lines().count(), 2);
}

#[test]
fn match_skips_rows_with_malformed_numerics() {
    let workspace = TestWorkspace::new();
    let path = workspace.write(
        "catalog.csv",
        "Product Name,Space Type,Lighting Type,ATEX Certified,Power (W),Lumen Output,Image URL,Product Link\n\
         Good,Office,LED,No,40,3600,u,v\n\
         Broken,Office,LED,No,N/A,3600,u,v\n",
    );
    let output = workspace.path().join("clean.csv");
    product_finder()
        .args([
            "match",
            "-i",
            path.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();

    let exported = fs::read_to_string(&output).expect("read export");
    assert!(exported.contains("Good"));
    assert!(!exported.contains("Broken"));
}

#[test]
fn missing_catalog_file_is_a_load_error() {
    product_finder()
        .args(["domains", "-i", "does-not-exist.csv"])
        .assert()
        .failure()
        .stderr(contains("error"));
}
