mod common;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

use common::{fixture_path, isolated_home};

const BIN_NAME: &str = "kennel_books_cli";

fn cli() -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("KENNEL_BOOKS_HOME", isolated_home())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

fn stdout_of(args: &[&str]) -> String {
    let output = cli().args(args).output().expect("run cli");
    assert!(output.status.success(), "{:?}", output);
    String::from_utf8(output.stdout).expect("utf8 stdout")
}

#[test]
fn help_lists_commands() {
    cli()
        .arg("help")
        .assert()
        .success()
        .stdout(contains("Usage: kennel_books_cli").and(contains("report")).and(contains("trend")));
}

#[test]
fn no_command_prints_help() {
    cli()
        .assert()
        .success()
        .stdout(contains("Commands:").and(contains("dashboard")));
}

#[test]
fn version_prints_build_metadata() {
    cli()
        .arg("version")
        .assert()
        .success()
        .stdout(contains(format!("Kennel Books {}", env!("CARGO_PKG_VERSION"))))
        .stdout(contains("Build hash"));
}

#[test]
fn monthly_report_prints_table_and_totals() {
    let fixture = fixture_path();
    let text = stdout_of(&["report", fixture.to_str().unwrap(), "2024"]);

    assert!(text.contains("Profit report 2024 (Monthly)"));
    let jan = text.lines().find(|l| l.starts_with("Jan")).expect("Jan row");
    assert!(jan.contains("$100.00") && jan.contains("$72.00"), "{jan}");
    let total = text.lines().find(|l| l.starts_with("Total")).expect("Total row");
    assert!(total.contains("$2,800.00"), "{total}");
    assert!(total.contains("$2,737.00"), "{total}");
    assert!(text.contains("Bills            : $1,200.00"));
    assert!(text.contains("Records          : 6"));
}

#[test]
fn json_report_exposes_derived_profit() {
    let fixture = fixture_path();
    let text = stdout_of(&["--json", "report", fixture.to_str().unwrap(), "2024", "quarter"]);
    let report: serde_json::Value = serde_json::from_str(&text).expect("valid json");

    assert_eq!(report["granularity"], "quarter");
    assert_eq!(report["totals"]["profit"], 2737.0);
    assert_eq!(report["revenue"].as_array().map(Vec::len), Some(4));
    assert_eq!(report["revenue"][0]["value"], 2800.0);
    assert!(report["notice"].is_null());
}

#[test]
fn series_prints_json_points() {
    let fixture = fixture_path();
    let text = stdout_of(&["series", fixture.to_str().unwrap(), "2024", "amount"]);
    let points: Vec<serde_json::Value> = serde_json::from_str(&text).expect("valid json");

    let values: Vec<f64> = points.iter().filter_map(|p| p["value"].as_f64()).collect();
    assert_eq!(values.len(), 12);
    assert_eq!(&values[..4], &[100.0, 200.0, 2500.0, 0.0]);
    assert_eq!(points[0]["label"], "Jan");
}

#[test]
fn trend_handles_zero_prior() {
    cli()
        .args(["trend", "150", "100"])
        .assert()
        .success()
        .stdout(contains("+50.0%"));
    cli()
        .args(["trend", "50", "0"])
        .assert()
        .success()
        .stdout(contains("+100.0%"));
}

#[test]
fn dashboard_compares_periods() {
    let fixture = fixture_path();
    let text = stdout_of(&[
        "dashboard",
        fixture.to_str().unwrap(),
        "--as-of",
        "2024-03-15",
    ]);

    assert!(text.contains("Dashboard as of 15 Mar 2024"));
    assert!(text.contains("Revenue  MoM +1150.0%  YoY +100.0%"), "{text}");
}

#[test]
fn breakdown_orders_by_revenue() {
    let fixture = fixture_path();
    let text = stdout_of(&["breakdown", fixture.to_str().unwrap(), "2024"]);
    let position = |name: &str| text.find(name).unwrap_or_else(|| panic!("{name} missing"));

    assert!(position("Puppies") < position("Etsy"));
    assert!(position("Etsy") < position("eBay"));

    let by_type = stdout_of(&["breakdown", fixture.to_str().unwrap(), "2024", "sale-type"]);
    assert!(by_type.contains("Sales by type 2024"));
    assert!(by_type.find("Fixed") < by_type.find("Auction"));
}

#[test]
fn transport_summarizes_year() {
    let fixture = fixture_path();
    let text = stdout_of(&["transport", fixture.to_str().unwrap(), "2024"]);

    assert!(text.contains("Trips            : 2"));
    assert!(text.contains("Total miles      : 180.5"));
    assert!(text.contains("Total cost       : $57.50"));
    assert!(text.contains("1 trip(s) have no mileage"));
}

#[test]
fn view_marks_admin_as_restricted() {
    cli()
        .args(["view", "admin_domains"])
        .assert()
        .success()
        .stdout(contains("Restricted: yes"));
    cli()
        .args(["view", "nowhere_special"])
        .assert()
        .failure()
        .stderr(contains("unknown dashboard view `nowhere_special`"));
}

#[test]
fn missing_snapshot_reports_notice_not_failure() {
    cli()
        .args(["report", "/definitely/not/here.json", "2024"])
        .assert()
        .success()
        .stdout(contains("Could not load records"));
}

#[test]
fn config_prints_defaults_from_isolated_home() {
    cli()
        .arg("config")
        .assert()
        .success()
        .stdout(contains("config.json").and(contains("\"currency\": \"USD\"")));
}

#[test]
fn unknown_command_fails() {
    cli()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(contains("Error: unrecognized subcommand 'frobnicate'"));
}

#[test]
fn sparse_config_file_still_runs_commands() {
    let home = isolated_home();
    std::fs::write(home.join("config.json"), r#"{"currency": "GBP"}"#).expect("write config");
    Command::cargo_bin(BIN_NAME)
        .expect("binary exists")
        .env("KENNEL_BOOKS_HOME", &home)
        .env("NO_COLOR", "1")
        .args(["--no-color", "trend", "150", "100"])
        .assert()
        .success()
        .stdout(contains("£100.00 -> £150.00"));
}

#[test]
fn transport_without_a_log_fails_loudly() {
    cli()
        .args(["transport", "/definitely/not/here.json", "2024"])
        .assert()
        .failure()
        .stdout(contains("Trips").not())
        .stderr(contains("Data fetch failed"));
}
