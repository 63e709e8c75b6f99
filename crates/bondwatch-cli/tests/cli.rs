//! End-to-end tests of the `bondwatch` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn bondwatch() -> Command {
    let mut cmd = Command::cargo_bin("bondwatch").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("BONDWATCH_CONFIG");
    cmd
}

const PAR_BOOK: &str = "\
bond_id,sector,credit_rating,face_value,coupon_rate,years_to_maturity,ytm
GOV-3Y,Government,AAA,4000000,0.04,3,0.04
FIN-4Y,Financial,A,3000000,0.05,4,0.05
TECH-5Y,Technology,AA,3000000,0.045,5,0.045
";

// =============================================================================
// MONITOR
// =============================================================================

#[test]
fn test_monitor_sample_book_reports_breaches() {
    bondwatch()
        .args(["monitor", "--as-of", "2025-03-31", "--format", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BREACH(ES) REQUIRE ATTENTION"));
}

#[test]
fn test_monitor_fail_on_breach_sets_exit_code() {
    bondwatch()
        .args(["monitor", "--as-of", "2025-03-31", "--fail-on-breach", "-f", "minimal"])
        .assert()
        .code(2);
}

#[test]
fn test_monitor_table_output() {
    bondwatch()
        .args(["monitor", "--as-of", "2025-03-31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Portfolio Value"))
        .stdout(predicate::str::contains("Sector Concentration [Government]"))
        .stdout(predicate::str::contains("UST-10Y"))
        .stdout(predicate::str::contains("Risk by Sector"))
        .stdout(predicate::str::contains("Risk by Rating"))
        .stdout(predicate::str::contains("Avg Mod Dur"));
}

#[test]
fn test_monitor_json_output() {
    let output = bondwatch()
        .args(["monitor", "--as-of", "2025-03-31", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["valuation_date"], "2025-03-31");
    assert_eq!(value["report"]["summary"]["total"], 17);
    assert_eq!(value["snapshot"]["holdings"].as_array().unwrap().len(), 5);

    // UST-2Y and UST-10Y
    let government = &value["sector_risk"]["Government"];
    assert_eq!(government["count"], 2);
    assert_eq!(
        government["weight_pct"],
        value["snapshot"]["sector_allocation"]["Government"]
    );

    let total_dv01 = value["snapshot"]["total_dv01"].as_f64().unwrap();
    let bucket_dv01: f64 = value["rating_risk"]
        .as_object()
        .unwrap()
        .values()
        .map(|b| b["dv01"].as_f64().unwrap())
        .sum();
    assert!((bucket_dv01 - total_dv01).abs() < 1e-6);
}

#[test]
fn test_monitor_clear_book_from_files() {
    let dir = TempDir::new().unwrap();
    let book = dir.path().join("book.csv");
    fs::write(&book, PAR_BOOK).unwrap();

    let limits = dir.path().join("limits.toml");
    fs::write(&limits, "max_position_weight = 45.0\nmax_sector_concentration = 45.0\n").unwrap();

    bondwatch()
        .arg("monitor")
        .arg("--positions")
        .arg(&book)
        .arg("--limits")
        .arg(&limits)
        .args(["--fail-on-breach", "-f", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ALL CLEAR"));
}

#[test]
fn test_monitor_csv_lists_every_verdict() {
    let dir = TempDir::new().unwrap();
    let book = dir.path().join("book.csv");
    fs::write(&book, PAR_BOOK).unwrap();
    let rules = dir.path().join("rules.json");
    fs::write(
        &rules,
        r#"[
  {"id": "GOV-CAP", "metric": "sector:Government:% of MV", "comparator": {"at_most": 30}},
  {"id": "YIELD", "metric": "portfolio:ytm", "comparator": {"at_least": 0.03}}
]"#,
    )
    .unwrap();

    let output = bondwatch()
        .arg("monitor")
        .arg("-p")
        .arg(&book)
        .arg("-r")
        .arg(&rules)
        .args(["-f", "csv"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("rule_id,label,metric"));
    assert!(lines[1].starts_with("GOV-CAP,"));
    assert!(lines[1].contains("BREACH"));
    assert!(lines[2].contains("PASS"));
}

#[test]
fn test_monitor_missing_positions_file() {
    bondwatch()
        .args(["monitor", "--positions", "does-not-exist.csv"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("loading positions"));
}

#[test]
fn test_monitor_unknown_rule_target_is_error() {
    let dir = TempDir::new().unwrap();
    let rules = dir.path().join("rules.toml");
    fs::write(
        &rules,
        "[[rules]]\nid = \"GHOST\"\nmetric = \"position:GHOST-1Y:weight\"\ncomparator = { at_most = 35 }\n",
    )
    .unwrap();

    bondwatch()
        .args(["monitor", "--as-of", "2025-03-31", "-r"])
        .arg(&rules)
        .assert()
        .failure()
        .stderr(predicate::str::contains("GHOST-1Y"));
}

#[test]
fn test_monitor_bad_date() {
    bondwatch()
        .args(["monitor", "--as-of", "31/03/2025"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

// =============================================================================
// PRICE
// =============================================================================

#[test]
fn test_price_par_bond() {
    bondwatch()
        .args(["price", "--coupon", "5", "--years", "2", "-f", "minimal"])
        .assert()
        .success()
        .stdout("100.00\n");
}

#[test]
fn test_price_table_shows_schedule() {
    bondwatch()
        .args([
            "price", "--coupon", "4", "--years", "1.5", "--ytm", "4.5", "--frequency", "2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Modified Duration"))
        .stdout(predicate::str::contains("Coupon+Principal"));
}

#[test]
fn test_price_reports_rate_shock() {
    bondwatch()
        .args(["price", "--coupon", "5", "--years", "2", "--shock-bp", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Price Change (+50bp)"))
        .stdout(predicate::str::contains("Price Change (-50bp)"));

    let output = bondwatch()
        .args(["price", "--coupon", "5", "--years", "2", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let shock = &value["rate_shock"];
    assert_eq!(shock["basis_points"], 100);

    // -ModDur × PV × 1%, with ModDur = 1.95238 / 1.05 for a 2y 5% par bond
    let up = shock["up"].as_f64().unwrap();
    assert!((up + 1.859410).abs() < 1e-5, "up = {up}");
    assert_eq!(shock["down"].as_f64().unwrap(), -up);
}

#[test]
fn test_price_rejects_invalid_terms() {
    bondwatch()
        .args(["price", "--coupon", "5", "--years", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation failed"));

    bondwatch()
        .args(["price", "--coupon", "5", "--years", "2", "--sector", "Crypto"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Crypto"));
}

// =============================================================================
// RULES
// =============================================================================

#[test]
fn test_rules_count_for_sample_book() {
    bondwatch()
        .args(["rules", "--as-of", "2025-03-31", "-f", "minimal"])
        .assert()
        .success()
        .stdout("17\n");
}

#[test]
fn test_rules_table() {
    bondwatch()
        .args(["rules", "--as-of", "2025-03-31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("QUALITY-AA"))
        .stdout(predicate::str::contains("rating_at_or_above:AA:% of MV"));
}

#[test]
fn test_rules_from_config_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("book.csv"), PAR_BOOK).unwrap();
    let config = dir.path().join("monitor.toml");
    fs::write(
        &config,
        "valuation_date = \"2025-03-31\"\npositions = \"book.csv\"\n\n[limits]\nmin_ytm = 0.02\n",
    )
    .unwrap();

    // 1 duration + 3 weight + 3 sector + 1 quality + 3 DV01 + 1 yield
    bondwatch()
        .arg("rules")
        .arg("--config")
        .arg(&config)
        .args(["-f", "minimal"])
        .assert()
        .success()
        .stdout("12\n");
}

#[test]
fn test_flag_paths_override_config_relative_to_working_dir() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("book.csv"), PAR_BOOK).unwrap();
    fs::create_dir(dir.path().join("cfg")).unwrap();
    let config = dir.path().join("cfg").join("monitor.toml");
    fs::write(
        &config,
        "valuation_date = \"2025-03-31\"\npositions = \"missing.csv\"\nrules = \"missing.json\"\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("rules.toml"),
        "[[rules]]\nid = \"YIELD\"\nmetric = \"portfolio:ytm\"\ncomparator = { at_least = 0.03 }\n",
    )
    .unwrap();

    // The config's own paths do not exist next to it
    bondwatch()
        .current_dir(dir.path())
        .args(["rules", "-c", "cfg/monitor.toml", "-f", "minimal"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.csv"));

    bondwatch()
        .current_dir(dir.path())
        .args(["rules", "-c", "cfg/monitor.toml", "-p", "book.csv", "-r", "rules.toml"])
        .args(["-f", "minimal"])
        .assert()
        .success()
        .stdout("1\n");
}
