use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn write_script(name: &str, body: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("stockyard-{}-{name}.json", std::process::id()));
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn overflow_allocation_is_reported_per_warehouse() {
    let script = write_script(
        "overflow",
        r#"{ "steps": [
            { "op": "create_warehouse", "name": "Main", "capacity_total": 100 },
            { "op": "allocate", "requests": [
                { "product_id": 1, "quantity": 150, "preferred_warehouse_id": 1 } ] },
            { "op": "stock_by_warehouse", "product_id": 1 }
        ] }"#,
    );

    Command::cargo_bin("stockyard")
        .unwrap()
        .args(["run", script.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""quantity_placed":100"#))
        .stdout(predicate::str::contains(r#""warehouse_created":true"#))
        .stdout(predicate::str::contains(r#"{"warehouse_id":2,"quantity":50}"#));
}

#[test]
fn failed_steps_set_a_non_zero_exit_code() {
    let script = write_script(
        "unknown-product",
        r#"{ "steps": [ { "op": "balance", "product_id": 999 } ] }"#,
    );

    Command::cargo_bin("stockyard")
        .unwrap()
        .args(["run", script.to_str().unwrap()])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(r#""error":"product_not_found""#));
}

#[test]
fn non_positive_default_capacity_is_rejected() {
    Command::cargo_bin("stockyard")
        .unwrap()
        .args(["config", "--default-capacity", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be positive"));
}
