//! End-to-end smoke tests for the giftbook binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn giftbook(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("giftbook").unwrap();
    cmd.env("GIFTBOOK_DATA_DIR", data_dir.path());
    cmd
}

#[test]
fn test_event_create_and_list() {
    let data_dir = TempDir::new().unwrap();

    giftbook(&data_dir)
        .args(["event", "create", "张家婚宴"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created event '张家婚宴'"));

    giftbook(&data_dir)
        .args(["event", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("张家婚宴"));
}

#[test]
fn test_gift_add_and_list_passwordless() {
    let data_dir = TempDir::new().unwrap();

    giftbook(&data_dir)
        .args(["event", "create", "张家婚宴"])
        .assert()
        .success();

    giftbook(&data_dir)
        .args(["gift", "add", "张家婚宴", "张三", "888"])
        .assert()
        .success()
        .stdout(predicate::str::contains("捌佰捌拾捌元整"));

    giftbook(&data_dir)
        .args(["gift", "list", "张家婚宴"])
        .assert()
        .success()
        .stdout(predicate::str::contains("张三"))
        .stdout(predicate::str::contains("1 gift(s)"));
}

#[test]
fn test_workbook_import_is_idempotent_under_skip() {
    let data_dir = TempDir::new().unwrap();
    let workbook_dir = TempDir::new().unwrap();

    std::fs::write(
        workbook_dir.path().join("礼金明细.csv"),
        "姓名,金额,支付方式,备注,时间\n张三,888,现金,,2025-01-15 10:00:00\n李四,1688,微信,congrats,2025-01-15 10:05:00\n",
    )
    .unwrap();

    giftbook(&data_dir)
        .args(["event", "create", "张家婚宴"])
        .assert()
        .success();

    giftbook(&data_dir)
        .args(["import", "workbook"])
        .arg(workbook_dir.path())
        .args(["--event", "张家婚宴"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 gift record(s)"));

    giftbook(&data_dir)
        .args(["import", "workbook"])
        .arg(workbook_dir.path())
        .args(["--event", "张家婚宴"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 0 gift record(s)"))
        .stdout(predicate::str::contains("2 duplicate(s)"));
}

#[test]
fn test_export_backup_roundtrip() {
    let data_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();

    giftbook(&data_dir)
        .args(["event", "create", "张家婚宴"])
        .assert()
        .success();
    giftbook(&data_dir)
        .args(["gift", "add", "张家婚宴", "张三", "888"])
        .assert()
        .success();

    giftbook(&data_dir)
        .args(["export", "backup", "--out"])
        .arg(out_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported backup to"));

    let backup = std::fs::read_dir(out_dir.path())
        .unwrap()
        .next()
        .unwrap()
        .unwrap()
        .path();

    // Importing a ledger's own backup merges nothing new.
    giftbook(&data_dir)
        .args(["import", "backup"])
        .arg(&backup)
        .assert()
        .success()
        .stdout(predicate::str::contains("Merged 0 event(s)"));
}

#[test]
fn test_import_without_target_fails() {
    let data_dir = TempDir::new().unwrap();
    let workbook_dir = TempDir::new().unwrap();

    std::fs::write(
        workbook_dir.path().join("礼金明细.csv"),
        "姓名,金额\n张三,888\n",
    )
    .unwrap();

    giftbook(&data_dir)
        .args(["import", "workbook"])
        .arg(workbook_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("target event"));
}

#[test]
fn test_config_shows_paths() {
    let data_dir = TempDir::new().unwrap();

    giftbook(&data_dir)
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Data directory"));
}
