use assert_cmd::Command;
use predicates::str::contains as str_contains;
use tempfile::{NamedTempFile, tempdir};

#[allow(deprecated)]
fn run_cli(script: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("cli").expect("cli binary");
    cmd.write_stdin(script.to_string()).assert()
}

const DRAINAGE_SCRIPT: &str =
    "enable 1\nskip 1 1\ndates 1 2 2025-01 2025-03\nteam 1 2 2\ngenerate\n";

#[test]
fn cli_lists_project_types() {
    run_cli("types\nquit\n")
        .success()
        .stdout(str_contains("tunnel (隧道工程)"))
        .stdout(str_contains("二衬工程"));
}

#[test]
fn cli_reports_nothing_to_generate() {
    run_cli("generate\nquit\n")
        .success()
        .stdout(str_contains("no enabled module to generate"));
}

#[test]
fn cli_reports_validation_errors_per_module() {
    run_cli("enable 2\ndates 2 1 2025-05 2025-01\ndates 2 墩柱施工阶段 2025-09 2025-03\ngenerate\nquit\n")
        .success()
        .stdout(str_contains("Validation failed:"))
        .stdout(str_contains("start month 2025-05 is after end month 2025-01"))
        .stdout(str_contains("墩柱施工阶段: start month 2025-09"));
}

#[test]
fn cli_generates_plan_for_configured_phase() {
    run_cli(&format!("{DRAINAGE_SCRIPT}quit\n"))
        .success()
        .stdout(str_contains("Generated plan covering 3 months (2025年1月 - 2025年3月)"))
        .stdout(str_contains("电工"));
}

#[test]
fn cli_export_failure_keeps_plan_for_retry() {
    let dir = tempdir().expect("create temp dir");
    let bad = dir.path().join("missing").join("plan.csv");
    let good = dir.path().join("plan.csv");
    let script = format!(
        "{DRAINAGE_SCRIPT}export csv {}\nexport csv {}\nquit\n",
        bad.display(),
        good.display()
    );
    run_cli(&script)
        .success()
        .stdout(str_contains("Export error:"))
        .stdout(str_contains("Plan exported to"));
    let text = std::fs::read_to_string(&good).expect("exported csv");
    assert!(text.starts_with("年份,2025,2025,2025"));
    assert!(text.contains("电工,4,6,10"));
}

#[test]
fn cli_save_and_load_round_trip() {
    let tmp = NamedTempFile::new().expect("create temp file");
    let path = tmp.path().to_string_lossy().replace('\\', "\\\\");
    let script = format!(
        "add bridge 3号桥\nsave {path}\nadd tunnel 临时隧道\nload {path}\nshow\nquit\n"
    );
    let assert = run_cli(&script).success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("Configuration loaded from"));
    let after_reload = output
        .split("Configuration loaded from")
        .last()
        .unwrap_or_default();
    assert!(after_reload.contains("3号桥"));
    assert!(
        !after_reload.contains("临时隧道"),
        "project added after save should be gone:\n{after_reload}"
    );
}

#[test]
fn cli_manual_mode_requires_switch() {
    run_cli("set 1 1 普工 12\nmode 1 1 constant\nset 1 1 普工 12\nset 1 1 出渣工 5\nquit\n")
        .success()
        .stdout(str_contains("switch to constant or normal mode first"))
        .stdout(str_contains("mode constant"))
        .stdout(str_contains("普工 enabled (12)"))
        .stdout(str_contains("出渣工 is not used by 路基工程"));
}

#[test]
fn cli_rejects_factor_outside_range() {
    run_cli("factor 6\nfactor 0.05\nfactor 1.2\nshow\nquit\n")
        .success()
        .stdout(str_contains("Invalid factor (must be between 0.1 and 5)"))
        .stdout(str_contains("Conversion factor set to 1.2."))
        .stdout(str_contains("(conversion factor 1.2)"));
}
