use super::helpers::TestProject;

#[cfg(unix)]
const CLEAN_REPORT: &str = "*****\nsummary\n*****\ndetail\n*****\n0 Unknown Licenses\n";

#[cfg(unix)]
const FAILING_REPORT: &str = "*****\nsummary\n*****\nUnapproved licenses:\n  src/Foo.java\n*****\n2 Unknown Licenses\n";

#[cfg(unix)]
#[test]
fn test_check_passes_with_clean_report() {
    let test_env = TestProject::new();
    test_env.configure_fake_tool(CLEAN_REPORT);

    let output = test_env.run_gate(&["check"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("no unknown or unapproved licenses"));

    // Report stays on disk for human inspection
    let report_path = test_env.path().join("build/reports/licenseHeaders/rat.log");
    assert!(report_path.exists());
}

#[cfg(unix)]
#[test]
fn test_check_fails_and_echoes_unapproved_section() {
    let test_env = TestProject::new();
    test_env.configure_fake_tool(FAILING_REPORT);

    let output = test_env.run_gate(&["check"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unapproved licenses:"));
    assert!(stderr.contains("src/Foo.java"));
    assert!(stderr.contains("rat.log"));
}

#[cfg(unix)]
#[test]
fn test_check_exit_zero_downgrades_violations() {
    let test_env = TestProject::new();
    test_env.configure_fake_tool(FAILING_REPORT);

    let output = test_env.run_gate(&["check", "--exit-zero"]);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("rat.log"));
}

#[cfg(unix)]
#[test]
fn test_check_json_output() {
    let test_env = TestProject::new();
    test_env.configure_fake_tool(CLEAN_REPORT);

    let output = test_env.run_gate(&["check", "--format", "json"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("scanned_directories"));
    assert!(stdout.contains("rat.log"));
}

#[cfg(unix)]
#[test]
fn test_rerun_overwrites_previous_report() {
    let test_env = TestProject::new();
    test_env.configure_fake_tool(CLEAN_REPORT);

    let first = test_env.run_gate(&["check"]);
    assert!(first.status.success());

    let second = test_env.run_gate(&["check"]);
    assert!(second.status.success());

    let report = std::fs::read_to_string(
        test_env.path().join("build/reports/licenseHeaders/rat.log"),
    )
    .unwrap();
    assert_eq!(report, CLEAN_REPORT);
}

#[test]
fn test_check_without_tool_configuration_fails() {
    let test_env = TestProject::new();
    test_env.create_dirs(&["src"]);
    test_env.write_config("source-sets = [[\"src\"]]\n");

    let output = test_env.run_gate(&["check"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No audit tool configured"));
}

#[test]
fn test_init_then_validate() {
    let test_env = TestProject::new();

    let init_output = test_env.run_gate(&["init"]);
    assert!(init_output.status.success());
    assert!(test_env.path().join("license-gate.toml").exists());

    let validate_output = test_env.run_gate(&["config", "--validate"]);
    assert!(validate_output.status.success());
    assert!(String::from_utf8_lossy(&validate_output.stdout).contains("Configuration is valid"));
}

#[test]
fn test_config_show_emits_json() {
    let test_env = TestProject::new();

    let init_output = test_env.run_gate(&["init"]);
    assert!(init_output.status.success());

    let show_output = test_env.run_gate(&["config", "--show"]);
    assert!(show_output.status.success());
    let stdout = String::from_utf8_lossy(&show_output.stdout);
    assert!(stdout.contains("\"output-root\""));
}

#[test]
fn test_rules_table_and_json() {
    let test_env = TestProject::new();

    let table_output = test_env.run_gate(&["rules"]);
    assert!(table_output.status.success());
    let table = String::from_utf8_lossy(&table_output.stdout);
    assert!(table.contains("Modified BSD License"));
    assert!(table.contains("BSD4"));

    let json_output = test_env.run_gate(&["rules", "--format", "json"]);
    assert!(json_output.status.success());
    let json = String::from_utf8_lossy(&json_output.stdout);
    assert!(json.contains("\"approved\""));
    assert!(json.contains("All advertising materials"));
}
