use std::fs;
use std::process::Command;

#[test]
#[ignore = "Requires a real audit tool jar on the local classpath"]
fn test_with_real_audit_tool() {
    let binary_path = env!("CARGO_BIN_EXE_license-header-gate");

    let temp_dir = tempfile::tempdir().unwrap();
    let project_path = temp_dir.path().join("gate-project");
    fs::create_dir_all(project_path.join("src/main/java")).unwrap();

    fs::write(
        project_path.join("src/main/java/Example.java"),
        "/*\n * Licensed to the Apache Software Foundation (ASF) under one\n */\nclass Example {}\n",
    )
    .unwrap();

    fs::write(
        project_path.join("license-gate.toml"),
        r#"
source-sets = [["src/main/java"]]

[tool]
command = "java"
classpath = ["/usr/local/lib/audit/rat.jar"]
main-class = "org.apache.rat.Report"
"#,
    )
    .unwrap();

    let output = Command::new(binary_path)
        .args(["check"])
        .current_dir(&project_path)
        .output()
        .expect("Failed to run license-header-gate");

    assert!(output.status.success());
    assert!(project_path
        .join("build/reports/licenseHeaders/rat.log")
        .exists());
}
