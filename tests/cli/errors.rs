use anyhow::Result;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("--help").output()?;
    assert!(output.status.success());

    let help = stdout(&output);
    assert!(help.contains("<TEMPLATES_DIR>"));
    assert!(help.contains("--show-all-keys"));
    assert!(help.contains("--search-tool"));

    Ok(())
}

#[test]
fn test_missing_values_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("chart/templates/configmap.yaml", "{{ .Values.foo }}\n")?;

    let output = test.analyze_command(&[]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("values file not found"));
    assert_eq!(stdout(&output), "");

    Ok(())
}

#[test]
fn test_missing_templates_dir() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("chart/values.yaml", "foo: 1\n")?;

    let output = test.analyze_command(&[]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("templates directory does not exist"));

    Ok(())
}

#[test]
fn test_templates_path_is_a_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("chart/values.yaml", "foo: 1\n")?;
    test.write_file("chart/templates", "not a directory")?;

    let output = test.analyze_command(&[]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("not a directory"));

    Ok(())
}

#[test]
fn test_malformed_values() -> Result<()> {
    let test = CliTest::with_values("foo: [1, 2\n")?;

    let output = test.analyze_command(&["--json"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("failed to parse"));
    assert_eq!(stdout(&output), "");

    Ok(())
}

#[test]
fn test_non_mapping_values_root() -> Result<()> {
    let test = CliTest::with_values("- a\n- b\n")?;

    let output = test.analyze_command(&[]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("failed to parse"));

    Ok(())
}

#[test]
fn test_no_fallback_requires_external() -> Result<()> {
    let test = CliTest::with_values("foo: 1\n")?;

    let output = test.analyze_command(&["--no-fallback"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("--no-fallback requires --search-tool external"));

    Ok(())
}

#[test]
fn test_external_without_rg_on_path() -> Result<()> {
    let test = CliTest::with_values("foo: 1\n")?;
    test.write_file("chart/templates/configmap.yaml", "{{ .Values.foo }}\n")?;

    // The test command runs with an empty environment, so PATH has no `rg`.
    let mut cmd = test.command();
    cmd.args([
        "--search-tool",
        "external",
        "--no-fallback",
        "chart/templates",
    ]);
    let output = cmd.output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("missing dependency"));

    let mut cmd = test.command();
    cmd.args(["--search-tool", "external", "--json", "chart/templates"]);
    let output = cmd.output()?;
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["summary"]["direct_keys"], 1);

    Ok(())
}

#[test]
fn test_invalid_flag_value() -> Result<()> {
    let test = CliTest::with_values("foo: 1\n")?;

    let output = test
        .command()
        .args(["--search-tool", "grep", "chart/templates"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));

    Ok(())
}
