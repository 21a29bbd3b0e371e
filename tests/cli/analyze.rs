use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, classification, stderr, stdout};

#[test]
fn test_direct_hit() -> Result<()> {
    let test = CliTest::with_values("foo: 1\n")?;
    test.write_template("configmap.yaml", "value: {{ .Values.foo }}\n")?;

    let report = test.analyze_json()?;

    assert_eq!(classification(&report, "foo").as_deref(), Some("direct"));
    let locations = report["directly_used_keys"][0]["locations"]
        .as_array()
        .cloned()
        .unwrap_or_default();
    assert_eq!(locations.len(), 1);
    assert!(
        locations[0]
            .as_str()
            .is_some_and(|l| l.ends_with("configmap.yaml:1"))
    );

    Ok(())
}

#[test]
fn test_toyaml_pattern() -> Result<()> {
    let test = CliTest::with_values("toYamlTest:\n  x: 1\n")?;
    test.write_template(
        "deployment.yaml",
        "spec:\n  {{ toYaml .Values.toYamlTest | nindent 4 }}\n",
    )?;

    let report = test.analyze_json()?;

    assert_eq!(
        classification(&report, "toYamlTest").as_deref(),
        Some("toyaml toYamlTest")
    );
    assert_eq!(
        classification(&report, "toYamlTest.x").as_deref(),
        Some("toyaml toYamlTest")
    );

    Ok(())
}

#[test]
fn test_security_context_requires_gate() -> Result<()> {
    let test = CliTest::with_values(
        "test:\n  containerSecurityContext:\n    runAsUser: 1001\nfoo:\n  bar: 1\n",
    )?;
    test.write_template(
        "deployment.yaml",
        r#"{{- include "helpers.securityContext" (dict "context" .Values.test.containerSecurityContext) }}"#,
    )?;

    let report = test.analyze_json()?;

    assert_eq!(
        classification(&report, "test.containerSecurityContext").as_deref(),
        Some("security_context test.containerSecurityContext")
    );
    assert_eq!(
        classification(&report, "foo.bar").as_deref(),
        Some("unused")
    );

    Ok(())
}

#[test]
fn test_truncation_after_rewrite() -> Result<()> {
    let test = CliTest::with_values(
        "identityKeycloak:\n  containerSecurityContext:\n    capabilities:\n      drop:\n        - ALL\n",
    )?;
    test.write_template(
        "identity/deployment.yaml",
        r#"{{- include "common.compatibility.renderSecurityContext" (dict "secContext" $.Values.identity.containerSecurityContext "context" $) | nindent 12 }}"#,
    )?;

    let report = test.analyze_json()?;

    assert_eq!(
        classification(
            &report,
            "identityKeycloak.containerSecurityContext.capabilities.drop.0"
        )
        .as_deref(),
        Some("security_context identity.containerSecurityContext")
    );

    Ok(())
}

#[test]
fn test_image_by_params_gate() -> Result<()> {
    let test = CliTest::with_values("tasklist:\n  image:\n    repository: camunda/tasklist\n")?;
    test.write_template(
        "tasklist/deployment.yaml",
        r#"image: {{ include "camundaPlatform.imageByParams" (dict "base" .Values.global "overlay" .Values.tasklist.image) }}"#,
    )?;

    let report = test.analyze_json()?;

    assert_eq!(
        classification(&report, "tasklist.image").as_deref(),
        Some("imageByParams tasklist.image")
    );
    assert_eq!(
        classification(&report, "tasklist.image.repository").as_deref(),
        Some("imageByParams tasklist.image")
    );
    // Never consumed by the image helper, so only the plain accessor counts.
    assert_eq!(classification(&report, "tasklist").as_deref(), Some("direct"));

    Ok(())
}

#[test]
fn test_unused_key_in_default_json() -> Result<()> {
    let test = CliTest::with_values("foo: 1\norphan: true\n")?;
    test.write_template("configmap.yaml", "value: {{ .Values.foo }}\n")?;

    let output = test.analyze_command(&["--json"]).output()?;
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["unused_keys"], json!(["orphan"]));
    assert!(report.get("directly_used_keys").is_none());
    assert_eq!(
        report["summary"],
        json!({
            "total_keys": 2,
            "used_keys": 1,
            "unused_keys": 1,
            "direct_keys": 1,
            "pattern_keys": 0
        })
    );
    assert!(report["timestamp"].as_str().is_some_and(|t| t.ends_with('Z')));

    // JSON mode implies quiet.
    assert_eq!(stderr(&output), "");

    Ok(())
}

#[test]
fn test_summary_is_consistent() -> Result<()> {
    let test = CliTest::with_values(
        "foo: 1\ntoYamlTest:\n  x: 1\norphan: true\nnested:\n  a: 1\n  b: [1, 2]\n",
    )?;
    test.write_template(
        "deployment.yaml",
        "a: {{ .Values.foo }}\nb: {{ toYaml .Values.toYamlTest | nindent 4 }}\nc: {{ .Values.nested.a }}\n",
    )?;

    let report = test.analyze_json()?;
    let summary = &report["summary"];
    let total = summary["total_keys"].as_u64().unwrap_or_default();
    let used = summary["used_keys"].as_u64().unwrap_or_default();
    let unused = summary["unused_keys"].as_u64().unwrap_or_default();

    assert_eq!(total, 9);
    assert_eq!(total, used + unused);
    assert_eq!(
        used,
        summary["direct_keys"].as_u64().unwrap_or_default()
            + summary["pattern_keys"].as_u64().unwrap_or_default()
    );
    assert_eq!(
        report["unused_completely_keys"],
        json!(["orphan", "nested.b", "nested.b.0", "nested.b.1"])
    );

    Ok(())
}

#[test]
fn test_human_report() -> Result<()> {
    let test = CliTest::with_values("foo: 1\norphan: true\n")?;
    test.write_template("configmap.yaml", "value: {{ .Values.foo }}\n")?;

    let output = test.analyze_command(&["--quiet"]).output()?;
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Completely unused keys (1):\n  .Values.orphan\n\nSummary: 2 keys, 1 used (1 direct, 0 via patterns), 1 unused\n"
    );
    assert_eq!(stderr(&output), "");

    Ok(())
}

#[test]
fn test_banner_goes_to_stderr() -> Result<()> {
    let test = CliTest::with_values("foo: 1\n")?;
    test.write_template("configmap.yaml", "value: {{ .Values.foo }}\n")?;

    let output = test.analyze_command(&[]).output()?;
    assert!(output.status.success());

    let stderr = stderr(&output);
    assert!(stderr.contains("[search] using builtin scanner"));
    assert!(stderr.contains("[analyze] 1 keys from"));
    assert!(stdout(&output).contains("No unused keys found"));

    Ok(())
}

#[test]
fn test_exit_code_on_unused_keys() -> Result<()> {
    let test = CliTest::with_values("foo: 1\norphan: true\n")?;
    test.write_template("configmap.yaml", "value: {{ .Values.foo }}\n")?;

    let output = test.analyze_command(&["--quiet", "--exit-code", "3"]).output()?;
    assert_eq!(output.status.code(), Some(3));

    let output = test.analyze_command(&["--quiet"]).output()?;
    assert_eq!(output.status.code(), Some(0));

    Ok(())
}

#[test]
fn test_exit_code_when_everything_is_used() -> Result<()> {
    let test = CliTest::with_values("foo: 1\n")?;
    test.write_template("configmap.yaml", "value: {{ .Values.foo }}\n")?;

    let output = test.analyze_command(&["--quiet", "--exit-code", "3"]).output()?;
    assert_eq!(output.status.code(), Some(0));

    Ok(())
}

#[test]
fn test_filter() -> Result<()> {
    let test = CliTest::with_values("image:\n  tag: 1\nfoo: 1\norphan: true\n")?;
    test.write_template("configmap.yaml", "value: {{ .Values.foo }}\n")?;

    let output = test
        .analyze_command(&["--json", "--filter", "image"])
        .output()?;
    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;

    assert_eq!(report["summary"]["total_keys"], 2);
    assert_eq!(report["unused_keys"], json!(["image", "image.tag"]));

    Ok(())
}

#[test]
fn test_templates_in_nested_directories() -> Result<()> {
    let test = CliTest::with_values("operate:\n  env: []\n")?;
    test.write_template("operate/deep/deployment.yaml", "{{- with .Values.operate.env }}\n")?;
    assert!(test.root().join("chart/templates/operate/deep").is_dir());

    let report = test.analyze_json()?;
    assert_eq!(
        classification(&report, "operate.env").as_deref(),
        Some("with_context operate.env")
    );

    Ok(())
}
