//! End-to-end CLI tests.
//!
//! Runs the foxhole binary against an isolated secrets tree with a scrubbed
//! PATH, so the resolver always takes the plaintext fallback and no sops
//! binary is required.

mod support;

use support::*;

#[test]
fn test_export_prints_env_lines() {
    let t = Test::with_plaintext("dev", VALID_DOC);

    let output = t.cmd().arg("export").output().unwrap();

    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("APP_ENVIRONMENT=dev\n"));
    assert!(out.contains("APP_SECRET_KEY=sk-123\n"));
    assert!(out.contains("DATABASE_PASSWORD=hunter2\n"));
    assert!(!out.contains("DATABASE_PORT"), "numeric leaves are skipped");
}

#[test]
fn test_export_json() {
    let t = Test::with_plaintext("dev", VALID_DOC);

    let output = t.cmd().args(["export", "--json"]).output().unwrap();

    assert_success(&output);
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed["AWS_REGION"], "us-east-1");
    assert_eq!(parsed["DATABASE_PASSWORD"], "hunter2");
}

#[test]
fn test_export_to_file() {
    let t = Test::with_plaintext("dev", VALID_DOC);

    let output = t
        .cmd()
        .args(["export", "--output", "ci.env"])
        .output()
        .unwrap();

    assert_success(&output);
    let written = std::fs::read_to_string(t.dir.path().join("ci.env")).unwrap();
    assert!(written.contains("AWS_ACCOUNT_ID=123456789012\n"));
}

#[cfg(unix)]
#[test]
fn test_export_file_has_secure_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let t = Test::with_plaintext("dev", VALID_DOC);
    assert_success(&t.cmd().args(["export", "--output", "ci.env"]).output().unwrap());

    let mode = std::fs::metadata(t.dir.path().join("ci.env"))
        .unwrap()
        .permissions()
        .mode()
        & 0o777;
    assert_eq!(mode, 0o600);
}

#[test]
fn test_get_prints_secret() {
    let t = Test::with_plaintext("dev", VALID_DOC);

    let output = t.cmd().args(["get", "database.password"]).output().unwrap();

    assert_success(&output);
    assert_eq!(stdout(&output), "hunter2\n");
}

#[test]
fn test_get_non_string_path_fails() {
    let t = Test::with_plaintext("dev", VALID_DOC);

    let output = t.cmd().args(["get", "database"]).output().unwrap();

    assert_failure(&output);
    assert_stderr_contains(&output, "Secret not found or not a string: database");
}

#[test]
fn test_check_reports_valid_document() {
    let t = Test::with_plaintext("dev", VALID_DOC);

    let output = t.cmd().arg("check").output().unwrap();

    assert_success(&output);
    assert_stdout_contains(&output, "secrets for environment dev are valid");
}

#[test]
fn test_check_reports_missing_required_secret() {
    let t = Test::with_plaintext("dev", INCOMPLETE_DOC);

    let output = t.cmd().arg("check").output().unwrap();

    assert_failure(&output);
    assert_stderr_contains(&output, "Required secret missing: app.secret_key");
}

#[test]
fn test_missing_document_is_reported() {
    let t = Test::new();

    let output = t.cmd().arg("check").output().unwrap();

    assert_failure(&output);
    assert_stderr_contains(&output, "Failed to load secrets for environment dev");
}

#[test]
fn test_environment_flag_selects_tree() {
    let t = Test::with_plaintext("staging", VALID_DOC.replace("environment: dev", "environment: staging").as_str());

    let output = t
        .cmd()
        .args(["-e", "staging", "get", "app.environment"])
        .output()
        .unwrap();

    assert_success(&output);
    assert_eq!(stdout(&output), "staging\n");
}

#[test]
fn test_deploy_env_variable_selects_environment() {
    let t = Test::with_plaintext("qa", VALID_DOC.replace("environment: dev", "environment: qa").as_str());

    let output = t
        .cmd()
        .env("DEPLOY_ENV", "qa")
        .args(["get", "app.environment"])
        .output()
        .unwrap();

    assert_success(&output);
    assert_eq!(stdout(&output), "qa\n");
}

#[test]
fn test_encrypt_requires_sops() {
    let t = Test::with_plaintext("dev", VALID_DOC);

    let output = t.cmd().arg("encrypt").output().unwrap();

    assert_failure(&output);
    assert_stderr_contains(&output, "sops is not installed or not on PATH");
    assert_stderr_contains(&output, "install sops");
}
