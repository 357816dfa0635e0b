//! Integration tests for the CLI surface and the exit-status gate.

use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use clap::Parser;

use trimgate_cli::{gate, run, Cli};
use trimgate_core::{ArtifactStash, BuildContext, Mode};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).expect("args must parse")
}

#[test]
fn check_subcommand_maps_to_dry_run() {
    let cli = parse(&["trimgate", "check"]);
    assert_eq!(cli.command.mode(), Mode::DryRun);
}

#[test]
fn apply_subcommand_maps_to_apply() {
    let cli = parse(&["trimgate", "apply"]);
    assert_eq!(cli.command.mode(), Mode::Apply);
}

#[test]
fn job_args_assemble_a_complete_context() {
    let cli = parse(&[
        "trimgate",
        "check",
        "--source-root",
        "/tmp/project",
        "--artifacts-dir",
        "/tmp/artifacts",
        "--artifacts-fingerprint",
        "deps-3f9a2c",
        "--build-flag",
        "--offline",
    ]);

    let context = cli.command.job_args().load_context().expect("context");
    assert_eq!(context.source_root, Path::new("/tmp/project"));
    assert_eq!(context.build_flags, vec!["--offline".to_owned()]);
    let stash = context.artifacts.as_ref().expect("artifacts attached");
    assert_eq!(stash.root, Path::new("/tmp/artifacts"));
    assert_eq!(stash.fingerprint.as_deref(), Some("deps-3f9a2c"));
    assert!(context.validate().is_ok());
}

#[test]
fn context_without_artifacts_dir_fails_validation() {
    let cli = parse(&["trimgate", "check", "--source-root", "/tmp/project"]);
    let context = cli.command.job_args().load_context().expect("context");
    assert!(
        context.validate().is_err(),
        "no --artifacts-dir means no artifact reference"
    );
}

#[test]
fn context_file_overrides_flag_assembly() {
    let dir = tempfile::tempdir().expect("tempdir");
    let context = BuildContext::new(dir.path().join("project"))
        .with_artifacts(ArtifactStash::new(dir.path().join("artifacts")));
    let file = dir.path().join("context.json");
    std::fs::write(
        &file,
        serde_json::to_vec(&context).expect("serialize context"),
    )
    .expect("write context file");

    let file_arg = file.display().to_string();
    let cli = parse(&["trimgate", "apply", "--context-file", &file_arg]);
    let loaded = cli.command.job_args().load_context().expect("context loads");

    assert_eq!(loaded.session_id, context.session_id);
    assert_eq!(loaded.source_root, context.source_root);
    assert!(loaded.validate().is_ok());
}

#[test]
fn missing_context_file_is_an_error() {
    let cli = parse(&["trimgate", "check", "--context-file", "/nonexistent/ctx.json"]);
    assert!(cli.command.job_args().load_context().is_err());
}

#[test]
fn tool_spec_defaults_to_cargo_diet() {
    let cli = parse(&["trimgate", "check"]);
    let tool = cli.command.job_args().tool_spec();
    assert_eq!(tool.program, "cargo");
    assert_eq!(tool.base_args, vec!["diet".to_owned()]);
}

#[test]
fn tool_bin_overrides_the_program() {
    let cli = parse(&["trimgate", "check", "--tool-bin", "/opt/trim/bin/diet"]);
    let tool = cli.command.job_args().tool_spec();
    assert_eq!(tool.program, "/opt/trim/bin/diet");
    assert!(tool.base_args.is_empty());
}

const STUB_TOOL: &str = r#"#!/bin/sh
mode=apply
for arg in "$@"; do
  if [ "$arg" = "--dry-run" ]; then mode=check; fi
done
if grep -q "unused-dep" Cargo.toml; then
  if [ "$mode" = "check" ]; then
    echo "removable: unused-dep"
    exit 1
  fi
  grep -v "unused-dep" Cargo.toml > Cargo.toml.trim
  mv Cargo.toml.trim Cargo.toml
fi
exit 0
"#;

fn stub_project(manifest: &str) -> (tempfile::TempDir, Vec<String>) {
    let dir = tempfile::tempdir().expect("tempdir");
    let project = dir.path().join("project");
    std::fs::create_dir(&project).expect("create project");
    std::fs::write(project.join("Cargo.toml"), manifest).expect("write manifest");

    let stub = dir.path().join("trim-stub.sh");
    std::fs::write(&stub, STUB_TOOL).expect("write stub");
    let mut perms = std::fs::metadata(&stub).expect("stat stub").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&stub, perms).expect("chmod stub");

    let flags = vec![
        "--source-root".to_owned(),
        project.display().to_string(),
        "--artifacts-dir".to_owned(),
        dir.path().join("artifacts").display().to_string(),
        "--tool-bin".to_owned(),
        stub.display().to_string(),
    ];
    (dir, flags)
}

fn cli_with(subcommand: &str, flags: &[String]) -> Cli {
    let mut args = vec!["trimgate".to_owned(), subcommand.to_owned()];
    args.extend(flags.iter().cloned());
    Cli::try_parse_from(args).expect("args must parse")
}

#[tokio::test]
async fn run_check_propagates_the_tool_exit_code() {
    let (_dir, flags) = stub_project("[dependencies]\nunused-dep = \"0.1\"\n");
    let code = run(cli_with("check", &flags)).await;
    assert_eq!(code, 1, "superfluous entry must fail the gate");
}

#[tokio::test]
async fn run_apply_then_check_is_clean() {
    let (_dir, flags) = stub_project("[dependencies]\nunused-dep = \"0.1\"\n");
    assert_eq!(run(cli_with("apply", &flags)).await, 0, "apply must succeed");
    assert_eq!(
        run(cli_with("check", &flags)).await,
        0,
        "check after apply must be clean"
    );
}

#[tokio::test]
async fn run_without_artifacts_exits_with_the_fault_code() {
    let (_dir, flags) = stub_project("[dependencies]\n");
    // Drop the artifacts reference: keep source root and tool only.
    let mut trimmed = flags[0..2].to_vec();
    trimmed.extend_from_slice(&flags[4..6]);

    let code = run(cli_with("check", &trimmed)).await;
    assert_eq!(code, gate::FAULT_EXIT_CODE);
}
