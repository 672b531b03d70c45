use crate::common::command::{get_head_commit_sha, init_repository_dir, read_branch_ref, run_stow_command};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn create_branch_with_hierarchical_name(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    run_stow_command(dir, &["branch", "feature/login"])
        .assert()
        .success();

    assert!(dir.join(".stow/refs/heads/feature").is_dir());
    assert_eq!(read_branch_ref(dir, "feature/login")?, get_head_commit_sha(dir)?);

    run_stow_command(dir, &["branch"])
        .assert()
        .success()
        .stdout("  feature/login\n* main\n");

    Ok(())
}
