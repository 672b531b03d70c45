use crate::common::command::{get_head_commit_sha, init_repository_dir, read_branch_ref, run_stow_command};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("feature")]
#[case("bugfix-123")]
#[case("release_1.0")]
#[case("v2")]
fn create_branch_with_valid_name(
    init_repository_dir: TempDir,
    #[case] branch_name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    run_stow_command(dir, &["branch", branch_name])
        .assert()
        .success()
        .stdout(format!("Created branch '{}'\n", branch_name));

    // the new branch points at the current commit, HEAD stays where it was
    assert_eq!(read_branch_ref(dir, branch_name)?, get_head_commit_sha(dir)?);
    assert_eq!(
        std::fs::read_to_string(dir.join(".stow").join("HEAD"))?.trim(),
        "ref: refs/heads/main"
    );

    Ok(())
}
