use crate::common::command::{repository_dir, run_stow_command};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn create_branch_without_commits(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_stow_command(dir, &["init"]).assert().success();

    run_stow_command(dir, &["branch", "feature"])
        .assert()
        .success()
        .stdout("Cannot create branch: no commits yet\n");

    assert!(!dir.join(".stow/refs/heads/feature").exists());

    // the unborn current branch is still listed
    run_stow_command(dir, &["branch"])
        .assert()
        .success()
        .stdout("* main\n");

    Ok(())
}
