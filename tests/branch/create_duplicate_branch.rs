use crate::common::command::{init_repository_dir, read_branch_ref, run_stow_command, stow_commit};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn create_duplicate_branch(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    let branch_name = "feature-branch";

    // create the branch first time - should succeed
    run_stow_command(dir, &["branch", branch_name])
        .assert()
        .success();
    let original = read_branch_ref(dir, branch_name)?;

    // move main forward so a recreated branch would point elsewhere
    write_file(FileSpec::new(dir.join("1.txt"), "changed".to_string()));
    run_stow_command(dir, &["add", "1.txt"]).assert().success();
    stow_commit(dir, "Second").assert().success();

    run_stow_command(dir, &["branch", branch_name])
        .assert()
        .success()
        .stdout(format!("Branch '{}' already exists\n", branch_name));

    assert_eq!(read_branch_ref(dir, branch_name)?, original);

    Ok(())
}
