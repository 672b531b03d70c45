use crate::common::command::{init_repository_dir, repository_dir, run_stow_command};
use crate::common::stdout_of;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn print_clean_tree_when_no_files_are_changed(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = stdout_of(
        run_stow_command(init_repository_dir.path(), &["status"])
            .assert()
            .success(),
    );

    assert_eq!(
        output,
        "On branch main\n\nnothing to commit, working tree clean\n"
    );

    Ok(())
}

#[rstest]
fn print_clean_tree_in_an_empty_repository(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_stow_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let output = stdout_of(
        run_stow_command(repository_dir.path(), &["status"])
            .assert()
            .success(),
    );

    assert_eq!(
        output,
        "On branch main\n\nnothing to commit, working tree clean\n"
    );

    Ok(())
}
