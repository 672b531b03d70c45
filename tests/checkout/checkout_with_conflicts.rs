use crate::common::command::{diverged_repository_dir, run_stow_command, stow_dir};
use crate::common::file::{FileSpec, read_file, write_file};
use crate::common::stdout_of;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn checkout_with_uncommitted_changes_is_aborted(
    diverged_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = diverged_repository_dir.path();

    write_file(FileSpec::new(dir.join("1.txt"), "local edit".to_string()));

    let output = stdout_of(run_stow_command(dir, &["checkout", "feature"]).assert().success());

    let expected_output = "error: You have uncommitted changes to the following files:
\t1.txt
Commit or stash them before you switch branches.

Aborting
";
    assert_eq!(output, expected_output);

    // nothing moved
    assert_eq!(read_file(&dir.join("1.txt")), "local edit");
    assert!(!dir.join("feature.txt").exists());
    assert_eq!(
        std::fs::read_to_string(stow_dir(dir).join("HEAD"))?.trim(),
        "ref: refs/heads/main"
    );

    Ok(())
}

#[rstest]
fn checkout_over_untracked_file_is_aborted(
    diverged_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = diverged_repository_dir.path();

    write_file(FileSpec::new(
        dir.join("feature.txt"),
        "my own notes".to_string(),
    ));

    let output = stdout_of(run_stow_command(dir, &["checkout", "feature"]).assert().success());

    let expected_output =
        "error: The following untracked working tree files would be overwritten by checkout:
\tfeature.txt
Please move or remove them before you switch branches.

Aborting
";
    assert_eq!(output, expected_output);

    assert_eq!(read_file(&dir.join("feature.txt")), "my own notes");
    assert_eq!(read_file(&dir.join("1.txt")), "one");

    Ok(())
}

#[rstest]
fn checkout_over_identical_untracked_file_succeeds(
    diverged_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = diverged_repository_dir.path();

    // same bytes as the target version, nothing would be lost
    write_file(FileSpec::new(
        dir.join("feature.txt"),
        "feature work".to_string(),
    ));

    run_stow_command(dir, &["checkout", "feature"])
        .assert()
        .success()
        .stdout("Switched to branch 'feature'\n");

    Ok(())
}
