use crate::common::command::{repository_dir, run_stow_command, stow_dir};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn adding_a_non_existent_file_is_reported(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_stow_command(dir, &["init"]).assert().success();

    write_file(FileSpec::new(dir.join("real.txt"), "real".to_string()));

    run_stow_command(dir, &["add", "ghost.txt", "real.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("File not found: ghost.txt"))
        .stdout(predicate::str::contains("add 'real.txt'"));

    // the missing path is skipped, the rest still lands in the index
    let index = std::fs::read_to_string(stow_dir(dir).join("index"))?;
    assert_eq!(index.lines().count(), 1);
    assert!(index.ends_with(" real.txt\n"));

    Ok(())
}
