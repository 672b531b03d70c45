use crate::common::command::{
    get_head_commit_sha, get_parent_commit_id, init_repository_dir, run_stow_command, stow_commit,
};
use crate::common::file::{FileSpec, write_file};
use crate::common::stdout_of;
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn commit_chains_to_previous_head(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let first = get_head_commit_sha(dir)?;

    write_file(FileSpec::new(dir.join("1.txt"), "uno".to_string()));
    run_stow_command(dir, &["add", "1.txt"]).assert().success();

    let output = stdout_of(
        stow_commit(dir, "Translate one\n\nSpanish this time")
            .assert()
            .success(),
    );
    let second = get_head_commit_sha(dir)?;

    assert_ne!(first, second);
    assert_eq!(
        output,
        format!("[main {}] Translate one\n", &second[..7])
    );
    assert_eq!(get_parent_commit_id(dir, &second)?, Some(first.clone()));
    assert_eq!(get_parent_commit_id(dir, &first)?, None);

    Ok(())
}

#[rstest]
fn later_commit_is_not_marked_as_root(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    // the fixture already committed once, the repeated tree still gets a new commit
    stow_commit(dir, "Again")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[main "))
        .stdout(predicate::str::contains("(root-commit)").not());

    Ok(())
}
