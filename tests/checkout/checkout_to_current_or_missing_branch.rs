use crate::common::command::{init_repository_dir, run_stow_command, stow_dir};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn checkout_to_current_branch_is_a_no_op(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    run_stow_command(dir, &["checkout", "main"])
        .assert()
        .success()
        .stdout("Already on 'main'\n");

    Ok(())
}

#[rstest]
#[case("nowhere")]
#[case("bad..name")]
fn checkout_to_missing_branch_is_reported(
    init_repository_dir: TempDir,
    #[case] branch_name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let index_before = std::fs::read_to_string(stow_dir(dir).join("index"))?;

    run_stow_command(dir, &["checkout", branch_name])
        .assert()
        .success()
        .stdout(format!("Branch '{}' does not exist\n", branch_name));

    assert_eq!(
        std::fs::read_to_string(stow_dir(dir).join("HEAD"))?.trim(),
        "ref: refs/heads/main"
    );
    assert_eq!(
        std::fs::read_to_string(stow_dir(dir).join("index"))?,
        index_before
    );

    Ok(())
}
