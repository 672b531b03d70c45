use crate::common::command::{init_repository_dir, run_stow_command};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
#[case(".hidden")]
#[case("feature/")]
#[case("bad..name")]
#[case("with space")]
#[case("ends.lock")]
#[case("tilde~1")]
fn create_branch_with_invalid_name(
    init_repository_dir: TempDir,
    #[case] branch_name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    run_stow_command(dir, &["branch", branch_name])
        .assert()
        .success()
        .stdout(format!("fatal: invalid branch name: '{}'\n", branch_name));

    let heads = std::fs::read_dir(dir.join(".stow/refs/heads"))?
        .map(|entry| entry.map(|entry| entry.file_name().to_string_lossy().to_string()))
        .collect::<Result<Vec<_>, _>>()?;
    assert_eq!(heads, vec!["main"]);

    Ok(())
}
