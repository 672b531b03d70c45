use crate::common::command::{init_repository_dir, run_stow_command};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn list_branches(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    for branch_name in ["zeta", "alpha", "main-backup"] {
        run_stow_command(dir, &["branch", branch_name])
            .assert()
            .success();
    }

    run_stow_command(dir, &["branch"])
        .assert()
        .success()
        .stdout("  alpha\n* main\n  main-backup\n  zeta\n");

    run_stow_command(dir, &["checkout", "zeta"])
        .assert()
        .success();

    run_stow_command(dir, &["branch"])
        .assert()
        .success()
        .stdout("  alpha\n  main\n  main-backup\n* zeta\n");

    Ok(())
}
