use crate::common::command::{
    diverged_repository_dir, get_head_commit_sha, read_branch_ref, run_stow_command, stow_dir,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn checkout_branch_successfully(
    diverged_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = diverged_repository_dir.path();

    // the fixture ends on main, where the feature work is absent
    assert_eq!(read_file(&dir.join("1.txt")), "one");
    assert!(!dir.join("feature.txt").exists());

    run_stow_command(dir, &["checkout", "feature"])
        .assert()
        .success()
        .stdout("Switched to branch 'feature'\n");

    assert_eq!(read_file(&dir.join("1.txt")), "one, revised");
    assert_eq!(read_file(&dir.join("feature.txt")), "feature work");
    assert_eq!(read_file(&dir.join("a/b/3.txt")), "three");
    assert_eq!(
        std::fs::read_to_string(stow_dir(dir).join("HEAD"))?.trim(),
        "ref: refs/heads/feature"
    );
    assert_eq!(get_head_commit_sha(dir)?, read_branch_ref(dir, "feature")?);

    // the index mirrors the checked out tree
    let index = std::fs::read_to_string(stow_dir(dir).join("index"))?;
    let paths = index
        .lines()
        .filter_map(|line| line.split_once(' ').map(|(_, path)| path))
        .collect::<Vec<_>>();
    assert_eq!(paths, vec!["1.txt", "a/2.txt", "a/b/3.txt", "feature.txt"]);

    run_stow_command(dir, &["status"])
        .assert()
        .success()
        .stdout("On branch feature\n\nnothing to commit, working tree clean\n");

    Ok(())
}

#[rstest]
fn checkout_keeps_untracked_files_and_prunes_empty_directories(
    diverged_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = diverged_repository_dir.path();

    run_stow_command(dir, &["checkout", "feature"])
        .assert()
        .success();

    // a file tracked only on feature, inside its own directory
    write_file(FileSpec::new(
        dir.join("docs").join("guide.txt"),
        "guide".to_string(),
    ));
    run_stow_command(dir, &["add", "docs"]).assert().success();
    crate::common::command::stow_commit(dir, "Add guide")
        .assert()
        .success();

    write_file(FileSpec::new(dir.join("scratch.txt"), "scratch".to_string()));

    run_stow_command(dir, &["checkout", "main"])
        .assert()
        .success()
        .stdout("Switched to branch 'main'\n");

    assert!(!dir.join("feature.txt").exists());
    assert!(!dir.join("docs").exists());
    assert_eq!(read_file(&dir.join("scratch.txt")), "scratch");
    assert_eq!(read_file(&dir.join("1.txt")), "one");

    Ok(())
}
