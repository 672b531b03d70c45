use crate::common::file::{FileSpec, write_file};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const AUTHOR_NAME: &str = "fake_user";
pub const AUTHOR_DATE: &str = "2023-01-01 12:00:00 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository with one commit on main holding `1.txt`, `a/2.txt` and `a/b/3.txt`
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_stow_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let file1 = FileSpec::new(repository_dir.path().join("1.txt"), "one".to_string());
    write_file(file1);

    let file2 = FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    );
    write_file(file2);

    let file3 = FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    );
    write_file(file3);

    run_stow_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    stow_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

/// A repository with a `feature` branch one commit ahead of `main`
///
/// `feature` changes `1.txt` to "one, revised" and adds `feature.txt`.
/// HEAD is left on `main`.
#[fixture]
pub fn diverged_repository_dir(init_repository_dir: TempDir) -> TempDir {
    let dir = init_repository_dir.path();

    run_stow_command(dir, &["branch", "feature"])
        .assert()
        .success();
    run_stow_command(dir, &["checkout", "feature"])
        .assert()
        .success();

    write_file(FileSpec::new(dir.join("1.txt"), "one, revised".to_string()));
    write_file(FileSpec::new(
        dir.join("feature.txt"),
        "feature work".to_string(),
    ));
    run_stow_command(dir, &["add", "1.txt", "feature.txt"])
        .assert()
        .success();
    stow_commit(dir, "Feature commit").assert().success();

    run_stow_command(dir, &["checkout", "main"])
        .assert()
        .success();

    init_repository_dir
}

pub fn run_stow_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("stow").expect("Failed to find stow binary");
    cmd.envs(vec![("NO_PAGER", "1"), ("NO_COLOR", "1")]);
    cmd.env_remove("STOW_AUTHOR_NAME");
    cmd.env_remove("STOW_AUTHOR_DATE");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn stow_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_stow_command(dir, &["commit", "-m", message]);
    cmd.envs(vec![
        ("STOW_AUTHOR_NAME", AUTHOR_NAME),
        ("STOW_AUTHOR_DATE", AUTHOR_DATE), // %Y-%m-%d %H:%M:%S %z
    ]);
    cmd
}

pub fn stow_dir(dir: &Path) -> std::path::PathBuf {
    dir.join(".stow")
}

/// Resolve HEAD to a commit id, following the branch it names
pub fn get_head_commit_sha(dir: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let head_content = std::fs::read_to_string(stow_dir(dir).join("HEAD"))?;

    if let Some(ref_path) = head_content.strip_prefix("ref: ") {
        let commit_sha = std::fs::read_to_string(stow_dir(dir).join(ref_path.trim()))?;
        Ok(commit_sha.trim().to_string())
    } else {
        Ok(head_content.trim().to_string())
    }
}

pub fn read_branch_ref(dir: &Path, branch: &str) -> Result<String, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(stow_dir(dir).join("refs").join("heads").join(branch))?;
    Ok(content.trim().to_string())
}

/// Print a stored object through `cat-file`
pub fn cat_object(dir: &Path, oid: &str) -> Result<String, Box<dyn std::error::Error>> {
    let output = run_stow_command(dir, &["cat-file", oid]).output()?;
    Ok(String::from_utf8(output.stdout)?)
}

pub fn get_parent_commit_id(
    dir: &Path,
    commit_id: &str,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let content = cat_object(dir, commit_id)?;

    Ok(content
        .lines()
        .take_while(|line| !line.is_empty())
        .find_map(|line| line.strip_prefix("parent "))
        .map(|oid| oid.to_string()))
}
