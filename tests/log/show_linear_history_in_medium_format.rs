use crate::common::command::{
    AUTHOR_NAME, get_head_commit_sha, get_parent_commit_id, repository_dir, run_stow_command,
    stow_commit,
};
use crate::common::file::{FileSpec, write_file};
use crate::common::stdout_of;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

#[fixture]
fn repository_with_multiple_commits(repository_dir: TempDir) -> TempDir {
    let dir = repository_dir.path();
    run_stow_command(dir, &["init"]).assert().success();

    for (position, message) in ["First commit", "Second commit\n\nWith a body", "Third commit"]
        .iter()
        .enumerate()
    {
        write_file(FileSpec::new(
            dir.join(format!("file{}.txt", position + 1)),
            format!("content {}", position + 1),
        ));
        run_stow_command(dir, &["add", "."]).assert().success();
        stow_commit(dir, message).assert().success();
    }

    repository_dir
}

#[rstest]
fn show_linear_history_in_medium_format(
    repository_with_multiple_commits: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_with_multiple_commits.path();

    let third = get_head_commit_sha(dir)?;
    let second = get_parent_commit_id(dir, &third)?.expect("third commit has a parent");
    let first = get_parent_commit_id(dir, &second)?.expect("second commit has a parent");

    let output = stdout_of(run_stow_command(dir, &["log"]).assert().success());

    let date = "Sun Jan 1 12:00:00 2023 +0000";
    let expected_output = format!(
        "commit {third}
Author: {AUTHOR_NAME}
Date:   {date}

    Third commit

commit {second}
Author: {AUTHOR_NAME}
Date:   {date}

    Second commit
    \n    With a body

commit {first}
Author: {AUTHOR_NAME}
Date:   {date}

    First commit
"
    );
    assert_eq!(output, expected_output);

    Ok(())
}
