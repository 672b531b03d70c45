use crate::common::command::{repository_dir, run_stow_command, stow_dir};
use crate::common::file::write_generated_files;
use assert_fs::TempDir;
use rstest::rstest;
use stow::artifacts::objects::object_id::ObjectId;

#[rstest]
#[case(1)]
#[case(5)]
#[case(12)]
fn add_generated_files_to_index(
    repository_dir: TempDir,
    #[case] files_count: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_stow_command(dir, &["init"]).assert().success();

    let files = write_generated_files(dir, files_count);

    run_stow_command(dir, &["add", "."]).assert().success();

    let index = std::fs::read_to_string(stow_dir(dir).join("index"))?;
    let lines = index.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), files_count);

    let mut sorted = lines.clone();
    sorted.sort_by_key(|line| line.split_once(' ').map(|(_, path)| path.to_string()));
    assert_eq!(lines, sorted);

    for file in files {
        let name = file.path.file_name().unwrap().to_string_lossy().to_string();
        let oid = ObjectId::hash(file.content.as_bytes());
        assert!(lines.contains(&format!("{} {}", oid, name).as_str()));
    }

    Ok(())
}
