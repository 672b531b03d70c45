use crate::areas::repository::Repository;
use crate::artifacts::index::fits_entry_line;
use crate::artifacts::objects::blob::Blob;

impl Repository {
    pub async fn add(&mut self, paths: &[String]) -> anyhow::Result<()> {
        self.check_initialized()?;

        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        for path in paths {
            let relative_path = self.relative_path(path)?;

            if !self.workspace().exists(&relative_path) {
                writeln!(self.writer(), "File not found: {}", path)?;
                continue;
            }

            // Expand directories into the files below them
            for file_path in self.workspace().list_files(Some(&relative_path))? {
                if !fits_entry_line(&file_path) {
                    writeln!(
                        self.writer(),
                        "Unsupported path (contains a line break): {:?}",
                        file_path
                    )?;
                    continue;
                }

                let data = self.workspace().read_file(&file_path)?;
                let blob_id = self.database().store(&Blob::new(data))?;

                writeln!(
                    self.writer(),
                    "add '{}' ({})",
                    file_path,
                    blob_id.to_short_oid()
                )?;
                index.add(file_path, blob_id);
            }
        }

        index.write_updates()?;

        Ok(())
    }
}
