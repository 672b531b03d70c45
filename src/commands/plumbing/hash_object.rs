use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;

impl Repository {
    pub fn hash_object(&mut self, object_path: &str, write: bool) -> anyhow::Result<()> {
        // read object file
        let relative_path = self.relative_path(object_path)?;
        let object = self.workspace().parse_blob(&relative_path)?;

        // hash
        let object_id = object.object_id()?;

        writeln!(self.writer(), "{}", object_id)?;

        if !write {
            return Ok(());
        }

        self.check_initialized()?;
        self.database().store(&object)?;

        Ok(())
    }
}
