use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Print the raw bytes of a stored object
    pub fn cat_file(&mut self, object_id: &str) -> anyhow::Result<()> {
        self.check_initialized()?;

        let object_id = ObjectId::try_parse(object_id.to_string())?;
        let object_data = self.database().load(&object_id)?;

        self.writer().write_all(&object_data)?;

        Ok(())
    }
}
