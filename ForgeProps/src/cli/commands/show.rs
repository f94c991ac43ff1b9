//! CLI command for resolving selected objects

use std::path::Path;

use crate::database::{PropertyDatabase, to_json_string};

pub fn execute(dir: &Path, ids: &[usize], config: Option<&Path>) -> anyhow::Result<()> {
    let settings = super::load_settings(config)?;
    let db = PropertyDatabase::open_with(dir, &settings)?;

    let objects = db.resolve_ids(ids)?;
    if objects.len() < ids.len() {
        let found: Vec<usize> = objects.iter().map(|o| o.object_id).collect();
        for id in ids.iter().filter(|id| !found.contains(*id)) {
            eprintln!("Object {id} not found or has no name");
        }
    }

    println!("{}", to_json_string(&objects, &settings.export)?);
    Ok(())
}
