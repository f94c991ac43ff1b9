//! CLI command for printing database statistics

use std::collections::BTreeSet;
use std::path::Path;

use crate::database::PropertyDatabase;

pub fn execute(dir: &Path, config: Option<&Path>) -> anyhow::Result<()> {
    let settings = super::load_settings(config)?;
    let db = PropertyDatabase::open_with(dir, &settings)?;
    let stats = db.stats();

    println!("Database: {}", db.source_path().display());
    let categories: BTreeSet<&str> =
        db.attributes().iter().map(|attr| attr.category.as_str()).collect();

    println!("  Attributes:   {}", stats.attribute_count);
    println!("  Categories:   {}", categories.len());
    println!("  Objects:      {}", stats.object_count);
    println!("  Pairs:        {}", stats.pair_count);
    println!("  Values:       {}", stats.value_count);
    println!("  External ids: {}", stats.external_id_count);

    Ok(())
}
