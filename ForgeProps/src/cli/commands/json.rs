//! CLI command for exporting every resolved object

use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::database::{PropertyDatabase, write_json};

/// Command-line overrides for the settings file
pub struct JsonOptions {
    pub compact: bool,
    pub indent: Option<usize>,
    pub prefix: Option<String>,
    pub parallel: bool,
    pub root_id: Option<usize>,
}

pub fn execute(
    dir: &Path,
    output: Option<&Path>,
    options: &JsonOptions,
    config: Option<&Path>,
) -> anyhow::Result<()> {
    let mut settings = super::load_settings(config)?;

    if options.compact {
        settings.export.pretty = false;
    }
    if let Some(indent) = options.indent {
        settings.export.pretty = true;
        settings.export.indent = indent;
    }
    if let Some(prefix) = &options.prefix {
        settings.export.pretty = true;
        settings.export.prefix.clone_from(prefix);
    }
    if options.parallel {
        settings.resolver.parallel = true;
    }
    if let Some(root_id) = options.root_id {
        settings.resolver.root_id = root_id;
    }

    let db = PropertyDatabase::open_with(dir, &settings)?;

    match output {
        Some(path) => {
            db.write_json_file(path, &settings.export)?;
            eprintln!("Wrote {}", path.display());
        }
        None => {
            let objects = db.resolve_all()?;
            let mut stdout = BufWriter::new(io::stdout().lock());
            write_json(&objects, &mut stdout, &settings.export)?;
            writeln!(stdout)?;
            stdout.flush()?;
        }
    }

    Ok(())
}
