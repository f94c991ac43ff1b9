//! JSON export of resolved objects

use super::PropertyDatabase;
use super::types::ObjectProperties;
use crate::config::ExportSettings;
use crate::error::Result;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

impl PropertyDatabase {
    /// Resolve every object and serialize the result as a JSON array.
    ///
    /// # Errors
    /// Returns an error if resolution or serialization fails.
    pub fn export_json(&self, options: &ExportSettings) -> Result<String> {
        to_json_string(&self.resolve_all()?, options)
    }

    /// Resolve every object and write the JSON array to `path`.
    ///
    /// # Errors
    /// Returns an error if resolution fails or the file cannot be written.
    pub fn write_json_file<P: AsRef<Path>>(&self, path: P, options: &ExportSettings) -> Result<()> {
        let objects = self.resolve_all()?;
        let path = path.as_ref();
        tracing::info!("Writing {} objects to {}", objects.len(), path.display());

        let mut writer = BufWriter::new(File::create(path)?);
        write_json(&objects, &mut writer, options)?;
        writer.flush()?;
        Ok(())
    }
}

/// Serialize resolved objects to a JSON string
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn to_json_string(objects: &[ObjectProperties], options: &ExportSettings) -> Result<String> {
    let mut buffer = Vec::new();
    write_json(objects, &mut buffer, options)?;
    Ok(String::from_utf8(buffer)?)
}

/// Serialize resolved objects as a JSON array into `writer`
///
/// Pretty output indents with `options.indent` spaces per level and starts
/// every line but the first with `options.prefix`.
///
/// # Errors
/// Returns an error if JSON serialization or writing fails.
pub fn write_json<W: Write>(
    objects: &[ObjectProperties],
    writer: W,
    options: &ExportSettings,
) -> Result<()> {
    if options.pretty {
        let indent = " ".repeat(options.indent);
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let writer = LinePrefixer {
            inner: writer,
            prefix: options.prefix.as_bytes(),
        };
        let mut serializer = Serializer::with_formatter(writer, formatter);
        objects.serialize(&mut serializer)?;
    } else {
        serde_json::to_writer(writer, objects)?;
    }
    Ok(())
}

/// Writes `prefix` after every newline passed through it.
///
/// Serialized JSON escapes newlines inside strings, so only line breaks from
/// the formatter are prefixed.
struct LinePrefixer<'a, W> {
    inner: W,
    prefix: &'a [u8],
}

impl<W: Write> Write for LinePrefixer<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.prefix.is_empty() {
            return self.inner.write(buf);
        }
        for chunk in buf.split_inclusive(|&b| b == b'\n') {
            self.inner.write_all(chunk)?;
            if chunk.ends_with(b"\n") {
                self.inner.write_all(self.prefix)?;
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn door() -> ObjectProperties {
        let mut obj = ObjectProperties::new(2, "e-2");
        obj.set_name_if_unset("Door");
        obj.insert_property("Dimensions", "Width", "5.000000 mm".to_string());
        obj.parents.push(1);
        obj
    }

    #[test]
    fn test_compact_output() {
        let json = to_json_string(&[door()], &ExportSettings::compact()).unwrap();
        assert_eq!(
            json,
            r#"[{"ObjectID":2,"Name":"Door","ExternalID":"e-2","Properties":{"Dimensions":{"Width":"5.000000 mm"}},"Parents":[1]}]"#
        );
    }

    #[test]
    fn test_pretty_output_uses_indent() {
        let json = to_json_string(&[door()], &ExportSettings::pretty(4)).unwrap();
        let lines: Vec<&str> = json.lines().collect();
        assert_eq!(lines[0], "[");
        assert_eq!(lines[1], "    {");
        assert_eq!(lines[2], "        \"ObjectID\": 2,");
        assert_eq!(lines.last().copied(), Some("]"));
    }

    #[test]
    fn test_pretty_output_with_prefix() {
        let mut obj = ObjectProperties::new(2, "e-2");
        obj.set_name_if_unset("Line\nBreak");
        let options = ExportSettings::pretty(2).with_prefix("    ");
        let json = to_json_string(&[obj], &options).unwrap();
        assert_eq!(
            json,
            "[\n      {\n        \"ObjectID\": 2,\n        \"Name\": \"Line\\nBreak\",\n        \"ExternalID\": \"e-2\",\n        \"Properties\": {},\n        \"Parents\": []\n      }\n    ]"
        );
    }

    #[test]
    fn test_prefix_ignored_in_compact_output() {
        let options = ExportSettings::compact().with_prefix("    ");
        assert_eq!(to_json_string(&[], &options).unwrap(), "[]");
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(to_json_string(&[], &ExportSettings::compact()).unwrap(), "[]");
        assert_eq!(to_json_string(&[], &ExportSettings::default()).unwrap(), "[]");
    }

    #[test]
    fn test_output_parses_back() {
        let objects = vec![door()];
        let json = to_json_string(&objects, &ExportSettings::default()).unwrap();
        let parsed: Vec<ObjectProperties> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, objects);
    }
}
