//! Writing the aggregated series to disk.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use grid_common::{to_json_document, SeriesPoint};
use tempfile::NamedTempFile;
use tracing::debug;

/// Write `series` as a pretty JSON array to `path`.
///
/// The document goes to a temp file next to `path` first and is then renamed
/// over it, so readers never see a partial file.
pub fn write_series(path: &Path, series: &[SeriesPoint]) -> Result<()> {
    let document = to_json_document(series).context("Failed to serialize series")?;

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create output directory {}", parent.display()))?;

    let mut tmp = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temp file in {}", parent.display()))?;
    tmp.write_all(document.as_bytes())
        .context("Failed to write series")?;
    tmp.flush().context("Failed to write series")?;
    tmp.persist(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    debug!(path = %path.display(), bytes = document.len(), "Wrote output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.json");

        write_series(
            &path,
            &[SeriesPoint::new("2019", 5.0), SeriesPoint::new("2020", 7.5)],
        )
        .unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "[\n  {\n    \"date\": \"2019\",\n    \"value\": 5.0\n  },\n  {\n    \"date\": \"2020\",\n    \"value\": 7.5\n  }\n]\n"
        );
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/series.json");

        write_series(&path, &[]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]\n");
    }

    #[test]
    fn test_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.json");
        fs::write(&path, "stale").unwrap();

        write_series(&path, &[SeriesPoint::new("2001", 1.0)]).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"2001\""));
        // no temp files left behind
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
