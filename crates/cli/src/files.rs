//! Input lookup and timestamped report output

use searcheval_core::config::PathsConfig;
use searcheval_core::error::{Error, Result};
use searcheval_core::timestamps::file_stamp;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Locate an input file
///
/// Paths that exist as given are used directly. Otherwise the name is looked
/// up in `data_input_dir`, then in `data_output_dir` (reports from an earlier
/// run are valid inputs).
pub fn resolve_input(paths: &PathsConfig, name: &Path) -> Result<PathBuf> {
    if name.is_file() {
        return Ok(name.to_path_buf());
    }

    let candidates = [
        Path::new(&paths.data_input_dir).join(name),
        Path::new(&paths.data_output_dir).join(name),
    ];
    for candidate in &candidates {
        if candidate.is_file() {
            debug!("Resolved input {} to {}", name.display(), candidate.display());
            return Ok(candidate.clone());
        }
    }

    Err(Error::invalid_input(format!(
        "Input file {} not found (looked in {} and {})",
        name.display(),
        paths.data_input_dir,
        paths.data_output_dir
    )))
}

/// Locate a queries file, trying `queries_input_dir` when the path does not exist as given
pub fn resolve_queries(paths: &PathsConfig, name: &Path) -> Result<PathBuf> {
    if name.is_file() {
        return Ok(name.to_path_buf());
    }
    let candidate = Path::new(&paths.queries_input_dir).join(name);
    if candidate.is_file() {
        return Ok(candidate);
    }
    Err(Error::invalid_input(format!(
        "Queries file {} not found (also looked in {})",
        name.display(),
        paths.queries_input_dir
    )))
}

/// `<stem>_<stamp>.<extension>`, without doubling an extension already on `stem`
pub fn stamped_file_name(stem: &str, stamp: &str, extension: &str) -> String {
    let suffix = format!(".{extension}");
    let stem = stem.strip_suffix(&suffix).unwrap_or(stem);
    format!("{stem}_{stamp}{suffix}")
}

fn prepare_output(dir: &Path, stem: &str, extension: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| {
        Error::with_context(format!("Failed to create output directory {}", dir.display()), e)
    })?;
    Ok(dir.join(stamped_file_name(stem, &file_stamp(), extension)))
}

/// Write a CSV report with the given header row into `dir`
///
/// Returns the path of the written file.
pub fn write_csv(
    dir: &Path,
    stem: &str,
    headers: &[String],
    rows: &[Vec<String>],
) -> Result<PathBuf> {
    let path = prepare_output(dir, stem, "csv")?;
    let report_error = |e: csv::Error| Error::report(format!("{}: {e}", path.display()));

    let mut writer = csv::Writer::from_path(&path).map_err(report_error)?;
    writer.write_record(headers).map_err(report_error)?;
    for row in rows {
        writer.write_record(row).map_err(report_error)?;
    }
    writer
        .flush()
        .map_err(|e| Error::with_context(format!("Failed to flush {}", path.display()), e))?;

    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(path)
}

/// Write a pretty-printed JSON document into `dir`
pub fn write_json<T: Serialize>(dir: &Path, stem: &str, value: &T) -> Result<PathBuf> {
    let path = prepare_output(dir, stem, "json")?;
    let content = serde_json::to_string_pretty(value)
        .map_err(|e| Error::report(format!("Failed to serialize {}: {e}", path.display())))?;
    std::fs::write(&path, content)
        .map_err(|e| Error::with_context(format!("Failed to write {}", path.display()), e))?;

    info!("Wrote {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn paths_in(root: &Path) -> PathsConfig {
        let dir = |name: &str| root.join(name).to_string_lossy().to_string();
        PathsConfig {
            data_input_dir: dir("input"),
            data_output_dir: dir("output"),
            queries_input_dir: dir("queries"),
        }
    }

    #[test]
    fn test_stamped_file_name_does_not_double_extension() {
        assert_eq!(
            stamped_file_name("report.csv", "2024-01-01-00-00-00-000000", "csv"),
            "report_2024-01-01-00-00-00-000000.csv"
        );
        assert_eq!(stamped_file_name("report", "s", "json"), "report_s.json");
        assert_eq!(stamped_file_name("report.csv", "s", "json"), "report.csv_s.json");
    }

    #[test]
    fn test_resolve_input_falls_back_to_output_dir() {
        let temp = TempDir::new().unwrap();
        let paths = paths_in(temp.path());
        let input_dir = temp.path().join("input");
        let output_dir = temp.path().join("output");
        std::fs::create_dir_all(&output_dir).unwrap();
        std::fs::write(output_dir.join("cases.csv"), "x").unwrap();

        let resolved = resolve_input(&paths, Path::new("cases.csv")).unwrap();
        assert_eq!(resolved, output_dir.join("cases.csv"));

        std::fs::create_dir_all(&input_dir).unwrap();
        std::fs::write(input_dir.join("cases.csv"), "x").unwrap();
        let resolved = resolve_input(&paths, Path::new("cases.csv")).unwrap();
        assert_eq!(resolved, input_dir.join("cases.csv"));
    }

    #[test]
    fn test_resolve_input_missing() {
        let temp = TempDir::new().unwrap();
        let err = resolve_input(&paths_in(temp.path()), Path::new("nope.csv")).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_write_csv_creates_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested").join("out");

        let path = write_csv(
            &dir,
            "cases_output",
            &["A".to_string(), "B".to_string()],
            &[vec!["1".to_string(), "x, y".to_string()]],
        )
        .unwrap();

        assert!(path.starts_with(&dir));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("cases_output_"));
        assert!(name.ends_with(".csv"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "A,B\n1,\"x, y\"\n");
    }

    #[test]
    fn test_write_json() {
        let temp = TempDir::new().unwrap();
        let path = write_json(temp.path(), "summary.json", &serde_json::json!({"a": 1})).unwrap();
        assert!(!path.to_string_lossy().contains(".json_"));
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["a"], 1);
    }
}
