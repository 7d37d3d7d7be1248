//! Input resolution and loading for benchmark logs.

use crate::Result;
use crate::extract::extract;
use crate::model::Workflow;
use anyhow::{Context, bail};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Where the logs to analyze come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Files(Vec<PathBuf>),
    Dir { path: PathBuf, extension: String },
}

/// Resolve the source to an ordered list of log paths.
///
/// Directory entries are sorted by path so runs are reproducible. Explicit
/// file lists keep the caller's order and are not checked here; missing
/// files are skipped later by `extract_all`.
pub fn gather(source: &InputSource) -> Result<Vec<PathBuf>> {
    match source {
        InputSource::Files(files) => {
            if files.is_empty() {
                bail!("no log files given");
            }
            Ok(files.clone())
        }
        InputSource::Dir { path, extension } => {
            let extension = extension.trim_start_matches('.');
            let entries = fs::read_dir(path)
                .with_context(|| format!("list log directory {}", path.display()))?;

            let mut logs = Vec::new();
            for entry in entries {
                let entry = entry.with_context(|| format!("read entry in {}", path.display()))?;
                let p = entry.path();
                if p.is_file() && has_extension(&p, extension) {
                    logs.push(p);
                }
            }
            logs.sort();

            if logs.is_empty() {
                bail!("no *.{} files found in {}", extension, path.display());
            }
            Ok(logs)
        }
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e == extension)
}

/// Read a log as text. Invalid UTF-8 is replaced rather than rejected.
pub fn load(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("read log file {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Display name used in reports and for benchmark id parsing.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Load and extract one log; unreadable logs are logged and skipped.
pub fn extract_path(path: &Path) -> Option<Workflow> {
    let name = display_name(path);
    tracing::info!(file = %name, "parsing");
    match load(path) {
        Ok(text) => Some(extract(&text, &name)),
        Err(err) => {
            tracing::warn!(path = %path.display(), "skipping log: {:#}", err);
            None
        }
    }
}

/// Extract every path on the rayon pool. Results come back in input order.
pub fn extract_all(paths: &[PathBuf]) -> Vec<Workflow> {
    paths
        .par_iter()
        .map(|p| extract_path(p))
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Step;
    use pretty_assertions::assert_eq;

    fn write(dir: &Path, name: &str, body: &[u8]) -> PathBuf {
        let p = dir.join(name);
        fs::write(&p, body).unwrap();
        p
    }

    #[test]
    fn dir_listing_is_sorted_and_filtered() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "b.log", b"");
        write(tmp.path(), "a.log", b"");
        write(tmp.path(), "notes.txt", b"");
        fs::create_dir(tmp.path().join("nested.log")).unwrap();

        let source = InputSource::Dir {
            path: tmp.path().to_path_buf(),
            extension: "log".to_string(),
        };
        let names: Vec<String> = gather(&source)
            .unwrap()
            .iter()
            .map(|p| display_name(p))
            .collect();
        assert_eq!(names, vec!["a.log", "b.log"]);
    }

    #[test]
    fn empty_dir_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "readme.md", b"");
        let source = InputSource::Dir {
            path: tmp.path().to_path_buf(),
            extension: ".log".to_string(),
        };
        let err = gather(&source).unwrap_err();
        assert!(err.to_string().starts_with("no *.log files found in "));
    }

    #[test]
    fn no_files_is_an_error() {
        assert!(gather(&InputSource::Files(vec![])).is_err());
    }

    #[test]
    fn missing_files_are_skipped_and_order_is_kept() {
        let tmp = tempfile::tempdir().unwrap();
        let first = write(
            tmp.path(),
            "benchmark-sql-scan-20240101_120000.log",
            "2️⃣ RUN PHASE".as_bytes(),
        );
        let missing = tmp.path().join("gone.log");
        let last = write(
            tmp.path(),
            "benchmark-ml-lr-20240101_130000.log",
            b"PREPARE PHASE\n",
        );

        let workflows = extract_all(&[first, missing, last]);
        let ids: Vec<&str> = workflows.iter().map(|w| w.benchmark.as_str()).collect();
        assert_eq!(ids, vec!["sql/scan", "ml/lr"]);
        assert_eq!(workflows[0].steps, vec![Step::Run]);
        assert_eq!(workflows[1].steps, vec![Step::Prepare]);
    }

    #[test]
    fn invalid_utf8_still_extracts() {
        let tmp = tempfile::tempdir().unwrap();
        let p = write(tmp.path(), "bin.log", b"\xff\xfe RUN PHASE\n");
        let wf = extract_path(&p).unwrap();
        assert_eq!(wf.steps, vec![Step::Run]);
        assert_eq!(wf.file, "bin.log");
    }
}
