//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use oxipack_core::OxiPackError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    let template = "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";
    if let Ok(style) = ProgressStyle::default_bar().template(template) {
        pb.set_style(style.progress_chars("█▓▒░ "));
    }
    pb
}

/// Expand glob patterns in command-line arguments.
///
/// Arguments without glob metacharacters are passed through untouched so
/// that a missing file is reported by the command itself. A pattern that
/// matches nothing is an error.
pub fn expand_inputs(args: &[String]) -> Result<Vec<PathBuf>, OxiPackError> {
    let mut paths = Vec::new();
    for arg in args {
        if !arg.contains(['*', '?', '[']) {
            paths.push(PathBuf::from(arg));
            continue;
        }

        let entries = glob::glob(arg).map_err(|e| {
            OxiPackError::invalid_argument(format!("invalid pattern '{arg}': {e}"))
        })?;
        let before = paths.len();
        for entry in entries {
            paths.push(entry.map_err(|e| OxiPackError::Io(e.into_error()))?);
        }
        if paths.len() == before {
            return Err(OxiPackError::not_found(arg));
        }
    }
    Ok(paths)
}

/// `path` with `.suffix` appended to its file name.
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

/// `path` with its `.suffix` extension removed, if it has one.
pub fn strip_suffix(path: &Path, suffix: &str) -> Option<PathBuf> {
    if path.extension()? == suffix && path.file_stem().is_some() {
        Some(path.with_extension(""))
    } else {
        None
    }
}

/// Place `path`'s file name under `dir`, or keep `path` as is.
pub fn relocate(path: PathBuf, dir: Option<&Path>) -> PathBuf {
    match (dir, path.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_suffix() {
        assert_eq!(
            with_suffix(Path::new("dir/notes.txt"), "hh"),
            PathBuf::from("dir/notes.txt.hh")
        );
        assert_eq!(with_suffix(Path::new("bundle"), "zl"), PathBuf::from("bundle.zl"));
    }

    #[test]
    fn test_strip_suffix() {
        assert_eq!(
            strip_suffix(Path::new("dir/notes.txt.ll"), "ll"),
            Some(PathBuf::from("dir/notes.txt"))
        );
        assert_eq!(strip_suffix(Path::new("notes.txt"), "ll"), None);
        assert_eq!(strip_suffix(Path::new("noext"), "ll"), None);
    }

    #[test]
    fn test_relocate() {
        assert_eq!(
            relocate(PathBuf::from("a/b/file.txt"), Some(Path::new("out"))),
            PathBuf::from("out/file.txt")
        );
        assert_eq!(
            relocate(PathBuf::from("a/file.txt"), None),
            PathBuf::from("a/file.txt")
        );
    }

    #[test]
    fn test_expand_inputs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("one.txt"), b"1").unwrap();
        std::fs::write(dir.path().join("two.txt"), b"2").unwrap();
        std::fs::write(dir.path().join("skip.bin"), b"3").unwrap();

        let pattern = format!("{}/*.txt", dir.path().display());
        let mut paths = expand_inputs(&[pattern]).unwrap();
        paths.sort();
        assert_eq!(
            paths,
            vec![dir.path().join("one.txt"), dir.path().join("two.txt")]
        );

        let literal = dir.path().join("missing.txt").display().to_string();
        assert_eq!(expand_inputs(&[literal.clone()]).unwrap(), vec![PathBuf::from(literal)]);

        let empty = format!("{}/*.none", dir.path().display());
        assert!(matches!(
            expand_inputs(&[empty]),
            Err(OxiPackError::NotFound { .. })
        ));
    }
}
