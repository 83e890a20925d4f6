use crate::error::{ExpandError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Reads a file and splits it into lines that keep their original terminators.
///
/// The final line of a file without a trailing newline is returned as-is, so
/// joining the lines back together reproduces the file byte for byte.
///
/// # Errors
///
/// `ExpandError::Read` naming the path if the file cannot be opened or read.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|source| ExpandError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(split_lines(&content))
}

/// Splits text into lines, each keeping its `\n` terminator if it has one.
pub fn split_lines(content: &str) -> Vec<String> {
    content.split_inclusive('\n').map(str::to_string).collect()
}

/// Resolves a glob pattern against a base directory and returns all matching
/// paths sorted lexicographically by their string form.
///
/// The pattern may contain path separators and parent references; no
/// sandboxing is applied. Matches are not filtered by type, so directories
/// can appear in the result. Entries the walk cannot stat are skipped.
///
/// # Errors
///
/// `ExpandError::Pattern` if the pattern is not valid glob syntax.
pub fn resolve_pattern(pattern: &str, base_dir: &Path) -> Result<Vec<PathBuf>> {
    let joined = base_dir.join(pattern);
    // Wildcards never match a leading dot, so hidden files must be named
    // explicitly to be included.
    let options = glob::MatchOptions {
        require_literal_leading_dot: true,
        ..glob::MatchOptions::default()
    };
    let paths = glob::glob_with(&joined.to_string_lossy(), options).map_err(|source| {
        ExpandError::Pattern {
            pattern: pattern.to_string(),
            source,
        }
    })?;

    let mut matches: Vec<PathBuf> = paths.filter_map(std::result::Result::ok).collect();
    // Sort by the path's string form, not component order, so output is
    // reproducible regardless of directory enumeration order.
    matches.sort_by(|a, b| a.to_string_lossy().cmp(&b.to_string_lossy()));
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_lines_keeps_terminators() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.cfg");
        fs::write(&path, "one\ntwo\nthree").unwrap();

        let lines = read_lines(&path).unwrap();
        assert_eq!(lines, vec!["one\n", "two\n", "three"]);
    }

    #[test]
    fn test_read_lines_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.cfg");
        fs::write(&path, "").unwrap();

        let lines = read_lines(&path).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_read_lines_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope.cfg");

        let result = read_lines(&path);
        assert!(matches!(result, Err(ExpandError::Read { .. })));
        if let Err(ExpandError::Read { path: p, .. }) = result {
            assert_eq!(p, path);
        }
    }

    #[test]
    fn test_split_lines_roundtrip() {
        let content = "a\n\nb\nno-newline";
        let lines = split_lines(content);
        assert_eq!(lines, vec!["a\n", "\n", "b\n", "no-newline"]);
        assert_eq!(lines.concat(), content);
    }

    #[test]
    fn test_resolve_pattern_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        fs::write(base.join("b.cfg"), "").unwrap();
        fs::write(base.join("a.cfg"), "").unwrap();
        fs::write(base.join("c.cfg"), "").unwrap();
        fs::write(base.join("ignored.txt"), "").unwrap();

        let matches = resolve_pattern("*.cfg", base).unwrap();
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0], base.join("a.cfg"));
        assert_eq!(matches[1], base.join("b.cfg"));
        assert_eq!(matches[2], base.join("c.cfg"));
    }

    #[test]
    fn test_resolve_pattern_subdirectories() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        fs::create_dir(base.join("sub")).unwrap();
        fs::write(base.join("sub/child.cfg"), "").unwrap();

        let matches = resolve_pattern("sub/*.cfg", base).unwrap();
        assert_eq!(matches, vec![base.join("sub/child.cfg")]);
    }

    #[test]
    fn test_resolve_pattern_parent_reference() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        fs::create_dir(base.join("nested")).unwrap();
        fs::write(base.join("shared.cfg"), "").unwrap();

        let matches = resolve_pattern("../shared.cfg", &base.join("nested")).unwrap();
        assert_eq!(matches, vec![base.join("nested/../shared.cfg")]);
    }

    #[test]
    fn test_resolve_pattern_no_matches() {
        let temp_dir = TempDir::new().unwrap();
        let matches = resolve_pattern("*.missing", temp_dir.path()).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_resolve_pattern_matches_directories() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        fs::create_dir(base.join("parts")).unwrap();
        fs::write(base.join("parts.cfg"), "").unwrap();

        let matches = resolve_pattern("parts*", base).unwrap();
        assert_eq!(matches.len(), 2);
        assert!(matches.contains(&base.join("parts")));
    }

    #[test]
    fn test_resolve_pattern_hidden_files() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        fs::write(base.join(".hidden.cfg"), "").unwrap();
        fs::write(base.join("visible.cfg"), "").unwrap();

        let matches = resolve_pattern("*.cfg", base).unwrap();
        assert_eq!(matches, vec![base.join("visible.cfg")]);

        // Naming the leading dot explicitly still works
        let matches = resolve_pattern(".hidden.cfg", base).unwrap();
        assert_eq!(matches, vec![base.join(".hidden.cfg")]);
    }

    #[test]
    fn test_resolve_pattern_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let result = resolve_pattern("[unclosed", temp_dir.path());
        assert!(matches!(result, Err(ExpandError::Pattern { .. })));
    }
}
