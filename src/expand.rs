use crate::error::{ExpandError, Result};
use crate::fs_utils::{read_lines, resolve_pattern};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Literal prefix that marks an include directive line
pub const INCLUDE_PREFIX: &str = "[include ";

/// Configuration for the expansion pass
#[derive(Debug, Clone, Default)]
pub struct ExpandConfig {
    /// Report each matched file to stderr before expanding it
    pub verbose: bool,
}

/// An include directive found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// 1-based line number in the containing document
    pub line_number: usize,
    /// The glob pattern carried by the directive, trimmed
    pub pattern: String,
}

/// Extracts the glob pattern from an include directive line.
///
/// A directive is a line whose trimmed form starts with `[include ` and ends
/// with `]`; the payload between them is trimmed of surrounding whitespace.
/// A line that has the prefix but no closing bracket, or whose payload is
/// empty, is not a directive and returns `None`.
pub fn parse_directive(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    let payload = trimmed
        .strip_prefix(INCLUDE_PREFIX)?
        .strip_suffix(']')?
        .trim();
    if payload.is_empty() { None } else { Some(payload) }
}

/// Finds all include directives in a document without expanding them.
pub fn find_directives(lines: &[String]) -> Vec<Directive> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(index, line)| {
            parse_directive(line).map(|pattern| Directive {
                line_number: index + 1,
                pattern: pattern.to_string(),
            })
        })
        .collect()
}

/// Expands a configuration file, recursively inlining every include
/// directive. Relative patterns resolve against the file's parent directory.
///
/// # Errors
///
/// - `ExpandError::Read` if the file or any included file cannot be read.
/// - `ExpandError::Pattern` if a directive carries an invalid glob pattern.
/// - `ExpandError::Cycle` if an include chain reaches a file already being
///   expanded on the current chain.
pub fn expand_file(path: &Path, config: &ExpandConfig) -> Result<Vec<String>> {
    let mut active = HashSet::new();
    expand_path(path, config, &mut active)
}

/// Expands an in-memory document against an explicit base directory.
///
/// This is the entry point for stdin input, where the caller supplies the
/// working directory instead of the core reading it ad hoc.
///
/// # Errors
///
/// Same as [`expand_file`], minus the read of the root document itself.
pub fn expand_lines(
    lines: &[String],
    base_dir: &Path,
    config: &ExpandConfig,
) -> Result<Vec<String>> {
    let mut active = HashSet::new();
    expand_document(lines, base_dir, config, &mut active)
}

/// Expands one file as a new document source, guarding against cycles.
///
/// The active set holds the canonical identity of every file on the current
/// include chain, so the same file reached through a different relative route
/// still counts as a revisit.
fn expand_path(
    path: &Path,
    config: &ExpandConfig,
    active: &mut HashSet<PathBuf>,
) -> Result<Vec<String>> {
    let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if !active.insert(key.clone()) {
        return Err(ExpandError::Cycle {
            path: path.to_path_buf(),
        });
    }

    let lines = read_lines(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let result = expand_document(&lines, base_dir, config, active);

    active.remove(&key);
    result
}

fn expand_document(
    lines: &[String],
    base_dir: &Path,
    config: &ExpandConfig,
    active: &mut HashSet<PathBuf>,
) -> Result<Vec<String>> {
    let mut expanded = Vec::with_capacity(lines.len());

    for line in lines {
        let Some(pattern) = parse_directive(line) else {
            expanded.push(line.clone());
            continue;
        };

        expanded.push(format!("#### In-place expansion pattern: {pattern}\n"));
        for included in resolve_pattern(pattern, base_dir)? {
            if config.verbose {
                eprintln!("Expanding file: {}", included.display());
            }
            expanded.push(format!(
                "#### In-place expansion begin reading from {}\n",
                included.display()
            ));
            expanded.extend(expand_path(&included, config, active)?);
            expanded.push(format!(
                "#### In-place expansion end reading from {}\n",
                included.display()
            ));
        }
    }

    Ok(expanded)
}
