//! # cfg-expander
//!
//! A preprocessing library and CLI tool that flattens configuration files by
//! recursively inlining the contents of files referenced through
//! `[include <pattern>]` directive lines.
//!
//! ## Features
//!
//! - Replace `[include parts/*.cfg]` lines with the matched files' contents
//! - Glob patterns resolve relative to the including file's directory
//! - Deterministic output: matches are sorted by path string
//! - Traceability markers delimit every inlined file
//! - Include cycles are detected and reported instead of overflowing
//!
//! ## Usage
//!
//! ### As a Library
//!
//! ```no_run
//! use cfg_expander::{ExpandConfig, expand_file};
//! use std::path::Path;
//!
//! match expand_file(Path::new("main.cfg"), &ExpandConfig::default()) {
//!     Ok(lines) => print!("{}", lines.concat()),
//!     Err(e) => eprintln!("Error: {e}"),
//! }
//! ```
//!
//! ### As a CLI Tool
//!
//! ```bash
//! # Expand a configuration file to stdout
//! cfg-expander main.cfg
//!
//! # Expand stdin, writing the result to a file
//! cat main.cfg | cfg-expander -o flat.cfg
//!
//! # Report each included file while expanding
//! cfg-expander main.cfg -v
//! ```

pub mod error;
pub mod expand;
pub mod fs_utils;

// Re-export main types and functions for convenience
pub use error::{ExpandError, Result};
pub use expand::{
    Directive, ExpandConfig, INCLUDE_PREFIX, expand_file, expand_lines, find_directives,
    parse_directive,
};
