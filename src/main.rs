use cfg_expander::fs_utils::{read_lines, resolve_pattern, split_lines};
use cfg_expander::{
    Directive, ExpandConfig, ExpandError, Result, expand_file, expand_lines, find_directives,
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

const LONG_HELP: &str = r#"
Directive:
  [include <pattern>]  - Replaced by the contents of every file matching the
                         glob pattern, expanded recursively. The pattern is
                         resolved relative to the directory of the file that
                         contains the directive (or the base directory when
                         reading from stdin).

Markers in the output:
  #### In-place expansion pattern: <pattern>
  #### In-place expansion begin reading from <path>
  #### In-place expansion end reading from <path>

Examples:
  # Expand a configuration file to stdout
  cfg-expander main.cfg
  # Expand from stdin
  cat main.cfg | cfg-expander
  # Write the flattened result to a file
  cfg-expander main.cfg -o flat.cfg
  # Report each included file while expanding
  cfg-expander main.cfg -v
  # List the include directives of the root document
  cfg-expander main.cfg --list
  # List with resolved matches, as JSON for scripting
  cfg-expander main.cfg --list=json
"#;

/// Expand configuration files by inlining included files.
#[derive(Parser, Debug)]
#[command(
    name = "cfg-expander",
    version,
    about = "Expand configuration files by recursively inlining [include <glob>] directives.",
    after_long_help = LONG_HELP
)]
struct Cli {
    /// Path to the root configuration file (reads from stdin if not provided)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output file for the expanded result (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Base directory for resolving patterns when reading from stdin
    /// (defaults to the current working directory)
    #[arg(short, long, value_name = "DIR")]
    base_dir: Option<PathBuf>,

    /// List include directives of the root document instead of expanding
    /// (optionally with format: plain, detailed, json)
    #[arg(long, value_name = "FORMAT", num_args = 0..=1, default_missing_value = "plain")]
    list: Option<ListFormat>,

    /// Report each included file to stderr while expanding
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq)]
enum ListFormat {
    /// Simple list of patterns
    Plain,
    /// Line numbers and resolved matches for each directive
    Detailed,
    /// JSON output for scripting
    Json,
}

#[derive(Serialize, Deserialize)]
struct DirectiveInfo {
    line: usize,
    pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    matches: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => LogLevel::Error,
        (false, false) => LogLevel::Warn,
        (false, true) => LogLevel::Info,
    };

    let result = if let Some(list_format) = cli.list {
        list_directives(&cli, list_format, log_level)
    } else {
        run_expand(&cli, log_level)
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Reads the root document's lines and the base directory its patterns
/// resolve against: the file's parent, or the explicit/cwd base for stdin.
fn read_root(cli: &Cli, log_level: LogLevel) -> Result<(Vec<String>, PathBuf)> {
    if let Some(input) = &cli.input {
        log(
            log_level,
            LogLevel::Info,
            &format!("Reading configuration from {}", input.display()),
        );
        let lines = read_lines(input)?;
        let base_dir = input.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
        Ok((lines, base_dir))
    } else {
        log(log_level, LogLevel::Info, "Reading configuration from stdin...");
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        let base_dir = match &cli.base_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        Ok((split_lines(&buffer), base_dir))
    }
}

fn run_expand(cli: &Cli, log_level: LogLevel) -> Result<()> {
    let config = ExpandConfig {
        verbose: cli.verbose,
    };

    let expanded = if let Some(input) = &cli.input {
        log(
            log_level,
            LogLevel::Info,
            &format!("Expanding {}", input.display()),
        );
        expand_file(input, &config)?
    } else {
        let (lines, base_dir) = read_root(cli, log_level)?;
        expand_lines(&lines, &base_dir, &config)?
    };

    if let Some(output) = &cli.output {
        log(
            log_level,
            LogLevel::Info,
            &format!("Writing output to {}", output.display()),
        );
        std::fs::write(output, expanded.concat()).map_err(|source| ExpandError::Write {
            path: output.clone(),
            source,
        })?;
    } else {
        print!("{}", expanded.concat());
        io::stdout().flush()?;
    }

    log(log_level, LogLevel::Info, "Expansion complete!");
    Ok(())
}

fn list_directives(cli: &Cli, format: ListFormat, log_level: LogLevel) -> Result<()> {
    let (lines, base_dir) = read_root(cli, log_level)?;
    let directives = find_directives(&lines);

    match format {
        ListFormat::Plain => {
            for directive in &directives {
                println!("{}", directive.pattern);
            }
        }
        ListFormat::Detailed => {
            for directive in &directives {
                println!("Line {}: [include {}]", directive.line_number, directive.pattern);
                match resolve_pattern(&directive.pattern, &base_dir) {
                    Ok(matches) => {
                        if matches.is_empty() {
                            log(
                                log_level,
                                LogLevel::Warn,
                                &format!("Pattern '{}' matches no files", directive.pattern),
                            );
                        }
                        println!("  Matches: {}", matches.len());
                        for path in &matches {
                            println!("    {}", path.display());
                        }
                    }
                    Err(e) => {
                        println!("  Error: {e}");
                    }
                }
                println!();
            }
        }
        ListFormat::Json => {
            let infos: Vec<DirectiveInfo> = directives
                .iter()
                .map(|directive| directive_info(directive, &base_dir))
                .collect();
            let json = serde_json::to_string_pretty(&infos)?;
            println!("{json}");
        }
    }

    Ok(())
}

fn directive_info(directive: &Directive, base_dir: &Path) -> DirectiveInfo {
    let mut info = DirectiveInfo {
        line: directive.line_number,
        pattern: directive.pattern.clone(),
        matches: None,
        error: None,
    };
    match resolve_pattern(&directive.pattern, base_dir) {
        Ok(matches) => {
            info.matches = Some(
                matches
                    .iter()
                    .map(|path| path.display().to_string())
                    .collect(),
            );
        }
        Err(e) => {
            info.error = Some(e.to_string());
        }
    }
    info
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum LogLevel {
    Info,
    Warn,
    Error,
}

fn log(current_level: LogLevel, message_level: LogLevel, message: &str) {
    if message_level >= current_level {
        eprintln!(
            "[{}] {}",
            match message_level {
                LogLevel::Info => "INFO",
                LogLevel::Warn => "WARN",
                LogLevel::Error => "ERROR",
            },
            message
        );
    }
}
