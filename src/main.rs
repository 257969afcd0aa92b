//! diffjson command-line interface.
//!
//! Loads two documents, optionally narrows each to a sub-tree, and prints one
//! line per difference. Exit status is 0 when the documents match, 1 when they
//! differ and 2 on error.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Color;
use diffjson::{
    format_json, format_summary, logging, parse_file, AnsiColors, ArrowFormatter, DiffConfig,
    DiffEngine, DiffJsonError, FormattingPolicy, IgnoreSet, Node, OutputFormat, PathResolver, Prefixes,
    WasFormatter,
};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;

/// Structural diff for JSON documents
#[derive(Parser)]
#[command(name = "diffjson")]
#[command(version)]
#[command(about = "Structural diff for JSON documents", long_about = None)]
struct Cli {
    /// Original document ("-" for stdin)
    #[arg(value_name = "FILE1")]
    file1: PathBuf,

    /// Modified document ("-" for stdin)
    #[arg(value_name = "FILE2")]
    file2: PathBuf,

    /// Compare only the sub-tree of FILE1 at this path
    #[arg(long, value_name = "PATH")]
    select1: Option<String>,

    /// Compare only the sub-tree of FILE2 at this path
    #[arg(long, value_name = "PATH")]
    select2: Option<String>,

    /// Skip this path and everything beneath it (repeatable)
    #[arg(short, long = "ignore", value_name = "PATH")]
    ignore: Vec<String>,

    /// Separator between path segments
    #[arg(short, long, default_value = ".")]
    delimiter: String,

    /// Render array indices as `.n` instead of `[n]`
    #[arg(long)]
    no_brackets: bool,

    /// Prefix marking a path step whose string value holds embedded JSON
    #[arg(long, value_name = "OP")]
    deserialize_operator: Option<String>,

    /// Colorize output when writing to a terminal
    #[arg(short, long)]
    color: bool,

    /// Color for added values
    #[arg(long, default_value = "bright green", value_parser = parse_color)]
    color_added: Color,

    /// Color for removed values
    #[arg(long, default_value = "bright red", value_parser = parse_color)]
    color_removed: Color,

    /// Color for modified paths
    #[arg(long, default_value = "bright blue", value_parser = parse_color)]
    color_modified: Color,

    /// Line prefix for added values
    #[arg(long, default_value = "> ", allow_hyphen_values = true)]
    prefix_added: String,

    /// Line prefix for removed values
    #[arg(long, default_value = "< ", allow_hyphen_values = true)]
    prefix_removed: String,

    /// Line prefix for modified values
    #[arg(long, default_value = "~ ", allow_hyphen_values = true)]
    prefix_modified: String,

    /// How a modified value's old and new forms are joined
    #[arg(long, value_enum, default_value = "arrow")]
    modified_style: ModifiedStyle,

    /// Escape quotes and control characters in string values
    #[arg(long)]
    escape_strings: bool,

    /// Spaces before each output line
    #[arg(long, default_value = "0")]
    indent: usize,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormatArg,

    /// Print a summary line after the differences
    #[arg(long)]
    summary: bool,

    /// Verbose diagnostics on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormatArg {
    /// One line per difference
    Text,
    /// JSON document with all differences
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Text => OutputFormat::Text,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ModifiedStyle {
    /// `old > new`
    Arrow,
    /// `new (was old)`
    Was,
}

fn parse_color(name: &str) -> Result<Color, String> {
    name.parse::<Color>()
        .map_err(|_| format!("unknown color: {}", name))
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(2);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    if is_stdin(&cli.file1) && is_stdin(&cli.file2) {
        let message = "only one of FILE1 and FILE2 may read from stdin";
        return Err(DiffJsonError::config(message).into());
    }

    let paths = PathResolver::default()
        .with_delimiter(cli.delimiter.as_str())?
        .with_square_brackets(!cli.no_brackets)
        .with_deserialize_operator(cli.deserialize_operator.clone());

    tracing::debug!(file = %cli.file1.display(), "parsing original");
    let mut old = parse_file(&cli.file1)
        .with_context(|| format!("Failed to parse first file: {}", cli.file1.display()))?;

    tracing::debug!(file = %cli.file2.display(), "parsing modified");
    let mut new = parse_file(&cli.file2)
        .with_context(|| format!("Failed to parse second file: {}", cli.file2.display()))?;

    narrow(&paths, &mut old, cli.select1.as_deref(), "FILE1");
    narrow(&paths, &mut new, cli.select2.as_deref(), "FILE2");

    let ignore: IgnoreSet = cli.ignore.iter().cloned().collect();
    let engine = DiffEngine::new(DiffConfig::new(paths, ignore)).with_policy(policy(&cli));

    let stats = match OutputFormat::from(cli.format) {
        OutputFormat::Text => {
            let indent = " ".repeat(cli.indent);
            let stats = engine.run(&old, &new, |line| println!("{}{}", indent, line));
            if cli.summary {
                println!("{}{}", indent, format_summary(&stats));
            }
            stats
        }
        OutputFormat::Json => {
            let diff = engine.compute(&old, &new);
            println!(
                "{}",
                format_json(&diff).context("Failed to format diff output")?
            );
            diff.stats
        }
    };

    if stats.is_empty() {
        Ok(0)
    } else {
        Ok(1)
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Applies an optional sub-tree selection, keeping the whole document when the
/// path does not resolve.
fn narrow(paths: &PathResolver, root: &mut Node, spec: Option<&str>, label: &str) {
    if let Some(spec) = spec {
        if !paths.select(root, spec) {
            tracing::warn!(
                spec,
                document = label,
                "selection did not resolve; comparing the whole document"
            );
        }
    }
}

fn policy(cli: &Cli) -> FormattingPolicy {
    let prefixes = Prefixes::new(
        cli.prefix_added.as_str(),
        cli.prefix_removed.as_str(),
        cli.prefix_modified.as_str(),
    );
    let mut policy = FormattingPolicy::default()
        .with_prefixes(prefixes)
        .with_escaped_strings(cli.escape_strings);

    if cli.color && std::io::stdout().is_terminal() {
        policy = policy.with_colorizer(AnsiColors {
            added: cli.color_added,
            removed: cli.color_removed,
            modified: cli.color_modified,
        });
    }

    match cli.modified_style {
        ModifiedStyle::Arrow => policy.with_modified_formatter(ArrowFormatter),
        ModifiedStyle::Was => policy.with_modified_formatter(WasFormatter),
    }
}
