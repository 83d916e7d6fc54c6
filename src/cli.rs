//! Command-line surface of the `csvtk` binary.

use crate::commands::dim::DimOptions;
use crate::commands::pretty::PrettyOptions;
use crate::config::{Config, DEFAULT_CHUNK_SIZE, RaggedRows, default_cpus, parse_dialect_byte};
use crate::error::ConfigError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "csvtk", version)]
#[command(about = "Inspect and reformat CSV/TSV files", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// CPUs to use [default: available CPUs, at most 4]
    #[arg(short = 'j', long, global = true)]
    pub num_cpus: Option<usize>,

    /// Field delimiter
    #[arg(short, long, global = true, default_value = ",")]
    pub delimiter: String,

    /// Input is tab-separated (same as -d '\t')
    #[arg(short, long, global = true)]
    pub tabs: bool,

    /// Quote character
    #[arg(short, long, global = true, default_value = "\"")]
    pub quote: String,

    /// Lines starting with this character are skipped; empty disables
    #[arg(short = 'C', long, global = true, default_value = "#")]
    pub comment_char: String,

    /// The first row is data, not column names
    #[arg(short = 'H', long, global = true)]
    pub no_header_row: bool,

    /// Allow stray quotes in unquoted and quoted fields
    #[arg(short, long, global = true)]
    pub lazy_quotes: bool,

    /// Skip rows whose fields are all empty
    #[arg(short = 'E', long, global = true)]
    pub ignore_empty_row: bool,

    /// Skip rows with a different number of fields than the first row
    #[arg(short = 'I', long, global = true, conflicts_with = "strict_width")]
    pub ignore_illegal_row: bool,

    /// Fail on rows with a different number of fields than the first row
    #[arg(long, global = true)]
    pub strict_width: bool,

    /// Rows per chunk handed to a worker
    #[arg(long, global = true, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// File listing input files, one per line
    #[arg(long, global = true, value_name = "FILE")]
    pub infile_list: Option<PathBuf>,

    /// Output file ("-" for stdout; .gz, .zst, .bz2, .xz are compressed)
    #[arg(short, long, global = true, default_value = "-")]
    pub out_file: PathBuf,

    /// More logging (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl GlobalArgs {
    /// Build and validate the reader config these flags describe.
    ///
    /// # Errors
    /// [`ConfigError`] for unusable dialect characters or sizes.
    pub fn to_config(&self) -> Result<Config, ConfigError> {
        let delimiter = if self.tabs {
            b'\t'
        } else {
            parse_dialect_byte("delimiter", &self.delimiter)?
        };
        let comment = if self.comment_char.is_empty() {
            None
        } else {
            Some(parse_dialect_byte("comment-char", &self.comment_char)?)
        };
        let ragged = if self.strict_width {
            RaggedRows::Strict
        } else if self.ignore_illegal_row {
            RaggedRows::Skip
        } else {
            RaggedRows::Allow
        };
        let config = Config::default()
            .with_num_cpus(self.num_cpus.unwrap_or_else(default_cpus))
            .with_delimiter(delimiter)
            .with_quote(parse_dialect_byte("quote", &self.quote)?)
            .with_comment(comment)
            .with_header(!self.no_header_row)
            .with_lazy_quotes(self.lazy_quotes)
            .with_ignore_empty_row(self.ignore_empty_row)
            .with_ragged(ragged)
            .with_chunk_size(self.chunk_size);
        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Dimensions of CSV files
    #[command(visible_aliases = ["size", "stats", "stat"])]
    Dim(DimArgs),
    /// Convert CSV to a readable aligned table
    Pretty(PrettyArgs),
}

#[derive(Args, Debug)]
pub struct DimArgs {
    /// Output in machine-friendly tabular format
    #[arg(long)]
    pub tabular: bool,

    /// Only print the number of columns
    #[arg(long, conflicts_with = "rows")]
    pub cols: bool,

    /// Only print the number of rows
    #[arg(long)]
    pub rows: bool,

    /// Do not print file names
    #[arg(short, long)]
    pub no_files: bool,

    /// Input files or glob patterns ("-" for stdin)
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,
}

impl DimArgs {
    #[must_use]
    pub fn options(&self) -> DimOptions {
        DimOptions {
            tabular: self.tabular,
            cols: self.cols,
            rows: self.rows,
            no_files: self.no_files,
        }
    }
}

#[derive(Args, Debug)]
pub struct PrettyArgs {
    /// Column separator
    #[arg(short, long, default_value = "   ")]
    pub separator: String,

    /// Align cells to the right
    #[arg(short = 'r', long)]
    pub align_right: bool,

    /// Minimum column width
    #[arg(short = 'w', long, default_value_t = 0)]
    pub min_width: usize,

    /// Maximum column width; longer cells are cut (0 = no limit)
    #[arg(short = 'W', long, default_value_t = 0)]
    pub max_width: usize,

    /// Input file ("-" for stdin)
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,
}

impl PrettyArgs {
    #[must_use]
    pub fn options(&self) -> PrettyOptions {
        PrettyOptions {
            separator: self.separator.clone(),
            align_right: self.align_right,
            min_width: self.min_width,
            max_width: self.max_width,
        }
    }
}
