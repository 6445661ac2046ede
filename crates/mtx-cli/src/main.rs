mod config;
mod demo;
mod output;

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

use config::{Config, ConfigSource};
use mtx_core::{read_matrices, read_matrix, Border, Matrix, Op};
use output::{OutputFormat, Printer};

#[derive(Parser)]
#[command(
    name = "mtx",
    version,
    about = "Dense matrix arithmetic, minors and cofactor determinants"
)]
struct Cli {
    /// Fixed number of decimals in output (overrides config)
    #[arg(long, global = true)]
    precision: Option<usize>,

    /// Grid border style: unicode or ascii (overrides config)
    #[arg(long, global = true)]
    border: Option<Border>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Matrix inputs are text files: row count, column count, then the
/// elements row by row. `-` or an omitted path reads stdin.
#[derive(Subcommand)]
enum Commands {
    /// Render a matrix
    Show {
        file: Option<PathBuf>,

        /// Render every matrix in the input, not just the first
        #[arg(short, long)]
        all: bool,
    },

    /// Element-wise sum of two matrices of the same shape
    Add { lhs: PathBuf, rhs: PathBuf },

    /// Element-wise difference of two matrices of the same shape
    Sub { lhs: PathBuf, rhs: PathBuf },

    /// Matrix product (lhs columns must equal rhs rows)
    Mul { lhs: PathBuf, rhs: PathBuf },

    /// Determinant of a square matrix
    Det { file: Option<PathBuf> },

    /// Remove one row and one column (1-based)
    Minor {
        file: Option<PathBuf>,

        #[arg(short, long)]
        row: usize,

        #[arg(short, long)]
        column: usize,
    },

    /// Print a single element (1-based)
    Get {
        file: Option<PathBuf>,

        #[arg(short, long)]
        row: usize,

        #[arg(short, long)]
        column: usize,
    },

    /// Walk through every operation on built-in matrices
    Demo,

    /// Show the active configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let source = ConfigSource::resolve();
    let cfg = Config::load(&source)?;

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(&cfg)?)
        .with_writer(io::stderr)
        .init();
    debug!(config = ?source.path(), "resolved config");

    let precision = cli.precision.or(cfg.display.precision);
    let border = cli.border.unwrap_or(cfg.display.border);
    let stdout = io::stdout();
    let mut out = Printer::new(stdout.lock(), cli.output, border, precision);

    match cli.command {
        Commands::Show { file, all } => cmd_show(&mut out, file.as_deref(), all),
        Commands::Add { lhs, rhs } => cmd_binary(&mut out, Op::Add, &lhs, &rhs),
        Commands::Sub { lhs, rhs } => cmd_binary(&mut out, Op::Sub, &lhs, &rhs),
        Commands::Mul { lhs, rhs } => cmd_binary(&mut out, Op::Mul, &lhs, &rhs),
        Commands::Det { file } => cmd_det(&mut out, file.as_deref()),
        Commands::Minor { file, row, column } => {
            cmd_minor(&mut out, file.as_deref(), row, column)
        }
        Commands::Get { file, row, column } => cmd_get(&mut out, file.as_deref(), row, column),
        Commands::Demo => demo::run(&mut out),
        Commands::Config => cmd_config(&source, &cfg, precision, border),
    }
}

/// `RUST_LOG` with a WARN default, plus lifecycle events when configured.
fn build_filter(cfg: &Config) -> Result<EnvFilter> {
    let mut filter = EnvFilter::from_default_env().add_directive(LevelFilter::WARN.into());
    if cfg.trace.lifecycle {
        filter = filter.add_directive("mtx_core::lifecycle=debug".parse::<Directive>()?);
    }
    Ok(filter)
}

fn is_stdin(path: Option<&Path>) -> bool {
    path.map_or(true, |p| p == Path::new("-"))
}

fn source_name(path: Option<&Path>) -> String {
    match path {
        Some(p) if !is_stdin(Some(p)) => p.display().to_string(),
        _ => "stdin".into(),
    }
}

fn load_matrix(path: Option<&Path>) -> Result<Matrix> {
    let m = match path {
        Some(p) if !is_stdin(path) => {
            let file = File::open(p).with_context(|| format!("opening {}", p.display()))?;
            read_matrix(BufReader::new(file))
        }
        _ => read_matrix(io::stdin().lock()),
    }
    .with_context(|| format!("reading matrix from {}", source_name(path)))?;

    debug!(source = %source_name(path), rows = m.rows(), columns = m.columns(), "loaded matrix");
    Ok(m)
}

fn load_all(path: Option<&Path>) -> Result<Vec<Matrix>> {
    let all = match path {
        Some(p) if !is_stdin(path) => {
            let file = File::open(p).with_context(|| format!("opening {}", p.display()))?;
            read_matrices(BufReader::new(file))
        }
        _ => read_matrices(io::stdin().lock()),
    }
    .with_context(|| format!("reading matrices from {}", source_name(path)))?;

    debug!(source = %source_name(path), count = all.len(), "loaded matrices");
    Ok(all)
}

fn cmd_show<W: Write>(out: &mut Printer<W>, file: Option<&Path>, all: bool) -> Result<()> {
    let name = source_name(file);
    if !all {
        return out.matrix(&name, &load_matrix(file)?);
    }

    let matrices = load_all(file)?;
    if matrices.is_empty() {
        bail!("no matrices in {name}");
    }
    for (i, m) in matrices.iter().enumerate() {
        out.matrix(&format!("{name} #{}", i + 1), m)?;
    }
    Ok(())
}

fn cmd_binary<W: Write>(out: &mut Printer<W>, op: Op, lhs: &Path, rhs: &Path) -> Result<()> {
    if is_stdin(Some(lhs)) && is_stdin(Some(rhs)) {
        bail!("only one operand can be read from stdin");
    }
    let a = load_matrix(Some(lhs))?;
    let b = load_matrix(Some(rhs))?;

    let result = match op {
        Op::Add => &a + &b,
        Op::Sub => &a - &b,
        Op::Mul => &a * &b,
    }
    .with_context(|| format!("{op} of {} and {}", lhs.display(), rhs.display()))?;

    let label = format!(
        "{} {} {}",
        source_name(Some(lhs)),
        op.symbol(),
        source_name(Some(rhs))
    );
    out.matrix(&label, &result)
}

fn cmd_det<W: Write>(out: &mut Printer<W>, file: Option<&Path>) -> Result<()> {
    let m = load_matrix(file)?;
    let det = m
        .determinant()
        .with_context(|| format!("determinant of {}", source_name(file)))?;
    out.scalar(&format!("det({})", source_name(file)), det)
}

fn cmd_minor<W: Write>(
    out: &mut Printer<W>,
    file: Option<&Path>,
    row: usize,
    column: usize,
) -> Result<()> {
    let m = load_matrix(file)?;
    let minor = m
        .delete_row_column(row, column)
        .with_context(|| format!("deleting row {row} and column {column}"))?;
    out.matrix(
        &format!("{} without row {row} and column {column}", source_name(file)),
        &minor,
    )
}

fn cmd_get<W: Write>(
    out: &mut Printer<W>,
    file: Option<&Path>,
    row: usize,
    column: usize,
) -> Result<()> {
    let m = load_matrix(file)?;
    let value = m.at(row, column)?;
    out.scalar(&format!("{}({row}, {column})", source_name(file)), value)
}

fn cmd_config(
    source: &ConfigSource,
    cfg: &Config,
    precision: Option<usize>,
    border: Border,
) -> Result<()> {
    println!("Config: {source}");
    println!();
    println!("[display]");
    match precision {
        Some(p) => println!("  precision = {p}"),
        None => println!("  precision = (shortest)"),
    }
    println!("  border = {border}");
    println!();
    println!("[trace]");
    println!("  lifecycle = {}", cfg.trace.lifecycle);
    Ok(())
}
