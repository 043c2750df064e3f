//! drvstat CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Instant;

use drv_prob::analysis::{Analysis, analyze, analyze_cached, analyze_variable};
use drv_prob::{DiscreteRandomVariable, DistributionSpec, ResultCache, TruncationPolicy, series};

mod config;

#[derive(Parser)]
#[command(name = "drvstat")]
#[command(about = "drvstat - statistics of discrete random variables")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    /// Analyzer config (YAML or JSON): truncation policy, cache TTL
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a parametric family and report its statistics
    Family {
        /// Family name (binomial, poisson, geometric, hypergeometric)
        name: String,

        /// Positional parameters, e.g. `10 0.5` for binomial
        #[arg(required = true, allow_negative_numbers = true)]
        params: Vec<f64>,

        #[arg(short, long, value_enum, default_value = "report")]
        format: OutputFormat,

        /// Output file. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Analyze a probability table: an interchange JSON document or manual rows
    Table {
        /// Input document ({"name", "description", "distribution"})
        #[arg(short, long, required_unless_present = "rows", conflicts_with = "rows")]
        input: Option<PathBuf>,

        /// Manual row `x:p`, repeatable. Values are rounded, rows on the same
        /// value merged and the table normalized.
        #[arg(
            long = "row",
            value_name = "X:P",
            value_parser = parse_row,
            allow_hyphen_values = true
        )]
        rows: Vec<(f64, f64)>,

        /// Variable name for manual rows
        #[arg(long, default_value = "X")]
        name: String,

        #[arg(short, long, value_enum, default_value = "report")]
        format: OutputFormat,

        /// Output file. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Analyze a list of family specs (YAML or JSON), reusing repeated results
    Batch {
        /// Input list, e.g. [{"family": "poisson", "lambda": 3.0}]
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the JSON reports. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List supported families and their parameters
    Families,

    /// Print version
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable summary
    Report,
    /// Document, summary and alternatives as JSON
    Json,
    /// X,P,F rows
    Csv,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Reports go to stdout; diagnostics to stderr.
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Family { name, params, format, output } => {
            let cfg = config::load_config(cli.config.as_deref())?;
            cmd_family(&name, &params, &cfg.truncation, format, output.as_deref())
        }
        Commands::Table { input, rows, name, format, output } => match input {
            Some(input) => cmd_table(&input, format, output.as_deref()),
            None => cmd_rows(&name, &rows, format, output.as_deref()),
        },
        Commands::Batch { input, output } => {
            let cfg = config::load_config(cli.config.as_deref())?;
            cmd_batch(&input, &cfg, output.as_deref())
        }
        Commands::Families => {
            for family in drv_prob::available_families() {
                println!("{:<16} {}", family.as_str(), family.parameter_names().join(" "));
            }
            Ok(())
        }
        Commands::Version => {
            println!("drvstat {}", drv_core::VERSION);
            Ok(())
        }
    }
}

fn cmd_family(
    name: &str,
    params: &[f64],
    policy: &TruncationPolicy,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let spec = drv_prob::create_by_name(name, params)?;
    let analysis = analyze(&spec, policy)?;
    tracing::info!(
        distribution = %spec,
        support = analysis.variable.support_size(),
        "distribution generated"
    );
    write_output(output, &render(&analysis, format)?)
}

fn cmd_table(input: &Path, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let variable = drv_prob::import_json(&text)
        .with_context(|| format!("failed to import {}", input.display()))?;
    tracing::info!(name = variable.name(), support = variable.support_size(), "table loaded");
    let analysis = analyze_variable(variable)?;
    write_output(output, &render(&analysis, format)?)
}

fn cmd_rows(
    name: &str,
    rows: &[(f64, f64)],
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let variable = DiscreteRandomVariable::from_pairs(name, "manual table", rows)?;
    tracing::info!(name, rows = rows.len(), support = variable.support_size(), "rows loaded");
    let analysis = analyze_variable(variable)?;
    write_output(output, &render(&analysis, format)?)
}

fn parse_row(s: &str) -> std::result::Result<(f64, f64), String> {
    let (x, p) = s.split_once(':').ok_or_else(|| format!("expected X:P, got {:?}", s))?;
    let x = x.trim().parse::<f64>().map_err(|e| format!("bad value {:?}: {}", x, e))?;
    let p = p.trim().parse::<f64>().map_err(|e| format!("bad probability {:?}: {}", p, e))?;
    Ok((x, p))
}

fn cmd_batch(input: &Path, cfg: &config::AnalyzerConfig, output: Option<&Path>) -> Result<()> {
    let bytes =
        std::fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;
    let specs: Vec<DistributionSpec> = serde_yaml_ng::from_slice(&bytes)
        .with_context(|| format!("invalid spec list {}", input.display()))?;

    let mut cache = ResultCache::new(cfg.cache_ttl());
    let mut reports = Vec::with_capacity(specs.len());
    for (i, spec) in specs.iter().enumerate() {
        let analysis = analyze_cached(spec, &cfg.truncation, &mut cache, Instant::now())
            .with_context(|| format!("entry {}: {}", i, spec))?;
        reports.push(analysis.report());
    }
    let stats = cache.stats();
    let expired = cache.purge_expired_at(Instant::now());
    tracing::info!(
        entries = specs.len(),
        hits = stats.hits,
        misses = stats.misses,
        expired,
        "batch done"
    );

    write_output(output, &format!("{}\n", serde_json::to_string_pretty(&reports)?))
}

fn render(analysis: &Analysis, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Report => render_report(analysis)?,
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(&analysis.report())?),
        OutputFormat::Csv => series::to_csv(&analysis.variable)?,
    })
}

fn render_report(analysis: &Analysis) -> Result<String> {
    let rv = &analysis.variable;
    let mut out = String::new();
    if rv.description().is_empty() {
        writeln!(out, "Variable: {}", rv.name())?;
    } else {
        writeln!(out, "Variable: {} ~ {}", rv.name(), rv.description())?;
    }
    let (min, max) = rv.range()?;
    writeln!(out, "Support: {} values in [{}, {}]", rv.support_size(), min, max)?;
    writeln!(out)?;
    write!(out, "{}", analysis.summary)?;

    if !analysis.alternatives.is_empty() {
        writeln!(out)?;
        writeln!(out, "[Moment-matched alternatives]")?;
        for alt in &analysis.alternatives {
            writeln!(out, "  {}", alt)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "[Table]")?;
    writeln!(out, "  {:>8} {:>14} {:>14}", "x", "P(X=x)", "F(x)")?;
    for row in series::tabular_rows(rv)? {
        writeln!(out, "  {:>8} {:>14.6e} {:>14.6e}", row.x, row.pmf, row.cdf)?;
    }
    Ok(out)
}

fn write_output(output: Option<&Path>, text: &str) -> Result<()> {
    if let Some(path) = output {
        std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
    } else {
        print!("{}", text);
    }
    Ok(())
}
